use crate::constants::{HIDDEN_CLASS, START_OVERLAY_ID};
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(START_OVERLAY_ID) {
        _ = el.class_list().remove_1(HIDDEN_CLASS);
        // fallback for pages without the class rule
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(START_OVERLAY_ID) {
        _ = el.class_list().add_1(HIDDEN_CLASS);
        _ = el.set_attribute("style", "display:none");
    }
}
