use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// An event listener that is removed from its target when dropped.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let callback = closure.as_ref().unchecked_ref();
        if let Err(e) = target.add_event_listener_with_callback(event, callback) {
            log::error!("addEventListener({}) error: {:?}", event, e);
            return None;
        }
        Some(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    /// Listen on the element with `id`, if the document has one.
    pub fn on_id(
        document: &web::Document,
        id: &str,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let el = document.get_element_by_id(id)?;
        Self::new(&el, event, handler)
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Current viewport size in CSS pixels.
pub fn viewport_size() -> (u32, u32) {
    let Some(w) = web::window() else {
        return (1, 1);
    };
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0).max(1.0) as u32
    };
    (dim(w.inner_width()), dim(w.inner_height()))
}

/// Resize the canvas backing store to the viewport and return the new size.
pub fn sync_canvas_to_viewport(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let (w, h) = viewport_size();
    canvas.set_width(w);
    canvas.set_height(h);
    (w, h)
}

pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_class(document: &web::Document, id: &str, class: &str, on: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().toggle_with_force(class, on);
    }
}

pub fn set_disabled(document: &web::Document, id: &str, disabled: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        if disabled {
            _ = el.set_attribute("disabled", "");
        } else {
            _ = el.remove_attribute("disabled");
        }
    }
}
