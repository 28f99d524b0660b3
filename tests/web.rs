// Browser tests (wasm-pack test --headless --firefox) for the canvas and
// Blob boundaries.

#![cfg(target_arch = "wasm32")]
use viz_core::constants::{SILENT_PLACEHOLDER_RATE, SILENT_PLACEHOLDER_SECS};
use viz_core::scene::{self, Gradient};
use viz_core::{wav, AudioBands, Palette, PointerTracker};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys as web;

wasm_bindgen_test_configure!(run_in_browser);

fn context_2d() -> web::CanvasRenderingContext2d {
    let document = web::window().unwrap().document().unwrap();
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap();
    canvas.set_width(320);
    canvas.set_height(240);
    canvas
        .get_context("2d")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap()
}

#[wasm_bindgen_test]
fn generated_color_stops_parse_as_css() {
    let ctx = context_2d();
    let bands = AudioBands::from_magnitudes(&[180u8; 256]);
    let pal = Palette::compute(480.0, &bands, &PointerTracker::default().color_influence());
    let shape = scene::flowing_shape(glam::Vec2::new(320.0, 240.0), 480.0, &bands, &pal);
    let Gradient::Radial { stops, .. } = shape.fill else {
        panic!("shape fill should be radial");
    };
    let g = ctx.create_linear_gradient(0.0, 0.0, 320.0, 240.0);
    for stop in stops {
        // Malformed color text makes addColorStop throw.
        g.add_color_stop(stop.offset, &stop.color.css()).unwrap();
    }
}

#[wasm_bindgen_test]
async fn silent_placeholder_becomes_a_wav_blob_url() {
    let url = viz_web::audio::make_placeholder_url().unwrap();
    assert!(url.starts_with("blob:"));

    // The URL resolves to a WAV of the expected length.
    let response: web::Response = JsFuture::from(web::window().unwrap().fetch_with_str(&url))
        .await
        .unwrap()
        .dyn_into()
        .unwrap();
    let blob: web::Blob = JsFuture::from(response.blob().unwrap())
        .await
        .unwrap()
        .dyn_into()
        .unwrap();
    let expected = wav::silent_wav(SILENT_PLACEHOLDER_SECS, SILENT_PLACEHOLDER_RATE);
    assert_eq!(blob.size() as usize, expected.len());
    assert_eq!(blob.type_(), "audio/wav");

    web::Url::revoke_object_url(&url).unwrap();
}
