#![cfg(target_arch = "wasm32")]
//! Browser host: draws into the page's `#viewport` canvas on every animation
//! frame.

mod canvas;
mod console;
mod frames;

pub use canvas::{CanvasContext, CanvasSurface};
pub use frames::AnimationFrames;

use simview_kernel::{WanderConfig, WanderSimulation};
use simview_render::{RenderLoop, SurfaceAdapter};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

const VIEWPORT_ID: &str = "viewport";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console::init_logging();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    let canvas = document
        .get_element_by_id(VIEWPORT_ID)
        .ok_or_else(|| JsValue::from_str("missing #viewport canvas"))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("#viewport is not a canvas"))?;

    let adapter =
        SurfaceAdapter::initialize(CanvasSurface::new(canvas), window.device_pixel_ratio())
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

    let seed = js_sys::Date::now() as u64;
    let simulation = WanderSimulation::new(seed, WanderConfig::default())
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    let mut render_loop = RenderLoop::new(adapter, simulation);
    let frames = AnimationFrames::new(window);
    // Nobody awaits this promise, so a halted loop surfaces as an
    // unhandled rejection.
    let _ = wasm_bindgen_futures::future_to_promise(async move {
        render_loop
            .run(frames)
            .await
            .map(|rendered| JsValue::from_f64(rendered as f64))
            .map_err(|err| JsValue::from_str(&err.to_string()))
    });

    tracing::info!(seed, "viewer started");
    Ok(())
}
