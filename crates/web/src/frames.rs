use js_sys::Promise;
use simview_render::FrameScheduler;
use wasm_bindgen_futures::JsFuture;
use web_sys::Window;

use crate::canvas::js_error;

/// Awaits `requestAnimationFrame`, one request per frame.
///
/// Browsers pause delivery for hidden tabs; the pending frame simply resolves
/// later.
pub struct AnimationFrames {
    window: Window,
}

impl AnimationFrames {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for AnimationFrames {
    async fn next_frame(&mut self) -> Option<f64> {
        let mut requested = Ok(0);
        let promise = Promise::new(&mut |resolve, _reject| {
            requested = self.window.request_animation_frame(&resolve);
        });
        if let Err(err) = requested {
            tracing::warn!("requestAnimationFrame refused: {}", js_error(&err));
            return None;
        }

        match JsFuture::from(promise).await {
            Ok(timestamp) => timestamp.as_f64(),
            Err(err) => {
                tracing::warn!("animation frame rejected: {}", js_error(&err));
                None
            }
        }
    }
}
