use wasm_bindgen::prelude::*;

use crate::clock::Clock;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    fn performance_now() -> f64;
}

/// [`Clock`] backed by `performance.now()`
#[derive(Debug, Clone, Copy, Default)]
pub struct PerformanceClock;

impl Clock for PerformanceClock {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn now_ms(&self) -> u64 {
        let now = performance_now();
        if now.is_finite() && now > 0.0 {
            now as u64
        } else {
            0
        }
    }
}
