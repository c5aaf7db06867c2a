//! WebAssembly bindings for the browser front-end
//!
//! Thin wrappers: all computation lives in the native modules so it is
//! tested without a JS host.

use wasm_bindgen::prelude::*;

use crate::comparison::{comparison_json, Comparison};

// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

/// Similarity score (0-100) of a transcription against the reference text
#[wasm_bindgen]
pub fn score_texts(origin: &str, candidate: &str) -> f64 {
    Comparison::new(origin, candidate).score()
}

/// Full comparison report as JSON (score, distance, segments, diff view)
#[wasm_bindgen]
pub fn compare_texts(origin: &str, candidate: &str) -> Result<String, JsValue> {
    comparison_json(origin, candidate)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}
