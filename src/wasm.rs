//! WebAssembly exports for the pictool filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen.
//!
//! Images cross the boundary as flat RGBA byte buffers
//! (length = width * height * 4) plus their dimensions. Transpose and rotate
//! return a buffer whose width and height are swapped. Filter errors are
//! raised as JavaScript exceptions carrying the error message.

use wasm_bindgen::prelude::*;

use crate::{FilterError, Grid, Params, Registry};

fn to_js(err: FilterError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn run(name: &str, data: &[u8], width: usize, height: usize, params: &Params) -> Result<Vec<u8>, JsValue> {
    let mut grid = Grid::from_rgba_bytes(height, width, data).map_err(to_js)?;
    Registry::builtin()
        .apply(name, &mut grid, params)
        .map_err(to_js)?;
    Ok(grid.to_rgba_bytes())
}

// ============================================================================
// Geometric Filters
// ============================================================================

/// Mirror left-right, or top-bottom if `vertical`.
#[wasm_bindgen]
pub fn flip_wasm(data: &[u8], width: usize, height: usize, vertical: bool) -> Result<Vec<u8>, JsValue> {
    run("flip", data, width, height, &Params::new().with("vertical", vertical))
}

/// Swap rows and columns. Output is `height` pixels wide and `width` tall.
#[wasm_bindgen]
pub fn transpose_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    run("transpose", data, width, height, &Params::new())
}

/// Rotate 90 degrees left, or right if `right`. Output dimensions are swapped.
#[wasm_bindgen]
pub fn rotate_wasm(data: &[u8], width: usize, height: usize, right: bool) -> Result<Vec<u8>, JsValue> {
    run("rotate", data, width, height, &Params::new().with("right", right))
}

// ============================================================================
// Area, Radial and Colour Filters
// ============================================================================

#[wasm_bindgen]
pub fn blur_wasm(data: &[u8], width: usize, height: usize, radius: i32) -> Result<Vec<u8>, JsValue> {
    run("blur", data, width, height, &Params::new().with("radius", radius))
}

#[wasm_bindgen]
pub fn pixellate_wasm(data: &[u8], width: usize, height: usize, step: i32) -> Result<Vec<u8>, JsValue> {
    run("pixellate", data, width, height, &Params::new().with("step", step))
}

#[wasm_bindgen]
pub fn vignette_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    run("vignette", data, width, height, &Params::new())
}

#[wasm_bindgen]
pub fn mono_wasm(data: &[u8], width: usize, height: usize, sepia: bool) -> Result<Vec<u8>, JsValue> {
    run("mono", data, width, height, &Params::new().with("sepia", sepia))
}

#[wasm_bindgen]
pub fn dered_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    run("dered", data, width, height, &Params::new())
}

// ============================================================================
// Generic Dispatch
// ============================================================================

/// Apply any registered filter by name.
///
/// # Arguments
/// * `name` - Filter name, e.g. `"blur"`
/// * `data` - Flat RGBA bytes
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `params_json` - JSON object of parameters, e.g. `{"radius": 3}`; empty for defaults
#[wasm_bindgen]
pub fn apply_filter_wasm(
    name: &str,
    data: &[u8],
    width: usize,
    height: usize,
    params_json: &str,
) -> Result<Vec<u8>, JsValue> {
    let params: Params = if params_json.trim().is_empty() {
        Params::new()
    } else {
        serde_json::from_str(params_json)
            .map_err(|e| JsValue::from_str(&format!("invalid parameters: {e}")))?
    };
    run(name, data, width, height, &params)
}
