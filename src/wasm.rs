//! WebAssembly exports for the editor's filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen.
//!
//! Image arguments are flat RGBA byte arrays (`ImageData.data`) with
//! explicit `width` and `height`. Errors are returned to JS as string
//! values so the UI can show a corrected-input prompt.

use wasm_bindgen::prelude::*;

use crate::buffer::{PixelBuffer, Sample};
use crate::error::Error;
use crate::filters::color_science::{contrast, rgb_to_lab, rgb_to_xyz};
use crate::filters::convolution::{apply_kernel, Kernel};
use crate::filters::histogram::Histogram;
use crate::filters::resample::resize_nearest;
use crate::filters::tone_curve::{apply_tone_curve, CurvePoint, ToneCurvePoints};

fn to_js(err: Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn buffer(data: &[u8], width: u32, height: u32) -> Result<PixelBuffer, JsValue> {
    PixelBuffer::from_bytes(width as usize, height as usize, data.to_vec()).map_err(to_js)
}

// ============================================================================
// Geometry
// ============================================================================

/// Nearest-neighbor resize.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width`, `height` - Source dimensions
/// * `new_width`, `new_height` - Target dimensions, both at least 1
///
/// # Returns
/// Flat RGBA bytes of length new_width * new_height * 4
#[wasm_bindgen]
pub fn resize_nearest_wasm(
    data: &[u8],
    width: u32,
    height: u32,
    new_width: u32,
    new_height: u32,
) -> Result<Vec<u8>, JsValue> {
    let src = buffer(data, width, height)?;
    let out = resize_nearest(&src, new_width as usize, new_height as usize).map_err(to_js)?;
    Ok(out.into_bytes())
}

// ============================================================================
// Convolution
// ============================================================================

/// Convolve with 9 raw weights. `divisor` defaults to the weight sum.
#[wasm_bindgen]
pub fn convolve_wasm(
    data: &[u8],
    width: u32,
    height: u32,
    weights: &[i32],
    divisor: Option<i32>,
) -> Result<Vec<u8>, JsValue> {
    let weights: [i32; 9] = weights
        .try_into()
        .map_err(|_| JsValue::from_str("Kernel must have exactly 9 weights"))?;
    let src = buffer(data, width, height)?;
    let out = apply_kernel(&src, &Kernel::Custom { weights, divisor }).map_err(to_js)?;
    Ok(out.into_bytes())
}

/// Convolve with a named preset: identity, sharpen, gaussian, box_blur, edge_detect.
#[wasm_bindgen]
pub fn convolve_preset_wasm(
    data: &[u8],
    width: u32,
    height: u32,
    preset: &str,
) -> Result<Vec<u8>, JsValue> {
    let kernel: Kernel = preset.parse().map_err(to_js)?;
    let src = buffer(data, width, height)?;
    let out = apply_kernel(&src, &kernel).map_err(to_js)?;
    Ok(out.into_bytes())
}

/// Weights of a named preset, for filling the 3x3 input grid.
#[wasm_bindgen]
pub fn kernel_weights_wasm(preset: &str) -> Result<Vec<i32>, JsValue> {
    let kernel: Kernel = preset.parse().map_err(to_js)?;
    Ok(kernel.weights().to_vec())
}

// ============================================================================
// Tonal
// ============================================================================

/// Apply the two-point tone curve.
#[wasm_bindgen]
pub fn tone_curve_wasm(
    data: &[u8],
    width: u32,
    height: u32,
    enter_in: u8,
    enter_out: u8,
    exit_in: u8,
    exit_out: u8,
) -> Result<Vec<u8>, JsValue> {
    let points = ToneCurvePoints {
        enter: CurvePoint::new(enter_in, enter_out),
        exit: CurvePoint::new(exit_in, exit_out),
    };
    let src = buffer(data, width, height)?;
    let out = apply_tone_curve(&src, points).map_err(to_js)?;
    Ok(out.into_bytes())
}

/// Histogram counts: 256 red, then 256 green, then 256 blue.
#[wasm_bindgen]
pub fn histogram_wasm(data: &[u8], width: u32, height: u32) -> Result<Vec<f64>, JsValue> {
    let src = buffer(data, width, height)?;
    // JS numbers hold counts exactly up to 2^53
    Ok(Histogram::build(&src).to_vec().into_iter().map(|c| c as f64).collect())
}

// ============================================================================
// Color Readouts
// ============================================================================

/// CIE XYZ of an RGB color as `[x, y, z]`.
#[wasm_bindgen]
pub fn rgb_to_xyz_wasm(r: u8, g: u8, b: u8) -> Vec<i32> {
    let xyz = rgb_to_xyz(Sample::new(r, g, b));
    vec![xyz.x, xyz.y, xyz.z]
}

/// CIE L*a*b* of an RGB color as `[l, a, b]`.
#[wasm_bindgen]
pub fn rgb_to_lab_wasm(r: u8, g: u8, b: u8) -> Vec<i32> {
    let lab = rgb_to_lab(Sample::new(r, g, b));
    vec![lab.l, lab.a, lab.b]
}

/// Contrast between two colors as `[ratio, passes]`.
///
/// `ratio` has two decimals; `passes` is 1.0 when the ratio meets the 4.5
/// threshold, 0.0 otherwise.
#[wasm_bindgen]
pub fn contrast_wasm(r1: u8, g1: u8, b1: u8, r2: u8, g2: u8, b2: u8) -> Vec<f64> {
    let score = contrast(Sample::new(r1, g1, b1), Sample::new(r2, g2, b2));
    vec![score.ratio, if score.passes_threshold { 1.0 } else { 0.0 }]
}
