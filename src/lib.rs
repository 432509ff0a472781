//! rasterkit
//!
//! Pixel-buffer transformation engine for a browser raster image editor,
//! with WASM bindings for JavaScript.
//!
//! ## Image Format
//! Every operation works on [`PixelBuffer`]: RGBA, 8 bits per channel,
//! `(height, width, 4)` row-major. Buffers are immutable once built;
//! transformations return a new buffer and leave the source untouched, so
//! the caller decides what to keep for "reset to original".
//!
//! ## Operations
//! - [`resize_nearest`] / [`ResizeSettings`]: nearest-neighbor resampling
//! - [`apply_kernel`] / [`convolve_3x3`]: 3x3 convolution, clamp-to-edge
//! - [`apply_tone_curve`] / [`ToneCurve`]: two-point tone curve
//! - [`Histogram::build`]: per-channel histogram
//! - [`rgb_to_xyz`], [`rgb_to_lab`], [`contrast`]: pipette readouts
//! - [`Zoom`]: on-screen scaling, never touches pixel data

pub mod buffer;
pub mod error;
pub mod filters;
pub mod viewport;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use buffer::{Pixel, PixelBuffer, Sample};
pub use error::{Error, Result};
pub use filters::color_science::{contrast, rgb_to_lab, rgb_to_xyz, ColorReadout, ContrastScore, Lab, Xyz};
pub use filters::convolution::{apply_kernel, convolve_3x3, Kernel};
pub use filters::histogram::{Channel, Histogram};
pub use filters::resample::{resize_nearest, ResizeSettings, ResizeUnit};
pub use filters::tone_curve::{apply_tone_curve, CurvePoint, ToneCurve, ToneCurvePoints};
pub use viewport::Zoom;
