//! Filter modules for pixel-buffer transformations.
//!
//! ## Buffer Format
//!
//! Every filter works on [`PixelBuffer`](crate::PixelBuffer): RGBA u8,
//! shape (H, W, 4), row-major.
//!
//! ## Architecture
//!
//! All filters follow these principles:
//! - **Pure** - the source buffer is borrowed, a new buffer is returned
//! - **Alpha preservation** - alpha is copied, never filtered
//! - **Row-parallel** - rows are independent and processed with rayon
//!
//! ## Filter Categories
//!
//! - **Geometry**: nearest-neighbor resize, resize dialog settings
//! - **Convolution**: 3x3 presets and custom kernels
//! - **Tonal**: two-point tone curve, per-channel histogram
//! - **Color science**: XYZ/LAB readouts, contrast heuristic

pub mod color_science;
pub mod convolution;
pub mod histogram;
pub mod resample;
pub mod tone_curve;
