//! 3x3 convolution filters: identity, sharpen, Gaussian, box blur, edge detect
//! and user-supplied kernels.
//!
//! ## Border Handling
//!
//! Neighbors outside the image are clamped to the nearest edge pixel, so
//! every pixel (including the outermost rows and columns) is filtered and
//! the output is reproducible regardless of image size.
//!
//! ## Channels
//!
//! R, G and B are convolved independently; alpha is copied from the source.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::{Error, Result};

// ============================================================================
// Kernels
// ============================================================================

const IDENTITY: [i32; 9] = [0, 0, 0, 0, 1, 0, 0, 0, 0];
const SHARPEN: [i32; 9] = [0, -1, 0, -1, 5, -1, 0, -1, 0];
const GAUSSIAN_3X3: [i32; 9] = [1, 2, 1, 2, 4, 2, 1, 2, 1];
const BOX_BLUR_3X3: [i32; 9] = [1, 1, 1, 1, 1, 1, 1, 1, 1];
const EDGE_DETECT: [i32; 9] = [-1, -1, -1, -1, 8, -1, -1, -1, -1];

fn weight_sum(weights: &[i32; 9]) -> i32 {
    weights.iter().fold(0i32, |acc, &w| acc.saturating_add(w))
}

/// A 3x3 kernel, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Kernel {
    #[default]
    Identity,
    Sharpen,
    Gaussian3x3,
    BoxBlur3x3,
    /// Laplacian; weights sum to zero.
    EdgeDetect,
    /// User-entered weights. `divisor: None` means "sum of weights".
    Custom { weights: [i32; 9], divisor: Option<i32> },
}

impl Kernel {
    /// Every named preset, in the order the filter dialog lists them.
    pub const PRESETS: [Kernel; 5] = [
        Kernel::Identity,
        Kernel::Sharpen,
        Kernel::Gaussian3x3,
        Kernel::BoxBlur3x3,
        Kernel::EdgeDetect,
    ];

    pub fn custom(weights: [i32; 9]) -> Self {
        Kernel::Custom { weights, divisor: None }
    }

    pub fn weights(&self) -> [i32; 9] {
        match self {
            Kernel::Identity => IDENTITY,
            Kernel::Sharpen => SHARPEN,
            Kernel::Gaussian3x3 => GAUSSIAN_3X3,
            Kernel::BoxBlur3x3 => BOX_BLUR_3X3,
            Kernel::EdgeDetect => EDGE_DETECT,
            Kernel::Custom { weights, .. } => *weights,
        }
    }

    /// Effective normalization divisor.
    ///
    /// Presets use the weight sum floored at 1. Custom kernels use the
    /// override if present, otherwise the weight sum.
    ///
    /// # Errors
    /// `DivisorZero` for a custom kernel whose effective divisor is 0.
    pub fn divisor(&self) -> Result<i32> {
        match self {
            Kernel::Custom { divisor: Some(0), .. } => Err(Error::DivisorZero),
            Kernel::Custom { divisor: Some(d), .. } => Ok(*d),
            Kernel::Custom { weights, divisor: None } => match weight_sum(weights) {
                0 => Err(Error::DivisorZero),
                sum => Ok(sum),
            },
            preset => Ok(weight_sum(&preset.weights()).max(1)),
        }
    }

    /// Preset name as accepted by [`Kernel::from_str`]. `None` for custom kernels.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Kernel::Identity => Some("identity"),
            Kernel::Sharpen => Some("sharpen"),
            Kernel::Gaussian3x3 => Some("gaussian"),
            Kernel::BoxBlur3x3 => Some("box_blur"),
            Kernel::EdgeDetect => Some("edge_detect"),
            Kernel::Custom { .. } => None,
        }
    }
}

impl FromStr for Kernel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Kernel::PRESETS
            .into_iter()
            .find(|k| k.name() == Some(s))
            .ok_or_else(|| Error::UnknownKernel(s.to_string()))
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "custom{:?}", self.weights()),
        }
    }
}

// ============================================================================
// Convolution
// ============================================================================

/// Apply a kernel with its effective divisor.
pub fn apply_kernel(src: &PixelBuffer, kernel: &Kernel) -> Result<PixelBuffer> {
    let divisor = kernel.divisor()?;
    tracing::debug!(%kernel, divisor, "apply_kernel");
    convolve_3x3(src, &kernel.weights(), divisor)
}

/// Convolve RGB with `weights`, dividing each sum by `divisor`.
///
/// Results are rounded to nearest and clamped to 0-255. Reads only from
/// `src`, so rows are independent and computed in parallel.
///
/// # Errors
/// `DivisorZero` when `divisor == 0`.
pub fn convolve_3x3(src: &PixelBuffer, weights: &[i32; 9], divisor: i32) -> Result<PixelBuffer> {
    if divisor == 0 {
        return Err(Error::DivisorZero);
    }

    let (width, height) = (src.width(), src.height());
    tracing::debug!(width, height, ?weights, divisor, "convolve_3x3");

    let divisor_f = divisor as f64;
    let stride = width * CHANNELS;
    let mut output = vec![0u8; stride * height];

    output
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, out_row)| {
            let rows = [
                src.row(y.saturating_sub(1)),
                src.row(y),
                src.row((y + 1).min(height - 1)),
            ];

            for x in 0..width {
                let cols = [
                    x.saturating_sub(1) * CHANNELS,
                    x * CHANNELS,
                    (x + 1).min(width - 1) * CHANNELS,
                ];
                let dst = x * CHANNELS;

                for c in 0..3 {
                    let mut sum = 0i64;
                    for (ky, row) in rows.iter().enumerate() {
                        for (kx, &col) in cols.iter().enumerate() {
                            sum += weights[ky * 3 + kx] as i64 * row[col + c] as i64;
                        }
                    }
                    out_row[dst + c] = (sum as f64 / divisor_f).round().clamp(0.0, 255.0) as u8;
                }
                out_row[dst + 3] = rows[1][dst + 3];
            }
        });

    PixelBuffer::from_bytes(width, height, output)
}
