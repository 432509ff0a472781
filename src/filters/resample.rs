//! Nearest-neighbor resampling and the resize dialog settings.
//!
//! Resampling changes the stored pixel data. On-screen zoom is a separate,
//! presentation-only concern handled by [`crate::viewport`].

use rayon::prelude::*;

use crate::buffer::{byte_len, PixelBuffer, CHANNELS};
use crate::error::{Error, Result};

// ============================================================================
// Nearest Neighbor
// ============================================================================

/// Map a destination coordinate to its nearest source coordinate.
#[inline]
fn source_index(dst: usize, scale: f64, src_len: usize) -> usize {
    // Clamp guards float rounding on the last row/column.
    ((dst as f64 * scale).floor() as usize).min(src_len - 1)
}

/// Resize `src` to `new_width` x `new_height` with nearest-neighbor sampling.
///
/// All four channels are copied verbatim from the chosen source pixel; no
/// blending happens. Resizing to the source dimensions is lossless.
///
/// # Errors
/// `InvalidDimensions` when either target dimension is zero or the target
/// byte length overflows.
pub fn resize_nearest(src: &PixelBuffer, new_width: usize, new_height: usize) -> Result<PixelBuffer> {
    let len = byte_len(new_width, new_height).ok_or_else(|| Error::dimensions(new_width, new_height))?;

    let (src_w, src_h) = (src.width(), src.height());
    tracing::debug!(src_w, src_h, new_width, new_height, "resize_nearest");

    let scale_x = src_w as f64 / new_width as f64;
    let scale_y = src_h as f64 / new_height as f64;

    // Column lookup is shared by every row
    let src_cols: Vec<usize> = (0..new_width)
        .map(|x| source_index(x, scale_x, src_w) * CHANNELS)
        .collect();

    let stride = new_width * CHANNELS;
    let mut output = vec![0u8; len];

    output
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            let src_row = src.row(source_index(y, scale_y, src_h));
            for (dst_px, &sx) in row.chunks_exact_mut(CHANNELS).zip(&src_cols) {
                dst_px.copy_from_slice(&src_row[sx..sx + CHANNELS]);
            }
        });

    PixelBuffer::from_bytes(new_width, new_height, output)
}

// ============================================================================
// Resize Settings
// ============================================================================

/// Unit of the width/height fields in [`ResizeSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResizeUnit {
    #[default]
    Pixels,
    /// Percentage of the original dimensions.
    Percent,
}

/// State of the resize dialog.
///
/// With `keep_proportions`, editing one dimension rescales the other by the
/// same ratio (rounded, never below 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResizeSettings {
    pub unit: ResizeUnit,
    pub width: usize,
    pub height: usize,
    pub keep_proportions: bool,
}

impl Default for ResizeSettings {
    fn default() -> Self {
        ResizeSettings::percent()
    }
}

/// Rescale `other` by `new / old`, rounded and floored at 1.
fn proportional(other: usize, old: usize, new: usize) -> usize {
    if old == 0 {
        return other.max(1);
    }
    let scaled = (other as f64 * new as f64 / old as f64).round() as usize;
    scaled.max(1)
}

impl ResizeSettings {
    /// Pixel-mode settings starting at the given image size.
    pub fn pixels(width: usize, height: usize) -> Self {
        ResizeSettings {
            unit: ResizeUnit::Pixels,
            width,
            height,
            keep_proportions: false,
        }
    }

    /// Percent-mode settings at 100 %.
    pub fn percent() -> Self {
        ResizeSettings {
            unit: ResizeUnit::Percent,
            width: 100,
            height: 100,
            keep_proportions: false,
        }
    }

    pub fn with_proportions(mut self, keep: bool) -> Self {
        self.keep_proportions = keep;
        self
    }

    pub fn set_width(&mut self, width: usize) {
        if self.keep_proportions {
            self.height = proportional(self.height, self.width, width);
        }
        self.width = width;
    }

    pub fn set_height(&mut self, height: usize) {
        if self.keep_proportions {
            self.width = proportional(self.width, self.height, height);
        }
        self.height = height;
    }

    /// Resolve the target size in pixels for an image of `orig_w` x `orig_h`.
    ///
    /// # Errors
    /// `InvalidDimensions` if a resolved dimension is zero.
    pub fn target_dimensions(&self, orig_w: usize, orig_h: usize) -> Result<(usize, usize)> {
        let (w, h) = match self.unit {
            ResizeUnit::Pixels => (self.width, self.height),
            ResizeUnit::Percent => (
                (orig_w as f64 * self.width as f64 / 100.0).round() as usize,
                (orig_h as f64 * self.height as f64 / 100.0).round() as usize,
            ),
        };
        if w == 0 || h == 0 {
            return Err(Error::dimensions(w, h));
        }
        Ok((w, h))
    }

    /// Resize `src` according to these settings.
    pub fn apply(&self, src: &PixelBuffer) -> Result<PixelBuffer> {
        let (w, h) = self.target_dimensions(src.width(), src.height())?;
        resize_nearest(src, w, h)
    }
}
