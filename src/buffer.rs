//! RGBA pixel buffer shared by every filter.
//!
//! A [`PixelBuffer`] is an `(height, width, 4)` u8 array in standard layout.
//! Buffers are never mutated after construction: filters borrow the source
//! and hand back a new buffer, so the caller can always keep the original
//! around for "reset" in the editor.

use ndarray::{Array3, ArrayView3};

use crate::error::{Error, Result};

/// Number of channels per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Byte length of a `width` x `height` RGBA image; `None` if empty or overflowing.
pub(crate) fn byte_len(width: usize, height: usize) -> Option<usize> {
    if width == 0 || height == 0 {
        return None;
    }
    width.checked_mul(height)?.checked_mul(CHANNELS)
}

/// An opaque RGB color, 0-255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Sample {
    pub const BLACK: Sample = Sample::new(0, 0, 0);
    pub const WHITE: Sample = Sample::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Sample { r, g, b }
    }
}

impl From<[u8; 3]> for Sample {
    fn from(rgb: [u8; 3]) -> Self {
        Sample::new(rgb[0], rgb[1], rgb[2])
    }
}

/// A sample plus its alpha, as read from a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub color: Sample,
    pub alpha: u8,
}

impl Pixel {
    pub fn to_rgba(self) -> [u8; 4] {
        [self.color.r, self.color.g, self.color.b, self.alpha]
    }
}

/// Width/height-tagged RGBA image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Array3<u8>,
}

impl PixelBuffer {
    /// Wrap row-major RGBA bytes.
    ///
    /// # Errors
    /// `InvalidDimensions` when either dimension is zero or
    /// `bytes.len() != width * height * 4`.
    pub fn from_bytes(width: usize, height: usize, bytes: Vec<u8>) -> Result<Self> {
        let len = bytes.len();
        let pixels = byte_len(width, height)
            .filter(|&expected| expected == len)
            .and_then(|_| Array3::from_shape_vec((height, width, CHANNELS), bytes).ok())
            .ok_or(Error::InvalidDimensions { width, height, len })?;
        Ok(PixelBuffer { pixels })
    }

    /// Take ownership of an `(height, width, 4)` array.
    ///
    /// Slices and other views are copied into a fresh vector holding exactly
    /// `width * height * 4` bytes in row-major order.
    pub fn from_array(array: Array3<u8>) -> Result<Self> {
        let (height, width, channels) = array.dim();
        if width == 0 || height == 0 || channels != CHANNELS {
            return Err(Error::InvalidDimensions {
                width,
                height,
                len: array.len(),
            });
        }

        let len = array.len();
        let bytes = if array.is_standard_layout() {
            // Contiguous from the offset, but the backing vector may hold
            // sliced-away rows on either side.
            let (mut raw, offset) = array.into_raw_vec_and_offset();
            raw.drain(..offset.unwrap_or(0));
            raw.truncate(len);
            raw
        } else {
            array.iter().copied().collect()
        };
        Self::from_bytes(width, height, bytes)
    }

    /// A buffer where every pixel is `rgba`.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Result<Self> {
        let len = byte_len(width, height).ok_or_else(|| Error::dimensions(width, height))?;
        let bytes = rgba.iter().copied().cycle().take(len).collect();
        Self::from_bytes(width, height, bytes)
    }

    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    pub fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }

    /// Read the pixel at `(x, y)`, or `None` outside the image.
    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let p = &self.pixels;
        Some(Pixel {
            color: Sample::new(p[[y, x, 0]], p[[y, x, 1]], p[[y, x, 2]]),
            alpha: p[[y, x, 3]],
        })
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }

    /// Raw row-major RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        // Every constructor stores a standard-layout array.
        self.pixels.as_slice().unwrap_or_default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        // Storage always comes from `from_bytes`: offset 0, exact length.
        self.pixels.into_raw_vec_and_offset().0
    }

    /// Filters that keep the dimensions edit a fresh clone in place.
    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        self.pixels.as_slice_mut().unwrap_or_default()
    }

    /// Bytes of a single row.
    pub(crate) fn row(&self, y: usize) -> &[u8] {
        let stride = self.width() * CHANNELS;
        &self.as_bytes()[y * stride..(y + 1) * stride]
    }
}
