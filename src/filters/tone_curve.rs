//! Two-point tone curve.
//!
//! The curve runs flat at `enter.output` up to `enter.input`, rises linearly
//! to `exit`, then stays flat at `exit.output` through 255. It is applied to
//! R, G and B through a 256-entry lookup table; alpha is untouched.

use rayon::prelude::*;

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::{Error, Result};

/// A control point of the curve, both coordinates 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    pub input: u8,
    pub output: u8,
}

impl CurvePoint {
    pub const fn new(input: u8, output: u8) -> Self {
        CurvePoint { input, output }
    }
}

/// The two control points edited in the curves dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToneCurvePoints {
    pub enter: CurvePoint,
    pub exit: CurvePoint,
}

impl Default for ToneCurvePoints {
    /// The identity curve.
    fn default() -> Self {
        ToneCurvePoints {
            enter: CurvePoint::new(0, 0),
            exit: CurvePoint::new(255, 255),
        }
    }
}

/// A validated curve with its precomputed lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneCurve {
    points: ToneCurvePoints,
    lut: [u8; 256],
}

impl ToneCurve {
    /// # Errors
    /// `InvalidCurve` unless `enter.input < exit.input`.
    pub fn new(points: ToneCurvePoints) -> Result<Self> {
        let ToneCurvePoints { enter, exit } = points;
        if enter.input >= exit.input {
            return Err(Error::InvalidCurve {
                enter: enter.input,
                exit: exit.input,
            });
        }

        let (x0, y0) = (enter.input as f32, enter.output as f32);
        let (x1, y1) = (exit.input as f32, exit.output as f32);
        let slope = (y1 - y0) / (x1 - x0);

        let mut lut = [0u8; 256];
        for (v, out) in lut.iter_mut().enumerate() {
            let v = v as u8;
            *out = if v <= enter.input {
                enter.output
            } else if v >= exit.input {
                exit.output
            } else {
                (y0 + (v as f32 - x0) * slope).round().clamp(0.0, 255.0) as u8
            };
        }

        Ok(ToneCurve { points, lut })
    }

    pub fn points(&self) -> ToneCurvePoints {
        self.points
    }

    #[inline]
    pub fn map(&self, v: u8) -> u8 {
        self.lut[v as usize]
    }

    pub fn lut(&self) -> &[u8; 256] {
        &self.lut
    }

    /// Vertices of the curve as drawn over the histogram:
    /// `(0, enter.out)`, `enter`, `exit`, `(255, exit.out)`.
    pub fn polyline(&self) -> [(u8, u8); 4] {
        let ToneCurvePoints { enter, exit } = self.points;
        [
            (0, enter.output),
            (enter.input, enter.output),
            (exit.input, exit.output),
            (255, exit.output),
        ]
    }

    /// Remap R, G and B of every pixel; alpha is copied.
    pub fn apply(&self, src: &PixelBuffer) -> PixelBuffer {
        tracing::debug!(
            width = src.width(),
            height = src.height(),
            points = ?self.points,
            "tone_curve"
        );

        let mut output = src.clone();
        let stride = src.width() * CHANNELS;
        let lut = &self.lut;

        output
            .bytes_mut()
            .par_chunks_mut(stride)
            .for_each(|row| {
                for px in row.chunks_exact_mut(CHANNELS) {
                    px[0] = lut[px[0] as usize];
                    px[1] = lut[px[1] as usize];
                    px[2] = lut[px[2] as usize];
                }
            });
        output
    }
}

/// Validate `points` and apply the curve to `src`.
pub fn apply_tone_curve(src: &PixelBuffer, points: ToneCurvePoints) -> Result<PixelBuffer> {
    Ok(ToneCurve::new(points)?.apply(src))
}
