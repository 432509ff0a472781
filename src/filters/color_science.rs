//! Color science: RGB -> XYZ -> L*a*b* conversion and contrast scoring.
//!
//! These readouts back the pipette tool. They operate on opaque
//! [`Sample`]s; alpha never enters the color math.
//!
//! All results are rounded to integers per axis (except the contrast ratio,
//! which keeps two decimals), matching what the editor displays.

use crate::buffer::{PixelBuffer, Sample};

// ============================================================================
// Constants
// ============================================================================

/// sRGB -> XYZ matrix, observer 2°, illuminant D65.
const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124, 0.3576, 0.1805],
    [0.2126, 0.7152, 0.0722],
    [0.0193, 0.1192, 0.9505],
];

/// D65 reference white (X, Y, Z).
const D65_WHITE: (f64, f64, f64) = (95.047, 100.0, 108.883);

const LAB_EPSILON: f64 = 0.008856;
const LAB_KAPPA: f64 = 7.787;
const LAB_OFFSET: f64 = 16.0 / 116.0;

/// Ratio at or above which [`ContrastScore::passes_threshold`] is set.
pub const CONTRAST_THRESHOLD: f64 = 4.5;

// ============================================================================
// Types
// ============================================================================

/// CIE XYZ tristimulus values, rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Xyz {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// CIE L*a*b* values, rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lab {
    pub l: i32,
    pub a: i32,
    pub b: i32,
}

/// Result of [`contrast`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContrastScore {
    /// Brighter score over darker score, two decimals.
    pub ratio: f64,
    /// `ratio >= 4.5`.
    pub passes_threshold: bool,
}

// ============================================================================
// RGB -> XYZ -> LAB
// ============================================================================

/// Gamma-expand one sRGB channel (0.0-1.0).
#[inline]
fn linearize(c: f64) -> f64 {
    if c > 0.04045 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

/// CIE cube-root-or-linear companding.
#[inline]
fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        LAB_KAPPA * t + LAB_OFFSET
    }
}

/// Convert an sRGB sample to CIE XYZ (D65/2°), scaled so that Y of white is 100.
pub fn rgb_to_xyz(sample: Sample) -> Xyz {
    let r = linearize(sample.r as f64 / 255.0) * 100.0;
    let g = linearize(sample.g as f64 / 255.0) * 100.0;
    let b = linearize(sample.b as f64 / 255.0) * 100.0;

    let [mx, my, mz] = SRGB_TO_XYZ;
    Xyz {
        x: (r * mx[0] + g * mx[1] + b * mx[2]).round() as i32,
        y: (r * my[0] + g * my[1] + b * my[2]).round() as i32,
        z: (r * mz[0] + g * mz[1] + b * mz[2]).round() as i32,
    }
}

/// Convert an sRGB sample to CIE L*a*b*.
///
/// Works from the rounded XYZ readout, so LAB always agrees with the XYZ
/// values shown next to it.
pub fn rgb_to_lab(sample: Sample) -> Lab {
    let xyz = rgb_to_xyz(sample);

    let fx = lab_f(xyz.x as f64 / D65_WHITE.0);
    let fy = lab_f(xyz.y as f64 / D65_WHITE.1);
    let fz = lab_f(xyz.z as f64 / D65_WHITE.2);

    Lab {
        l: (116.0 * fy - 16.0).round() as i32,
        a: (500.0 * (fx - fy)).round() as i32,
        b: (200.0 * (fy - fz)).round() as i32,
    }
}

// ============================================================================
// Contrast
// ============================================================================

/// Luminance-like score used by [`contrast`].
///
/// BT.601 weights on raw 0-255 values plus a 0.05 bias. This is not WCAG
/// relative luminance; the numbers are kept as-is because the editor's
/// pass/fail readout depends on them.
#[inline]
fn heuristic_luminance(s: Sample) -> f64 {
    0.299 * s.r as f64 + 0.587 * s.g as f64 + 0.114 * s.b as f64 + 0.05
}

/// Compare two samples with the editor's non-standard contrast heuristic.
///
/// The bias keeps both scores positive, so the ratio is always defined.
pub fn contrast(a: Sample, b: Sample) -> ContrastScore {
    let la = heuristic_luminance(a);
    let lb = heuristic_luminance(b);
    let ratio = la.max(lb) / la.min(lb);
    let ratio = (ratio * 100.0).round() / 100.0;

    ContrastScore {
        ratio,
        passes_threshold: ratio >= CONTRAST_THRESHOLD,
    }
}

// ============================================================================
// Pipette Readout
// ============================================================================

/// Everything the pipette panel shows for one picked pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorReadout {
    pub x: usize,
    pub y: usize,
    pub rgb: Sample,
    pub alpha: u8,
    pub xyz: Xyz,
    pub lab: Lab,
}

impl ColorReadout {
    /// Sample `(x, y)` from `buffer`. `None` outside the image.
    pub fn pick(buffer: &PixelBuffer, x: usize, y: usize) -> Option<Self> {
        let pixel = buffer.get(x, y)?;
        tracing::trace!(x, y, ?pixel, "color picked");
        Some(ColorReadout {
            x,
            y,
            rgb: pixel.color,
            alpha: pixel.alpha,
            xyz: rgb_to_xyz(pixel.color),
            lab: rgb_to_lab(pixel.color),
        })
    }

    /// Contrast between this pick and another one.
    pub fn contrast_with(&self, other: &ColorReadout) -> ContrastScore {
        contrast(self.rgb, other.rgb)
    }
}
