//! Zoom and pointer math for displaying a buffer on screen.
//!
//! Zoom only scales the on-screen canvas. Stored pixels change through
//! [`crate::filters::resample`] and never through this module.

/// Display zoom in percent, kept within [`Zoom::MIN`]..=[`Zoom::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zoom(u32);

impl Default for Zoom {
    fn default() -> Self {
        Zoom(100)
    }
}

impl Zoom {
    pub const MIN: u32 = 12;
    pub const MAX: u32 = 300;

    pub fn new(percent: u32) -> Self {
        Zoom(percent.clamp(Self::MIN, Self::MAX))
    }

    /// Largest zoom at which the whole image fits the view, rounded down.
    pub fn fit(image_w: usize, image_h: usize, view_w: usize, view_h: usize) -> Self {
        if image_w == 0 || image_h == 0 {
            return Zoom::default();
        }
        let scale = (view_w as f64 / image_w as f64).min(view_h as f64 / image_h as f64);
        let percent = (scale * 100.0).floor().clamp(0.0, u32::MAX as f64) as u32;
        Zoom::new(percent)
    }

    pub fn percent(self) -> u32 {
        self.0
    }

    pub fn factor(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// On-screen canvas size for an image, at least 1x1.
    pub fn display_size(self, image_w: usize, image_h: usize) -> (usize, usize) {
        let f = self.factor();
        (
            ((image_w as f64 * f) as usize).max(1),
            ((image_h as f64 * f) as usize).max(1),
        )
    }

    /// Map a pointer position on the zoomed canvas to the source pixel under it.
    ///
    /// Callers bounds-check the result against the image (see
    /// [`crate::PixelBuffer::get`]).
    pub fn to_image_coords(self, screen_x: f64, screen_y: f64) -> (usize, usize) {
        let f = self.factor();
        (
            (screen_x.max(0.0) / f).floor() as usize,
            (screen_y.max(0.0) / f).floor() as usize,
        )
    }
}
