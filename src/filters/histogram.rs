//! Per-channel histograms for the curves dialog.
//!
//! Every observed value is counted, so each channel's counts sum to the
//! number of pixels. Alpha is ignored.

use rayon::prelude::*;

use crate::buffer::{PixelBuffer, CHANNELS};

/// Color channel selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// Occurrence counts of each byte value, per color channel.
///
/// Bins are `u64` so a channel never wraps, whatever the image size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: [[u64; 256]; 3],
}

impl Default for Histogram {
    fn default() -> Self {
        Histogram { bins: [[0; 256]; 3] }
    }
}

impl Histogram {
    /// Tally R, G and B over every pixel of `src`.
    pub fn build(src: &PixelBuffer) -> Self {
        tracing::debug!(width = src.width(), height = src.height(), "histogram");
        let stride = src.width() * CHANNELS;

        src.as_bytes()
            .par_chunks(stride)
            .fold(Histogram::default, |mut hist, row| {
                for px in row.chunks_exact(CHANNELS) {
                    hist.bins[0][px[0] as usize] += 1;
                    hist.bins[1][px[1] as usize] += 1;
                    hist.bins[2][px[2] as usize] += 1;
                }
                hist
            })
            .reduce(Histogram::default, Histogram::merge)
    }

    fn merge(mut self, other: Histogram) -> Histogram {
        for (dst, src) in self.bins.iter_mut().zip(other.bins.iter()) {
            for (d, s) in dst.iter_mut().zip(src.iter()) {
                *d += s;
            }
        }
        self
    }

    /// How many pixels have `value` in `channel`.
    pub fn count(&self, channel: Channel, value: u8) -> u64 {
        self.bins[channel.index()][value as usize]
    }

    pub fn channel(&self, channel: Channel) -> &[u64; 256] {
        &self.bins[channel.index()]
    }

    /// Sum of all counts of one channel (the pixel count).
    pub fn total(&self, channel: Channel) -> u64 {
        self.channel(channel).iter().sum()
    }

    /// Tallest bucket across all three channels.
    pub fn max_count(&self) -> u64 {
        self.bins
            .iter()
            .flat_map(|bins| bins.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Bar heights for drawing one channel into a `display_height`-tall area.
    ///
    /// Bars are scaled against [`Histogram::max_count`] so the three channels
    /// share one vertical scale. An empty histogram yields all zeros.
    pub fn bar_heights(&self, channel: Channel, display_height: u32) -> [u32; 256] {
        let max = self.max_count() as u128;
        let mut heights = [0u32; 256];
        if max == 0 {
            return heights;
        }
        for (h, &count) in heights.iter_mut().zip(self.channel(channel).iter()) {
            *h = (count as u128 * display_height as u128 / max) as u32;
        }
        heights
    }

    /// All counts flattened as R[0..256], G[0..256], B[0..256].
    pub fn to_vec(&self) -> Vec<u64> {
        self.bins.iter().flat_map(|b| b.iter().copied()).collect()
    }
}
