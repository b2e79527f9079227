//! Core arithmetic shared by the area filters.
//!
//! - Per-channel sum accumulator with truncating average
//! - Clamped (edge-replicating) window sums over a 1D line

use std::ops::{Add, AddAssign, Mul, Sub};

use crate::pixel::Rgba;

/// Running per-channel sum of RGBA samples.
///
/// `u128` channels hold a two-pass box sum of `(2r + 1)^2` samples for any
/// radius up to `u32::MAX`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelSum(pub [u128; 4]);

impl ChannelSum {
    #[inline]
    pub fn from_pixel(px: Rgba) -> Self {
        Self([
            px.red.into(),
            px.green.into(),
            px.blue.into(),
            px.alpha.into(),
        ])
    }

    #[inline]
    pub fn add_pixel(&mut self, px: Rgba) {
        *self += Self::from_pixel(px);
    }

    /// Truncating per-channel average over `count` samples.
    ///
    /// `count` must be non-zero. Results saturate at 255, which only matters
    /// if the sums were not built from `count` 8-bit samples.
    #[inline]
    pub fn average(self, count: u128) -> Rgba {
        let [r, g, b, a] = self.0.map(|sum| u8::try_from(sum / count).unwrap_or(u8::MAX));
        Rgba::new(r, g, b, a)
    }
}

impl Add for ChannelSum {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        let mut out = self;
        out += rhs;
        out
    }
}

impl AddAssign for ChannelSum {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a += b;
        }
    }
}

impl Sub for ChannelSum {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let mut out = self;
        for (a, b) in out.0.iter_mut().zip(rhs.0) {
            *a -= b;
        }
        out
    }
}

impl Mul<u128> for ChannelSum {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: u128) -> Self {
        Self(self.0.map(|v| v * rhs))
    }
}

/// Sum of every clamped window along a line.
///
/// For each index `i`, returns the sum of `line[clamp(k, 0, n - 1)]` for
/// `k` in `i - radius ..= i + radius`. Coordinates past either end repeat the
/// edge sample, so every window holds exactly `2 * radius + 1` samples.
///
/// Runs in O(n) independent of `radius` using a prefix sum: the window splits
/// into the samples clamped to the first element, an in-bounds run, and the
/// samples clamped to the last element.
pub fn clamped_window_sums(line: &[ChannelSum], radius: usize) -> Vec<ChannelSum> {
    let n = line.len();
    if n == 0 {
        return Vec::new();
    }

    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(ChannelSum::default());
    for &v in line {
        let last = prefix[prefix.len() - 1];
        prefix.push(last + v);
    }

    let first = line[0];
    let last = line[n - 1];

    (0..n)
        .map(|i| {
            // Window is [i - radius, i + radius]; i + radius >= 0 always.
            let below = radius.saturating_sub(i);
            let above = (i.saturating_add(radius)).saturating_sub(n - 1);
            let lo = i.saturating_sub(radius);
            let hi = i.saturating_add(radius).min(n - 1);
            let inner = prefix[hi + 1] - prefix[lo];
            first * below as u128 + inner + last * above as u128
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(values: &[u8]) -> Vec<ChannelSum> {
        values
            .iter()
            .map(|&v| ChannelSum::from_pixel(Rgba::new(v, 0, 0, 0)))
            .collect()
    }

    fn naive(values: &[u8], radius: usize) -> Vec<u128> {
        let n = values.len() as isize;
        (0..n)
            .map(|i| {
                (-(radius as isize)..=radius as isize)
                    .map(|d| values[(i + d).clamp(0, n - 1) as usize] as u128)
                    .sum()
            })
            .collect()
    }

    #[test]
    fn test_average_truncates() {
        let mut sum = ChannelSum::default();
        sum.add_pixel(Rgba::new(10, 0, 255, 1));
        sum.add_pixel(Rgba::new(11, 1, 254, 0));
        assert_eq!(sum.average(2), Rgba::new(10, 0, 254, 0));
    }

    #[test]
    fn test_window_sums_match_naive() {
        let values = [3u8, 200, 7, 90, 45, 12, 255];
        for radius in [1, 2, 3, 6, 10] {
            let got: Vec<u128> = clamped_window_sums(&line(&values), radius)
                .iter()
                .map(|s| s.0[0])
                .collect();
            assert_eq!(got, naive(&values, radius), "radius {radius}");
        }
    }

    #[test]
    fn test_window_sums_single_sample() {
        let got = clamped_window_sums(&line(&[9]), 4);
        assert_eq!(got[0].0[0], 9 * 9);
    }
}
