//! Box blur for RGBA grids.
//!
//! Each output pixel is the truncating average of the `(2r + 1)^2` pixels in
//! the square window centred on it. Window coordinates that fall outside the
//! grid are clamped to the nearest edge row/column, so edges and corners are
//! over-sampled rather than padded with zeros. All four channels, alpha
//! included, are averaged.
//!
//! The window sum is separable: clamping acts on each axis independently, so
//! summing clamped row windows and then clamped column windows of those sums
//! gives exactly the same integers as the direct 2D loop. Only the final
//! division truncates.

use ndarray::Array2;
use tracing::debug;

use super::core::{clamped_window_sums, ChannelSum};
use super::Filter;
use crate::error::{FilterError, Result};
use crate::grid::Grid;
use crate::params::{ParamKind, ParamSpec, ParamValue, Params};
use crate::pixel::Rgba;

/// Largest accepted radius. Keeps the two-pass sums inside `u128`.
pub const MAX_RADIUS: usize = u32::MAX as usize;

/// Blur the grid with a square window of the given radius.
///
/// # Arguments
/// * `grid` - Grid to blur in place
/// * `radius` - Window half-size, must be in `1..=MAX_RADIUS`
///
/// # Returns
/// `Ok(true)`; the grid is untouched if `radius` is rejected
pub fn blur(grid: &mut Grid, radius: usize) -> Result<bool> {
    grid.ensure_valid()?;
    check_radius(radius)?;
    let (height, width) = grid.dim();
    debug!(height, width, radius, "blur");

    // Both passes read the untouched grid; nothing is written until the end
    let snapshot = grid.pixels();

    // Horizontal pass: clamped window sums along every row
    let mut horizontal = Array2::<ChannelSum>::default((height, width));
    let mut line = Vec::with_capacity(width);
    for (y, row) in snapshot.outer_iter().enumerate() {
        line.clear();
        line.extend(row.iter().map(|&px| ChannelSum::from_pixel(px)));
        for (x, sum) in clamped_window_sums(&line, radius).into_iter().enumerate() {
            horizontal[[y, x]] = sum;
        }
    }

    // Vertical pass over the row sums, then average
    let count = (2 * radius as u128 + 1).pow(2);
    let mut result = Array2::<Rgba>::default((height, width));
    let mut column = Vec::with_capacity(height);
    for x in 0..width {
        column.clear();
        column.extend(horizontal.column(x).iter().copied());
        for (y, sum) in clamped_window_sums(&column, radius).into_iter().enumerate() {
            result[[y, x]] = sum.average(count);
        }
    }

    grid.pixels_mut().assign(&result);
    Ok(true)
}

fn check_radius(radius: usize) -> Result<()> {
    if radius == 0 {
        return Err(FilterError::invalid("blur", "radius", "must be > 0, got 0"));
    }
    if radius > MAX_RADIUS {
        return Err(FilterError::invalid(
            "blur",
            "radius",
            format!("must be <= {MAX_RADIUS}, got {radius}"),
        ));
    }
    Ok(())
}

const BLUR_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "radius",
    kind: ParamKind::PositiveInt,
    default: ParamValue::Int(5),
    doc: "Half-size of the averaging window",
}];

#[derive(Debug, Clone, Copy, Default)]
pub struct Blur;

impl Filter for Blur {
    fn name(&self) -> &'static str {
        "blur"
    }

    fn params(&self) -> &'static [ParamSpec] {
        BLUR_PARAMS
    }

    fn apply(&self, grid: &mut Grid, params: &Params) -> Result<bool> {
        params.ensure_known(self.name(), BLUR_PARAMS)?;
        let radius = params.positive(self.name(), &BLUR_PARAMS[0])?;
        blur(grid, radius)
    }
}
