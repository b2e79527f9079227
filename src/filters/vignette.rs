//! Vignette: radial corner darkening.
//!
//! The center is `(H / 2, W / 2)` with integer division, and the half
//! diagonal is the distance from that center to `(0, 0)`. A pixel at distance
//! `d` gets the factor `1 - (d / half_diagonal)^2`, so the center keeps its
//! colour and the top-left corner goes black.
//!
//! Only pixels with alpha below 255 are darkened; fully opaque pixels pass
//! through unchanged. Alpha itself is never modified.

use tracing::debug;

use super::Filter;
use crate::error::Result;
use crate::grid::Grid;
use crate::params::{ParamSpec, Params};

/// Darken RGB towards the corners on every non-opaque pixel.
pub fn vignette(grid: &mut Grid) -> Result<bool> {
    grid.ensure_valid()?;
    let (height, width) = grid.dim();
    let center_row = (height / 2) as f64;
    let center_col = (width / 2) as f64;
    let half_diagonal = center_row.hypot(center_col);
    debug!(height, width, half_diagonal, "vignette");

    for ((r, c), px) in grid.pixels_mut().indexed_iter_mut() {
        if px.alpha == 255 {
            continue;
        }
        let factor = falloff(r as f64 - center_row, c as f64 - center_col, half_diagonal);
        px.red = scale(px.red, factor);
        px.green = scale(px.green, factor);
        px.blue = scale(px.blue, factor);
    }

    Ok(true)
}

/// `1 - (d / half_diagonal)^2`. A 1x1 grid has no diagonal and keeps factor 1.
#[inline]
fn falloff(dy: f64, dx: f64, half_diagonal: f64) -> f64 {
    if half_diagonal == 0.0 {
        return 1.0;
    }
    let ratio = dy.hypot(dx) / half_diagonal;
    1.0 - ratio * ratio
}

/// Multiply and truncate toward zero; `as` saturates rounding noise below 0.
#[inline]
fn scale(channel: u8, factor: f64) -> u8 {
    (f64::from(channel) * factor) as u8
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Vignette;

impl Filter for Vignette {
    fn name(&self) -> &'static str {
        "vignette"
    }

    fn params(&self) -> &'static [ParamSpec] {
        &[]
    }

    fn apply(&self, grid: &mut Grid, params: &Params) -> Result<bool> {
        params.ensure_known(self.name(), &[])?;
        vignette(grid)
    }
}
