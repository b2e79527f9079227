//! Pixellate: replace every `step x step` block with its average colour.
//!
//! Blocks start at (0, 0) and advance by `step` on both axes. Blocks on the
//! right and bottom edges are clipped to the grid, and their average divides
//! by the samples actually present. Blocks never overlap, so each one is read,
//! averaged and written in place before the next.

use ndarray::s;
use tracing::debug;

use super::core::ChannelSum;
use super::Filter;
use crate::error::{FilterError, Result};
use crate::grid::Grid;
use crate::params::{ParamKind, ParamSpec, ParamValue, Params};

/// Pixellate the grid with square blocks of side `step` (must be > 0).
pub fn pixellate(grid: &mut Grid, step: usize) -> Result<bool> {
    grid.ensure_valid()?;
    if step == 0 {
        return Err(FilterError::invalid("pixellate", "step", "must be > 0, got 0"));
    }
    let (height, width) = grid.dim();
    debug!(height, width, step, "pixellate");

    let mut pixels = grid.pixels_mut();
    for top in (0..height).step_by(step) {
        let bottom = top.saturating_add(step).min(height);
        for left in (0..width).step_by(step) {
            let right = left.saturating_add(step).min(width);
            let mut block = pixels.slice_mut(s![top..bottom, left..right]);

            let mut sum = ChannelSum::default();
            for &px in block.iter() {
                sum.add_pixel(px);
            }
            let avg = sum.average(block.len() as u128);
            block.fill(avg);
        }
    }

    Ok(true)
}

const PIXELLATE_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "step",
    kind: ParamKind::PositiveInt,
    default: ParamValue::Int(10),
    doc: "Side length of each block",
}];

#[derive(Debug, Clone, Copy, Default)]
pub struct Pixellate;

impl Filter for Pixellate {
    fn name(&self) -> &'static str {
        "pixellate"
    }

    fn params(&self) -> &'static [ParamSpec] {
        PIXELLATE_PARAMS
    }

    fn apply(&self, grid: &mut Grid, params: &Params) -> Result<bool> {
        params.ensure_known(self.name(), PIXELLATE_PARAMS)?;
        let step = params.positive(self.name(), &PIXELLATE_PARAMS[0])?;
        pixellate(grid, step)
    }
}
