//! Flip, transpose and 90-degree rotation.
//!
//! ## Orientation
//!
//! - Horizontal flip (default): `new[r][c] = old[r][W - 1 - c]`
//! - Vertical flip: `new[r][c] = old[H - 1 - r][c]`
//! - Transpose: `new[c][r] = old[r][c]`, an H x W grid becomes W x H
//! - Rotate left: transpose, then vertical flip
//! - Rotate right: vertical flip, then transpose
//!
//! Every output is built from an untouched snapshot of the input.

use ndarray::Array2;
use tracing::debug;

use super::Filter;
use crate::error::Result;
use crate::grid::Grid;
use crate::params::{ParamKind, ParamSpec, ParamValue, Params};

/// Mirror the grid left-right, or top-bottom if `vertical`.
///
/// Grids with a single column (horizontal) or single row (vertical) come out
/// unchanged, but the call still reports a mutation.
pub fn flip(grid: &mut Grid, vertical: bool) -> Result<bool> {
    grid.ensure_valid()?;
    let (h, w) = grid.dim();
    debug!(height = h, width = w, vertical, "flip");

    let snapshot = grid.pixels().to_owned();
    for ((r, c), px) in grid.pixels_mut().indexed_iter_mut() {
        *px = if vertical {
            snapshot[[h - 1 - r, c]]
        } else {
            snapshot[[r, w - 1 - c]]
        };
    }

    Ok(true)
}

/// Swap rows and columns. The row structure is replaced in one step.
pub fn transpose(grid: &mut Grid) -> Result<bool> {
    grid.ensure_valid()?;
    let (h, w) = grid.dim();
    debug!(height = h, width = w, "transpose");

    let source = grid.pixels();
    let transposed = Array2::from_shape_fn((w, h), |(c, r)| source[[r, c]]);
    grid.replace(transposed);

    Ok(true)
}

/// Rotate 90 degrees left, or right if `right`.
pub fn rotate(grid: &mut Grid, right: bool) -> Result<bool> {
    grid.ensure_valid()?;
    debug!(height = grid.height(), width = grid.width(), right, "rotate");

    if right {
        flip(grid, true)?;
        transpose(grid)?;
    } else {
        transpose(grid)?;
        flip(grid, true)?;
    }

    Ok(true)
}

// ============================================================================
// Plugin objects
// ============================================================================

const FLIP_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "vertical",
    kind: ParamKind::Bool,
    default: ParamValue::Bool(false),
    doc: "Reflect top-bottom instead of left-right",
}];

const ROTATE_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "right",
    kind: ParamKind::Bool,
    default: ParamValue::Bool(false),
    doc: "Rotate clockwise instead of counter-clockwise",
}];

#[derive(Debug, Clone, Copy, Default)]
pub struct Flip;

impl Filter for Flip {
    fn name(&self) -> &'static str {
        "flip"
    }

    fn params(&self) -> &'static [ParamSpec] {
        FLIP_PARAMS
    }

    fn apply(&self, grid: &mut Grid, params: &Params) -> Result<bool> {
        params.ensure_known(self.name(), FLIP_PARAMS)?;
        let vertical = params.flag(self.name(), &FLIP_PARAMS[0])?;
        flip(grid, vertical)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Transpose;

impl Filter for Transpose {
    fn name(&self) -> &'static str {
        "transpose"
    }

    fn params(&self) -> &'static [ParamSpec] {
        &[]
    }

    fn apply(&self, grid: &mut Grid, params: &Params) -> Result<bool> {
        params.ensure_known(self.name(), &[])?;
        transpose(grid)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Rotate;

impl Filter for Rotate {
    fn name(&self) -> &'static str {
        "rotate"
    }

    fn params(&self) -> &'static [ParamSpec] {
        ROTATE_PARAMS
    }

    fn apply(&self, grid: &mut Grid, params: &Params) -> Result<bool> {
        params.ensure_known(self.name(), ROTATE_PARAMS)?;
        let right = params.flag(self.name(), &ROTATE_PARAMS[0])?;
        rotate(grid, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;
    use crate::pixel::Rgba;

    /// Grid whose red channel encodes the position: 10 * row + col.
    fn numbered(h: usize, w: usize) -> Grid {
        let rows = (0..h)
            .map(|r| {
                (0..w)
                    .map(|c| Rgba::new((10 * r + c) as u8, 0, 0, 255))
                    .collect()
            })
            .collect();
        Grid::from_rows(rows).unwrap()
    }

    fn reds(grid: &Grid) -> Vec<Vec<u8>> {
        grid.to_rows()
            .into_iter()
            .map(|row| row.into_iter().map(|px| px.red).collect())
            .collect()
    }

    #[test]
    fn test_flip_horizontal() {
        let mut grid = numbered(2, 3);
        assert!(flip(&mut grid, false).unwrap());
        assert_eq!(reds(&grid), vec![vec![2, 1, 0], vec![12, 11, 10]]);
    }

    #[test]
    fn test_flip_vertical() {
        let mut grid = numbered(2, 3);
        assert!(flip(&mut grid, true).unwrap());
        assert_eq!(reds(&grid), vec![vec![10, 11, 12], vec![0, 1, 2]]);
    }

    #[test]
    fn test_flip_degenerate_still_reports_true() {
        let mut column = numbered(3, 1);
        let before = column.clone();
        assert!(flip(&mut column, false).unwrap());
        assert_eq!(column, before);

        let mut row = numbered(1, 4);
        let before = row.clone();
        assert!(flip(&mut row, true).unwrap());
        assert_eq!(row, before);
    }

    #[test]
    fn test_transpose_swaps_dims() {
        let mut grid = numbered(2, 3);
        assert!(transpose(&mut grid).unwrap());
        assert_eq!(grid.dim(), (3, 2));
        assert_eq!(reds(&grid), vec![vec![0, 10], vec![1, 11], vec![2, 12]]);
        assert!(grid.rows().all(|row| row.len() == 2));
    }

    #[test]
    fn test_rotate_left() {
        let mut grid = numbered(2, 3);
        assert!(rotate(&mut grid, false).unwrap());
        assert_eq!(reds(&grid), vec![vec![2, 12], vec![1, 11], vec![0, 10]]);
    }

    #[test]
    fn test_rotate_right() {
        let mut grid = numbered(2, 3);
        assert!(rotate(&mut grid, true).unwrap());
        assert_eq!(reds(&grid), vec![vec![10, 0], vec![11, 1], vec![12, 2]]);
    }

    #[test]
    fn test_plugin_rejects_bad_param_without_mutation() {
        let mut grid = numbered(2, 3);
        let before = grid.clone();

        let err = Flip
            .apply(&mut grid, &Params::new().with("vertical", 1))
            .unwrap_err();
        assert!(matches!(err, FilterError::InvalidParameter { .. }));

        let err = Transpose
            .apply(&mut grid, &Params::new().with("right", true))
            .unwrap_err();
        assert!(matches!(err, FilterError::InvalidParameter { .. }));

        assert_eq!(grid, before);
    }

    #[test]
    fn test_plugin_defaults() {
        let mut a = numbered(2, 3);
        let mut b = a.clone();
        Rotate.apply(&mut a, &Params::new()).unwrap();
        rotate(&mut b, false).unwrap();
        assert_eq!(a, b);
    }
}
