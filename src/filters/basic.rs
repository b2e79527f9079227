//! Basic pixel-wise operations and diagnostics:
//! - Dered (zero the red channel)
//! - Display (read-only pretty printer)

use tracing::{debug, info};

use super::Filter;
use crate::error::Result;
use crate::grid::Grid;
use crate::params::{ParamSpec, Params};

/// Set red to 0 on every pixel.
pub fn dered(grid: &mut Grid) -> Result<bool> {
    grid.ensure_valid()?;
    debug!(height = grid.height(), width = grid.width(), "dered");

    for px in grid.pixels_mut().iter_mut() {
        px.red = 0;
    }
    Ok(true)
}

/// Render the grid one pixel per line, nested like a table of rows.
///
/// Pixel text is padded to the widest pixel so the closing brackets line up:
///
/// ```text
/// [  [  (1, 2, 3, 255),
///       (10, 20, 30, 255) ],
///    [  (4, 5, 6, 255),
///       (7, 8, 9, 255)    ]  ]
/// ```
pub fn render(grid: &Grid) -> String {
    let (height, width) = grid.dim();
    let texts: Vec<String> = grid.pixels().iter().map(ToString::to_string).collect();
    let max_len = texts.iter().map(String::len).max().unwrap_or(0);

    let mut lines = Vec::with_capacity(texts.len());
    for (i, text) in texts.iter().enumerate() {
        let (row, col) = (i / width, i % width);
        let padding = " ".repeat(max_len - text.len());

        let prefix = match (row, col) {
            (0, 0) => "[  [  ",
            (_, 0) => "   [  ",
            _ => "      ",
        };
        let suffix = if row == height - 1 && col == width - 1 {
            format!("{padding} ]  ]")
        } else if col == width - 1 {
            format!("{padding} ],")
        } else {
            ",".to_string()
        };
        lines.push(format!("{prefix}{text}{suffix}"));
    }
    lines.join("\n")
}

/// Emit [`render`] output at info level. Never modifies the grid.
pub fn display(grid: &Grid) -> Result<bool> {
    grid.ensure_valid()?;
    info!("\n{}", render(grid));
    Ok(false)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Dered;

impl Filter for Dered {
    fn name(&self) -> &'static str {
        "dered"
    }

    fn params(&self) -> &'static [ParamSpec] {
        &[]
    }

    fn apply(&self, grid: &mut Grid, params: &Params) -> Result<bool> {
        params.ensure_known(self.name(), &[])?;
        dered(grid)
    }
}

/// Registered as `display`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Show;

impl Filter for Show {
    fn name(&self) -> &'static str {
        "display"
    }

    fn params(&self) -> &'static [ParamSpec] {
        &[]
    }

    fn apply(&self, grid: &mut Grid, params: &Params) -> Result<bool> {
        params.ensure_known(self.name(), &[])?;
        display(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Rgba;

    #[test]
    fn test_dered() {
        let mut grid = Grid::new(2, 3, Rgba::new(90, 80, 70, 60)).unwrap();
        assert!(dered(&mut grid).unwrap());
        assert!(grid.pixels().iter().all(|&px| px == Rgba::new(0, 80, 70, 60)));
    }

    #[test]
    fn test_render_layout() {
        let grid = Grid::from_rows(vec![
            vec![Rgba::opaque(1, 2, 3), Rgba::opaque(10, 20, 30)],
            vec![Rgba::opaque(4, 5, 6), Rgba::opaque(7, 8, 9)],
        ])
        .unwrap();
        let expected = [
            "[  [  (1, 2, 3, 255),",
            "      (10, 20, 30, 255) ],",
            "   [  (4, 5, 6, 255),",
            "      (7, 8, 9, 255)    ]  ]",
        ]
        .join("\n");
        assert_eq!(render(&grid), expected);
    }

    #[test]
    fn test_render_single_pixel() {
        let grid = Grid::new(1, 1, Rgba::new(0, 0, 0, 0)).unwrap();
        assert_eq!(render(&grid), "[  [  (0, 0, 0, 0) ]  ]");
    }

    #[test]
    fn test_display_is_read_only() {
        let mut grid = Grid::new(2, 2, Rgba::opaque(5, 6, 7)).unwrap();
        let before = grid.clone();
        assert!(!Show.apply(&mut grid, &Params::new()).unwrap());
        assert_eq!(grid, before);
    }
}
