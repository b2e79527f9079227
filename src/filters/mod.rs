//! Filter modules and the plugin contract they share.
//!
//! ## Contract
//!
//! Every filter:
//! - takes the grid by `&mut` plus named parameters, each with a default
//! - validates the grid and every parameter before writing a single pixel
//! - returns `Ok(true)` if it mutated the grid, `Ok(false)` if it only read it
//!
//! Each filter is available both as a typed function (`blur(&mut grid, 3)`)
//! and as a [`Filter`] object for generic dispatch through a
//! [`Registry`](crate::registry::Registry).
//!
//! ## Filter Categories
//!
//! - **Geometric**: flip, transpose, rotate
//! - **Area**: blur, pixellate
//! - **Radial**: vignette
//! - **Colour**: mono, dered
//! - **Diagnostics**: display (read-only)

pub mod core;
pub mod basic;
pub mod blur;
pub mod grayscale;
pub mod pixellate;
pub mod rotate;
pub mod vignette;

use crate::error::Result;
use crate::grid::Grid;
use crate::params::{ParamSpec, Params};

/// Uniform calling convention for dynamic dispatch over filters.
pub trait Filter: Send + Sync {
    /// Name a dispatcher resolves this filter by.
    fn name(&self) -> &'static str;

    /// Declared parameters, in order, with their defaults.
    fn params(&self) -> &'static [ParamSpec];

    /// Validate `params`, then run the filter on `grid`.
    fn apply(&self, grid: &mut Grid, params: &Params) -> Result<bool>;
}

pub use basic::{dered, display, render, Dered, Show};
pub use blur::{blur, Blur};
pub use grayscale::{mono, Mono};
pub use pixellate::{pixellate, Pixellate};
pub use rotate::{flip, rotate, transpose, Flip, Rotate, Transpose};
pub use vignette::{vignette, Vignette};
