//! Monochrome conversion: greyscale or sepia.
//!
//! Brightness is `floor(0.3 * R + 0.6 * G + 0.1 * B)`, evaluated exactly in
//! integers as `(3R + 6G + B) / 10`. Floating-point weights can land just
//! below a whole number (e.g. grey 1 gives 0.9999999999999999), which would
//! make the filter drift on repeated application.
//!
//! - Greyscale: R = G = B = brightness
//! - Sepia: R = brightness, G = floor(0.6 * brightness), B = floor(0.4 * brightness)
//!
//! Alpha is preserved in both modes.

use tracing::debug;

use super::Filter;
use crate::error::Result;
use crate::grid::Grid;
use crate::params::{ParamKind, ParamSpec, ParamValue, Params};
use crate::pixel::Rgba;

/// Integer luminosity weights, in tenths.
const LUMA_R: u32 = 3;
const LUMA_G: u32 = 6;
const LUMA_B: u32 = 1;

/// Sepia scale for green and blue, in tenths.
const SEPIA_G: u32 = 6;
const SEPIA_B: u32 = 4;

/// Brightness of one pixel, clamped to 255.
#[inline]
pub fn brightness(px: Rgba) -> u8 {
    let weighted = LUMA_R * u32::from(px.red) + LUMA_G * u32::from(px.green) + LUMA_B * u32::from(px.blue);
    clamp_u8(weighted / 10)
}

#[inline]
fn clamp_u8(v: u32) -> u8 {
    u8::try_from(v).unwrap_or(u8::MAX)
}

/// Convert every pixel to greyscale, or to sepia tone if `sepia`.
pub fn mono(grid: &mut Grid, sepia: bool) -> Result<bool> {
    grid.ensure_valid()?;
    debug!(height = grid.height(), width = grid.width(), sepia, "mono");

    for px in grid.pixels_mut().iter_mut() {
        let level = brightness(*px);
        px.red = level;
        if sepia {
            let level = u32::from(level);
            px.green = clamp_u8(SEPIA_G * level / 10);
            px.blue = clamp_u8(SEPIA_B * level / 10);
        } else {
            px.green = level;
            px.blue = level;
        }
    }

    Ok(true)
}

const MONO_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "sepia",
    kind: ParamKind::Bool,
    default: ParamValue::Bool(false),
    doc: "Use sepia tone instead of greyscale",
}];

#[derive(Debug, Clone, Copy, Default)]
pub struct Mono;

impl Filter for Mono {
    fn name(&self) -> &'static str {
        "mono"
    }

    fn params(&self) -> &'static [ParamSpec] {
        MONO_PARAMS
    }

    fn apply(&self, grid: &mut Grid, params: &Params) -> Result<bool> {
        params.ensure_known(self.name(), MONO_PARAMS)?;
        let sepia = params.flag(self.name(), &MONO_PARAMS[0])?;
        mono(grid, sepia)
    }
}
