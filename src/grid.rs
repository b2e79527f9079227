//! Rectangular pixel grid handed to every filter.
//!
//! Storage is a row-major `Array2<Rgba>` indexed as `[[row, col]]`, so the
//! rectangular invariant holds by construction. Every constructor also
//! rejects empty grids: a `Grid` always has at least one row and one column.

use ndarray::{Array2, Array3, ArrayView1, ArrayView2, ArrayView3, ArrayViewMut2};

use crate::error::{FilterError, Result};
use crate::pixel::Rgba;

/// Number of channels in a packed RGBA buffer.
pub const CHANNELS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pixels: Array2<Rgba>,
}

impl Grid {
    /// Create a `height` x `width` grid filled with one pixel.
    pub fn new(height: usize, width: usize, fill: Rgba) -> Result<Self> {
        check_dims(height, width)?;
        Ok(Self {
            pixels: Array2::from_elem((height, width), fill),
        })
    }

    /// Build a grid from nested rows. Rows must be non-empty and of equal length.
    pub fn from_rows(rows: Vec<Vec<Rgba>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        check_dims(height, width)?;

        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(FilterError::Dimension(format!(
                "row {index} has {} pixels, expected {width}",
                row.len()
            )));
        }

        let flat: Vec<Rgba> = rows.into_iter().flatten().collect();
        Self::from_flat(height, width, flat)
    }

    pub fn from_array(pixels: Array2<Rgba>) -> Result<Self> {
        let (height, width) = pixels.dim();
        check_dims(height, width)?;
        Ok(Self { pixels })
    }

    /// Build a grid from packed RGBA bytes (length = height * width * 4).
    pub fn from_rgba_bytes(height: usize, width: usize, data: &[u8]) -> Result<Self> {
        check_dims(height, width)?;
        let expected = height
            .checked_mul(width)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or_else(|| {
                FilterError::Dimension(format!("{height}x{width} RGBA buffer overflows usize"))
            })?;
        if data.len() != expected {
            return Err(FilterError::Dimension(format!(
                "buffer holds {} bytes, expected {expected} for {height}x{width} RGBA",
                data.len()
            )));
        }

        let flat = data
            .chunks_exact(CHANNELS)
            .map(|px| Rgba::new(px[0], px[1], px[2], px[3]))
            .collect();
        Self::from_flat(height, width, flat)
    }

    /// Build a grid from an `(height, width, 4)` u8 array view.
    pub fn from_rgba_view(view: ArrayView3<u8>) -> Result<Self> {
        let (height, width, channels) = view.dim();
        if channels != CHANNELS {
            return Err(FilterError::Dimension(format!(
                "expected {CHANNELS} channels, got {channels}"
            )));
        }
        check_dims(height, width)?;

        let pixels = Array2::from_shape_fn((height, width), |(y, x)| {
            Rgba::new(
                view[[y, x, 0]],
                view[[y, x, 1]],
                view[[y, x, 2]],
                view[[y, x, 3]],
            )
        });
        Ok(Self { pixels })
    }

    fn from_flat(height: usize, width: usize, flat: Vec<Rgba>) -> Result<Self> {
        let pixels = Array2::from_shape_vec((height, width), flat)
            .map_err(|e| FilterError::Dimension(e.to_string()))?;
        Ok(Self { pixels })
    }

    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// `(height, width)`.
    pub fn dim(&self) -> (usize, usize) {
        self.pixels.dim()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Rgba> {
        self.pixels.get((row, col))
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Rgba> {
        self.pixels.get_mut((row, col))
    }

    pub fn pixels(&self) -> ArrayView2<'_, Rgba> {
        self.pixels.view()
    }

    /// Mutable view of the cells. The view cannot change the grid's shape.
    pub fn pixels_mut(&mut self) -> ArrayViewMut2<'_, Rgba> {
        self.pixels.view_mut()
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, Rgba>> {
        self.pixels.outer_iter()
    }

    pub fn to_rows(&self) -> Vec<Vec<Rgba>> {
        self.pixels.outer_iter().map(|row| row.to_vec()).collect()
    }

    /// Packed RGBA bytes in row-major order.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|px| px.to_array()).collect()
    }

    /// `(height, width, 4)` u8 array.
    pub fn to_rgba_array(&self) -> Array3<u8> {
        let (height, width) = self.dim();
        Array3::from_shape_fn((height, width, CHANNELS), |(y, x, c)| {
            self.pixels[[y, x]].to_array()[c]
        })
    }

    /// Re-check the non-empty invariant. Called at every filter entry.
    pub(crate) fn ensure_valid(&self) -> Result<()> {
        let (height, width) = self.dim();
        check_dims(height, width)
    }

    /// Swap in a whole new pixel array, possibly of different shape.
    pub(crate) fn replace(&mut self, pixels: Array2<Rgba>) {
        debug_assert!(pixels.nrows() > 0 && pixels.ncols() > 0);
        self.pixels = pixels;
    }
}

fn check_dims(height: usize, width: usize) -> Result<()> {
    if height == 0 {
        return Err(FilterError::Dimension("grid has no rows".into()));
    }
    if width == 0 {
        return Err(FilterError::Dimension("grid rows are empty".into()));
    }
    Ok(())
}

#[cfg(feature = "image")]
mod image_bridge {
    use super::*;
    use image::RgbaImage;

    impl TryFrom<&RgbaImage> for Grid {
        type Error = FilterError;

        fn try_from(img: &RgbaImage) -> Result<Self> {
            let (width, height) = img.dimensions();
            Grid::from_rgba_bytes(height as usize, width as usize, img.as_raw())
        }
    }

    impl Grid {
        /// Copy the pixels into an `image::RgbaImage` for an external encoder.
        pub fn to_rgba_image(&self) -> Result<RgbaImage> {
            let (height, width) = self.dim();
            let too_large = || FilterError::Dimension(format!("{height}x{width} exceeds u32"));
            let w = u32::try_from(width).map_err(|_| too_large())?;
            let h = u32::try_from(height).map_err(|_| too_large())?;
            RgbaImage::from_raw(w, h, self.to_rgba_bytes()).ok_or_else(too_large)
        }
    }
}


#[cfg(all(test, feature = "image"))]
mod image_tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn test_rgba_image_round_trip() {
        // 3 wide, 2 high: image coordinates are (x, y), grid indices are [row, col]
        let img = RgbaImage::from_fn(3, 2, |x, y| image::Rgba([x as u8, y as u8, 7, 200]));
        let grid = Grid::try_from(&img).unwrap();
        assert_eq!(grid.dim(), (2, 3));
        assert_eq!(grid.get(1, 2), Some(&Rgba::new(2, 1, 7, 200)));
        assert_eq!(grid.to_rgba_image().unwrap(), img);
    }

    #[test]
    fn test_empty_rgba_image_rejected() {
        let img = RgbaImage::new(0, 4);
        assert!(matches!(Grid::try_from(&img), Err(FilterError::Dimension(_))));
    }
}
