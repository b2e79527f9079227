//! Pictool Filters
//!
//! In-place image filters over a rectangular grid of RGBA pixels, with
//! optional Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! A [`Grid`] is a non-empty, row-major matrix of [`Rgba`] pixels with four
//! 8-bit channels (0-255). The bindings exchange pixels as:
//! - **Python**: numpy `uint8` arrays of shape (height, width, 4)
//! - **WASM**: flat RGBA byte buffers plus width and height
//!
//! ## Filter Architecture
//! Every filter takes the grid by `&mut` plus named parameters with defaults,
//! and returns `Ok(true)` if it modified the grid or `Ok(false)` if it only
//! inspected it. Parameters and grid shape are validated first; a filter that
//! returns an error has not written anything. Transpose and rotate replace the
//! grid's shape (H x W becomes W x H).
//!
//! Filters are usable directly (`filters::blur(&mut grid, 3)`) or by name
//! through a [`Registry`].

pub mod error;
pub mod filters;
pub mod grid;
pub mod params;
pub mod pixel;
pub mod registry;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{FilterError, Result};
pub use filters::Filter;
pub use grid::Grid;
pub use params::{ParamKind, ParamSpec, ParamValue, Params};
pub use pixel::Rgba;
pub use registry::Registry;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use std::sync::OnceLock;

    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::{PyKeyError, PyValueError};
    use pyo3::prelude::*;
    use pyo3::types::{PyBool, PyDict};

    use crate::{FilterError, Grid, ParamValue, Params, Registry};

    type FilterOutput<'py> = (Bound<'py, PyArray3<u8>>, bool);

    fn registry() -> &'static Registry {
        static REGISTRY: OnceLock<Registry> = OnceLock::new();
        REGISTRY.get_or_init(Registry::builtin)
    }

    fn to_py_err(err: FilterError) -> PyErr {
        match err {
            FilterError::UnknownFilter(_) => PyKeyError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }

    /// Run a registered filter on a copy of `image`.
    ///
    /// Returns the filtered (height, width, 4) array and whether it changed.
    fn run<'py>(
        py: Python<'py>,
        name: &str,
        image: PyReadonlyArray3<'py, u8>,
        params: &Params,
    ) -> PyResult<FilterOutput<'py>> {
        let mut grid = Grid::from_rgba_view(image.as_array()).map_err(to_py_err)?;
        let modified = registry().apply(name, &mut grid, params).map_err(to_py_err)?;
        Ok((grid.to_rgba_array().into_pyarray(py), modified))
    }

    fn to_param(value: &Bound<'_, PyAny>) -> PyResult<ParamValue> {
        // bool is a subclass of int in Python, so test it first
        if value.is_instance_of::<PyBool>() {
            return Ok(ParamValue::Bool(value.extract()?));
        }
        value
            .extract::<i64>()
            .map(ParamValue::Int)
            .map_err(|_| PyValueError::new_err(format!("unsupported parameter value: {value}")))
    }

    // ========================================================================
    // Geometric Filters
    // ========================================================================

    #[pyfunction]
    #[pyo3(signature = (image, vertical=false))]
    pub fn flip<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        vertical: bool,
    ) -> PyResult<FilterOutput<'py>> {
        run(py, "flip", image, &Params::new().with("vertical", vertical))
    }

    /// Swap rows and columns: (H, W, 4) becomes (W, H, 4).
    #[pyfunction]
    pub fn transpose<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<FilterOutput<'py>> {
        run(py, "transpose", image, &Params::new())
    }

    #[pyfunction]
    #[pyo3(signature = (image, right=false))]
    pub fn rotate<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        right: bool,
    ) -> PyResult<FilterOutput<'py>> {
        run(py, "rotate", image, &Params::new().with("right", right))
    }

    // ========================================================================
    // Area and Radial Filters
    // ========================================================================

    #[pyfunction]
    #[pyo3(signature = (image, radius=5))]
    pub fn blur<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        radius: i64,
    ) -> PyResult<FilterOutput<'py>> {
        run(py, "blur", image, &Params::new().with("radius", radius))
    }

    #[pyfunction]
    #[pyo3(signature = (image, step=10))]
    pub fn pixellate<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        step: i64,
    ) -> PyResult<FilterOutput<'py>> {
        run(py, "pixellate", image, &Params::new().with("step", step))
    }

    #[pyfunction]
    pub fn vignette<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<FilterOutput<'py>> {
        run(py, "vignette", image, &Params::new())
    }

    // ========================================================================
    // Colour Filters and Diagnostics
    // ========================================================================

    #[pyfunction]
    #[pyo3(signature = (image, sepia=false))]
    pub fn mono<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        sepia: bool,
    ) -> PyResult<FilterOutput<'py>> {
        run(py, "mono", image, &Params::new().with("sepia", sepia))
    }

    #[pyfunction]
    pub fn dered<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<FilterOutput<'py>> {
        run(py, "dered", image, &Params::new())
    }

    /// Pretty-print the pixels as a nested table. Does not modify the image.
    #[pyfunction]
    pub fn render<'py>(image: PyReadonlyArray3<'py, u8>) -> PyResult<String> {
        let grid = Grid::from_rgba_view(image.as_array()).map_err(to_py_err)?;
        Ok(crate::filters::render(&grid))
    }

    // ========================================================================
    // Generic Dispatch
    // ========================================================================

    /// Apply any registered filter by name with keyword parameters.
    #[pyfunction]
    #[pyo3(signature = (name, image, **params))]
    pub fn apply<'py>(
        py: Python<'py>,
        name: &str,
        image: PyReadonlyArray3<'py, u8>,
        params: Option<&Bound<'py, PyDict>>,
    ) -> PyResult<FilterOutput<'py>> {
        let mut resolved = Params::new();
        if let Some(params) = params {
            for (key, value) in params.iter() {
                resolved.insert(key.extract::<String>()?, to_param(&value)?);
            }
        }
        run(py, name, image, &resolved)
    }

    /// Names of every filter `apply` accepts.
    #[pyfunction]
    pub fn filter_names() -> Vec<&'static str> {
        registry().names().collect()
    }

    /// Pictool filters Rust extension module
    #[pymodule]
    pub fn pictool_filters(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Geometric filters
        m.add_function(wrap_pyfunction!(flip, m)?)?;
        m.add_function(wrap_pyfunction!(transpose, m)?)?;
        m.add_function(wrap_pyfunction!(rotate, m)?)?;

        // Area and radial filters
        m.add_function(wrap_pyfunction!(blur, m)?)?;
        m.add_function(wrap_pyfunction!(pixellate, m)?)?;
        m.add_function(wrap_pyfunction!(vignette, m)?)?;

        // Colour filters and diagnostics
        m.add_function(wrap_pyfunction!(mono, m)?)?;
        m.add_function(wrap_pyfunction!(dered, m)?)?;
        m.add_function(wrap_pyfunction!(render, m)?)?;

        // Dispatch
        m.add_function(wrap_pyfunction!(apply, m)?)?;
        m.add_function(wrap_pyfunction!(filter_names, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::pictool_filters;
