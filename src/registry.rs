//! Name-to-filter lookup for generic dispatch.
//!
//! A dispatcher (command line, Python, WASM) resolves a filter name and a set
//! of parameters, then calls [`Registry::apply`]. Lookup failures are reported
//! before the grid is touched.

use std::collections::BTreeMap;

use tracing::trace;

use crate::error::{FilterError, Result};
use crate::filters::{Blur, Dered, Filter, Flip, Mono, Pixellate, Rotate, Show, Transpose, Vignette};
use crate::grid::Grid;
use crate::params::Params;

#[derive(Default)]
pub struct Registry {
    filters: BTreeMap<&'static str, Box<dyn Filter>>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every filter this crate provides.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(Show));
        registry.register(Box::new(Dered));
        registry.register(Box::new(Mono));
        registry.register(Box::new(Flip));
        registry.register(Box::new(Transpose));
        registry.register(Box::new(Rotate));
        registry.register(Box::new(Vignette));
        registry.register(Box::new(Blur));
        registry.register(Box::new(Pixellate));
        registry
    }

    /// Add a filter under its own name, replacing any previous entry.
    pub fn register(&mut self, filter: Box<dyn Filter>) -> Option<Box<dyn Filter>> {
        trace!(name = filter.name(), "register filter");
        self.filters.insert(filter.name(), filter)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Filter> {
        self.filters.get(name).map(|f| &**f)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.filters.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Look up `name` and run it on `grid`.
    pub fn apply(&self, name: &str, grid: &mut Grid, params: &Params) -> Result<bool> {
        let filter = self
            .get(name)
            .ok_or_else(|| FilterError::UnknownFilter(name.to_string()))?;
        trace!(name, params = params.len(), "dispatch filter");
        filter.apply(grid, params)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.filters.keys()).finish()
    }
}
