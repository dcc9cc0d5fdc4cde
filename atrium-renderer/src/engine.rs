//! Tera template units and the named-template registry.
//!
//! A [`TemplateUnit`] is one page parsed together with the shared base
//! layout, so `{% extends "base.html" %}` resolves inside the unit. The
//! [`TemplateRegistry`] maps page names to compiled units.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use tera::Tera;

use crate::error::{io_err, RenderError};

// ---------------------------------------------------------------------------
// TemplateUnit
// ---------------------------------------------------------------------------

/// A page template compiled together with the base layout.
#[derive(Debug)]
pub struct TemplateUnit {
    name: String,
    tera: Tera,
}

impl TemplateUnit {
    /// Read and parse `base_path` (registered as `base_name`) and `page_path`
    /// (registered as `name`) into one unit.
    pub fn load(
        base_name: &str,
        base_path: &Path,
        name: &str,
        page_path: &Path,
    ) -> Result<Self, RenderError> {
        let base = std::fs::read_to_string(base_path).map_err(|e| io_err(base_path, e))?;
        let page = std::fs::read_to_string(page_path).map_err(|e| io_err(page_path, e))?;
        Self::from_sources(base_name, &base, name, &page)
    }

    /// Parse in-memory sources into one unit.
    pub fn from_sources(
        base_name: &str,
        base: &str,
        name: &str,
        page: &str,
    ) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![(base_name, base), (name, page)])
            .map_err(|source| RenderError::TemplateParse {
                name: name.to_string(),
                source,
            })?;
        Ok(TemplateUnit {
            name: name.to_string(),
            tera,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute the page against `ctx`, streaming output into `out`.
    pub fn execute(&self, ctx: &tera::Context, out: impl Write) -> Result<(), RenderError> {
        self.tera
            .render_to(&self.name, ctx, out)
            .map_err(|source| RenderError::Execute {
                name: self.name.clone(),
                source,
            })
    }
}

// ---------------------------------------------------------------------------
// TemplateRegistry
// ---------------------------------------------------------------------------

/// Name → compiled unit. Filled at startup; only the development-mode reload
/// path writes to it afterwards.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    units: RwLock<HashMap<String, Arc<TemplateUnit>>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `unit` under its name, replacing any previous unit.
    pub fn insert(&self, unit: TemplateUnit) -> Arc<TemplateUnit> {
        let unit = Arc::new(unit);
        self.units
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(unit.name().to_string(), Arc::clone(&unit));
        unit
    }

    pub fn get(&self, name: &str) -> Option<Arc<TemplateUnit>> {
        self.units
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .units
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.units.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
