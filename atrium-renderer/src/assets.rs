//! Asset bundle discovery.
//!
//! Built bundles carry content hashes in their names, so the active file is
//! found at startup: the first entry of each output directory, in the sorted
//! order a directory listing returns.

use std::ffi::OsString;
use std::fmt;
use std::path::Path;

use crate::error::{io_err, RenderError};

/// Which bundle a directory holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleKind {
    JavaScript,
    Css,
}

impl fmt::Display for BundleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleKind::JavaScript => write!(f, "JavaScript"),
            BundleKind::Css => write!(f, "CSS"),
        }
    }
}

/// Filenames of the active JS and CSS bundles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBundles {
    pub js: String,
    pub css: String,
}

impl AssetBundles {
    /// Resolve both bundles. Fails if either directory is missing or empty.
    pub fn scan(js_dir: &Path, css_dir: &Path) -> Result<Self, RenderError> {
        Ok(AssetBundles {
            js: first_entry(js_dir, BundleKind::JavaScript)?,
            css: first_entry(css_dir, BundleKind::Css)?,
        })
    }
}

/// Name of the first entry in `dir`, sorted by file name.
pub fn first_entry(dir: &Path, kind: BundleKind) -> Result<String, RenderError> {
    let not_found = || RenderError::AssetBundleNotFound {
        kind,
        dir: dir.to_path_buf(),
    };

    let entries = std::fs::read_dir(dir).map_err(|_| not_found())?;
    let mut names: Vec<OsString> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        names.push(entry.file_name());
    }
    names.sort();

    names
        .into_iter()
        .next()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(not_found)
}
