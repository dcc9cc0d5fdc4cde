//! Error types for atrium-renderer.

use std::path::PathBuf;

use thiserror::Error;

use crate::assets::BundleKind;

/// All errors that can arise from template loading and rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A template file failed to parse (or its inheritance chain is broken).
    #[error("failed to parse template '{name}': {source}")]
    TemplateParse {
        name: String,
        #[source]
        source: tera::Error,
    },

    /// Execution failed, e.g. the template referenced an undefined variable.
    /// Bytes written before the failure stay written.
    #[error("failed to render template '{name}': {source}")]
    Execute {
        name: String,
        #[source]
        source: tera::Error,
    },

    /// `render` was called with a name that was never registered.
    #[error("the template '{0}' does not exist")]
    UnknownTemplate(String),

    /// The asset output directory is missing or empty.
    #[error("{kind} bundle not found in {dir}")]
    AssetBundleNotFound { kind: BundleKind, dir: PathBuf },

    /// JSON serialization error (building the render data).
    #[error("context serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Rendered bytes were not valid UTF-8.
    #[error("rendered output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Filesystem error while loading templates or scanning assets.
    #[error("template io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.into(),
        source,
    }
}
