//! # atrium-renderer
//!
//! Tera-based HTML page renderer for a multi-tenant web application. Page
//! templates are loaded once at startup, each paired with a shared base
//! layout; the active JS/CSS bundle filenames are discovered from the build
//! output directories.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use atrium_core::RendererConfig;
//! use atrium_renderer::{RenderData, Renderer, RequestContext};
//!
//! fn serve_home(out: &mut impl std::io::Write) -> Result<(), atrium_renderer::RenderError> {
//!     let renderer = Renderer::new(RendererConfig::with_root("/srv/app"))?;
//!     let ctx = RequestContext::new("https://demo.example.com");
//!     let mut data = RenderData::new();
//!     data.insert("title".into(), "Home".into());
//!     renderer.render(out, "index.html", data, &ctx)
//! }
//! ```

pub mod assets;
pub mod context;
pub mod engine;
pub mod error;
mod renderer;

pub use assets::{AssetBundles, BundleKind};
pub use context::{AuthDescriptor, RenderContext, RenderData, RequestContext};
pub use engine::{TemplateRegistry, TemplateUnit};
pub use error::RenderError;
pub use renderer::Renderer;
