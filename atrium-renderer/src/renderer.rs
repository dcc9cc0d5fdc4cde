//! [`Renderer`]: the process-wide page renderer.

use std::io::Write;
use std::sync::Arc;

use serde_json::Value;

use atrium_core::{AppSettings, Environment, ProviderRegistry, RendererConfig};

use crate::assets::AssetBundles;
use crate::context::{merge_render_data, RenderContext, RenderData};
use crate::engine::{TemplateRegistry, TemplateUnit};
use crate::error::RenderError;

/// Renders registered page templates with bundle, settings, tenant and auth
/// data injected.
///
/// Build once at startup with [`Renderer::new`] and share by reference (or
/// `Arc`) with request handlers. Outside development mode the template
/// registry is never written after construction.
pub struct Renderer {
    config: RendererConfig,
    registry: TemplateRegistry,
    bundles: AssetBundles,
    providers: Arc<dyn ProviderRegistry>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("environment", &self.config.environment)
            .field("templates", &self.registry.names())
            .field("bundles", &self.bundles)
            .finish_non_exhaustive()
    }
}

impl Renderer {
    /// Construct a renderer whose OAuth availability comes from `config.oauth`.
    pub fn new(config: RendererConfig) -> Result<Self, RenderError> {
        let providers = Arc::new(config.oauth.clone());
        Self::with_providers(config, providers)
    }

    /// Construct a renderer with an external OAuth provider registry.
    ///
    /// Loads every template in `config.templates`, then resolves the JS and
    /// CSS bundles. Any failure aborts construction.
    pub fn with_providers(
        config: RendererConfig,
        providers: Arc<dyn ProviderRegistry>,
    ) -> Result<Self, RenderError> {
        let mut renderer = Renderer {
            config,
            registry: TemplateRegistry::new(),
            bundles: AssetBundles {
                js: String::new(),
                css: String::new(),
            },
            providers,
        };

        for name in renderer.config.templates.clone() {
            renderer.load_template(&name)?;
        }

        renderer.bundles =
            AssetBundles::scan(&renderer.config.js_dir_path(), &renderer.config.css_dir_path())?;

        tracing::info!(
            environment = %renderer.config.environment,
            templates = renderer.registry.len(),
            js = %renderer.bundles.js,
            css = %renderer.bundles.css,
            "renderer ready"
        );
        Ok(renderer)
    }

    /// Parse the base layout together with `name` and store the unit under
    /// `name`, replacing any previous one.
    pub fn load_template(&self, name: &str) -> Result<Arc<TemplateUnit>, RenderError> {
        let unit = TemplateUnit::load(
            &self.config.base_layout,
            &self.config.base_layout_path(),
            name,
            &self.config.template_path(name),
        )?;
        tracing::debug!("loaded template: {name}");
        Ok(self.registry.insert(unit))
    }

    /// Render `name` into `out`.
    ///
    /// `data` is the page's own data; reserved keys are merged on top (see
    /// [`crate::context`]). Unknown names fail before anything is written.
    /// In development mode the template is re-read from disk first.
    pub fn render<W, C>(
        &self,
        out: W,
        name: &str,
        data: RenderData,
        ctx: &C,
    ) -> Result<(), RenderError>
    where
        W: Write,
        C: RenderContext + ?Sized,
    {
        let Some(cached) = self.registry.get(name) else {
            tracing::warn!("render requested for unknown template '{name}'");
            return Err(RenderError::UnknownTemplate(name.to_string()));
        };

        let unit = if self.config.environment.is_development() {
            self.load_template(name)?
        } else {
            cached
        };

        let data = merge_render_data(
            data,
            &self.bundles,
            &self.config.settings,
            self.providers.as_ref(),
            ctx,
        )?;
        let tera_ctx =
            tera::Context::from_value(Value::Object(data)).map_err(|source| {
                RenderError::Execute {
                    name: name.to_string(),
                    source,
                }
            })?;

        tracing::debug!(
            authenticated = ctx.is_authenticated(),
            "rendering template: {name}"
        );
        unit.execute(&tera_ctx, out)
    }

    /// [`Renderer::render`] into a `String`.
    pub fn render_to_string<C>(
        &self,
        name: &str,
        data: RenderData,
        ctx: &C,
    ) -> Result<String, RenderError>
    where
        C: RenderContext + ?Sized,
    {
        let mut buf = Vec::new();
        self.render(&mut buf, name, data, ctx)?;
        Ok(String::from_utf8(buf)?)
    }

    pub fn bundles(&self) -> &AssetBundles {
        &self.bundles
    }

    /// Registered template names, sorted.
    pub fn template_names(&self) -> Vec<String> {
        self.registry.names()
    }

    pub fn environment(&self) -> Environment {
        self.config.environment
    }

    pub fn settings(&self) -> &AppSettings {
        &self.config.settings
    }
}
