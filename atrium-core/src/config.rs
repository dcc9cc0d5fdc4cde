//! Renderer configuration.
//!
//! # Resolution order (lowest priority first)
//!
//! 1. Built-in defaults ([`RendererConfig::default`])
//! 2. YAML config file ([`RendererConfig::load_at`])
//! 3. Environment variables ([`RendererConfig::apply_env_from`])
//! 4. CLI flags (handled at the call-site, not here)
//!
//! # File layout under the app root (defaults)
//!
//! ```text
//! <root>/
//!   views/
//!     base.html      (shared layout)
//!     index.html …   (one file per registered template)
//!   dist/
//!     js/            (built JS bundle; first entry wins)
//!     css/           (built CSS bundle; first entry wins)
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::env::{AppRoot, Environment, ENV_VAR, ROOT_VAR};
use crate::error::{io_err, ConfigError};
use crate::types::{AppSettings, OAuthConfig, OAuthProvider};

/// Templates registered when the config does not list any.
pub const DEFAULT_TEMPLATES: &[&str] = &["index.html", "403.html", "404.html", "500.html"];

/// Everything needed to construct a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub root: AppRoot,
    pub environment: Environment,
    /// Views directory, relative to `root`.
    pub views_dir: PathBuf,
    /// Shared layout file name inside `views_dir`.
    pub base_layout: String,
    /// Template names to register, each a file inside `views_dir`.
    pub templates: Vec<String>,
    /// JS bundle output directory, relative to `root`.
    pub js_dir: PathBuf,
    /// CSS bundle output directory, relative to `root`.
    pub css_dir: PathBuf,
    pub settings: AppSettings,
    pub oauth: OAuthConfig,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            root: AppRoot::default(),
            environment: Environment::default(),
            views_dir: PathBuf::from("views"),
            base_layout: "base.html".to_string(),
            templates: DEFAULT_TEMPLATES.iter().map(|s| (*s).to_string()).collect(),
            js_dir: PathBuf::from("dist/js"),
            css_dir: PathBuf::from("dist/css"),
            settings: AppSettings::default(),
            oauth: OAuthConfig::default(),
        }
    }
}

impl RendererConfig {
    /// Defaults rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: AppRoot::new(root),
            ..Self::default()
        }
    }

    /// Load a YAML config file. Missing keys fall back to defaults.
    pub fn load_at(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        let mut config: RendererConfig =
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;
        config.set_environment(config.environment);
        Ok(config)
    }

    /// Apply overrides from `lookup`, which maps variable names to values.
    ///
    /// Recognised: [`ROOT_VAR`], [`ENV_VAR`] and
    /// `ATRIUM_OAUTH_<PROVIDER>_CLIENT_ID` for each provider.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(root) = lookup(ROOT_VAR) {
            self.root = AppRoot::new(root);
        }
        if let Some(env) = lookup(ENV_VAR) {
            self.set_environment(env.parse()?);
        }
        for provider in OAuthProvider::all() {
            let key = oauth_client_id_var(*provider);
            if let Some(id) = lookup(key.as_str()) {
                *self.oauth.client_id_mut(*provider) = Some(id);
            }
        }
        Ok(())
    }

    /// Set the runtime mode, keeping `settings.environment` in step.
    pub fn set_environment(&mut self, environment: Environment) {
        self.environment = environment;
        self.settings.environment = environment;
    }

    pub fn base_layout_path(&self) -> PathBuf {
        self.root.path(&self.views_dir).join(&self.base_layout)
    }

    pub fn template_path(&self, name: &str) -> PathBuf {
        self.root.path(&self.views_dir).join(name)
    }

    pub fn js_dir_path(&self) -> PathBuf {
        self.root.path(&self.js_dir)
    }

    pub fn css_dir_path(&self) -> PathBuf {
        self.root.path(&self.css_dir)
    }
}

/// `ATRIUM_OAUTH_GOOGLE_CLIENT_ID` and friends.
pub fn oauth_client_id_var(provider: OAuthProvider) -> String {
    format!(
        "ATRIUM_OAUTH_{}_CLIENT_ID",
        provider.as_str().to_ascii_uppercase()
    )
}
