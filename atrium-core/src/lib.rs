//! Atrium core library: domain types, runtime environment, configuration.
//!
//! - [`types`]: tenant, user, settings and OAuth provider types
//! - [`env`]: [`Environment`] mode flag and [`AppRoot`] path resolution
//! - [`config`]: [`RendererConfig`] loading (defaults, YAML, environment)
//! - [`error`]: [`ConfigError`]

pub mod config;
pub mod env;
pub mod error;
pub mod types;

pub use config::RendererConfig;
pub use env::{AppRoot, Environment};
pub use error::ConfigError;
pub use types::{
    AppSettings, OAuthConfig, OAuthProvider, ProviderRegistry, Role, Tenant, TenantId,
    TenantStatus, User, UserId,
};
