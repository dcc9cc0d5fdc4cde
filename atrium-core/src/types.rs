//! Domain types shared by the renderer and its callers.
//!
//! Everything here is serializable via serde: the renderer injects these
//! values into template data verbatim, and `AppSettings`/`OAuthConfig` are
//! also read from the YAML config file.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::env::Environment;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed identifier for a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(pub u64);

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for TenantId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A strongly-typed identifier for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Lifecycle state of a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    #[default]
    Active,
    Pending,
    Disabled,
}

/// Role of a user inside a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Visitor,
    Member,
    Administrator,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Visitor => write!(f, "visitor"),
            Role::Member => write!(f, "member"),
            Role::Administrator => write!(f, "administrator"),
        }
    }
}

/// The fixed set of supported OAuth sign-in providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Google,
    Facebook,
    GitHub,
}

impl OAuthProvider {
    /// All providers in a stable order.
    pub fn all() -> &'static [OAuthProvider] {
        &[
            OAuthProvider::Google,
            OAuthProvider::Facebook,
            OAuthProvider::GitHub,
        ]
    }

    /// Key used for this provider in template data.
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Facebook => "facebook",
            OAuthProvider::GitHub => "github",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A tenant (one hosted site) of the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    pub subdomain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cname: Option<String>,
    #[serde(default)]
    pub status: TenantStatus,
}

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

/// Application-wide settings, injected into every render as `settings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub version: String,
    pub environment: Environment,
    pub domain: String,
    pub build_time: DateTime<Utc>,
    pub compress: bool,
    pub has_legal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_analytics: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: Environment::default(),
            domain: "localhost".to_string(),
            build_time: DateTime::<Utc>::default(),
            compress: false,
            has_legal: false,
            google_analytics: None,
        }
    }
}

// ---------------------------------------------------------------------------
// OAuth provider registry
// ---------------------------------------------------------------------------

/// Reports whether each OAuth provider is currently available for sign-in.
pub trait ProviderRegistry: Send + Sync {
    fn is_enabled(&self, provider: OAuthProvider) -> bool;
}

/// Client ids for each OAuth provider. A provider without a client id is
/// disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthConfig {
    pub google_client_id: Option<String>,
    pub facebook_client_id: Option<String>,
    pub github_client_id: Option<String>,
}

impl OAuthConfig {
    /// Client id configured for `provider`, if any.
    pub fn client_id(&self, provider: OAuthProvider) -> Option<&str> {
        let id = match provider {
            OAuthProvider::Google => &self.google_client_id,
            OAuthProvider::Facebook => &self.facebook_client_id,
            OAuthProvider::GitHub => &self.github_client_id,
        };
        id.as_deref()
    }

    pub(crate) fn client_id_mut(&mut self, provider: OAuthProvider) -> &mut Option<String> {
        match provider {
            OAuthProvider::Google => &mut self.google_client_id,
            OAuthProvider::Facebook => &mut self.facebook_client_id,
            OAuthProvider::GitHub => &mut self.github_client_id,
        }
    }
}

impl ProviderRegistry for OAuthConfig {
    fn is_enabled(&self, provider: OAuthProvider) -> bool {
        self.client_id(provider)
            .is_some_and(|id| !id.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
