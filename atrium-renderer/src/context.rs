//! Render context: per-request inputs and the merged template data.
//!
//! Templates see the caller's page data plus these reserved keys:
//!
//! | Key          | Value                                                   |
//! |--------------|---------------------------------------------------------|
//! | `js_bundle`  | active JS bundle filename                               |
//! | `css_bundle` | active CSS bundle filename                              |
//! | `settings`   | [`AppSettings`]                                         |
//! | `base_url`   | request base URL                                        |
//! | `tenant`     | [`Tenant`] or `null`                                    |
//! | `auth`       | `{ endpoint, providers: { google, facebook, github } }` |
//! | `user`       | [`User`], authenticated requests only                   |
//! | `email`      | the user's email, authenticated requests only           |
//!
//! Merge order: page data, reserved keys, context extras, then `user`/`email`.
//! Later writes win.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use atrium_core::types::{AppSettings, OAuthProvider, ProviderRegistry, Tenant, User};

use crate::assets::AssetBundles;
use crate::error::RenderError;

/// Page-specific data supplied by the caller.
pub type RenderData = Map<String, Value>;

/// Per-request ambient data supplied by the HTTP layer.
pub trait RenderContext {
    fn base_url(&self) -> &str;

    fn tenant(&self) -> Option<&Tenant>;

    /// Where sign-in requests are sent.
    fn auth_endpoint(&self) -> &str;

    fn user(&self) -> Option<&User>;

    fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    /// Caller-defined variables merged after the reserved keys.
    fn render_vars(&self) -> Option<&Map<String, Value>> {
        None
    }
}

// ---------------------------------------------------------------------------
// RequestContext
// ---------------------------------------------------------------------------

/// Plain [`RenderContext`] for callers without their own request type.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    base_url: String,
    auth_endpoint: String,
    tenant: Option<Tenant>,
    user: Option<User>,
    vars: Map<String, Value>,
}

impl RequestContext {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        RequestContext {
            auth_endpoint: base_url.clone(),
            base_url,
            ..Self::default()
        }
    }

    pub fn with_auth_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.auth_endpoint = endpoint.into();
        self
    }

    pub fn with_tenant(mut self, tenant: Tenant) -> Self {
        self.tenant = Some(tenant);
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    /// Add one extra render variable.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl RenderContext for RequestContext {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tenant(&self) -> Option<&Tenant> {
        self.tenant.as_ref()
    }

    fn auth_endpoint(&self) -> &str {
        &self.auth_endpoint
    }

    fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn render_vars(&self) -> Option<&Map<String, Value>> {
        if self.vars.is_empty() {
            None
        } else {
            Some(&self.vars)
        }
    }
}

// ---------------------------------------------------------------------------
// Reserved keys
// ---------------------------------------------------------------------------

/// Sign-in descriptor exposed to templates as `auth`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthDescriptor<'a> {
    pub endpoint: &'a str,
    pub providers: BTreeMap<&'static str, bool>,
}

impl<'a> AuthDescriptor<'a> {
    /// One entry per supported provider.
    pub fn new(endpoint: &'a str, registry: &dyn ProviderRegistry) -> Self {
        let providers = OAuthProvider::all()
            .iter()
            .map(|p| (p.as_str(), registry.is_enabled(*p)))
            .collect();
        AuthDescriptor { endpoint, providers }
    }
}

#[derive(Serialize)]
struct ReservedKeys<'a> {
    js_bundle: &'a str,
    css_bundle: &'a str,
    settings: &'a AppSettings,
    base_url: &'a str,
    tenant: Option<&'a Tenant>,
    auth: AuthDescriptor<'a>,
}

/// Merge reserved keys, context extras and the current user into `data`.
pub fn merge_render_data<C>(
    mut data: RenderData,
    bundles: &AssetBundles,
    settings: &AppSettings,
    providers: &dyn ProviderRegistry,
    ctx: &C,
) -> Result<RenderData, RenderError>
where
    C: RenderContext + ?Sized,
{
    let reserved = ReservedKeys {
        js_bundle: &bundles.js,
        css_bundle: &bundles.css,
        settings,
        base_url: ctx.base_url(),
        tenant: ctx.tenant(),
        auth: AuthDescriptor::new(ctx.auth_endpoint(), providers),
    };
    if let Value::Object(fixed) = serde_json::to_value(&reserved)? {
        data.extend(fixed);
    }

    if let Some(vars) = ctx.render_vars() {
        for (key, value) in vars {
            data.insert(key.clone(), value.clone());
        }
    }

    if ctx.is_authenticated() {
        if let Some(user) = ctx.user() {
            data.insert("user".to_string(), serde_json::to_value(user)?);
            data.insert("email".to_string(), Value::String(user.email.clone()));
        }
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::types::{OAuthConfig, Role, TenantId, TenantStatus, UserId};
    use serde_json::json;

    fn bundles() -> AssetBundles {
        AssetBundles {
            js: "app.a1b2.js".to_string(),
            css: "app.a1b2.css".to_string(),
        }
    }

    fn tenant() -> Tenant {
        Tenant {
            id: TenantId(1),
            name: "Demo".to_string(),
            subdomain: "demo".to_string(),
            cname: None,
            status: TenantStatus::Active,
        }
    }

    fn user() -> User {
        User {
            id: UserId(9),
            name: "Jon Snow".to_string(),
            email: "jon@example.com".to_string(),
            role: Role::Member,
        }
    }

    fn merge(data: RenderData, ctx: &RequestContext) -> RenderData {
        merge_render_data(data, &bundles(), &AppSettings::default(), &OAuthConfig::default(), ctx)
            .unwrap()
    }

    #[test]
    fn reserved_keys_are_injected() {
        let ctx = RequestContext::new("http://demo.test")
            .with_auth_endpoint("http://login.test")
            .with_tenant(tenant());
        let mut data = RenderData::new();
        data.insert("title".to_string(), json!("Hi"));

        let merged = merge(data, &ctx);
        assert_eq!(merged["title"], "Hi");
        assert_eq!(merged["js_bundle"], "app.a1b2.js");
        assert_eq!(merged["css_bundle"], "app.a1b2.css");
        assert_eq!(merged["base_url"], "http://demo.test");
        assert_eq!(merged["tenant"]["subdomain"], "demo");
        assert_eq!(merged["auth"]["endpoint"], "http://login.test");
        assert_eq!(merged["settings"]["environment"], "production");
        assert!(!merged.contains_key("user"));
        assert!(!merged.contains_key("email"));
    }

    #[test]
    fn auth_descriptor_lists_exactly_the_supported_providers() {
        let oauth = OAuthConfig {
            facebook_client_id: Some("fb".to_string()),
            ..OAuthConfig::default()
        };
        let auth = AuthDescriptor::new("/login", &oauth);
        let keys: Vec<_> = auth.providers.keys().copied().collect();
        assert_eq!(keys, ["facebook", "github", "google"]);
        assert!(auth.providers["facebook"]);
        assert!(!auth.providers["google"]);
        assert!(!auth.providers["github"]);
    }

    #[test]
    fn authenticated_context_injects_user_and_email() {
        let ctx = RequestContext::new("http://demo.test").with_user(user());
        let merged = merge(RenderData::new(), &ctx);
        assert_eq!(merged["email"], "jon@example.com");
        assert_eq!(merged["user"]["name"], "Jon Snow");
        assert_eq!(merged["user"]["role"], "member");
    }

    #[test]
    fn context_vars_shadow_reserved_keys() {
        let ctx = RequestContext::new("http://demo.test")
            .with_var("base_url", "http://override.test")
            .with_var("flag", true);
        let merged = merge(RenderData::new(), &ctx);
        assert_eq!(merged["base_url"], "http://override.test");
        assert_eq!(merged["flag"], true);
    }

    #[test]
    fn reserved_keys_shadow_page_data() {
        let ctx = RequestContext::new("http://demo.test");
        let mut data = RenderData::new();
        data.insert("js_bundle".to_string(), json!("stale.js"));
        let merged = merge(data, &ctx);
        assert_eq!(merged["js_bundle"], "app.a1b2.js");
    }

    #[test]
    fn user_keys_win_over_context_vars() {
        let ctx = RequestContext::new("http://demo.test")
            .with_var("email", "someone@else.test")
            .with_user(user());
        let merged = merge(RenderData::new(), &ctx);
        assert_eq!(merged["email"], "jon@example.com");
    }

    #[test]
    fn unauthenticated_context_has_null_tenant_when_absent() {
        let merged = merge(RenderData::new(), &RequestContext::new("/"));
        assert_eq!(merged["tenant"], Value::Null);
    }
}
