//! `atrium render <TEMPLATE>`: render one page with a synthetic request.

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::Value;

use atrium_core::{Role, Tenant, TenantId, TenantStatus, User, UserId};
use atrium_renderer::{RenderData, Renderer, RequestContext};

use crate::GlobalArgs;

/// Arguments for `atrium render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Registered template name, e.g. `index.html`.
    pub template: String,

    /// JSON file holding the page data (must be an object).
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Base URL of the simulated request.
    #[arg(long, default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Sign-in endpoint; defaults to the base URL.
    #[arg(long)]
    pub auth_endpoint: Option<String>,

    /// Tenant subdomain for the simulated request.
    #[arg(long, value_name = "SUBDOMAIN")]
    pub tenant: Option<String>,

    /// Tenant display name; defaults to the subdomain.
    #[arg(long, requires = "tenant")]
    pub tenant_name: Option<String>,

    /// Render as a signed-in user with this email.
    #[arg(long, value_name = "EMAIL")]
    pub user_email: Option<String>,

    /// Display name of the signed-in user; defaults to the email's local part.
    #[arg(long, requires = "user_email")]
    pub user_name: Option<String>,

    /// Extra render variable; VALUE is parsed as JSON, falling back to a string.
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, Value)>,

    /// Write to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl RenderArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let config = global.load_config()?;
        let renderer = Renderer::new(config).context("renderer failed to start")?;

        let data = match &self.data {
            Some(path) => read_data(path)?,
            None => RenderData::new(),
        };
        let ctx = self.request_context();
        tracing::debug!(
            keys = data.len(),
            vars = self.vars.len(),
            authenticated = self.user_email.is_some(),
            "page data loaded"
        );

        match &self.output {
            // Render fully before touching the file so a failure leaves it intact.
            Some(path) => {
                let mut html = Vec::new();
                renderer
                    .render(&mut html, &self.template, data, &ctx)
                    .with_context(|| format!("failed to render '{}'", self.template))?;
                std::fs::write(path, html)
                    .with_context(|| format!("cannot write '{}'", path.display()))?;
            }
            None => {
                let mut out = BufWriter::new(std::io::stdout().lock());
                renderer
                    .render(&mut out, &self.template, data, &ctx)
                    .with_context(|| format!("failed to render '{}'", self.template))?;
                out.flush().context("cannot write to stdout")?;
            }
        }
        Ok(())
    }

    fn request_context(&self) -> RequestContext {
        let mut ctx = RequestContext::new(self.base_url.clone());
        if let Some(endpoint) = &self.auth_endpoint {
            ctx = ctx.with_auth_endpoint(endpoint.clone());
        }
        if let Some(subdomain) = &self.tenant {
            ctx = ctx.with_tenant(Tenant {
                id: TenantId(1),
                name: self.tenant_name.clone().unwrap_or_else(|| subdomain.clone()),
                subdomain: subdomain.clone(),
                cname: None,
                status: TenantStatus::Active,
            });
        }
        if let Some(email) = &self.user_email {
            let name = self.user_name.clone().unwrap_or_else(|| {
                email.split('@').next().unwrap_or(email).to_string()
            });
            ctx = ctx.with_user(User {
                id: UserId(1),
                name,
                email: email.clone(),
                role: Role::Member,
            });
        }
        for (key, value) in &self.vars {
            ctx = ctx.with_var(key.clone(), value.clone());
        }
        ctx
    }
}

fn read_data(path: &std::path::Path) -> Result<RenderData> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read data file '{}'", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("data file '{}' is not valid JSON", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => bail!("data file '{}' must contain a JSON object", path.display()),
    }
}

fn parse_var(s: &str) -> std::result::Result<(String, Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}
