//! `polydock status`: show an app instance's status and values.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use owo_colors::OwoColorize as _;
use polydock_common::AppInstanceStatus;
use polydock_common::keys::instance as keys;
use serde::Serialize;

use crate::domain::{AppInstance, AppUrl};
use crate::infra::JsonInstanceStore;
use crate::output::{OutputContext, json};

/// Shown instead of secret values.
pub const REDACTED: &str = "(hidden)";

/// Serializable snapshot of an instance for display.
#[derive(Debug, Serialize)]
pub struct StatusView<'a> {
    pub app_name: &'a str,
    pub app_type: &'a str,
    pub status: AppInstanceStatus,
    pub status_message: &'a str,
    pub status_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_url: Option<&'a AppUrl>,
    pub values: Vec<(&'a str, &'a str)>,
}

impl<'a> StatusView<'a> {
    #[must_use]
    pub fn new(instance: &'a AppInstance) -> Self {
        Self {
            app_name: &instance.app_name,
            app_type: &instance.app_type,
            status: instance.status(),
            status_message: instance.status_message(),
            status_display: instance.status().status_message(),
            app_url: instance.app_url(),
            values: instance
                .key_values()
                .map(|(k, v)| (k, display_value(k, v)))
                .collect(),
        }
    }
}

/// `value`, or [`REDACTED`] for secret keys.
#[must_use]
pub fn display_value<'a>(key: &str, value: &'a str) -> &'a str {
    if keys::SECRET_VALUES.contains(&key) {
        REDACTED
    } else {
        value
    }
}

/// Run the status command.
///
/// # Errors
///
/// Returns an error if the instance file cannot be read.
pub fn run(ctx: &OutputContext, path: &Path, as_json: bool) -> Result<ExitCode> {
    let instance = JsonInstanceStore::with_path(path.to_path_buf()).load()?;
    let view = StatusView::new(&instance);
    if as_json {
        json::print(&view)?;
        return Ok(ExitCode::SUCCESS);
    }

    ctx.header(&format!("{} ({})", view.app_name, view.app_type));
    if !ctx.quiet {
        let status = view.status.to_string();
        println!(
            "  {}  {}",
            "status".style(ctx.styles.dim),
            status.style(ctx.styles.stage(view.status.stage()))
        );
    }
    ctx.kv("message", view.status_message);
    ctx.kv("display", &view.status_display);
    if let Some(url) = view.app_url {
        ctx.kv("app url", &url.url);
        ctx.kv("expires", &url.expires_at.to_rfc3339());
    }
    if !view.values.is_empty() {
        ctx.header("Values");
        for (key, value) in &view.values {
            ctx.kv(key, value);
        }
    }
    Ok(ExitCode::SUCCESS)
}
