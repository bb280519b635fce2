//! Naming rules for AI backend credentials.

use std::sync::LazyLock;

use polydock_common::keys::instance as keys;
use regex::Regex;

use crate::domain::instance::AppInstance;

/// Suffix of every project credential name.
pub const CREDENTIAL_SUFFIX: &str = "-proj-creds";

/// Domain used for backend users the scheduler did not name.
pub const AUTOGEN_EMAIL_DOMAIN: &str = "autogen.null";

#[allow(clippy::expect_used)] // literal pattern
static NON_SLUG_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9-]+").expect("valid regex"));

#[allow(clippy::expect_used)] // literal pattern
static SCHEME_OR_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://|/.*$").expect("valid regex"));

/// Credential name for a project: runs of characters outside
/// `[A-Za-z0-9-]` become one `-`, lowercased, suffixed `-proj-creds`.
#[must_use]
pub fn credential_name(project_name: &str) -> String {
    let slug = NON_SLUG_RUN.replace_all(project_name, "-");
    format!("{}{CREDENTIAL_SUFFIX}", slug.trim().to_lowercase())
}

/// Hostname of an LLM API URL: drops an `http(s)://` prefix and any path.
#[must_use]
pub fn llm_api_hostname(url: &str) -> String {
    SCHEME_OR_PATH.replace_all(url, "").into_owned()
}

/// The backend user email for an instance, falling back to
/// `<project-name>@autogen.null`.
#[must_use]
pub fn backend_user_email(instance: &AppInstance) -> String {
    instance.value(keys::AI_BACKEND_USER_EMAIL).map_or_else(
        || {
            format!(
                "{}@{AUTOGEN_EMAIL_DOMAIN}",
                instance.value_or_empty(keys::PROJECT_NAME)
            )
        },
        str::to_string,
    )
}
