//! The app instance being orchestrated.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use polydock_common::AppInstanceStatus;
use polydock_common::keys::instance as keys;
use serde::{Deserialize, Serialize};

/// URL handed to the user once the instance is claimed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppUrl {
    pub url: String,
    pub one_time_login_url: String,
    pub expires_at: DateTime<Utc>,
}

impl AppUrl {
    /// A URL valid for `ttl_hours` from `now`, or `None` when the expiry
    /// falls outside the representable time range.
    #[must_use]
    pub fn valid_for(
        url: impl Into<String>,
        one_time_login_url: impl Into<String>,
        ttl_hours: i64,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let expires_at = TimeDelta::try_hours(ttl_hours).and_then(|ttl| now.checked_add_signed(ttl))?;
        Some(Self {
            url: url.into(),
            one_time_login_url: one_time_login_url.into(),
            expires_at,
        })
    }
}

/// One hosted application instance.
///
/// `key_values` carries both the configuration handed in by the scheduler
/// and the values phases derive. The status only moves through phase
/// execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInstance {
    pub app_name: String,
    pub app_type: String,
    status: AppInstanceStatus,
    #[serde(default)]
    status_message: String,
    #[serde(default)]
    key_values: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    app_url: Option<AppUrl>,
}

impl AppInstance {
    #[must_use]
    pub fn new(
        app_name: impl Into<String>,
        app_type: impl Into<String>,
        status: AppInstanceStatus,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            app_type: app_type.into(),
            status,
            status_message: status.status_message(),
            key_values: BTreeMap::new(),
            app_url: None,
        }
    }

    /// Builder-style [`AppInstance::store_value`].
    #[must_use]
    pub fn with_value(mut self, key: &str, value: impl Into<String>) -> Self {
        self.store_value(key, value);
        self
    }

    #[must_use]
    pub fn status(&self) -> AppInstanceStatus {
        self.status
    }

    #[must_use]
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// The value stored under `key`, treating empty strings as unset.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.key_values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// The value stored under `key`, or `""` when unset.
    #[must_use]
    pub fn value_or_empty(&self, key: &str) -> &str {
        self.value(key).unwrap_or_default()
    }

    /// Like [`AppInstance::value`] but resolves the app type placeholder
    /// used in required-value lists.
    #[must_use]
    pub fn required_value(&self, key: &str) -> Option<&str> {
        if key == keys::APP_TYPE {
            Some(self.app_type.as_str()).filter(|v| !v.is_empty())
        } else {
            self.value(key)
        }
    }

    pub fn store_value(&mut self, key: &str, value: impl Into<String>) {
        self.key_values.insert(key.to_string(), value.into());
    }

    pub fn key_values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.key_values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn app_url(&self) -> Option<&AppUrl> {
        self.app_url.as_ref()
    }

    pub(crate) fn set_status(&mut self, status: AppInstanceStatus, message: impl Into<String>) {
        self.status = status;
        self.status_message = message.into();
    }

    pub(crate) fn set_app_url(&mut self, app_url: AppUrl) {
        self.app_url = Some(app_url);
    }
}
