//! Infrastructure implementation of the `InstanceStore` port.
//!
//! `JsonInstanceStore` keeps one app instance per JSON file and rewrites the
//! whole file on every save, atomically (temp file + rename).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::InstanceStore;
use crate::domain::AppInstance;

/// File-backed instance store.
pub struct JsonInstanceStore {
    path: PathBuf,
}

impl JsonInstanceStore {
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the instance file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid instance.
    pub fn load(&self) -> Result<AppInstance> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading instance file {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parsing instance file {}", self.path.display()))
    }

    /// Write the instance file.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory, temp file or rename fails.
    pub fn save(&self, instance: &AppInstance) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(instance).context("serializing instance")?;

        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, &content)
            .with_context(|| format!("writing temp file {}", temp_path.display()))?;

        // Key values carry deploy keys and passwords.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("setting permissions on {}", temp_path.display()))?;
        }

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("finalizing instance file {}", self.path.display()))?;

        Ok(())
    }

    async fn save_async(&self, instance: &AppInstance) -> Result<()> {
        let path = self.path.clone();
        let instance = instance.clone();
        tokio::task::spawn_blocking(move || JsonInstanceStore::with_path(path).save(&instance))
            .await
            .context("instance save task panicked")?
    }
}

impl InstanceStore for JsonInstanceStore {
    async fn save_status(&self, instance: &AppInstance) -> Result<()> {
        self.save_async(instance).await
    }

    async fn save_value(&self, instance: &AppInstance, _key: &str) -> Result<()> {
        self.save_async(instance).await
    }

    async fn save_app_url(&self, instance: &AppInstance) -> Result<()> {
        self.save_async(instance).await
    }
}
