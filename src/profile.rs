//! Named note profiles, each pointing at its own notes file.
//!
//! The `Default` profile always exists and can't be removed; deleting the
//! current profile falls back to it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::storage::{Snapshot, read_json, write_json};

pub const DEFAULT_PROFILE: &str = "Default";
pub const DEFAULT_NOTES_FILE: &str = "notes.txt";
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

pub fn default_profile() -> String {
    DEFAULT_PROFILE.to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub profiles: BTreeMap<String, String>,
    #[serde(default = "default_profile")]
    pub current_profile: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        let mut config = Self {
            profiles: BTreeMap::new(),
            current_profile: default_profile(),
        };
        config.normalize();
        config
    }
}

impl ProfileConfig {
    fn normalize(&mut self) {
        self.profiles
            .entry(default_profile())
            .or_insert_with(|| DEFAULT_NOTES_FILE.to_string());
        if !self.profiles.contains_key(&self.current_profile) {
            warn!(profile = %self.current_profile, "unknown current profile, using Default");
            self.current_profile = default_profile();
        }
    }
}

#[derive(Debug)]
pub struct ProfileManager {
    path: PathBuf,
    config: ProfileConfig,
}

impl ProfileManager {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut config = match read_json::<ProfileConfig>(&path) {
            Snapshot::Loaded(config) => config,
            Snapshot::Missing => ProfileConfig::default(),
            Snapshot::Corrupt(reason) => {
                warn!(path = %path.display(), %reason, "profile config unreadable, using defaults");
                ProfileConfig::default()
            }
        };
        config.normalize();
        Self { path, config }
    }

    pub fn with_config(path: impl Into<PathBuf>, mut config: ProfileConfig) -> Self {
        config.normalize();
        Self {
            path: path.into(),
            config,
        }
    }

    pub fn save(&self) -> Result<()> {
        write_json(&self.path, &self.config)
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    pub fn current(&self) -> &str {
        &self.config.current_profile
    }

    pub fn profiles(&self) -> &BTreeMap<String, String> {
        &self.config.profiles
    }

    /// Notes file of the current profile.
    pub fn notes_path(&self) -> &Path {
        self.config
            .profiles
            .get(&self.config.current_profile)
            .map(|p| Path::new(p.as_str()))
            .unwrap_or_else(|| Path::new(DEFAULT_NOTES_FILE))
    }

    /// Returns the notes file the caller should reload.
    pub fn switch_profile(&mut self, name: &str) -> Result<&Path> {
        if !self.config.profiles.contains_key(name) {
            return Err(Error::profile_not_found(name));
        }
        self.config.current_profile = name.to_string();
        info!(profile = name, "switched profile");
        Ok(self.notes_path())
    }

    pub fn add_profile(&mut self, name: &str, notes_path: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation("profile name must not be empty"));
        }
        if self.config.profiles.contains_key(name) {
            return Err(Error::validation(format!("profile '{name}' already exists")));
        }
        if notes_path.trim().is_empty() {
            return Err(Error::validation("notes file path must not be empty"));
        }
        self.config
            .profiles
            .insert(name.to_string(), notes_path.trim().to_string());
        info!(profile = name, "added profile");
        Ok(())
    }

    /// Returns the notes file to reload when the current profile was deleted.
    pub fn delete_profile(&mut self, name: &str) -> Result<Option<&Path>> {
        if name == DEFAULT_PROFILE {
            return Err(Error::validation("the Default profile cannot be deleted"));
        }
        if self.config.profiles.remove(name).is_none() {
            return Err(Error::profile_not_found(name));
        }
        info!(profile = name, "deleted profile");
        if self.config.current_profile == name {
            return self.switch_profile(DEFAULT_PROFILE).map(Some);
        }
        Ok(None)
    }
}
