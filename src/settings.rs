use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::i18n::Language;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSettings {
    pub auto_sync_enabled: bool,
    /// Simulated sync delay; there is no real transport behind it.
    pub sync_delay_ms: u64,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            auto_sync_enabled: true,
            sync_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UserSettings {
    language: Language,
    sync: SyncSettings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn language(&self) -> Language {
        self.data.read().unwrap().language
    }

    pub fn update_language(&self, language: Language) -> Result<()> {
        let mut guard = self.data.write().unwrap();
        guard.language = language;
        self.persist(&guard)
    }

    pub fn sync(&self) -> SyncSettings {
        self.data.read().unwrap().sync.clone()
    }

    pub fn update_sync(&self, settings: SyncSettings) -> Result<()> {
        let mut guard = self.data.write().unwrap();
        guard.sync = settings;
        self.persist(&guard)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
