//! Label translation stub.
//!
//! The real product ships translated UI resources; this core only needs a
//! lookup that falls back to identity, so unknown keys pass through
//! untouched.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Language {
    En,
    Es,
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "en" => Some(Language::En),
            "es" => Some(Language::Es),
            _ => None,
        }
    }
}

const CATALOG: &[(&str, &str, &str)] = &[
    ("job.status.received", "Received", "Recibido"),
    ("job.status.in_progress", "In progress", "En curso"),
    ("job.status.completed", "Completed", "Completado"),
    ("job.status.delivered", "Delivered", "Entregado"),
    ("job.status.cancelled", "Cancelled", "Cancelado"),
    ("sync.online", "Online", "En línea"),
    ("sync.offline", "Offline", "Sin conexión"),
    ("sync.syncing", "Syncing", "Sincronizando"),
    ("intel.pattern.monthly", "Monthly", "Mensual"),
    ("intel.pattern.quarterly", "Quarterly", "Trimestral"),
    ("intel.pattern.biannual", "Biannual", "Semestral"),
];

#[derive(Debug, Clone)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Catalog lookup with identity fallback for unknown keys.
    pub fn translate(&self, key: &str) -> String {
        CATALOG
            .iter()
            .find(|(catalog_key, _, _)| *catalog_key == key)
            .map(|(_, en, es)| match self.language {
                Language::En => *en,
                Language::Es => *es,
            })
            .unwrap_or(key)
            .to_string()
    }
}
