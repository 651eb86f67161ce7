//! Static catalog data (services, pricing, contacts) loaded from JSON and
//! flattened into the assistant's system prompt.

use relay_core::error::RelayError;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Urgency keywords used when the catalog file doesn't supply its own.
pub const DEFAULT_URGENT_KEYWORDS: &[&str] = &[
    "urgent",
    "emergency",
    "down",
    "outage",
    "can't access",
    "cannot access",
    "critical error",
    "data loss",
    "hacked",
    "ddos",
    "attack",
];

/// Catalog data for prompt construction. Read-only at runtime.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    /// Opening instructions for the assistant.
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub addons: Vec<Addon>,
    #[serde(default)]
    pub os_support: Option<String>,
    /// Contact channels, keyed by label. BTreeMap for stable prompt output.
    #[serde(default)]
    pub contacts: BTreeMap<String, String>,
    #[serde(default)]
    pub urgent_keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
    pub name: String,
    pub specs: String,
    pub price: String,
    #[serde(default)]
    pub promotion: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Addon {
    pub name: String,
    pub price: String,
}

impl Catalog {
    /// Load catalog data from a JSON file. A missing or unreadable file is
    /// not fatal — the assistant just runs without catalog context.
    pub fn load(path: &str) -> Self {
        match Self::try_load(path) {
            Ok(catalog) => {
                info!("loaded catalog data from {path}");
                catalog
            }
            Err(e) => {
                warn!("failed to load catalog from {path}: {e}, using empty catalog");
                Self::default()
            }
        }
    }

    fn try_load(path: &str) -> Result<Self, RelayError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Effective urgency keyword set: catalog entries, or the defaults.
    pub fn effective_urgent_keywords(&self) -> Vec<String> {
        if self.urgent_keywords.is_empty() {
            DEFAULT_URGENT_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect()
        } else {
            self.urgent_keywords.clone()
        }
    }

    /// Build the system prompt: intro, taught knowledge, then the catalog
    /// sections. Knowledge is injected fresh on every call so newly taught
    /// facts apply to the next message.
    pub fn system_prompt(&self, knowledge: &[String]) -> String {
        let mut prompt = String::new();

        if !self.intro.is_empty() {
            prompt.push_str(&self.intro);
            prompt.push_str("\n\n");
        }

        if !knowledge.is_empty() {
            prompt.push_str(
                "=== ADDITIONAL FACTS FROM THE ADMINISTRATOR (prefer this information) ===\n",
            );
            for fact in knowledge {
                prompt.push_str(&format!("- {fact}\n"));
            }
            prompt.push_str("=== END OF ADDITIONAL FACTS ===\n\n");
        }

        if !self.services.is_empty() {
            prompt.push_str("Services and pricing:\n");
            for (i, s) in self.services.iter().enumerate() {
                prompt.push_str(&format!("{}. {}: {} - {}\n", i + 1, s.name, s.specs, s.price));
                if let Some(ref promo) = s.promotion {
                    prompt.push_str(&format!("   * Promotion: {promo}\n"));
                }
            }
            prompt.push('\n');
        }

        if !self.addons.is_empty() {
            prompt.push_str("Add-on services:\n");
            for a in &self.addons {
                prompt.push_str(&format!("- {}: {}\n", a.name, a.price));
            }
            prompt.push('\n');
        }

        if let Some(ref os) = self.os_support {
            prompt.push_str(&format!("Supported operating systems: {os}\n\n"));
        }

        if !self.contacts.is_empty() {
            prompt.push_str("Contacts:\n");
            for (key, value) in &self.contacts {
                prompt.push_str(&format!("- {key}: {value}\n"));
            }
        }

        prompt
    }
}
