//! Configuration management for ProofGate.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub relying_party: RelyingPartyConfig,
    pub interaction: InteractionTexts,
    pub poll: PollConfig,
}

/// Relying-party identity registered with the proofing service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelyingPartyConfig {
    pub uuid: String,
    pub name: String,
    pub host_url: String,
}

/// Texts shown on the user's device during interactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionTexts {
    pub auth_display_text: String,
    pub sign_display_text: String,
    pub sign_confirmation_message: String,
}

/// Session status poll tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Pause between status queries, milliseconds.
    pub interval_ms: u64,
    /// Hard cap on total wait for one session, milliseconds.
    pub max_wait_ms: u64,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            relying_party: RelyingPartyConfig {
                uuid: "00000000-0000-0000-0000-000000000000".to_string(),
                name: "DEMO".to_string(),
                host_url: "https://proofing.example.com/rp/v2/".to_string(),
            },
            interaction: InteractionTexts {
                auth_display_text: "Log in to the demo service?".to_string(),
                sign_display_text: "Do you want to sign the file?".to_string(),
                sign_confirmation_message: "Confirmation message dialogue".to_string(),
            },
            poll: PollConfig {
                interval_ms: 1_000,
                max_wait_ms: 120_000,
            },
        }
    }
}
