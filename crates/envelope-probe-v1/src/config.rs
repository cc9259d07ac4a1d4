use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

pub const API_ENV_VAR: &str = "ENVELOPE_API";
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8080";

/// What to render from an envelope after the raw dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Data,
    Metadata,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeSpec {
    pub label: String,
    pub path: String,
    #[serde(default)]
    pub method: Option<String>,
    pub view: View,
    /// Keys looked up for `view: metadata`.
    #[serde(default)]
    pub metadata_keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// API base, optional (overridden by env ENVELOPE_API)
    #[serde(default)]
    pub api_base: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_probes")]
    pub probes: Vec<ProbeSpec>,
}

fn default_timeout_secs() -> u64 {
    10
}

fn probe(label: &str, path: &str, view: View, metadata_keys: &[&str]) -> ProbeSpec {
    ProbeSpec {
        label: label.to_string(),
        path: path.to_string(),
        method: None,
        view,
        metadata_keys: metadata_keys.iter().map(|k| k.to_string()).collect(),
    }
}

fn default_probes() -> Vec<ProbeSpec> {
    vec![
        probe("Success Response", "/api/test/success", View::Data, &[]),
        probe("Data Response", "/api/test/data", View::Data, &[]),
        probe(
            "Metadata Response",
            "/api/test/metadata",
            View::Metadata,
            &["version", "server", "timestamp"],
        ),
        probe("Error Response", "/api/test/error", View::Error, &[]),
    ]
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            timeout_secs: default_timeout_secs(),
            probes: default_probes(),
        }
    }
}

impl ProbeConfig {
    /// Env var wins over the file; trailing slashes are dropped.
    pub fn api_base_url(&self, env_override: Option<String>) -> String {
        env_override
            .or_else(|| self.api_base.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string()
    }
}

/// Loads the config, writing the defaults first if the file does not exist.
pub fn ensure_config(path: &Path) -> Result<ProbeConfig> {
    if !path.exists() {
        let default_cfg = ProbeConfig::default();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create config directory {:?}", parent))?;
        }
        let yaml = serde_yaml::to_string(&default_cfg)?;
        fs::write(path, yaml)
            .with_context(|| format!("Could not write default config to {}", path.display()))?;
        println!("➜ Created default probe config at: {}", path.display());
        println!("  Edit this file to change which endpoints are probed.\n");
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Could not read probe config from {}", path.display()))?;
    let cfg: ProbeConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("Invalid YAML in {}", path.display()))?;
    Ok(cfg)
}
