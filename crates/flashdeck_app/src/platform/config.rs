use std::fs;
use std::path::Path;
use std::time::Duration;

use flashdeck_engine::GeneratorSettings;
use flashdeck_logging::{deck_info, deck_warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILENAME: &str = "flashdeck.ron";
const API_KEY_ENV: &str = "GEMINI_API_KEY";
const MODEL_ENV: &str = "FLASHDECK_MODEL";
const DEFAULT_REMOVAL_DELAY: Duration = Duration::from_millis(300);

/// On-disk shape of `flashdeck.ron`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    model: Option<String>,
    base_url: Option<String>,
    api_key: Option<String>,
    request_timeout_secs: Option<u64>,
    removal_delay_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub generator: GeneratorSettings,
    /// How long a deleted card stays on screen before it is removed.
    pub removal_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorSettings::default(),
            removal_delay: DEFAULT_REMOVAL_DELAY,
        }
    }
}

/// Loads `flashdeck.ron` from `dir`, then applies environment overrides.
pub(crate) fn load_config(dir: &Path) -> AppConfig {
    let file = read_config_file(dir);
    let mut config = apply_file(AppConfig::default(), file);
    apply_env(&mut config, |name| std::env::var(name).ok());
    if config.generator.api_key.is_none() {
        deck_warn!(
            "No API key configured; set {} or api_key in {}",
            API_KEY_ENV,
            CONFIG_FILENAME
        );
    }
    config
}

fn read_config_file(dir: &Path) -> ConfigFile {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return ConfigFile::default();
        }
        Err(err) => {
            deck_warn!("Failed to read config from {:?}: {}", path, err);
            return ConfigFile::default();
        }
    };

    match ron::from_str(&content) {
        Ok(file) => {
            deck_info!("Loaded config from {:?}", path);
            file
        }
        Err(err) => {
            deck_warn!("Failed to parse config from {:?}: {}", path, err);
            ConfigFile::default()
        }
    }
}

fn apply_file(mut config: AppConfig, file: ConfigFile) -> AppConfig {
    if let Some(model) = file.model {
        config.generator.model = model;
    }
    if let Some(base_url) = file.base_url {
        config.generator.base_url = base_url;
    }
    if file.api_key.is_some() {
        config.generator.api_key = file.api_key;
    }
    if let Some(secs) = file.request_timeout_secs {
        config.generator.request_timeout = Duration::from_secs(secs);
    }
    if let Some(ms) = file.removal_delay_ms {
        config.removal_delay = Duration::from_millis(ms);
    }
    config
}

fn apply_env(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.trim().is_empty()) {
        config.generator.api_key = Some(key.trim().to_string());
    }
    if let Some(model) = lookup(MODEL_ENV).filter(|v| !v.trim().is_empty()) {
        config.generator.model = model.trim().to_string();
    }
}
