mod config;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use trakt_sync_core::{MediaType, SyncError, SyncResult, validate_url};

pub use config::{ApiConfig, DEFAULT_API_BASE, DefaultConfig, OutputConfig, SyncConfig};

/// Keys accepted by `config get` and `config set`.
pub const KNOWN_KEYS: &[&str] = &[
    "api.client_id",
    "api.access_token",
    "api.base_url",
    "default.media_type",
    "output.json",
];

pub fn config_path() -> SyncResult<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| SyncError::Config("home directory not found".to_string()))?;
    Ok(home.join(".trakt-sync").join("config.toml"))
}

pub fn load_config() -> SyncResult<SyncConfig> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> SyncResult<SyncConfig> {
    if !path.exists() {
        return Ok(SyncConfig::default());
    }
    let content = fs::read_to_string(path)
        .map_err(|err| SyncError::Config(format!("failed to read config: {err}")))?;
    toml::from_str(&content)
        .map_err(|err| SyncError::Config(format!("failed to parse config: {err}")))
}

pub fn save_config(config: &SyncConfig) -> SyncResult<()> {
    save_config_to(&config_path()?, config)
}

pub fn save_config_to(path: &Path, config: &SyncConfig) -> SyncResult<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|err| SyncError::Config(format!("failed to serialize config: {err}")))?;
    write_config_file(path, &content)
}

pub fn config_exists() -> SyncResult<bool> {
    let path = config_path()?;
    Ok(path.exists())
}

pub fn resolve_client_id(config: &SyncConfig) -> Option<String> {
    pick(env::var("TRAKT_CLIENT_ID").ok(), config.api.client_id.as_ref())
}

pub fn resolve_access_token(config: &SyncConfig) -> Option<String> {
    pick(
        env::var("TRAKT_ACCESS_TOKEN").ok(),
        config.api.access_token.as_ref(),
    )
}

pub fn resolve_api_base(config: &SyncConfig) -> String {
    pick(env::var("TRAKT_API_URL").ok(), config.api.base_url.as_ref())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

pub fn resolve_media_type(config: &SyncConfig) -> Option<String> {
    pick(
        env::var("TRAKT_SYNC_MEDIA_TYPE").ok(),
        config.default.media_type.as_ref(),
    )
}

pub fn resolve_json_output(config: &SyncConfig) -> Option<bool> {
    if let Ok(value) = env::var("TRAKT_SYNC_OUTPUT_JSON") {
        return Some(parse_flag(&value));
    }
    config.output.json
}

fn pick(env_value: Option<String>, configured: Option<&String>) -> Option<String> {
    if let Some(value) = env_value
        && !value.trim().is_empty()
    {
        return Some(value);
    }
    configured.filter(|value| !value.trim().is_empty()).cloned()
}

fn parse_flag(value: &str) -> bool {
    let normalized = value.trim().to_lowercase();
    normalized == "1" || normalized == "true" || normalized == "yes"
}

pub fn get_config_value(config: &SyncConfig, key_path: &str) -> Option<String> {
    let parts: Vec<&str> = key_path.split('.').collect();

    match parts.as_slice() {
        ["api", "client_id"] => config.api.client_id.clone(),
        ["api", "access_token"] => config.api.access_token.clone(),
        ["api", "base_url"] => config.api.base_url.clone(),
        ["default", "media_type"] => config.default.media_type.clone(),
        ["output", "json"] => config.output.json.map(|b| b.to_string()),
        _ => None,
    }
}

/// Shows the first and last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

pub fn set_config_value(key_path: &str, value: &str) -> SyncResult<()> {
    set_config_value_in(&config_path()?, key_path, value)
}

pub fn set_config_value_in(path: &Path, key_path: &str, value: &str) -> SyncResult<()> {
    let parts: Vec<&str> = key_path.split('.').collect();
    if parts.len() < 2 {
        return Err(SyncError::Config(
            "key path must have at least 2 parts (e.g., 'api.client_id')".to_string(),
        ));
    }
    if !KNOWN_KEYS.contains(&key_path) {
        return Err(SyncError::Config(format!(
            "unknown key '{key_path}' (expected one of: {})",
            KNOWN_KEYS.join(", ")
        )));
    }

    let item = match key_path {
        "output.json" => toml_edit::value(parse_flag(value)),
        "default.media_type" => {
            let media_type: MediaType = value.parse()?;
            toml_edit::value(media_type.to_string())
        }
        "api.base_url" => {
            validate_url(value)?;
            toml_edit::value(value)
        }
        _ => toml_edit::value(value),
    };

    let content = if path.exists() {
        fs::read_to_string(path)
            .map_err(|err| SyncError::Config(format!("failed to read config: {err}")))?
    } else {
        String::new()
    };

    let mut doc = content
        .parse::<toml_edit::DocumentMut>()
        .map_err(|err| SyncError::Config(format!("failed to parse config: {err}")))?;

    let (last_part, sections) = parts
        .split_last()
        .ok_or_else(|| SyncError::Config(format!("invalid key path '{key_path}'")))?;

    let mut current = doc.as_table_mut();
    for part in sections {
        current = current
            .entry(part)
            .or_insert(toml_edit::Item::Table(Default::default()))
            .as_table_mut()
            .ok_or_else(|| {
                SyncError::Config(format!("cannot set nested value in '{key_path}'"))
            })?;
    }
    current[*last_part] = item;

    write_config_file(path, &doc.to_string())
}

fn write_config_file(path: &Path, content: &str) -> SyncResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| SyncError::Config(format!("failed to create config dir: {err}")))?;
    }
    fs::write(path, content)
        .map_err(|err| SyncError::Config(format!("failed to write config: {err}")))
}

pub fn open_in_editor() -> SyncResult<()> {
    let path = config_path()?;
    if !path.exists() {
        save_config(&SyncConfig::default())?;
    }

    let editor = env::var("EDITOR").unwrap_or_else(|_| {
        if cfg!(target_os = "macos") {
            "vim".to_string()
        } else if cfg!(target_os = "windows") {
            "notepad".to_string()
        } else {
            "nano".to_string()
        }
    });

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .map_err(|err| SyncError::Config(format!("failed to open editor '{editor}': {err}")))?;

    if !status.success() {
        return Err(SyncError::Config(format!(
            "editor exited with status: {status}"
        )));
    }

    Ok(())
}
