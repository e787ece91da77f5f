#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use std::path::PathBuf;

use micmd::{MicmdError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Emit the `(gdb)` terminator line after each result record.
    pub emit_terminator: bool,
    /// Executable to seed the initial program space with.
    pub exec_file: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            emit_terminator: true,
            exec_file: None,
        }
    }
}

/// Loads configuration: defaults, then the config file (when present), then
/// `MICMD_*` environment overrides.
///
/// # Errors
/// Returns `Config` when the file is unreadable or a value fails to parse.
pub fn load_config(path: Option<PathBuf>) -> Result<RuntimeConfig> {
    let config_path = path.unwrap_or_else(|| PathBuf::from(".micmd/config.toml"));
    let mut config = if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| MicmdError::Config(format!("Failed to read config: {e}")))?;
        parse_config_content(&content)?
    } else {
        RuntimeConfig::default()
    };
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Parses the flat `key = value` config format.
///
/// # Errors
/// Returns `Config` on an invalid value.
pub fn parse_config_content(content: &str) -> Result<RuntimeConfig> {
    let mut config = RuntimeConfig::default();

    for line in content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
    {
        if let Some(value) = parse_key_value(line, "prompt") {
            config.emit_terminator = parse_onoff(&expand_env_vars(value))?;
        }
        if let Some(value) = parse_key_value(line, "exec_file") {
            config.exec_file = Some(PathBuf::from(expand_env_vars(value)));
        }
    }

    Ok(config)
}

fn apply_env_overrides(config: &mut RuntimeConfig) -> Result<()> {
    if let Ok(value) = std::env::var("MICMD_PROMPT") {
        config.emit_terminator = parse_onoff(value.trim())?;
    }
    if let Ok(value) = std::env::var("MICMD_EXEC_FILE") {
        if !value.trim().is_empty() {
            config.exec_file = Some(PathBuf::from(value));
        }
    }
    Ok(())
}

fn parse_key_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let (lhs, rhs) = line.split_once('=')?;
    if lhs.trim() == key {
        Some(rhs.trim().trim_matches('"'))
    } else {
        None
    }
}

fn parse_onoff(value: &str) -> Result<bool> {
    match value {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        other => Err(MicmdError::Config(format!(
            "expected on/off, got '{other}'"
        ))),
    }
}

fn expand_env_vars(input: &str) -> String {
    let mut result = input.to_string();
    while let Some(start) = result.find("${") {
        let Some(end_offset) = result[start..].find('}') else {
            break;
        };
        let end = start + end_offset;
        let var_name = result[start + 2..end].to_string();
        let replacement = std::env::var(&var_name).unwrap_or_default();
        result.replace_range(start..=end, &replacement);
    }
    result
}
