use std::collections::HashMap;
use std::env;
use std::fs;
use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DEFAULT_EVENTS_FILE: &str = "./data/events.json";
const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Argentina::Buenos_Aires;
const DEFAULT_VISIBLE_TRACKS: usize = 2;
const DEFAULT_API_PORT: u16 = 3030;
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(ConfigError::InvalidLine {
                    line: idx + 1,
                    content: line.to_string(),
                });
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// File value first, then the process environment.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).or_else(|| env::var(key).ok())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    pub fn weekday_labels(&self) -> [&'static str; 7] {
        match self {
            Language::En => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            Language::Es => ["Dom", "Lun", "Mar", "Mié", "Jue", "Vie", "Sáb"],
        }
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            _ => Err(invalid("LANGUAGE", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Cli,
    Api,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub run_mode: RunMode,
    pub events_file: String,
    pub timezone: Tz,
    pub language: Language,
    pub visible_tracks: usize,
    pub api_port: u16,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub log_level: String,
}

impl Settings {
    pub fn resolve(config: &AppConfig) -> Result<Self, ConfigError> {
        let run_mode = match config.lookup("RUN_MODE").as_deref() {
            None | Some("cli") => RunMode::Cli,
            Some("api") => RunMode::Api,
            Some(other) => return Err(invalid("RUN_MODE", other)),
        };
        let timezone = match config.lookup("SCENE_TIMEZONE") {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|_| invalid("SCENE_TIMEZONE", &name))?,
            None => DEFAULT_TIMEZONE,
        };
        let language = match config.lookup("LANGUAGE") {
            Some(value) => value.parse()?,
            None => Language::default(),
        };
        let visible_tracks = match config.lookup("VISIBLE_TRACKS") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(count) if count >= 1 => count,
                _ => return Err(invalid("VISIBLE_TRACKS", &value)),
            },
            None => DEFAULT_VISIBLE_TRACKS,
        };
        let api_port = match config.lookup("API_PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| invalid("API_PORT", &value))?,
            None => DEFAULT_API_PORT,
        };

        Ok(Self {
            run_mode,
            events_file: config
                .lookup("EVENTS_FILE")
                .unwrap_or(DEFAULT_EVENTS_FILE.to_string()),
            timezone,
            language,
            visible_tracks,
            api_port,
            openai_api_key: config.lookup("OPENAI_API_KEY").filter(|key| !key.is_empty()),
            openai_model: config
                .lookup("OPENAI_MODEL")
                .unwrap_or(DEFAULT_OPENAI_MODEL.to_string()),
            log_level: config
                .lookup("LOG_LEVEL")
                .unwrap_or(DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
