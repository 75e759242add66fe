#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;
use std::time::Duration;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::BackendName;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    Backend,
    BackendHealthCheckTimeout,
    #[strum(serialize = "chat-url")]
    ChatURL,
    ConfigFile,
    Model,
    #[strum(serialize = "openai-token")]
    OpenAiToken,
    #[strum(serialize = "openai-url")]
    OpenAiURL,
    TypingDelay,
}

impl ConfigKey {
    fn is_millis(&self) -> bool {
        return matches!(
            self,
            ConfigKey::BackendHealthCheckTimeout | ConfigKey::TypingDelay
        );
    }
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let default_backend = BackendName::JnanaMitra.to_string();
        let config_path = dirs::config_dir()
            .map(|dir| return dir.join("jnanamitra/config.toml"))
            .map(|dir| return dir.to_string_lossy().to_string())
            .unwrap_or_default();

        let res = match key {
            ConfigKey::Backend => &default_backend,
            ConfigKey::BackendHealthCheckTimeout => "1000",
            ConfigKey::ChatURL => "http://localhost:8003",
            ConfigKey::Model => "gpt-3.5-turbo",
            ConfigKey::OpenAiToken => "",
            ConfigKey::OpenAiURL => "https://api.openai.com",
            ConfigKey::TypingDelay => "1500",

            // Special
            ConfigKey::ConfigFile => &config_path,
        };

        return res.to_string();
    }

    /// Resolves every key in order of precedence: defaults, then the TOML
    /// config file, then flags and their environment variables.
    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let config_path = Config::config_path(&clap_arg_matches);
        if !config_path.as_os_str().is_empty() && config_path.exists() {
            let toml_str = fs::read_to_string(&config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                let val = match doc.get(&key.to_string()) {
                    Some(val) => val,
                    None => continue,
                };

                let val = if let Some(val_int) = val.as_integer() {
                    val_int.to_string()
                } else if let Some(val_str) = val.as_str() {
                    val_str.to_string()
                } else {
                    bail!(format!(
                        "config.toml has an invalid type for key '{key}': expected a string or a number"
                    ));
                };

                if val.is_empty() {
                    continue;
                }
                Config::validate(&cmd, key, &val, "config.toml")?;
                Config::set(key, &val);
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::validate(&cmd, key, val, "Flag or environment variable")?;
                    Config::set(key, val);
                }
            }
        }

        tracing::debug!(
            backend = Config::get(ConfigKey::Backend),
            chat_url = Config::get(ConfigKey::ChatURL),
            model = Config::get(ConfigKey::Model),
            typing_delay = Config::get(ConfigKey::TypingDelay),
            "config"
        );

        return Ok(());
    }

    /// Reads a millisecond key. Values are validated by `load`, so this only
    /// fails for keys that were never loaded.
    pub fn get_millis(key: ConfigKey) -> Result<Duration> {
        let val = Config::get(key);
        let millis = val.parse::<u64>().map_err(|_| {
            return anyhow!("Config key '{key}' is not a number of milliseconds: {val}");
        })?;

        return Ok(Duration::from_millis(millis));
    }

    fn config_path(clap_arg_matches: &[&ArgMatches]) -> path::PathBuf {
        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        return path::PathBuf::from(config_file);
    }

    /// Checks a value against the clap possible values for its key, and that
    /// millisecond keys hold whole numbers. `source` names where it came from.
    fn validate(cmd: &Command, key: ConfigKey, val: &str, source: &str) -> Result<()> {
        if key.is_millis() && val.parse::<u64>().is_err() {
            bail!(format!(
                "{source} has an invalid value for key '{key}': {val}\nExpected a whole number of milliseconds"
            ));
        }

        let possible_values = cmd
            .get_arguments()
            .find(|e| return e.get_long() == Some(key.to_string().as_str()))
            .map(|arg| {
                return arg
                    .get_possible_values()
                    .iter()
                    .map(|e| return e.get_name().to_string())
                    .collect::<Vec<String>>();
            })
            .unwrap_or_default();

        if !possible_values.is_empty() && !possible_values.contains(&val.to_string()) {
            bail!(format!(
                "{source} has an invalid value for key '{key}': {val}\nPossible values are: {}",
                possible_values.join(", ")
            ));
        }

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {}]", possible_values);
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i32>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
