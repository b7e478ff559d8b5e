//! # Configuration Module
//!
//! A sectioned key/value configuration that can be loaded from TOML and
//! patched from environment variables.
//!
//! Environment variables use a double underscore between section and key,
//! e.g. `DATABASE__HOST=db.local` sets `host` in section `Database`. The
//! section part is matched after capitalizing it (first letter upper, rest
//! lower), so sections are expected to be named that way.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Separator between the section and key parts of an environment variable.
pub const ENV_SEPARATOR: &str = "__";

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  Read { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  Parse { path: PathBuf, source: toml::de::Error },

  /// A top-level entry is not a table.
  #[error("Top-level entry '{name}' is not a section")]
  InvalidSection { name: String },

  /// A value inside a section is not a scalar.
  #[error("Value '{section}.{key}' must be a string, number, boolean or datetime")]
  InvalidValue { section: String, key: String },
}

/// Section name to key/value pairs. All values are plain strings.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
  sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl Config {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builds a config from `(section, [(key, value)])` pairs.
  pub fn from_sections<S, K, V, I>(sections: impl IntoIterator<Item = (S, I)>) -> Self
  where
    S: Into<String>,
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
  {
    let sections = sections
      .into_iter()
      .map(|(name, entries)| {
        let entries = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        (name.into(), entries)
      })
      .collect();
    Self { sections }
  }

  /// Loads a TOML file whose top-level tables are the sections.
  ///
  /// Scalar values are converted to their string form.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, if a top-level
  /// entry is not a table, or if a section holds an array or nested table.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    debug!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;

    let table: toml::Table = toml::from_str(&content).map_err(|e| ConfigError::Parse {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config = Self::from_table(table)?;
    debug!("Loaded {} config sections", config.sections.len());
    Ok(config)
  }

  fn from_table(table: toml::Table) -> Result<Self, ConfigError> {
    let mut sections = BTreeMap::new();

    for (name, value) in table {
      let toml::Value::Table(entries) = value else {
        return Err(ConfigError::InvalidSection { name });
      };

      let mut section = BTreeMap::new();
      for (key, value) in entries {
        let text = match value {
          toml::Value::String(s) => s,
          toml::Value::Integer(i) => i.to_string(),
          toml::Value::Float(f) => f.to_string(),
          toml::Value::Boolean(b) => b.to_string(),
          toml::Value::Datetime(dt) => dt.to_string(),
          toml::Value::Array(_) | toml::Value::Table(_) => {
            return Err(ConfigError::InvalidValue { section: name, key });
          }
        };
        section.insert(key, text);
      }
      sections.insert(name, section);
    }

    Ok(Self { sections })
  }

  pub fn has_section(&self, section: &str) -> bool {
    self.sections.contains_key(section)
  }

  pub fn section(&self, section: &str) -> Option<&BTreeMap<String, String>> {
    self.sections.get(section)
  }

  /// Section names in sorted order.
  pub fn sections(&self) -> impl Iterator<Item = &str> {
    self.sections.keys().map(String::as_str)
  }

  pub fn get(&self, section: &str, key: &str) -> Option<&str> {
    self.sections.get(section)?.get(key).map(String::as_str)
  }

  /// Sets `key` in an existing section. Returns `false` when the section does
  /// not exist; sections are never created implicitly.
  pub fn set(&mut self, section: &str, key: impl Into<String>, value: impl Into<String>) -> bool {
    match self.sections.get_mut(section) {
      Some(entries) => {
        entries.insert(key.into(), value.into());
        true
      }
      None => false,
    }
  }

  /// Adds an empty section if it is not there yet.
  pub fn add_section(&mut self, section: impl Into<String>) {
    self.sections.entry(section.into()).or_default();
  }

  /// Serializes the config back to TOML.
  ///
  /// # Errors
  ///
  /// Returns an error if serialization fails.
  pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
    toml::to_string(self)
  }
}

/// Applies `SECTION__KEY=value` pairs from `vars` to `config`.
///
/// Names without the separator are ignored. The name is split at the first
/// separator; the key keeps any later separators. Both parts are lowercased
/// and the section is then capitalized. Variables naming an unknown section
/// are logged and skipped.
pub fn apply_env_overrides<I, K, V>(config: &mut Config, vars: I) -> &mut Config
where
  I: IntoIterator<Item = (K, V)>,
  K: AsRef<str>,
  V: Into<String>,
{
  for (name, value) in vars {
    let Some((section, key)) = name.as_ref().split_once(ENV_SEPARATOR) else {
      continue;
    };

    let section = capitalize(&section.to_lowercase());
    let key = key.to_lowercase();

    if config.set(&section, key.as_str(), value) {
      debug!("Config override {section}.{key} from environment");
    } else {
      error!("No section {section} or value {key} found.");
    }
  }

  config
}

/// Applies [`apply_env_overrides`] to the process environment.
///
/// Variables whose name or value is not valid UTF-8 are skipped.
pub fn update_config_from_env(config: &mut Config) -> &mut Config {
  apply_env_overrides(config, utf8_vars(std::env::vars_os()))
}

fn utf8_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> impl Iterator<Item = (String, String)> {
  vars.into_iter().filter_map(|(name, value)| match (name.into_string(), value.into_string()) {
    (Ok(name), Ok(value)) => Some((name, value)),
    (Ok(name), Err(_)) => {
      debug!("Skipping environment variable {name}: value is not valid UTF-8");
      None
    }
    (Err(name), _) => {
      debug!("Skipping environment variable {}: name is not valid UTF-8", name.to_string_lossy());
      None
    }
  })
}

fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    None => String::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> Config {
    Config::from_sections([
      ("Database", vec![("host", "localhost"), ("port", "5432")]),
      ("Logging", vec![("level", "info")]),
    ])
  }

  #[test]
  fn capitalize_matches_section_style() {
    assert_eq!(capitalize("database"), "Database");
    assert_eq!(capitalize("dATABASE"), "Database");
    assert_eq!(capitalize(""), "");
  }

  #[test]
  fn overrides_existing_and_new_keys() {
    let mut config = sample();
    apply_env_overrides(
      &mut config,
      [("DATABASE__HOST", "db.internal"), ("DATABASE__USER", "admin")],
    );

    assert_eq!(config.get("Database", "host"), Some("db.internal"));
    assert_eq!(config.get("Database", "user"), Some("admin"));
    assert_eq!(config.get("Database", "port"), Some("5432"));
  }

  #[test]
  fn ignores_names_without_separator() {
    let mut config = sample();
    let before = config.clone();
    apply_env_overrides(&mut config, [("PATH", "/usr/bin"), ("DATABASE_HOST", "x")]);
    assert_eq!(config, before);
  }

  #[test]
  fn unknown_section_is_skipped_and_rest_applied() {
    let mut config = sample();
    apply_env_overrides(
      &mut config,
      [("MISSING__KEY", "x"), ("LOGGING__LEVEL", "debug")],
    );

    assert!(!config.has_section("Missing"));
    assert_eq!(config.get("Logging", "level"), Some("debug"));
  }

  #[test]
  fn splits_on_first_separator_only() {
    let mut config = sample();
    apply_env_overrides(&mut config, [("DATABASE__POOL__SIZE", "10")]);
    assert_eq!(config.get("Database", "pool__size"), Some("10"));
  }

  #[cfg(unix)]
  #[test]
  fn non_utf8_variables_are_skipped() {
    use std::os::unix::ffi::OsStringExt;

    let vars = vec![
      (OsString::from_vec(b"JUNK_\xff".to_vec()), OsString::from("v")),
      (OsString::from("DATABASE__USER"), OsString::from_vec(b"\xfe".to_vec())),
      (OsString::from("DATABASE__HOST"), OsString::from("db")),
    ];

    let mut config = sample();
    apply_env_overrides(&mut config, utf8_vars(vars));
    assert_eq!(config.get("Database", "host"), Some("db"));
    assert_eq!(config.get("Database", "user"), None);
  }

  #[test]
  fn returns_same_config_for_chaining() {
    let mut config = sample();
    let level = apply_env_overrides(&mut config, [("logging__level", "warn")])
      .get("Logging", "level")
      .map(str::to_string);
    assert_eq!(level.as_deref(), Some("warn"));
  }

  #[test]
  fn load_converts_scalars_to_strings() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("app.toml");
    std::fs::write(
      &path,
      "[Database]\nhost = \"localhost\"\nport = 5432\nssl = true\nratio = 0.5\n\n[Empty]\n",
    )?;

    let config = Config::load(&path)?;
    assert_eq!(config.get("Database", "host"), Some("localhost"));
    assert_eq!(config.get("Database", "port"), Some("5432"));
    assert_eq!(config.get("Database", "ssl"), Some("true"));
    assert_eq!(config.get("Database", "ratio"), Some("0.5"));
    assert!(config.has_section("Empty"));
    assert_eq!(config.sections().collect::<Vec<_>>(), vec!["Database", "Empty"]);
    Ok(())
  }

  #[test]
  fn load_rejects_top_level_values() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("app.toml");
    std::fs::write(&path, "name = \"x\"\n")?;

    assert!(matches!(Config::load(&path), Err(ConfigError::InvalidSection { ref name }) if name == "name"));
    Ok(())
  }

  #[test]
  fn load_rejects_nested_values() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("app.toml");
    std::fs::write(&path, "[Database]\nhosts = [\"a\", \"b\"]\n")?;

    assert!(matches!(
      Config::load(&path),
      Err(ConfigError::InvalidValue { ref section, ref key }) if section == "Database" && key == "hosts"
    ));
    Ok(())
  }

  #[test]
  fn load_reports_missing_file_and_bad_syntax() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    assert!(matches!(
      Config::load(&temp.path().join("missing.toml")),
      Err(ConfigError::Read { .. })
    ));

    let path = temp.path().join("broken.toml");
    std::fs::write(&path, "[Database\n")?;
    assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    Ok(())
  }

  #[test]
  fn round_trips_through_toml() -> anyhow::Result<()> {
    let config = sample();
    let text = config.to_toml_string()?;
    let parsed = Config::from_table(toml::from_str(&text)?)?;
    assert_eq!(parsed, config);
    Ok(())
  }

  #[test]
  fn set_never_creates_sections() {
    let mut config = Config::new();
    assert!(!config.set("Nope", "k", "v"));
    config.add_section("Yes");
    assert!(config.set("Yes", "k", "v"));
    assert_eq!(config.section("Yes").map(BTreeMap::len), Some(1));
  }
}
