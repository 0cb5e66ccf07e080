//! sanoid.conf-compatible configuration loading
//!
//! The file is a list of `[section]` blocks holding `key = value` lines,
//! read with `rust-ini`. A `#` or `;` after whitespace starts a comment.
//! A dataset section may name a template with `use_template = <name>`; the
//! `[template_<name>]` section is then merged underneath the dataset's own
//! keys. Only one level of templating is resolved.

use crate::policy::{RetentionSpec, DEFAULT_PREFIX};
use ini::{Ini, ParseOption};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "/etc/sanoid/sanoid.conf";

/// Key/value pairs of a single section
pub type Section = BTreeMap<String, String>;

/// Configuration errors; all of them abort before any snapshot is touched
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("Key '{key}' appears before any [section]")]
    KeyOutsideSection { key: String },

    #[error("Template '{template}' referenced by '{section}' not found")]
    MissingTemplate { template: String, section: String },

    #[error("Invalid value for '{key}' in '{section}': {value} (expected a non-negative integer)")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },
}

/// Parsed configuration file
#[derive(Debug, Clone, Default)]
pub struct SanoidConfig {
    sections: BTreeMap<String, Section>,
}

impl SanoidConfig {
    /// Load and parse a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse configuration text
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(text, options).map_err(|err| ConfigError::Malformed {
            line: err.line,
            reason: err.msg.to_string(),
        })?;

        if let Some((key, _)) = ini.section(None::<String>).and_then(|props| props.iter().next()) {
            return Err(ConfigError::KeyOutsideSection {
                key: key.to_string(),
            });
        }

        let mut sections: BTreeMap<String, Section> = BTreeMap::new();
        for name in ini.sections().flatten() {
            if sections.contains_key(name) {
                continue;
            }
            // Repeated sections merge, later keys win
            let mut merged = Section::new();
            for props in ini.section_all(Some(name)) {
                for (key, value) in props.iter() {
                    merged.insert(key.to_string(), value.trim().to_string());
                }
            }
            sections.insert(name.to_string(), merged);
        }

        Ok(Self { sections })
    }

    /// Raw section as written in the file
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Section with its template (if any) merged underneath
    ///
    /// A dataset without its own section resolves to an empty section.
    pub fn resolve(&self, name: &str) -> Result<Section, ConfigError> {
        let own = self.sections.get(name).cloned().unwrap_or_default();

        let Some(template) = own.get("use_template") else {
            return Ok(own);
        };

        let template_section = format!("template_{}", template);
        let mut merged = self
            .sections
            .get(&template_section)
            .cloned()
            .ok_or_else(|| ConfigError::MissingTemplate {
                template: template.clone(),
                section: name.to_string(),
            })?;

        merged.extend(own);
        Ok(merged)
    }

    /// Retention policy for a dataset
    pub fn retention_spec(&self, dataset: &str) -> Result<RetentionSpec, ConfigError> {
        let section = self.resolve(dataset)?;

        let count = |key: &str| -> Result<u32, ConfigError> {
            match section.get(key) {
                None => Ok(0),
                Some(value) => value.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                    section: dataset.to_string(),
                    key: key.to_string(),
                    value: value.clone(),
                }),
            }
        };

        Ok(RetentionSpec {
            daily: count("daily")?,
            weekly: count("weekly")?,
            monthly: count("monthly")?,
            yearly: count("yearly")?,
            prefix: section
                .get("snapshot_prefix")
                .cloned()
                .unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
        })
    }
}
