//! TOML configuration loading, `source = "..."` include resolution, and sink construction.

mod structs;

pub use structs::{GeneralConfig, SinkConfig};

use crate::internal;
use crate::level::Level;
use crate::pattern::{Formatter, PatternFormatter};
use crate::sink::{ConsoleSinkMt, SharedSink, StderrSinkMt};
use crate::util::{LocalCalendar, UtcCalendar};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Overrides the default config location when set.
pub const CONFIG_ENV: &str = "MINISPDLOG_CONFIG";

/// Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    /// No entries means a single console sink.
    pub sinks: Vec<SinkConfig>,
}

/// Which calendar rendered timestamps use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeZone {
    #[default]
    Local,
    Utc,
}

/// Stream a configured sink writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Console,
    Stderr,
}

impl SinkKind {
    /// `stdout` is accepted as an alias for `console`.
    #[must_use]
    pub fn parse(kind: &str) -> Option<Self> {
        match kind.to_lowercase().as_str() {
            "console" | "stdout" => Some(Self::Console),
            "stderr" => Some(Self::Stderr),
            _ => None,
        }
    }
}

/// Scans raw TOML for `source = "..."` directives before deserialization,
/// since serde cannot handle them.
/// Returns the extracted paths and the remaining TOML content stripped of those lines.
#[doc(hidden)]
#[must_use]
pub fn extract_sources(content: &str) -> (Vec<String>, String) {
    let mut sources = Vec::new();
    let mut remaining = String::new();

    for line in content.lines() {
        let directive = line
            .trim()
            .split_once('=')
            .filter(|(key, _)| key.trim() == "source");
        if let Some((_, value)) = directive {
            let path = value.trim().trim_matches('"').trim_matches('\'');
            if !path.is_empty() {
                sources.push(path.to_string());
            }
        } else {
            remaining.push_str(line);
            remaining.push('\n');
        }
    }

    (sources, remaining)
}

/// Strict parse first so a typo can be reported, then the lenient lookup every level string
/// ends up at.
fn resolve_level(name: &str) -> Level {
    name.parse().unwrap_or_else(|e| {
        internal::warn("CONFIG", &format!("{e}, falling back to info"));
        Level::from_name(name)
    })
}

impl Config {
    /// `$MINISPDLOG_CONFIG` if set, else `config.toml` in the platform config directory.
    /// A missing file is not an error.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined or TOML parsing hits a syntax error.
    pub fn load() -> Result<Self, crate::Error> {
        internal::debug("CONFIG", "Loading config from default location");
        let config_path = Self::get_config_path()?;
        let config = Self::load_with_sources(&config_path, &mut HashSet::new())?;
        internal::info(
            "CONFIG",
            &format!("Config loaded from {}", config_path.display()),
        );
        Ok(config)
    }

    /// Loads configuration from an explicit path instead of the default location.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed, or contains cyclic includes.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        Self::load_with_sources(path, &mut HashSet::new())
    }

    /// Parses TOML text directly; `source` lines are ignored here since there is no base path.
    ///
    /// # Errors
    /// Returns error on TOML syntax or schema errors.
    pub fn parse(content: &str) -> Result<Self, crate::Error> {
        let (_, toml_content) = extract_sources(content);
        Ok(toml::from_str(&toml_content)?)
    }

    /// Recursive loader that expands `source = "..."` includes. `seen` holds the files on the
    /// current include chain only, so a file included from two siblings is loaded twice.
    fn load_with_sources(path: &Path, seen: &mut HashSet<PathBuf>) -> Result<Self, crate::Error> {
        if !path.exists() {
            internal::debug("CONFIG", "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if !seen.insert(canonical.clone()) {
            internal::warn(
                "CONFIG",
                &format!("Cyclic include detected: {}", canonical.display()),
            );
            return Err(crate::Error::CyclicInclude(canonical));
        }

        let content = fs::read_to_string(path)?;
        let (sources, toml_content) = extract_sources(&content);
        let mut config: Self = toml::from_str(&toml_content)?;

        for source_path in sources {
            internal::debug("CONFIG", &format!("Processing source: {source_path}"));
            let expanded = shellexpand::tilde(&source_path);
            let mut source_file = PathBuf::from(expanded.as_ref());
            if source_file.is_relative()
                && let Some(parent) = path.parent()
            {
                source_file = parent.join(source_file);
            }
            if source_file.exists() {
                let source_config = Self::load_with_sources(&source_file, seen)?;
                config.merge(source_config);
            } else {
                internal::warn("CONFIG", &format!("Source file not found: {source_path}"));
            }
        }

        seen.remove(&canonical);
        Ok(config)
    }

    /// Appends an included file's sinks after this file's own; `[general]` always comes
    /// from the including file.
    pub fn merge(&mut self, other: Self) {
        self.sinks.extend(other.sinks);
    }

    /// `$MINISPDLOG_CONFIG` (with `~` expanded) wins over the platform config directory.
    ///
    /// # Errors
    /// Fails when the platform has no concept of a config directory.
    pub fn get_config_path() -> Result<PathBuf, crate::Error> {
        if let Ok(path) = std::env::var(CONFIG_ENV)
            && !path.is_empty()
        {
            return Ok(PathBuf::from(shellexpand::tilde(&path).as_ref()));
        }

        directories::ProjectDirs::from("", "", "minispdlog")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// Default sink threshold as the typed enum; unknown names become `info`.
    #[must_use]
    pub fn parse_level(&self) -> Level {
        resolve_level(&self.general.level)
    }

    /// Threshold for the crate's own diagnostics.
    #[must_use]
    pub fn parse_internal_level(&self) -> Level {
        resolve_level(&self.general.internal_level)
    }

    /// Anything other than `utc` means local time.
    #[must_use]
    pub fn parse_time_zone(&self) -> TimeZone {
        match self.general.time_zone.to_lowercase().as_str() {
            "utc" => TimeZone::Utc,
            _ => TimeZone::Local,
        }
    }

    /// Pattern formatter in the configured time zone.
    #[must_use]
    pub fn formatter(&self, pattern: &str) -> Box<dyn Formatter> {
        match self.parse_time_zone() {
            TimeZone::Local => Box::new(PatternFormatter::with_calendar(pattern, LocalCalendar)),
            TimeZone::Utc => Box::new(PatternFormatter::with_calendar(pattern, UtcCalendar)),
        }
    }

    /// Builds one thread-safe sink per `[[sinks]]` entry, skipping unknown kinds.
    #[must_use]
    pub fn build_sinks(&self) -> Vec<SharedSink> {
        let default_entry = [SinkConfig::default()];
        let entries = if self.sinks.is_empty() {
            &default_entry[..]
        } else {
            &self.sinks[..]
        };

        let mut sinks: Vec<SharedSink> = Vec::with_capacity(entries.len());
        for entry in entries {
            let Some(kind) = SinkKind::parse(&entry.kind) else {
                internal::warn("CONFIG", &format!("Unknown sink kind: {}", entry.kind));
                continue;
            };
            let level = entry
                .level
                .as_deref()
                .map_or_else(|| self.parse_level(), resolve_level);
            let pattern = entry.pattern.as_deref().unwrap_or(&self.general.pattern);
            let formatter = self.formatter(pattern);

            let sink: SharedSink = match kind {
                SinkKind::Console => Arc::new(ConsoleSinkMt::console()),
                SinkKind::Stderr => Arc::new(StderrSinkMt::stderr()),
            };
            sink.set_formatter(formatter);
            sink.set_level(level);
            internal::debug(
                "CONFIG",
                &format!("Built {kind:?} sink: level={level}, pattern=\"{pattern}\""),
            );
            sinks.push(sink);
        }

        sinks
    }
}
