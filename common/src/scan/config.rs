//! # Scan Configuration
//!
//! An insertion-ordered, key-unique set of [`ScanOption`] values.
//!
//! A configuration is a plain value: [`ScanConfig::merge`] never touches either
//! operand and returns a new configuration, so one configuration can seed many
//! independent scans.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, ZMapError};
use crate::scan::option::ScanOption;
use crate::scan::value::OptionValue;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanConfig {
    entries: Vec<(ScanOption, OptionValue)>,
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `option`, keeping its original position if it was already present.
    pub fn insert(&mut self, option: ScanOption, value: impl Into<OptionValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == option) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((option, value)),
        }
    }

    pub fn remove(&mut self, option: ScanOption) -> Option<OptionValue> {
        let idx = self.entries.iter().position(|(key, _)| *key == option)?;
        Some(self.entries.remove(idx).1)
    }

    /// Builder form of [`ScanConfig::insert`].
    pub fn with(mut self, option: ScanOption, value: impl Into<OptionValue>) -> Self {
        self.insert(option, value);
        self
    }

    /// Builder form of [`ScanConfig::remove`].
    pub fn without(mut self, option: ScanOption) -> Self {
        self.remove(option);
        self
    }

    pub fn get(&self, option: ScanOption) -> Option<&OptionValue> {
        self.entries
            .iter()
            .find(|(key, _)| *key == option)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, option: ScanOption) -> bool {
        self.get(option).is_some()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ScanOption, &OptionValue)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shallow merge: keys of `partial` win, overwritten keys keep their
    /// position and new keys are appended in `partial`'s order.
    pub fn merge(&self, partial: &ScanConfig) -> ScanConfig {
        let mut merged = self.clone();
        for (option, value) in partial.iter() {
            merged.insert(option, value.clone());
        }
        merged
    }

    /// Rejects values whose shape the option cannot emit.
    pub fn validate(&self) -> Result<()> {
        for (option, value) in self.iter() {
            if !option.kind().accepts(value) {
                return Err(ZMapError::config(format!(
                    "option '{option}' does not accept {value:?}"
                )));
            }
        }
        Ok(())
    }

    /// Parses a JSON object (e.g. `{"rate": 100, "dryRun": true}`), preserving key order.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ScanConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FromIterator<(ScanOption, OptionValue)> for ScanConfig {
    fn from_iter<I: IntoIterator<Item = (ScanOption, OptionValue)>>(iter: I) -> Self {
        let mut config = ScanConfig::new();
        for (option, value) in iter {
            config.insert(option, value);
        }
        config
    }
}

impl Serialize for ScanConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (option, value) in self.iter() {
            map.serialize_entry(option.key(), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ScanConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(ScanConfigVisitor)
    }
}

struct ScanConfigVisitor;

impl<'de> Visitor<'de> for ScanConfigVisitor {
    type Value = ScanConfig;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of camelCase scan options")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<ScanConfig, A::Error> {
        let mut config = ScanConfig::new();
        while let Some(key) = access.next_key::<String>()? {
            let option: ScanOption = key.parse().map_err(de::Error::custom)?;
            // JSON null means "unset", same as an absent key.
            match access.next_value::<Option<OptionValue>>()? {
                Some(value) => config.insert(option, value),
                None => {
                    config.remove(option);
                }
            }
        }
        Ok(config)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
