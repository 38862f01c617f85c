//! UDP probe payloads.
//!
//! ZMap's `udp` probe module takes its payload through `--probe-args` as
//! `<encoding> <value>`.

use std::fmt;
use std::str::FromStr;

use crate::error::ZMapError;

/// Encoding of a UDP probe payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeArgKind {
    /// ASCII payload, quoted.
    Text,
    /// Hex-encoded payload.
    Hex,
    /// Payload read from a file.
    File,
}

impl ProbeArgKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProbeArgKind::Text => "text",
            ProbeArgKind::Hex => "hex",
            ProbeArgKind::File => "file",
        }
    }
}

impl fmt::Display for ProbeArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProbeArgKind {
    type Err = ZMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ProbeArgKind::Text),
            "hex" => Ok(ProbeArgKind::Hex),
            "file" => Ok(ProbeArgKind::File),
            other => Err(ZMapError::config(format!("unknown probe encoding '{other}'"))),
        }
    }
}

/// Formats a probe payload for `--probe-args`.
///
/// The text value is embedded verbatim; callers must not pass embedded quotes.
pub fn format_probe_args(kind: ProbeArgKind, value: &str) -> String {
    match kind {
        ProbeArgKind::Text => format!("text \"{value}\""),
        ProbeArgKind::Hex => format!("hex {value}"),
        ProbeArgKind::File => format!("file {value}"),
    }
}

/// Like [`format_probe_args`], for an encoding that arrives as a string.
///
/// An unknown encoding returns `value` unchanged.
pub fn format_probe_args_str(kind: &str, value: &str) -> String {
    match kind.parse::<ProbeArgKind>() {
        Ok(kind) => format_probe_args(kind, value),
        Err(_) => value.to_string(),
    }
}

/// Fields ZMap substitutes into UDP template payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateField {
    Saddr,
    SaddrN,
    Daddr,
    DaddrN,
    Sport,
    SportN,
    Dport,
    DportN,
    RandByte,
    RandDigit,
    RandAlpha,
    RandAlphanum,
}

impl TemplateField {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateField::Saddr => "SADDR",
            TemplateField::SaddrN => "SADDR_N",
            TemplateField::Daddr => "DADDR",
            TemplateField::DaddrN => "DADDR_N",
            TemplateField::Sport => "SPORT",
            TemplateField::SportN => "SPORT_N",
            TemplateField::Dport => "DPORT",
            TemplateField::DportN => "DPORT_N",
            TemplateField::RandByte => "RAND_BYTE",
            TemplateField::RandDigit => "RAND_DIGIT",
            TemplateField::RandAlpha => "RAND_ALPHA",
            TemplateField::RandAlphanum => "RAND_ALPHANUM",
        }
    }

    /// `${FIELD}`, as written inside a template file.
    pub fn placeholder(self) -> String {
        format!("${{{}}}", self.as_str())
    }
}

impl fmt::Display for TemplateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
