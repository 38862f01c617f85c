//! # Command Compiler
//!
//! Compiles a [`ScanConfig`] into ZMap's flag grammar: long-form flags, each
//! standalone (boolean) or followed by one value token, then the positional
//! subnet token(s).
//!
//! Entries are emitted in insertion order. No legality, range or exclusivity
//! checks happen here; ZMap itself rejects bad invocations.

use std::fmt;

use serde::Serialize;

use netzap_common::scan::{OptionValue, ScanConfig, ScanOption};

/// A compiled invocation. Built fresh for every execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandInvocation {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandInvocation {
    pub fn new(program: impl Into<String>, config: &ScanConfig) -> Self {
        Self {
            program: program.into(),
            args: compile(config),
        }
    }
}

/// Shell-like rendering for logs. Tokens containing whitespace or quotes are single-quoted.
impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || c == '"' || c == '\'') {
                write!(f, " '{}'", arg.replace('\'', r"'\''"))?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

pub fn compile(config: &ScanConfig) -> Vec<String> {
    let mut args: Vec<String> = Vec::with_capacity(config.len() * 2 + 1);

    for (option, value) in config.iter() {
        if option == ScanOption::Subnet {
            continue;
        }
        push_option(&mut args, option, value);
    }

    if let Some(subnet) = config.get(ScanOption::Subnet) {
        push_subnets(&mut args, subnet);
    }

    args
}

fn push_option(args: &mut Vec<String>, option: ScanOption, value: &OptionValue) {
    let flag = option.flag().into_owned();

    match (option, value) {
        (ScanOption::OutputFields, OptionValue::List(fields)) => {
            args.push(flag);
            args.push(fields.join(","));
        }
        (ScanOption::UserMetadata, value) => {
            args.push(flag);
            args.push(value.to_json_text());
        }
        (_, OptionValue::Bool(true)) => args.push(flag),
        (_, OptionValue::Bool(false)) => {}
        (_, value) => {
            args.push(flag);
            args.push(value.to_string());
        }
    }
}

/// A list becomes one positional token per subnet; a single string stays one token.
fn push_subnets(args: &mut Vec<String>, subnet: &OptionValue) {
    match subnet {
        OptionValue::List(subnets) => args.extend(
            subnets
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        ),
        value if !value.is_blank() => args.push(value.to_string()),
        _ => {}
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ScanConfig {
        ScanConfig::new()
            .with(ScanOption::Subnet, "10.0.0.0/8")
            .with(ScanOption::ProbeModule, "tcp_synscan")
            .with(ScanOption::TargetPort, 443u16)
            .with(ScanOption::Rate, 10_000u32)
            .with(ScanOption::DryRun, true)
            .with(ScanOption::Quiet, false)
    }

    #[test]
    fn compiles_in_insertion_order_with_subnet_last() {
        assert_eq!(
            compile(&sample()),
            vec![
                "--probe-module",
                "tcp_synscan",
                "--target-port",
                "443",
                "--rate",
                "10000",
                "--dry-run",
                "10.0.0.0/8",
            ]
        );
    }

    #[test]
    fn deterministic() {
        let config = sample();
        assert_eq!(compile(&config), compile(&config));
    }

    #[test]
    fn booleans_emit_one_or_zero_tokens() {
        let on = ScanConfig::new().with(ScanOption::VpnMode, true);
        let off = ScanConfig::new().with(ScanOption::VpnMode, false);
        assert_eq!(compile(&on), vec!["--vpn-mode"]);
        assert!(compile(&off).is_empty());
    }

    #[test]
    fn output_fields_list_and_string_agree() {
        let list = ScanConfig::new().with(ScanOption::OutputFields, vec!["saddr", "dport"]);
        let joined = ScanConfig::new().with(ScanOption::OutputFields, "saddr,dport");
        assert_eq!(compile(&list), vec!["--output-fields", "saddr,dport"]);
        assert_eq!(compile(&list), compile(&joined));
    }

    #[test]
    fn user_metadata_object_and_string_agree() {
        let object = ScanConfig::new().with(ScanOption::UserMetadata, json!({"team": "red"}));
        let text = ScanConfig::new().with(ScanOption::UserMetadata, r#"{"team":"red"}"#);
        assert_eq!(compile(&object), vec!["--user-metadata", r#"{"team":"red"}"#]);
        assert_eq!(compile(&object), compile(&text));
    }

    #[test]
    fn user_metadata_array_is_json_text() {
        let from_json = ScanConfig::from_json_str(r#"{"userMetadata": ["red", "blue"]}"#).unwrap();
        let from_list = ScanConfig::new().with(ScanOption::UserMetadata, vec!["red", "blue"]);
        assert_eq!(compile(&from_json), vec!["--user-metadata", r#"["red","blue"]"#]);
        assert_eq!(compile(&from_json), compile(&from_list));
    }

    #[test]
    fn subnet_never_follows_a_flag_for_itself() {
        let args = compile(&sample());
        assert_eq!(args.last().map(String::as_str), Some("10.0.0.0/8"));
        assert!(!args.iter().any(|a| a == "--subnet"));
    }

    #[test]
    fn subnet_list_is_one_token_each() {
        let config = ScanConfig::new()
            .with(ScanOption::Subnet, vec!["10.0.0.0/8", " ", "192.168.0.0/16"])
            .with(ScanOption::Seed, 1u32);
        assert_eq!(
            compile(&config),
            vec!["--seed", "1", "10.0.0.0/8", "192.168.0.0/16"]
        );
    }

    #[test]
    fn blank_subnet_is_skipped() {
        let config = ScanConfig::new().with(ScanOption::Subnet, "");
        assert!(compile(&config).is_empty());
    }

    #[test]
    fn mapped_and_derived_flags() {
        let config = ScanConfig::new()
            .with(ScanOption::ConfigFile, "/etc/zmap/zmap.conf")
            .with(ScanOption::MaxSendtoFailures, 5u32)
            .with(ScanOption::SenderThreads, 4u32)
            .with(ScanOption::Cores, "0,1")
            .with(ScanOption::MinHitrate, 0.5);
        assert_eq!(
            compile(&config),
            vec![
                "--config",
                "/etc/zmap/zmap.conf",
                "--max-sendto-failures",
                "5",
                "--sender-threads",
                "4",
                "--cores",
                "0,1",
                "--min-hitrate",
                "0.5",
            ]
        );
    }

    #[test]
    fn invocation_display_quotes_spaces() {
        let config = ScanConfig::new()
            .with(ScanOption::ProbeArgs, "text \"HELLO\"")
            .with(ScanOption::Subnet, "10.0.0.0/8");
        let invocation = CommandInvocation::new("zmap", &config);
        assert_eq!(
            invocation.to_string(),
            r#"zmap --probe-args 'text "HELLO"' 10.0.0.0/8"#
        );
    }
}
