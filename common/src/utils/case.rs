/// Converts a camelCase option key into its kebab-case flag body.
///
/// A separator is inserted before each internal uppercase letter and the
/// result is lower-cased: `sourcePort` becomes `source-port`.
pub fn camel_to_kebab(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    for (idx, c) in input.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if idx > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Builds a long-form flag (`--source-port`) from a camelCase key.
pub fn key_to_flag(key: &str) -> String {
    format!("--{}", camel_to_kebab(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_camel_case() {
        assert_eq!(camel_to_kebab("sourcePort"), "source-port");
        assert_eq!(camel_to_kebab("maxSendtoFailures"), "max-sendto-failures");
        assert_eq!(camel_to_kebab("rate"), "rate");
        assert_eq!(camel_to_kebab("Leading"), "leading");
        assert_eq!(camel_to_kebab("probe2Count"), "probe2-count");
    }

    #[test]
    fn prefixes_flag_marker() {
        assert_eq!(key_to_flag("vpnMode"), "--vpn-mode");
        assert_eq!(key_to_flag("quiet"), "--quiet");
    }
}
