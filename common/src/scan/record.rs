use serde::{Deserialize, Serialize};

/// Classification ZMap assigns to a positive TCP SYN response.
pub const CLASSIFICATION_SYNACK: &str = "synack";

/// One parsed output row.
///
/// `saddr` is the responding address, `classification` ZMap's verdict and
/// `dport` the probed port when the output carried a third column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanRecord {
    pub saddr: String,
    pub classification: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dport: Option<String>,
}

impl ScanRecord {
    pub fn new(
        saddr: impl Into<String>,
        classification: impl Into<String>,
        dport: Option<String>,
    ) -> Self {
        Self {
            saddr: saddr.into(),
            classification: classification.into(),
            dport,
        }
    }

    pub fn is_open(&self) -> bool {
        self.classification == CLASSIFICATION_SYNACK
    }

    /// The numeric `dport`, or `default` when absent or not a number.
    pub fn port_or(&self, default: u16) -> u16 {
        self.dport
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or(default)
    }
}
