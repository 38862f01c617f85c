use std::time::Duration;

/// Default name of the ZMap executable, resolved through `PATH`.
pub const DEFAULT_EXECUTABLE: &str = "zmap";

/// Upper bound for the `zmap -h` availability probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Global configuration options for the host application.
///
/// This struct controls how the library locates the scanner binary and how
/// loud the front end is. It is typically constructed from CLI arguments.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path (or bare name) of the ZMap executable.
    pub zmap_path: String,

    /// How long the availability probe may run before the binary is
    /// considered missing.
    pub probe_timeout: Duration,

    /// Toggles the display of the startup banner.
    pub no_banner: bool,

    /// Controls the visual density of the terminal output.
    ///
    /// # Levels
    /// * **0** (Default): Full UI, headers, trees and summary.
    /// * **1**: Reduced styling, no headers.
    /// * **2**: Raw mode. One address per line, suitable for piping.
    pub quiet: u8,

    /// Logging detail (`-v` debug, `-vv` trace).
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zmap_path: DEFAULT_EXECUTABLE.to_string(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            no_banner: false,
            quiet: 0,
            verbosity: 0,
        }
    }
}
