//! Client configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). The host/port pair is normally
//! supplied by the device's settings screen; this core only consumes the
//! resolved values.

/// Top-level client configuration.
///
/// Loaded once at startup via [`ClientConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Companion server host name or address.
    pub server_host: String,

    /// Companion server TCP port.
    pub server_port: u16,

    /// Nominal tick rate in Hz.
    pub tick_hz: u32,

    /// Disconnected ticks between reconnect attempts (120 ≈ 2 s at 60 Hz).
    pub reconnect_interval_ticks: u32,
}

impl ClientConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to the device defaults when a variable is not set or
    /// does not parse. Calls `dotenvy::dotenv().ok()` to optionally load
    /// a `.env` file.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            server_host: std::env::var("SERVER_HOST")
                .unwrap_or_else(|_| "192.168.1.100".to_string()),
            server_port: parse_env("SERVER_PORT", 3333),
            tick_hz: parse_env("TICK_HZ", 60),
            reconnect_interval_ticks: parse_env("RECONNECT_INTERVAL_TICKS", 120),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_host: "192.168.1.100".to_string(),
            server_port: 3333,
            tick_hz: 60,
            reconnect_interval_ticks: 120,
        }
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_device_constants() {
        let config = ClientConfig::default();
        assert_eq!(config.server_host, "192.168.1.100");
        assert_eq!(config.server_port, 3333);
        assert_eq!(config.tick_hz, 60);
        assert_eq!(config.reconnect_interval_ticks, 120);
    }

    #[test]
    fn parse_env_falls_back_on_garbage() {
        // Unset variable: default wins.
        assert_eq!(parse_env("COMPANION_LINK_UNSET_KEY", 7_u16), 7);
    }
}
