use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use serde::Serialize;

pub const DEFAULT_ADVANCE_DELAY_MS: u64 = 500;
pub const DEFAULT_POPOVER_DISMISS_MS: u64 = 2000;
pub const DEFAULT_LONG_PRESS_MS: u64 = 400;

/// Timings the front end uses for its own one-shot timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiTimings {
    /// Pause after an answer before the next question is loaded
    pub advance_delay_ms: u64,
    /// Matrix popover auto-hide
    pub popover_dismiss_ms: u64,
    /// Touch hold that opens a popover instead of jumping to the fact
    pub long_press_ms: u64,
}

impl Default for UiTimings {
    fn default() -> Self {
        Self {
            advance_delay_ms: DEFAULT_ADVANCE_DELAY_MS,
            popover_dismiss_ms: DEFAULT_POPOVER_DISMISS_MS,
            long_press_ms: DEFAULT_LONG_PRESS_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `times_server=debug`
    pub level: String,
    /// Daily-rolling log files go here when set
    pub file_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log: LogConfig,
    pub data_dir: PathBuf,
    pub seed: Option<u64>,
    pub ui: UiTimings,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any variable source. Unparseable values fall back to defaults.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = var("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3000);

        let host = var("HOST")
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));

        let file_logs = var("ENABLE_FILE_LOGS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        let log = LogConfig {
            level: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            file_dir: file_logs
                .then(|| PathBuf::from(var("LOG_DIR").unwrap_or_else(|| "./logs".to_string()))),
        };

        let data_dir = var("DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let seed = var("TRAINER_SEED").and_then(|value| value.trim().parse::<u64>().ok());

        let millis = |key: &str, default: u64| {
            var(key)
                .and_then(|value| value.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };

        let ui = UiTimings {
            advance_delay_ms: millis("ADVANCE_DELAY_MS", DEFAULT_ADVANCE_DELAY_MS),
            popover_dismiss_ms: millis("POPOVER_DISMISS_MS", DEFAULT_POPOVER_DISMISS_MS),
            long_press_ms: millis("LONG_PRESS_MS", DEFAULT_LONG_PRESS_MS),
        };

        Self {
            host,
            port,
            log,
            data_dir,
            seed,
            ui,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("mathtrainer"))
        .unwrap_or_else(|| PathBuf::from("./data"))
}
