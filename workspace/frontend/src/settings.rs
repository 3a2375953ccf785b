use log::Level;
use web_sys::window;

const BACKEND_URL_KEY: &str = "roadsafe_backend_url";
const LOG_LEVEL_KEY: &str = "roadsafe_log_level";

/// Global application settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Base URL of the statistics backend (e.g. "https://api.example.com").
    /// Empty means the page origin.
    pub backend_url: String,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            backend_url: option_env!("BACKEND_URL").unwrap_or_default().to_string(),
            log_level: Level::Info,
            debug_mode: false,
        }
    }
}

impl AppSettings {
    /// Create settings from build-time defaults, window location and localStorage
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        if let Some(window) = window() {
            if let Ok(hostname) = window.location().hostname() {
                settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";

                // In development, use more verbose logging
                if settings.debug_mode {
                    settings.log_level = Level::Debug;
                }
            }

            if let Ok(Some(storage)) = window.local_storage() {
                if let Ok(Some(backend_url)) = storage.get_item(BACKEND_URL_KEY) {
                    if !backend_url.trim().is_empty() {
                        settings.backend_url = backend_url.trim().to_string();
                    }
                }

                if let Ok(Some(log_level)) = storage.get_item(LOG_LEVEL_KEY) {
                    settings.log_level = parse_level(&log_level).unwrap_or(settings.log_level);
                }
            }
        }

        settings
    }
}

/// Parses a log level name as stored in localStorage.
pub fn parse_level(value: &str) -> Option<Level> {
    match value.trim().to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
