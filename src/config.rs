use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "HealthSync";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default log filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

/// Get the application data directory
/// ~/HealthSync/ on all platforms (user-visible by design)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("HealthSync")
}

/// Directory where generated report PDFs land.
pub fn exports_dir() -> PathBuf {
    app_data_dir().join("exports")
}

/// Base URL of the local Ollama instance serving the advisory model.
pub fn ollama_base_url() -> String {
    std::env::var("HEALTHSYNC_OLLAMA_URL").unwrap_or_else(|_| "http://localhost:11434".into())
}

/// Model used for the advisory flows.
pub fn advisor_model() -> String {
    std::env::var("HEALTHSYNC_MODEL").unwrap_or_else(|_| "medgemma:latest".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("HealthSync"));
    }

    #[test]
    fn exports_dir_under_app_data() {
        let exports = exports_dir();
        assert!(exports.starts_with(app_data_dir()));
        assert!(exports.ends_with("exports"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }
}
