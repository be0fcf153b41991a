/// Settings for an interactive session.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Initial viewport width in screen units
    pub viewport_width: u32,
    /// Initial viewport height in screen units
    pub viewport_height: u32,
    /// Separator used when printing node paths
    pub path_separator: char,
    /// Character-grid size for the `show` preview
    pub preview_cols: usize,
    pub preview_rows: usize,
    /// Log directive added on top of `RUST_LOG`
    pub log_directive: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280,
            viewport_height: 800,
            path_separator: std::path::MAIN_SEPARATOR,
            preview_cols: 96,
            preview_rows: 30,
            log_directive: "dirmap=info".to_string(),
        }
    }
}
