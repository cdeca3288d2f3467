//! Configuration access port trait.

/// Section/key lookup over INI-style configuration. Values are raw strings;
/// typed parsing and range checks live in `config_validation`.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// Trimmed, non-empty string value, or `default`.
    fn get_string_or(&self, section: &str, key: &str, default: &str) -> String {
        self.get_string(section, key)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| default.to_string())
    }
}
