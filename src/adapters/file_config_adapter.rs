//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    /// A configuration with no sections; every lookup yields its default.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const SAMPLE: &str = r#"
[analysis]
stock = AAPL
benchmark = ^NDX
benchmark_label = Nasdaq 100
years = 10

[source]
provider = yahoo
timeout_secs = 15

[output]
path = reports/aapl.xlsx
"#;

    #[test]
    fn from_string_parses_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("analysis", "stock"),
            Some("AAPL".to_string())
        );
        assert_eq!(
            adapter.get_string("analysis", "benchmark"),
            Some("^NDX".to_string())
        );
        assert_eq!(
            adapter.get_string("analysis", "benchmark_label"),
            Some("Nasdaq 100".to_string())
        );
        assert_eq!(
            adapter.get_string("output", "path"),
            Some("reports/aapl.xlsx".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("analysis", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_string_or_falls_back() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string_or("analysis", "stock", "NVDA"), "AAPL");
        assert_eq!(
            adapter.get_string_or("analysis", "price_field", "adjusted"),
            "adjusted"
        );
    }

    #[test]
    fn keys_are_case_insensitive() {
        let adapter = FileConfigAdapter::from_string("[Analysis]\nYears = 10\n").unwrap();
        assert_eq!(adapter.get_string("analysis", "years"), Some("10".to_string()));
    }

    #[test]
    fn empty_has_no_values() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.get_string("analysis", "stock"), None);
        assert_eq!(adapter.get_string_or("analysis", "years", "5"), "5");
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config(SAMPLE);
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_string("source", "timeout_secs"), Some("15".to_string()));
        assert_eq!(adapter.get_string("source", "provider"), Some("yahoo".to_string()));
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/stockbench.ini");
        assert!(result.is_err());
    }
}
