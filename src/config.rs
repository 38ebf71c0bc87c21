use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Run configuration
///
/// Every field is optional in the TOML file. Without any file the sample
/// classroom corpus is used.
///
/// ```toml
/// documents = ["a a b", "b c"]
/// queries = ["a a"]
///
/// [export]
/// gutter = 2
/// precision = 4
/// sheet = "Report"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub documents: Vec<String>,
    pub queries: Vec<String>,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// empty columns between side-by-side tables
    pub gutter: usize,
    /// decimals used when printing
    pub precision: usize,
    pub sheet: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            gutter: 2,
            precision: 4,
            sheet: "Report".to_string(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            documents: vec![
                "nota prova avaliação sala data prova".to_string(),
                "aluno nota avaliação sala nota".to_string(),
                "aluno prova avaliação".to_string(),
            ],
            queries: vec!["nota aluno".to_string(), "data prova".to_string()],
            export: ExportConfig::default(),
        }
    }
}

impl ReportConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(ReportConfig::from_toml_str("").unwrap(), ReportConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = ReportConfig::from_toml_str(
            r#"
            documents = ["a a b", "b c"]

            [export]
            gutter = 5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.documents, vec!["a a b", "b c"]);
        assert_eq!(cfg.queries, ReportConfig::default().queries);
        assert_eq!(cfg.export.gutter, 5);
        assert_eq!(cfg.export.precision, 4);
        assert_eq!(cfg.export.sheet, "Report");
    }

    #[test]
    fn bad_types_are_parse_errors() {
        let err = ReportConfig::from_toml_str("documents = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ReportConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
