//! Indexer configuration.
//!
//! Configuration is YAML. Every field has a default, so an empty document
//! (or no file at all) yields the full fact set:
//!
//! ```yaml
//! facts:
//!   definitions: true
//!   references: true
//!   hover: true
//!   implementations: true
//! hover:
//!   show_supertypes: true
//! ```
//!
//! Configuration only decides which extractors run. It never changes whether
//! the walk continues into or prunes a node.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::FactKind;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexerConfig {
    /// Which fact kinds to produce
    pub facts: FactToggles,
    /// Hover text options
    pub hover: HoverConfig,
}

/// Per-fact switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FactToggles {
    /// Emit definition records
    pub definitions: bool,
    /// Emit reference records
    pub references: bool,
    /// Emit hover records
    pub hover: bool,
    /// Emit implementation records
    pub implementations: bool,
}

impl Default for FactToggles {
    fn default() -> Self {
        Self {
            definitions: true,
            references: true,
            hover: true,
            implementations: true,
        }
    }
}

impl FactToggles {
    /// Whether `kind` should be produced.
    #[must_use]
    pub fn enabled(&self, kind: FactKind) -> bool {
        match kind {
            FactKind::Definition => self.definitions,
            FactKind::Reference => self.references,
            FactKind::Hover => self.hover,
            FactKind::Implementation => self.implementations,
        }
    }
}

/// Hover rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HoverConfig {
    /// Append `extends` / `implements` clauses to type hovers
    pub show_supertypes: bool,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            show_supertypes: true,
        }
    }
}

impl IndexerConfig {
    /// Parse configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed YAML or unknown keys.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&content)
    }

    /// Render as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn empty_document_enables_everything() {
        let config = IndexerConfig::from_yaml("").unwrap();

        assert_eq!(config, IndexerConfig::default());
        for kind in FactKind::ALL {
            assert!(config.facts.enabled(kind), "{kind} should be enabled");
        }
        assert!(config.hover.show_supertypes);
    }

    #[rstest]
    #[case::definitions("facts:\n  definitions: false\n", FactKind::Definition)]
    #[case::references("facts:\n  references: false\n", FactKind::Reference)]
    #[case::hover("facts:\n  hover: false\n", FactKind::Hover)]
    #[case::implementations("facts:\n  implementations: false\n", FactKind::Implementation)]
    fn partial_document_disables_one_fact(#[case] yaml: &str, #[case] disabled: FactKind) {
        let config = IndexerConfig::from_yaml(yaml).unwrap();

        for kind in FactKind::ALL {
            assert_eq!(config.facts.enabled(kind), kind != disabled);
        }
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = IndexerConfig::from_yaml("facts:\n  definitons: false\n").unwrap_err();

        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("definitons"));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hover:\n  show_supertypes: false").unwrap();

        let config = IndexerConfig::load(file.path()).unwrap();
        assert!(!config.hover.show_supertypes);
        assert!(config.facts.hover);
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("navdex.yaml");

        let err = IndexerConfig::load(&missing).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn yaml_output_parses_back() {
        let mut config = IndexerConfig::default();
        config.facts.references = false;

        let yaml = config.to_yaml().unwrap();
        assert_eq!(IndexerConfig::from_yaml(&yaml).unwrap(), config);
    }
}
