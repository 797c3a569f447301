//! Top-level retrieval configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{IndexConfig, VerifierConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`HOMOLOG_*`)
/// 2. Project config (`homolog.toml` in the project root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RetrievalConfig {
    pub index: IndexConfig,
    pub verifier: VerifierConfig,
}

impl RetrievalConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join("homolog.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
            tracing::debug!(path = %project_config_path.display(), "merged project config");
        }

        Self::apply_env_overrides(&mut config);

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(width) = self.index.signature_width {
            if width == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "index.signature_width".to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
        }
        for (field, weight) in [
            ("index.structural_weight", self.index.structural_weight),
            ("index.semantic_weight", self.index.semantic_weight),
            ("index.context_weight", self.index.context_weight),
            (
                "verifier.similarity_threshold",
                self.verifier.similarity_threshold,
            ),
        ] {
            if let Some(value) = weight {
                if !(0.0..=1.0).contains(&value) {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be between 0.0 and 1.0".to_string(),
                    });
                }
            }
        }
        if let Some(budget) = self.verifier.step_budget {
            if budget == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "verifier.step_budget".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut RetrievalConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: RetrievalConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut RetrievalConfig, other: &RetrievalConfig) {
        // Index
        if other.index.signature_width.is_some() {
            base.index.signature_width = other.index.signature_width;
        }
        if other.index.radius.is_some() {
            base.index.radius = other.index.radius;
        }
        if other.index.structural_weight.is_some() {
            base.index.structural_weight = other.index.structural_weight;
        }
        if other.index.semantic_weight.is_some() {
            base.index.semantic_weight = other.index.semantic_weight;
        }
        if other.index.context_weight.is_some() {
            base.index.context_weight = other.index.context_weight;
        }

        // Verifier
        if other.verifier.similarity_threshold.is_some() {
            base.verifier.similarity_threshold = other.verifier.similarity_threshold;
        }
        if other.verifier.num_walks.is_some() {
            base.verifier.num_walks = other.verifier.num_walks;
        }
        if other.verifier.walk_length.is_some() {
            base.verifier.walk_length = other.verifier.walk_length;
        }
        if other.verifier.step_budget.is_some() {
            base.verifier.step_budget = other.verifier.step_budget;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `HOMOLOG_SIGNATURE_WIDTH`, `HOMOLOG_VERIFIER_THRESHOLD`, etc.
    fn apply_env_overrides(config: &mut RetrievalConfig) {
        if let Ok(val) = std::env::var("HOMOLOG_SIGNATURE_WIDTH") {
            if let Ok(v) = val.parse::<usize>() {
                config.index.signature_width = Some(v);
            }
        }
        if let Ok(val) = std::env::var("HOMOLOG_RADIUS") {
            if let Ok(v) = val.parse::<usize>() {
                config.index.radius = Some(v);
            }
        }
        if let Ok(val) = std::env::var("HOMOLOG_VERIFIER_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.verifier.similarity_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("HOMOLOG_VERIFIER_STEP_BUDGET") {
            if let Ok(v) = val.parse::<u64>() {
                config.verifier.step_budget = Some(v);
            }
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve() {
        let config = RetrievalConfig::default();
        assert_eq!(config.index.effective_signature_width(), 128);
        assert_eq!(config.index.effective_radius(), 2);
        assert!((config.index.effective_structural_weight() - 0.4).abs() < 1e-12);
        assert!((config.index.effective_semantic_weight() - 0.4).abs() < 1e-12);
        assert!((config.index.effective_context_weight() - 0.2).abs() < 1e-12);
        assert!((config.verifier.effective_similarity_threshold() - 0.7).abs() < 1e-12);
        assert_eq!(config.verifier.effective_num_walks(), 10);
        assert_eq!(config.verifier.effective_walk_length(), 3);
        assert_eq!(config.verifier.effective_step_budget(), 1_000_000);
    }

    #[test]
    fn from_toml_overrides() {
        let config = RetrievalConfig::from_toml(
            r#"
            [index]
            signature_width = 64
            radius = 3

            [verifier]
            similarity_threshold = 0.8
            "#,
        )
        .unwrap();
        assert_eq!(config.index.effective_signature_width(), 64);
        assert_eq!(config.index.effective_radius(), 3);
        assert!((config.verifier.effective_similarity_threshold() - 0.8).abs() < 1e-12);
        // Untouched fields keep their defaults.
        assert_eq!(config.verifier.effective_num_walks(), 10);
    }

    #[test]
    fn validation_rejects_zero_width() {
        let config = RetrievalConfig::from_toml("[index]\nsignature_width = 0").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_out_of_range_weight() {
        let config = RetrievalConfig::from_toml("[index]\nsemantic_weight = 1.5").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_merges_project_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("homolog.toml"),
            "[verifier]\nnum_walks = 4\n",
        )
        .unwrap();
        let config = RetrievalConfig::load(dir.path()).unwrap();
        assert_eq!(config.verifier.effective_num_walks(), 4);
        assert_eq!(config.index.effective_signature_width(), 128);
    }

    #[test]
    fn toml_round_trip() {
        let config = RetrievalConfig::from_toml("[index]\nsignature_width = 32").unwrap();
        let rendered = config.to_toml().unwrap();
        let reparsed = RetrievalConfig::from_toml(&rendered).unwrap();
        assert_eq!(reparsed.index.effective_signature_width(), 32);
    }
}
