//! Condition dataset files.
//!
//! A dataset is either JSON (a bare array of conditions, or an object with a
//! `conditions` array) or TOML (`[[conditions]]` tables):
//!
//! ```toml
//! [[conditions]]
//! name = "Migraine"
//! symptoms = ["headache", "nausea"]
//! prior = 0.12
//! medicines = ["Sumatriptan"]
//! doctor_specialization = "Neurologist"
//! ```

use medassist_domain::{
    Condition, DomainError, KnowledgeBase, Recommendations, builtin_conditions,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Could not read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON dataset {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid TOML dataset {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unsupported dataset format for {0} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid knowledge base: {0}")]
    Invalid(#[from] DomainError),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonDataset {
    Bare(Vec<ConditionRecord>),
    Wrapped { conditions: Vec<ConditionRecord> },
}

#[derive(Debug, Deserialize)]
struct TomlDataset {
    conditions: Vec<ConditionRecord>,
}

#[derive(Debug, Deserialize)]
struct ConditionRecord {
    id: Option<String>,
    name: String,
    symptoms: Vec<String>,
    prior: Option<f64>,
    #[serde(default)]
    medicines: Vec<String>,
    #[serde(default)]
    exercises: Vec<String>,
    #[serde(default)]
    diet: Vec<String>,
    #[serde(default)]
    doctor_specialization: String,
    #[serde(default)]
    description: String,
}

impl From<ConditionRecord> for Condition {
    fn from(record: ConditionRecord) -> Self {
        let mut condition = Condition::new(record.name, record.symptoms).with_recommendations(
            Recommendations {
                medicines: record.medicines,
                exercises: record.exercises,
                diet: record.diet,
                doctor_specialization: record.doctor_specialization,
                description: record.description,
            },
        );
        if let Some(id) = record.id {
            condition = condition.with_id(id);
        }
        if let Some(prior) = record.prior {
            condition = condition.with_prior(prior);
        }
        condition
    }
}

/// Read the conditions of a dataset file, format chosen by extension
pub fn load_dataset(path: &Path) -> Result<Vec<Condition>, DatasetError> {
    let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let records = match extension.as_deref() {
        Some("json") => {
            match serde_json::from_str(&content).map_err(|source| DatasetError::Json {
                path: path.to_path_buf(),
                source,
            })? {
                JsonDataset::Bare(records) => records,
                JsonDataset::Wrapped { conditions } => conditions,
            }
        }
        Some("toml") => {
            let dataset: TomlDataset =
                toml::from_str(&content).map_err(|source| DatasetError::Toml {
                    path: path.to_path_buf(),
                    source,
                })?;
            dataset.conditions
        }
        _ => return Err(DatasetError::UnsupportedFormat(path.to_path_buf())),
    };

    Ok(records.into_iter().map(Condition::from).collect())
}

/// Build the knowledge base from `dataset`, or from the built-in catalog
pub fn load_knowledge(dataset: Option<&Path>) -> Result<KnowledgeBase, DatasetError> {
    let conditions = match dataset {
        Some(path) => load_dataset(path)?,
        None => builtin_conditions(),
    };
    let knowledge = KnowledgeBase::new(conditions)?;
    info!(
        "Loaded knowledge base: {} conditions, {} symptoms ({})",
        knowledge.len(),
        knowledge.symptoms().len(),
        dataset.map_or_else(|| "built-in".to_string(), |p| p.display().to_string())
    );
    Ok(knowledge)
}
