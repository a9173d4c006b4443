//! The serialized quantile model produced by the training pipeline.
//!
//! Artifacts are JSON documents tagged by `kind`:
//!
//! ```text
//! {"kind": "linear", "quantile": 0.95, "coefficients": [..5..], "intercept": 1.2}
//! {"kind": "gradient_boosting", "quantile": 0.95, "init": 4.1, "learning_rate": 0.1,
//!  "trees": [{"nodes": [{"feature": 0, "threshold": 15.0, "left": 1, "right": 2},
//!                       {"value": -0.3}, {"value": 0.8}]}]}
//! ```
//!
//! Both kinds may carry `feature_names` recording the training column order.

use crate::{error::ModelError, Regressor, FEATURE_COUNT};
use log::{info, warn};
use phyco_wqx::Characteristic;
use serde::Deserialize;
use std::path::Path;

/// Linear quantile regression: `intercept + coefficients · x`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinearModel {
    #[serde(default)]
    pub quantile: Option<f64>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// A node of a regression tree. Splits send `x[feature] <= threshold` left.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A regression tree stored as a flat node list; node 0 is the root.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    fn validate(&self, tree: usize) -> Result<(), ModelError> {
        let invalid = |reason: String| ModelError::InvalidTree { tree, reason };
        if self.nodes.is_empty() {
            return Err(invalid("tree has no nodes".to_string()));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            if let Node::Split {
                feature,
                left,
                right,
                ..
            } = node
            {
                if *feature >= FEATURE_COUNT {
                    return Err(invalid(format!(
                        "node {} splits on feature {} of {}",
                        idx, feature, FEATURE_COUNT
                    )));
                }
                for child in [*left, *right] {
                    // children after their parent rules out cycles
                    if child <= idx || child >= self.nodes.len() {
                        return Err(invalid(format!(
                            "node {} has out-of-order child {}",
                            idx, child
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf. Returns NaN if the walk leaves the tree.
    pub fn predict(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx) {
                Some(Node::Leaf { value }) => return *value,
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let Some(x) = features.get(*feature) else {
                        return f64::NAN;
                    };
                    let next = if *x <= *threshold { *left } else { *right };
                    if next <= idx {
                        return f64::NAN;
                    }
                    idx = next;
                }
                None => return f64::NAN,
            }
        }
    }
}

/// Gradient-boosted trees fit with a quantile loss:
/// `init + learning_rate · Σ tree(x)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GradientBoostingModel {
    #[serde(default)]
    pub quantile: Option<f64>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub init: f64,
    pub learning_rate: f64,
    pub trees: Vec<Tree>,
}

/// A quantile regressor loaded from a training artifact.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuantileModel {
    Linear(LinearModel),
    GradientBoosting(GradientBoostingModel),
}

impl QuantileModel {
    /// Load and validate an artifact from disk.
    pub fn load(path: &Path) -> Result<QuantileModel, ModelError> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model = QuantileModel::from_json(&text)?;
        info!(
            "Loaded {} model (quantile {}) from {}",
            model.kind(),
            model
                .quantile()
                .map_or_else(|| "unspecified".to_string(), |q| q.to_string()),
            path.display()
        );
        Ok(model)
    }

    /// Parse and validate an artifact from a JSON string.
    pub fn from_json(text: &str) -> Result<QuantileModel, ModelError> {
        let model: QuantileModel = serde_json::from_str(text)?;
        model.validate()?;
        Ok(model)
    }

    /// The quantile the model was fit to, when recorded.
    pub fn quantile(&self) -> Option<f64> {
        match self {
            QuantileModel::Linear(m) => m.quantile,
            QuantileModel::GradientBoosting(m) => m.quantile,
        }
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        match self {
            QuantileModel::Linear(m) => m.feature_names.as_deref(),
            QuantileModel::GradientBoosting(m) => m.feature_names.as_deref(),
        }
    }

    fn validate(&self) -> Result<(), ModelError> {
        match self {
            QuantileModel::Linear(m) => {
                if m.coefficients.len() != FEATURE_COUNT {
                    return Err(ModelError::FeatureCount {
                        expected: FEATURE_COUNT,
                        found: m.coefficients.len(),
                    });
                }
            }
            QuantileModel::GradientBoosting(m) => {
                for (i, tree) in m.trees.iter().enumerate() {
                    tree.validate(i)?;
                }
            }
        }

        if let Some(names) = self.feature_names() {
            let expected: Vec<&str> = Characteristic::FEATURES
                .iter()
                .map(|c| c.column_name())
                .collect();
            if names.len() != FEATURE_COUNT {
                return Err(ModelError::FeatureCount {
                    expected: FEATURE_COUNT,
                    found: names.len(),
                });
            }
            if names.iter().map(String::as_str).ne(expected.iter().copied()) {
                warn!(
                    "Model was trained on features {:?}, requests are read as {:?}",
                    names, expected
                );
            }
        }
        Ok(())
    }
}

impl Regressor for QuantileModel {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        match self {
            QuantileModel::Linear(m) => {
                m.intercept
                    + m.coefficients
                        .iter()
                        .zip(features.iter())
                        .map(|(c, x)| c * x)
                        .sum::<f64>()
            }
            QuantileModel::GradientBoosting(m) => {
                m.init
                    + m.learning_rate * m.trees.iter().map(|t| t.predict(features)).sum::<f64>()
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            QuantileModel::Linear(_) => "linear",
            QuantileModel::GradientBoosting(_) => "gradient_boosting",
        }
    }
}
