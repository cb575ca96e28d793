// Chunker options

use mwe_core::candidate::MweType;
use mwe_core::tags::CONTENT_TAGS;
use serde::{Deserialize, Serialize};

use crate::features::DEFAULT_MAX_WINDOW;

/// Per-type acceptance thresholds on the positive-class probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub noun_compound: f64,
    pub lvc: f64,
    pub vpc: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            noun_compound: 0.5,
            lvc: 0.5,
            vpc: 0.5,
        }
    }
}

impl Thresholds {
    pub fn of_type(&self, mwe_type: MweType) -> f64 {
        match mwe_type {
            MweType::NounCompound => self.noun_compound,
            MweType::Lvc => self.lvc,
            MweType::Vpc => self.vpc,
        }
    }

    pub fn set(&mut self, mwe_type: MweType, value: f64) {
        match mwe_type {
            MweType::NounCompound => self.noun_compound = value,
            MweType::Lvc => self.lvc = value,
            MweType::Vpc => self.vpc = value,
        }
    }
}

/// Options controlling candidate filtering and gating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerOptions {
    /// Consult the classifier. When off, every candidate that survives the
    /// defeat vetoes is accepted.
    pub learning: bool,
    pub thresholds: Thresholds,
    /// Also drop VPCs that open with a form of "be"/"become".
    pub copula_vetoes_vpc: bool,
    /// Tags whose tokens feed the lexicalized feature block.
    pub content_tags: Vec<String>,
    /// Maximum number of window positions encoded per candidate.
    pub max_window: usize,
}

impl Default for ChunkerOptions {
    fn default() -> Self {
        Self {
            learning: false,
            thresholds: Thresholds::default(),
            copula_vetoes_vpc: true,
            content_tags: CONTENT_TAGS.iter().map(|t| t.to_string()).collect(),
            max_window: DEFAULT_MAX_WINDOW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = ChunkerOptions::default();
        assert!(!options.learning);
        assert!(options.copula_vetoes_vpc);
        assert_eq!(options.max_window, 20);
        assert_eq!(options.thresholds.of_type(MweType::Vpc), 0.5);
        assert_eq!(options.content_tags.len(), 11);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let options: ChunkerOptions =
            serde_json::from_str(r#"{"learning": true, "thresholds": {"lvc": 0.7}}"#).unwrap();
        assert!(options.learning);
        assert_eq!(options.thresholds.lvc, 0.7);
        assert_eq!(options.thresholds.vpc, 0.5);
        assert_eq!(options.max_window, 20);
    }

    #[test]
    fn set_threshold_by_type() {
        let mut thresholds = Thresholds::default();
        thresholds.set(MweType::NounCompound, 0.25);
        assert_eq!(thresholds.noun_compound, 0.25);
        assert_eq!(thresholds.lvc, 0.5);
    }
}
