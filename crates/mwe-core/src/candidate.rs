// Candidate spans and per-call result sets

use serde::{Deserialize, Serialize};

/// Multi-word expression families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MweType {
    /// Noun-phrase-internal compound ("dog house").
    NounCompound,
    /// Light-verb construction ("make a decision").
    Lvc,
    /// Verb-particle construction ("give up").
    Vpc,
}

impl MweType {
    pub const ALL: [MweType; 3] = [Self::NounCompound, Self::Lvc, Self::Vpc];

    /// Identifier of the classifier model that gates this type.
    pub fn model_id(self) -> &'static str {
        match self {
            Self::NounCompound => "npcModel",
            Self::Lvc => "lvcModel",
            Self::Vpc => "vpcModel",
        }
    }
}

impl std::fmt::Display for MweType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::NounCompound => "noun compound",
            Self::Lvc => "LVC",
            Self::Vpc => "VPC",
        })
    }
}

/// A candidate MWE span extracted from one sentence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub mwe_type: MweType,
    /// Tokens of the span joined by single spaces.
    pub text: String,
    /// Character offset of the first token.
    pub start_offset: usize,
    /// Index of the first token.
    pub start_index: usize,
    pub token_count: usize,
    /// Sentence index of every token in the span, ascending. Tables that skip
    /// tokens inside a chunk produce spans with gaps.
    pub token_indices: Vec<usize>,
    /// Normalized tag of each token in the span.
    pub tags: Vec<String>,
    /// Sparse feature vector in libSVM text form, once built.
    pub feature_vector: Option<String>,
    /// Positive-class probability reported by the classifier, when gated.
    pub score: Option<f64>,
}

impl Candidate {
    pub fn new(
        mwe_type: MweType,
        text: impl Into<String>,
        start_offset: usize,
        start_index: usize,
        token_count: usize,
        tags: Vec<String>,
    ) -> Self {
        Self {
            mwe_type,
            text: text.into(),
            start_offset,
            start_index,
            token_count,
            token_indices: (start_index..start_index + token_count).collect(),
            tags,
            feature_vector: None,
            score: None,
        }
    }

    /// Replace the contiguous span with the tokens at `indices`.
    pub fn with_token_indices(mut self, indices: Vec<usize>) -> Self {
        if let Some(&first) = indices.first() {
            self.start_index = first;
        }
        self.token_count = indices.len();
        self.token_indices = indices;
        self
    }

    /// Whether some token between the first and last of the span is left out.
    pub fn has_gaps(&self) -> bool {
        self.token_indices.windows(2).any(|w| w[1] != w[0] + 1)
    }

    /// Index one past the last token of the span.
    pub fn end_index(&self) -> usize {
        self.token_indices
            .last()
            .map_or(self.start_index, |&last| last + 1)
    }
}

/// Accepted candidates of one extraction call, grouped by type.
///
/// A result set is rebuilt from scratch by every call and never merged
/// with earlier results.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
    pub noun_compounds: Vec<Candidate>,
    pub lvcs: Vec<Candidate>,
    pub vpcs: Vec<Candidate>,
    /// Surface forms of personal pronouns, in order of appearance.
    pub pronouns: Vec<String>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidates of the given type.
    pub fn of_type(&self, mwe_type: MweType) -> &[Candidate] {
        match mwe_type {
            MweType::NounCompound => &self.noun_compounds,
            MweType::Lvc => &self.lvcs,
            MweType::Vpc => &self.vpcs,
        }
    }

    pub(crate) fn of_type_mut(&mut self, mwe_type: MweType) -> &mut Vec<Candidate> {
        match mwe_type {
            MweType::NounCompound => &mut self.noun_compounds,
            MweType::Lvc => &mut self.lvcs,
            MweType::Vpc => &mut self.vpcs,
        }
    }

    /// Append a candidate to the list for its type.
    pub fn push(&mut self, candidate: Candidate) {
        self.of_type_mut(candidate.mwe_type).push(candidate);
    }

    /// Total number of candidates over all types.
    pub fn candidate_count(&self) -> usize {
        self.noun_compounds.len() + self.lvcs.len() + self.vpcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidate_count() == 0 && self.pronouns.is_empty()
    }

    /// Span texts of the given type.
    pub fn texts(&self, mwe_type: MweType) -> Vec<&str> {
        self.of_type(mwe_type).iter().map(|c| c.text.as_str()).collect()
    }
}

/// Renders `{nc,nc,},{vpc,},{lvc,}`.
impl std::fmt::Display for ResultSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, mwe_type) in [MweType::NounCompound, MweType::Vpc, MweType::Lvc]
            .into_iter()
            .enumerate()
        {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str("{")?;
            for candidate in self.of_type(mwe_type) {
                write!(f, "{},", candidate.text)?;
            }
            f.write_str("}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(mwe_type: MweType, text: &str, start: usize, count: usize) -> Candidate {
        Candidate::new(mwe_type, text, 0, start, count, vec!["NN".to_string(); count])
    }

    #[test]
    fn model_ids() {
        assert_eq!(MweType::NounCompound.model_id(), "npcModel");
        assert_eq!(MweType::Lvc.model_id(), "lvcModel");
        assert_eq!(MweType::Vpc.model_id(), "vpcModel");
    }

    #[test]
    fn push_routes_by_type() {
        let mut rs = ResultSet::new();
        rs.push(candidate(MweType::Vpc, "give up", 0, 2));
        rs.push(candidate(MweType::NounCompound, "dog house", 3, 2));
        assert_eq!(rs.vpcs.len(), 1);
        assert_eq!(rs.noun_compounds.len(), 1);
        assert!(rs.lvcs.is_empty());
        assert_eq!(rs.candidate_count(), 2);
        assert_eq!(rs.texts(MweType::NounCompound), vec!["dog house"]);
    }

    #[test]
    fn end_index() {
        let c = candidate(MweType::Lvc, "make a decision", 4, 3);
        assert_eq!(c.end_index(), 7);
    }

    #[test]
    fn gapped_span() {
        let c = candidate(MweType::NounCompound, "dog house", 0, 2).with_token_indices(vec![3, 5]);
        assert_eq!(c.start_index, 3);
        assert_eq!(c.token_count, 2);
        assert_eq!(c.end_index(), 6);
        assert!(c.has_gaps());
        assert!(!candidate(MweType::Lvc, "make a decision", 4, 3).has_gaps());
    }

    #[test]
    fn display_lists_all_types() {
        let mut rs = ResultSet::new();
        rs.push(candidate(MweType::NounCompound, "dog house", 0, 2));
        rs.push(candidate(MweType::Vpc, "give up", 0, 2));
        assert_eq!(rs.to_string(), "{dog house,},{give up,},{}");
    }

    #[test]
    fn empty_result_set() {
        let rs = ResultSet::new();
        assert!(rs.is_empty());
        assert_eq!(rs.to_string(), "{},{},{}");
    }

    #[test]
    fn serializes_to_json() {
        let mut rs = ResultSet::new();
        rs.push(candidate(MweType::Vpc, "give up", 0, 2));
        rs.pronouns.push("it".to_string());
        let value = serde_json::to_value(&rs).unwrap();
        assert_eq!(value["vpcs"][0]["text"], "give up");
        assert_eq!(value["vpcs"][0]["mwe_type"], "vpc");
        assert_eq!(value["pronouns"][0], "it");
        assert!(value["vpcs"][0]["score"].is_null());
    }
}
