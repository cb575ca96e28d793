// libSVM sparse vector text format
//
// `[label] idx:val idx:val ...` with 1-based indices. Candidate vectors carry
// no label; training vectors start with one.

use std::str::FromStr;

/// Error type for malformed sparse vector strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VectorParseError {
    #[error("feature {field:?} is not of the form index:value")]
    MissingValue { field: String },
    #[error("invalid feature index in {field:?}")]
    BadIndex { field: String },
    #[error("invalid feature value in {field:?}")]
    BadValue { field: String },
    #[error("invalid class label {field:?}")]
    BadLabel { field: String },
}

/// A sparse feature vector with an optional class label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    pub label: Option<f64>,
    pub features: Vec<(u32, f64)>,
}

impl SparseVector {
    /// Binary vector over the given indices, sorted ascending with
    /// duplicates removed.
    pub fn from_indices(indices: impl IntoIterator<Item = u32>) -> Self {
        let mut indices: Vec<u32> = indices.into_iter().collect();
        indices.sort_unstable();
        indices.dedup();
        Self {
            label: None,
            features: indices.into_iter().map(|i| (i, 1.0)).collect(),
        }
    }

    pub fn with_label(mut self, label: f64) -> Self {
        self.label = Some(label);
        self
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Feature indices in stored order.
    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.features.iter().map(|&(i, _)| i)
    }

    /// Value at `index`, or 0 when the feature is absent.
    pub fn get(&self, index: u32) -> f64 {
        self.features
            .iter()
            .find(|&&(i, _)| i == index)
            .map_or(0.0, |&(_, v)| v)
    }
}

impl FromStr for SparseVector {
    type Err = VectorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace().peekable();
        let label = match fields.next_if(|first| !first.contains(':')) {
            Some(first) => Some(first.parse::<f64>().map_err(|_| VectorParseError::BadLabel {
                field: first.to_string(),
            })?),
            None => None,
        };

        let features = fields
            .map(|field| {
                let (index, value) =
                    field
                        .split_once(':')
                        .ok_or_else(|| VectorParseError::MissingValue {
                            field: field.to_string(),
                        })?;
                let index = index.parse::<u32>().map_err(|_| VectorParseError::BadIndex {
                    field: field.to_string(),
                })?;
                let value = value.parse::<f64>().map_err(|_| VectorParseError::BadValue {
                    field: field.to_string(),
                })?;
                Ok((index, value))
            })
            .collect::<Result<Vec<_>, VectorParseError>>()?;

        Ok(Self { label, features })
    }
}

/// Renders the canonical wire form: single spaces, no trailing space,
/// integral values without a fractional part.
impl std::fmt::Display for SparseVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        if let Some(label) = self.label {
            write_number(f, label)?;
            first = false;
        }
        for &(index, value) in &self.features {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{index}:")?;
            write_number(f, value)?;
            first = false;
        }
        Ok(())
    }
}

fn write_number(f: &mut std::fmt::Formatter<'_>, value: f64) -> std::fmt::Result {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        write!(f, "{}", value as i64)
    } else {
        write!(f, "{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_unlabelled() {
        let v: SparseVector = "3:1 17:1 1204:1".parse().unwrap();
        assert_eq!(v.label, None);
        assert_eq!(v.indices().collect::<Vec<_>>(), vec![3, 17, 1204]);
        assert_eq!(v.get(17), 1.0);
        assert_eq!(v.get(18), 0.0);
    }

    #[test]
    fn parse_labelled() {
        let v: SparseVector = "1 1:0.123 2:0.789".parse().unwrap();
        assert_eq!(v.label, Some(1.0));
        assert_eq!(v.features, vec![(1, 0.123), (2, 0.789)]);
    }

    #[test]
    fn parse_tolerates_extra_whitespace() {
        let v: SparseVector = "  5:1   9:1 ".parse().unwrap();
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn empty_string_is_empty_vector() {
        let v: SparseVector = "".parse().unwrap();
        assert!(v.is_empty());
        assert_eq!(v.to_string(), "");
    }

    #[test]
    fn reject_malformed_fields() {
        assert!(matches!(
            "1:1 7".parse::<SparseVector>(),
            Err(VectorParseError::MissingValue { .. })
        ));
        assert!(matches!(
            "x:1".parse::<SparseVector>(),
            Err(VectorParseError::BadIndex { .. })
        ));
        assert!(matches!(
            "4:one".parse::<SparseVector>(),
            Err(VectorParseError::BadValue { .. })
        ));
        assert!(matches!(
            "pos 4:1".parse::<SparseVector>(),
            Err(VectorParseError::BadLabel { .. })
        ));
    }

    #[test]
    fn from_indices_sorts_and_dedups() {
        let v = SparseVector::from_indices([52, 1, 52, 7]);
        assert_eq!(v.to_string(), "1:1 7:1 52:1");
    }

    #[test]
    fn display_with_label_and_fractions() {
        let v = SparseVector::from_indices([2]).with_label(-1.0);
        assert_eq!(v.to_string(), "-1 2:1");
        let v: SparseVector = "1:0.5".parse().unwrap();
        assert_eq!(v.to_string(), "1:0.5");
    }
}
