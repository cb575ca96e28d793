// Orthographic classification of tokens
//
// A token's orthographic class is a three-bit summary of which character
// families appear in it: digit (1), lowercase letter (2), uppercase letter (4).

use serde::{Deserialize, Serialize};

const DIGIT_BIT: u8 = 1;
const LOWER_BIT: u8 = 2;
const UPPER_BIT: u8 = 4;

/// Coarse character-class label for a token.
///
/// The discriminant equals the bit composition, so `Punct` (no digits, no
/// letters) is 0 and `MixedNumeric` (all three families) is 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrthographicClass {
    Punct = 0,
    Numeric = 1,
    Lower = 2,
    LowerNumeric = 3,
    Upper = 4,
    UpperNumeric = 5,
    Mixed = 6,
    MixedNumeric = 7,
}

impl OrthographicClass {
    /// All classes in bit order.
    pub const ALL: [OrthographicClass; 8] = [
        Self::Punct,
        Self::Numeric,
        Self::Lower,
        Self::LowerNumeric,
        Self::Upper,
        Self::UpperNumeric,
        Self::Mixed,
        Self::MixedNumeric,
    ];

    /// Classify a token by the character families it contains.
    pub fn of(word: &str) -> Self {
        let bits = word.chars().fold(0u8, |bits, c| {
            if c.is_ascii_digit() {
                bits | DIGIT_BIT
            } else if c.is_lowercase() {
                bits | LOWER_BIT
            } else if c.is_uppercase() {
                bits | UPPER_BIT
            } else {
                bits
            }
        });
        Self::from_bits(bits)
    }

    /// Build a class from its bit composition. Bits above the low three are ignored.
    pub fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0b111) as usize]
    }

    /// The bit composition (digit = 1, lower = 2, upper = 4).
    pub fn bits(self) -> u8 {
        self as u8
    }

    pub fn has_digit(self) -> bool {
        self.bits() & DIGIT_BIT != 0
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Punct => "punct",
            Self::Numeric => "numeric",
            Self::Lower => "lower",
            Self::LowerNumeric => "lowerNumeric",
            Self::Upper => "upper",
            Self::UpperNumeric => "upperNumeric",
            Self::Mixed => "mixed",
            Self::MixedNumeric => "mixedNumeric",
        }
    }
}

impl std::fmt::Display for OrthographicClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_word() {
        assert_eq!(OrthographicClass::of("dog"), OrthographicClass::Lower);
    }

    #[test]
    fn digits_only() {
        assert_eq!(OrthographicClass::of("42"), OrthographicClass::Numeric);
    }

    #[test]
    fn mixed_case_with_digit() {
        let class = OrthographicClass::of("Dog2");
        assert_eq!(class, OrthographicClass::MixedNumeric);
        assert_eq!(class.bits(), DIGIT_BIT | LOWER_BIT | UPPER_BIT);
    }

    #[test]
    fn uppercase_variants() {
        assert_eq!(OrthographicClass::of("NATO"), OrthographicClass::Upper);
        assert_eq!(OrthographicClass::of("B52"), OrthographicClass::UpperNumeric);
        assert_eq!(OrthographicClass::of("Dog"), OrthographicClass::Mixed);
        assert_eq!(OrthographicClass::of("mp3"), OrthographicClass::LowerNumeric);
    }

    #[test]
    fn punctuation_and_empty() {
        assert_eq!(OrthographicClass::of("."), OrthographicClass::Punct);
        assert_eq!(OrthographicClass::of("--"), OrthographicClass::Punct);
        assert_eq!(OrthographicClass::of(""), OrthographicClass::Punct);
    }

    #[test]
    fn non_ascii_letters() {
        assert_eq!(OrthographicClass::of("\u{00E4}iti"), OrthographicClass::Lower);
        assert_eq!(OrthographicClass::of("\u{00C4}iti"), OrthographicClass::Mixed);
    }

    #[test]
    fn bits_round_trip_through_all() {
        for (i, class) in OrthographicClass::ALL.iter().enumerate() {
            assert_eq!(class.bits() as usize, i);
            assert_eq!(OrthographicClass::from_bits(class.bits()), *class);
        }
    }

    #[test]
    fn names_match_serde() {
        let json = serde_json::to_string(&OrthographicClass::UpperNumeric).unwrap();
        assert_eq!(json, "\"upperNumeric\"");
        assert_eq!(OrthographicClass::UpperNumeric.to_string(), "upperNumeric");
    }
}
