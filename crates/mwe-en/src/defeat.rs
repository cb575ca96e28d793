// Lexical defeat vetoes
//
// POS patterns alone over-generate: a form of "be" followed by a noun phrase
// is predication, and a particle followed by a demonstrative usually opens a
// clause. These vetoes run before a candidate reaches the classifier.

/// Forms of "be" and "become" that veto an LVC when they open the span.
pub const COPULA_FORMS: &[&str] = &[
    "is", "was", "are", "were", "be", "been", "become", "became", "becomes", "becoming", "being",
];

/// Demonstratives that veto a VPC when they close the span.
pub const DEMONSTRATIVES: &[&str] = &["that", "this"];

/// Whether a multi-word span opens with a copula form (case-insensitive).
///
/// A single word is never vetoed.
pub fn defeats_lvc(text: &str) -> bool {
    match text.split_once(' ') {
        Some((first, _)) => {
            let first = first.to_lowercase();
            COPULA_FORMS.contains(&first.as_str())
        }
        None => false,
    }
}

/// Whether a multi-word span, ignoring trailing spaces, ends with a
/// demonstrative (case-insensitive).
pub fn defeats_vpc(text: &str) -> bool {
    match text.trim_end_matches(' ').rsplit_once(' ') {
        Some((_, last)) => {
            let last = last.to_lowercase();
            DEMONSTRATIVES.contains(&last.as_str())
        }
        None => false,
    }
}
