// Tag alphabet and tag normalization
//
// Input tags follow the Penn Treebank set extended with the Twitter-specific
// tags emitted by TwitIE-style taggers (USR, URL, RT, HT, #).

/// Tag used for the sentence terminator appended to every input sequence
/// and for window positions outside the sentence.
pub const SENTENCE_TERMINATOR: &str = ".";

/// Wildcard tag that matches any tag without an explicit transition.
pub const WILDCARD: &str = "**";

/// Name of the reserved feature dimension for tags outside the alphabet.
pub const UNKNOWN_TAG: &str = "UNK";

/// The declared tag alphabet, in feature-dimension order.
///
/// Dimension 0 of the tag block is reserved for [`UNKNOWN_TAG`], so the tag at
/// position `i` of this list occupies dimension `i + 1`.
pub const TAG_ALPHABET: &[&str] = &[
    "$", "``", "''", "(", ")", ",", "--", ".", ":", "CC", "CD", "DT", "EX", "FW", "IN", "JJ",
    "JJR", "JJS", "LS", "MD", "NN", "NNP", "NNPS", "NNS", "PDT", "POS", "PRP", "PRP$", "RB",
    "RBR", "RBS", "RP", "SYM", "TO", "UH", "VB", "VBD", "VBG", "VBN", "VBP", "VBZ", "WDT", "WP",
    "WP$", "WRB", "USR", "URL", "RT", "HT", "#",
];

/// Tags whose lexical form contributes to the lexicalized feature block.
pub const CONTENT_TAGS: &[&str] = &[
    "VB", "VBD", "VBG", "VBN", "VBP", "VBZ", "RB", "RBR", "RBS", "RP", "TO",
];

/// Static tag merge table: `(raw, normalized)`.
pub const TAG_MAPPINGS: &[(&str, &str)] = &[
    ("RT", "UH"),
    ("HT", "NN"),
    ("#", "DT"),
    ("USR", "NNP"),
    (":", "."),
];

/// Map a raw input tag onto the reduced tag alphabet.
///
/// Tags without an entry in [`TAG_MAPPINGS`] pass through unchanged.
pub fn normalize_tag(tag: &str) -> &str {
    TAG_MAPPINGS
        .iter()
        .find(|(raw, _)| *raw == tag)
        .map_or(tag, |(_, normalized)| normalized)
}

/// Whether `tag` is part of the declared alphabet.
pub fn is_known_tag(tag: &str) -> bool {
    TAG_ALPHABET.contains(&tag)
}

// ---------------------------------------------------------------------------
// Tag families
// ---------------------------------------------------------------------------

pub fn is_verb(tag: &str) -> bool {
    matches!(tag, "VB" | "VBD" | "VBG" | "VBN" | "VBP" | "VBZ")
}

pub fn is_noun(tag: &str) -> bool {
    matches!(tag, "NN" | "NNS" | "NNP" | "NNPS")
}

pub fn is_adjective(tag: &str) -> bool {
    matches!(tag, "JJ" | "JJR" | "JJS")
}

pub fn is_adverb(tag: &str) -> bool {
    matches!(tag, "RB" | "RBR" | "RBS")
}

/// Determiners, predeterminers and possessive pronouns.
pub fn is_determiner(tag: &str) -> bool {
    matches!(tag, "DT" | "PDT" | "PRP$")
}

/// Personal pronouns; these are also collected as pronoun occurrences.
pub fn is_pronoun(tag: &str) -> bool {
    tag == "PRP"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_has_fifty_tags() {
        assert_eq!(TAG_ALPHABET.len(), 50);
    }

    #[test]
    fn alphabet_has_no_duplicates() {
        for (i, tag) in TAG_ALPHABET.iter().enumerate() {
            assert!(
                !TAG_ALPHABET[i + 1..].contains(tag),
                "duplicate tag {tag}"
            );
        }
    }

    #[test]
    fn normalize_merged_tags() {
        assert_eq!(normalize_tag("RT"), "UH");
        assert_eq!(normalize_tag("HT"), "NN");
        assert_eq!(normalize_tag("#"), "DT");
        assert_eq!(normalize_tag("USR"), "NNP");
        assert_eq!(normalize_tag(":"), ".");
    }

    #[test]
    fn normalize_passthrough() {
        assert_eq!(normalize_tag("NN"), "NN");
        assert_eq!(normalize_tag("VBZ"), "VBZ");
        assert_eq!(normalize_tag("XYZ"), "XYZ");
    }

    #[test]
    fn mapped_targets_are_in_alphabet() {
        for (_, normalized) in TAG_MAPPINGS {
            assert!(is_known_tag(normalized));
        }
    }

    #[test]
    fn content_tags_are_in_alphabet() {
        for tag in CONTENT_TAGS {
            assert!(is_known_tag(tag));
        }
    }

    #[test]
    fn tag_families() {
        assert!(is_verb("VBN"));
        assert!(!is_verb("NN"));
        assert!(is_noun("NNPS"));
        assert!(is_adjective("JJS"));
        assert!(is_adverb("RBR"));
        assert!(is_determiner("PRP$"));
        assert!(is_pronoun("PRP"));
        assert!(!is_pronoun("PRP$"));
    }
}
