//! Normalization of span text.

/// Characters stripped from the front of normalized span text.
const LEADING_STRIP: &[char] = &['`', '"', '\'', '(', '[', '{'];

/// Normalize the raw text under a span.
///
/// Collapses whitespace runs to a single space, trims, strips leading quote
/// and bracket characters and strips trailing non-word characters. The result
/// depends only on the input, so it is reproducible for the same raw text and
/// offsets.
pub fn normalize_annot_text(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_start_matches(|c: char| LEADING_STRIP.contains(&c) || c.is_whitespace())
        .trim_end_matches(|c: char| !is_word_char(c))
        .to_string()
}

/// Word characters as understood by the trailing strip.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_and_trims() {
        assert_eq!(normalize_annot_text("  the\n  big\tdog  "), "the big dog");
    }

    #[test]
    fn test_strips_leading_quotes_and_trailing_punctuation() {
        assert_eq!(normalize_annot_text("``The Senator,''"), "The Senator");
        assert_eq!(normalize_annot_text("(\" Mr. Smith\")."), "Mr. Smith");
        assert_eq!(normalize_annot_text("the U.S."), "the U.S");
        assert_eq!(normalize_annot_text("\"?!"), "");
    }

    #[test]
    fn test_keeps_inner_punctuation() {
        assert_eq!(normalize_annot_text("O'Brien's dog"), "O'Brien's dog");
    }
}
