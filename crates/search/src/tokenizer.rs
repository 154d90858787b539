use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Common English function words that never carry term weight.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "the", "is", "are", "to", "of", "in", "on", "for", "with", "at", "from",
    "by", "as", "be", "this", "that", "which", "or", "not", "your", "you", "we", "our", "it",
    "its", "about", "into", "over", "under", "if", "then", "else", "when", "where", "how",
    "what", "why", "who", "whom", "theirs", "his", "her", "hers", "he", "she", "they", "them",
    "can", "could", "should", "would", "may", "might", "will", "just", "more", "most", "less",
    "least", "than", "up", "down", "out", "off", "because", "so", "very",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORDS.iter().copied().collect());

/// Split text into lowercase tokens.
///
/// A token is a maximal run of ASCII alphanumerics, `$`, `%` or `.`, so amounts
/// like `$500`, `5%` and `3.5` survive as single tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !is_token_char(c))
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect()
}

pub fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '$' | '%' | '.')
}

/// Stop-word check; expects an already lowercased token
pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn keeps_amounts_and_percentages() {
        assert_eq!(
            tokenize("Save $500 at 5% APR, or 3.5x faster!"),
            vec!["save", "$500", "at", "5%", "apr", "or", "3.5x", "faster"]
        );
    }

    #[test]
    fn trailing_period_stays_on_token() {
        assert_eq!(tokenize("across assets."), vec!["across", "assets."]);
    }

    #[test]
    fn non_ascii_letters_are_separators() {
        assert_eq!(tokenize("café—crème"), vec!["caf", "cr", "me"]);
    }

    #[test]
    fn empty_and_punctuation_only() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ,;!? -- ").is_empty());
    }

    #[test]
    fn stopwords_are_lowercase_matches() {
        assert!(is_stopword("the"));
        assert!(is_stopword("because"));
        assert!(!is_stopword("The"));
        assert!(!is_stopword("diversification"));
    }

    proptest! {
        #[test]
        fn proptest_tokens_are_lowercase_token_chars(text in "\\PC{0,64}") {
            for token in tokenize(&text) {
                prop_assert!(!token.is_empty());
                prop_assert!(token.chars().all(is_token_char));
                prop_assert_eq!(token.to_ascii_lowercase(), token.clone());
            }
        }

        #[test]
        fn proptest_tokenize_is_case_insensitive(text in "[A-Za-z0-9$%. ,]{0,48}") {
            prop_assert_eq!(tokenize(&text), tokenize(&text.to_ascii_uppercase()));
        }
    }
}
