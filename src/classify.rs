//! Text classification over article titles and descriptions.
//!
//! Both functions are pure and treat absent texts as empty.

use once_cell::sync::Lazy;
use regex::Regex;

/// `$12`, `$12.5`, `$12.50`, or a number followed by `dollars` / `USD`.
/// Matching is case-sensitive.
static MONEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\$\d+(\.\d{1,2})?)|(\d+\s?(dollars|USD))").expect("money pattern is valid")
});

/// Count case-insensitive occurrences of every phrase in every text.
///
/// Each text is scanned left to right and the search restarts after the end of
/// each match, so `"catcatcat"` holds three `"cat"` but `"aaaa"` holds two
/// `"aa"`. Empty phrases never match.
pub fn count_phrase_occurrences(texts: &[Option<&str>], phrases: &[&str]) -> usize {
    let phrases: Vec<String> = phrases
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| p.to_lowercase())
        .collect();
    if phrases.is_empty() {
        return 0;
    }

    texts
        .iter()
        .flatten()
        .map(|text| {
            let haystack = text.to_lowercase();
            phrases
                .iter()
                .map(|phrase| haystack.matches(phrase.as_str()).count())
                .sum::<usize>()
        })
        .sum()
}

/// True if any present text mentions a dollar amount.
pub fn detects_monetary_mention(texts: &[Option<&str>]) -> bool {
    texts.iter().flatten().any(|text| MONEY_PATTERN.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_case_insensitively() {
        assert_eq!(count_phrase_occurrences(&[Some("The Cat sat")], &["cat"]), 1);
        assert_eq!(count_phrase_occurrences(&[Some("CAT cat Cat")], &["cAt"]), 3);
    }

    #[test]
    fn counts_substrings_without_overlap() {
        assert_eq!(count_phrase_occurrences(&[Some("catcatcat")], &["cat"]), 3);
        assert_eq!(count_phrase_occurrences(&[Some("aaaa")], &["aa"]), 2);
        assert_eq!(count_phrase_occurrences(&[Some("concatenate")], &["cat"]), 1);
    }

    #[test]
    fn sums_across_texts_and_phrases() {
        let texts = [Some("Rates rise as inflation bites"), None, Some("inflation and rates")];
        assert_eq!(count_phrase_occurrences(&texts, &["rates", "inflation"]), 4);
    }

    #[test]
    fn empty_inputs_count_zero() {
        assert_eq!(count_phrase_occurrences(&[], &["cat"]), 0);
        assert_eq!(count_phrase_occurrences(&[Some("cat")], &[]), 0);
        assert_eq!(count_phrase_occurrences(&[None, None], &["cat"]), 0);
        assert_eq!(count_phrase_occurrences(&[Some("cat")], &[""]), 0);
        assert_eq!(count_phrase_occurrences(&[Some("dog")], &["cat"]), 0);
    }

    #[test]
    fn lowercasing_handles_non_ascii() {
        assert_eq!(count_phrase_occurrences(&[Some("ÉCOLE école")], &["École"]), 2);
    }

    #[test]
    fn detects_dollar_amounts() {
        assert!(detects_monetary_mention(&[Some("Price: $12.50")]));
        assert!(detects_monetary_mention(&[Some("only $5 left")]));
        assert!(detects_monetary_mention(&[Some("50 dollars")]));
        assert!(detects_monetary_mention(&[Some("a 50dollars bet")]));
        assert!(detects_monetary_mention(&[Some("worth 300 USD today")]));
    }

    #[test]
    fn rejects_text_without_money() {
        assert!(!detects_monetary_mention(&[Some("no money here")]));
        assert!(!detects_monetary_mention(&[Some("$ alone"), Some("dollars without a number")]));
        assert!(!detects_monetary_mention(&[None]));
        assert!(!detects_monetary_mention(&[]));
    }

    #[test]
    fn currency_words_are_case_sensitive() {
        assert!(!detects_monetary_mention(&[Some("50 usd")]));
        assert!(!detects_monetary_mention(&[Some("50 Dollars")]));
    }

    #[test]
    fn any_text_can_carry_the_mention() {
        assert!(detects_monetary_mention(&[Some("Budget day"), None, Some("a $2bn hole")]));
    }
}
