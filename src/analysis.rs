//! Text normalization for Arabic and Latin verse text.
//!
//! Matching across diacritized Quranic script, bare query input and Latin
//! translation text only works if both sides are folded onto the same
//! canonical form first. The folding here is lossy by design: distinct
//! hamza-bearing letters collapse onto one representative to widen recall.
//!
//! All functions are idempotent and return an empty string for empty input.

use unicode_normalization::UnicodeNormalization;

/// Arabic combining marks for short vowels (harakat), stripped during
/// normalization.
const ARABIC_DIACRITICS: std::ops::RangeInclusive<char> = '\u{064B}'..='\u{065F}';

/// The tatweel elongation character.
const TATWEEL: char = '\u{0640}';

/// Returns true if the text contains any codepoint in the Arabic block
/// (U+0600–U+06FF). Used to decide between Arabic and Latin handling.
pub fn has_arabic(text: &str) -> bool {
    text.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c))
}

/// Normalize text for indexing and embedding.
///
/// Routes to [`normalize_arabic`] when the text contains Arabic codepoints,
/// otherwise to [`normalize_latin`].
pub fn normalize(text: &str) -> String {
    if has_arabic(text) {
        normalize_arabic(text)
    } else {
        normalize_latin(text)
    }
}

/// Canonicalize Arabic text: decompose, strip harakat and tatweel, collapse
/// whitespace, then fold letter variants.
pub fn normalize_arabic(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let decomposed: String = text.nfkd().collect();
    let stripped: String = decomposed
        .chars()
        .filter(|c| !ARABIC_DIACRITICS.contains(c) && *c != TATWEEL)
        .collect();

    collapse_whitespace(&stripped)
        .chars()
        .filter_map(fold_arabic_letter)
        .collect()
}

/// Canonicalize Latin/translation text: lowercase, drop characters that are
/// neither letters, digits nor whitespace, collapse whitespace, then apply
/// compatibility composition.
pub fn normalize_latin(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lowered = text.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    collapse_whitespace(&cleaned).nfkc().collect()
}

/// Normalize a raw query term the way the search manager expects it.
///
/// Arabic terms keep their letters intact (the engines fold them again
/// during matching); Latin terms get the full lowercase/strip treatment.
pub fn normalize_term(term: &str) -> String {
    if has_arabic(term) {
        term.trim().nfkc().collect()
    } else {
        normalize_latin(term)
    }
}

/// Fold an Arabic letter variant onto its canonical representative.
///
/// Standalone hamza is dropped entirely. Most hamza-bearing forms are
/// already decomposed away by NFKD + harakat stripping; the remaining
/// composed forms are folded here.
fn fold_arabic_letter(c: char) -> Option<char> {
    match c {
        // Alef variations
        '\u{0623}' | '\u{0625}' | '\u{0622}' => Some('\u{0627}'),
        // Alef-maksura and hamza-on-ya fold to ya
        '\u{0649}' | '\u{0626}' => Some('\u{064A}'),
        // Ta-marbuta folds to ha
        '\u{0629}' => Some('\u{0647}'),
        // Standalone hamza is removed
        '\u{0621}' => None,
        // Waw-hamza folds to waw
        '\u{0624}' => Some('\u{0648}'),
        _ => Some(c),
    }
}

/// Collapse runs of whitespace to single spaces and trim the ends.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize_arabic(""), "");
        assert_eq!(normalize_latin(""), "");
        assert_eq!(normalize_term(""), "");
    }

    #[test]
    fn test_strips_harakat() {
        // "bismi llahi" with full diacritics
        let input = "بِسْمِ اللَّهِ";
        assert_eq!(normalize_arabic(input), "بسم الله");
    }

    #[test]
    fn test_strips_tatweel() {
        assert_eq!(normalize_arabic("كـتـاب"), "كتاب");
    }

    #[test]
    fn test_folds_alef_variants() {
        assert_eq!(normalize_arabic("\u{0623}"), "\u{0627}");
        assert_eq!(normalize_arabic("\u{0625}"), "\u{0627}");
        assert_eq!(normalize_arabic("\u{0622}"), "\u{0627}");
    }

    #[test]
    fn test_folds_ya_ha_waw_variants() {
        assert_eq!(normalize_arabic("\u{0649}"), "\u{064A}");
        assert_eq!(normalize_arabic("\u{0626}"), "\u{064A}");
        assert_eq!(normalize_arabic("\u{0629}"), "\u{0647}");
        assert_eq!(normalize_arabic("\u{0624}"), "\u{0648}");
    }

    #[test]
    fn test_drops_standalone_hamza() {
        assert_eq!(normalize_arabic("\u{0621}"), "");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize_latin("  foo   bar \t baz  "), "foo bar baz");
        assert_eq!(normalize_arabic("بسم   الله"), "بسم الله");
    }

    #[test]
    fn test_latin_strips_punctuation_and_lowercases() {
        assert_eq!(normalize_latin("Dengan nama Allah!"), "dengan nama allah");
        assert_eq!(normalize_latin("al-Fatihah"), "alfatihah");
    }

    #[test]
    fn test_idempotence() {
        let samples = [
            "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ",
            "الْحَمْدُ لِلَّهِ رَبِّ الْعَالَمِينَ",
            "Dengan nama Allah Yang Maha Pengasih",
            "bismillaahir-rahmaanir-rahiim",
            "  Mixed   CASE  text! ",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_has_arabic() {
        assert!(has_arabic("الله"));
        assert!(has_arabic("kata الله campur"));
        assert!(!has_arabic("Allah"));
        assert!(!has_arabic(""));
    }

    #[test]
    fn test_normalize_term_keeps_arabic_letters() {
        let term = "  اللَّهِ  ";
        let normalized = normalize_term(term);
        assert!(normalized.contains('\u{0644}'));
        assert!(!normalized.starts_with(' '));
    }
}
