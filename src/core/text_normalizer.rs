//! Text Normalization
//!
//! Produces the canonical comparable form of a title or query:
//! lowercase, accent-free, alphanumeric-and-space only, whitespace collapsed.

use unicode_normalization::UnicodeNormalization;

/// Combining diacritical marks block (U+0300..=U+036F)
fn is_combining_accent(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Normalize text for comparison.
///
/// Steps run in a fixed order: lowercase, canonical decomposition with the
/// combining accents dropped, every char outside `[a-z0-9]` and whitespace
/// mapped to a space, whitespace runs collapsed, ends trimmed.
///
/// Idempotent: the output only ever contains `[a-z0-9 ]` with single inner spaces.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();

    let mut result = String::with_capacity(lowered.len());
    let mut pending_space = false;

    for c in lowered.nfd().filter(|c| !is_combining_accent(*c)) {
        let keep = c.is_ascii_lowercase() || c.is_ascii_digit();
        if keep {
            if pending_space && !result.is_empty() {
                result.push(' ');
            }
            pending_space = false;
            result.push(c);
        } else {
            // Punctuation, symbols, non-latin letters and whitespace are all separators
            pending_space = true;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("HELLO WORLD"), "hello world");
        assert_eq!(normalize("  The   Matrix  "), "the matrix");
    }

    #[test]
    fn test_normalize_accents() {
        assert_eq!(normalize("Amélie"), "amelie");
        assert_eq!(normalize("Léon"), "leon");
        assert_eq!(normalize("ÇA GARÇON Noël"), "ca garcon noel");
        // Precomposed and decomposed input agree
        assert_eq!(normalize("e\u{0301}te\u{0301}"), normalize("été"));
    }

    #[test]
    fn test_normalize_punctuation() {
        assert_eq!(normalize("Léon: The Professional"), "leon the professional");
        assert_eq!(normalize("Dune: Part Two"), "dune part two");
        assert_eq!(normalize("L'Âge d'or"), "l age d or");
        assert_eq!(normalize("«Blade-Runner» (2049)!"), "blade runner 2049");
    }

    #[test]
    fn test_normalize_whitespace_kinds() {
        assert_eq!(normalize("a\tb\n\nc\u{00A0}d"), "a b c d");
        assert_eq!(normalize("\u{FEFF}Titanic"), "titanic");
    }

    #[test]
    fn test_normalize_degenerate() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("!!! ??? ..."), "");
        // Non-latin scripts have no ASCII form and vanish
        assert_eq!(normalize("東京 2020"), "2020");
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            "",
            "Amélie",
            "Léon: The Professional",
            "  Blade   Runner 2049 ",
            "Ça, c'est — du cinéma!",
            "Œdipe Roi",
            "ﬁn",
            "東京",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }
}
