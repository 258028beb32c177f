//! Text Sanitizer
//!
//! Normalizes arbitrary text into a form that is safe to embed in a JSON
//! string value and to feed to a strict JSON parser.

/// Sanitize text for strict JSON handling. Total function, never fails.
///
/// Three passes folded into one scan:
///
/// 1. Characters below code point 32 are stripped, except newline, carriage
///    return, and tab.
/// 2. Those three preserved controls are escaped into their two-character
///    literal sequences (`\n`, `\r`, `\t`).
/// 3. Anything outside printable ASCII is dropped.
///
/// The ASCII narrowing is lossy: accented text and non-Latin scripts are
/// silently discarded in exchange for parser robustness. A
/// Unicode-preserving alternative would be to route values through
/// `serde_json`'s escaping encoder instead of filtering by character range.
///
/// Output contains only printable ASCII, so the function is idempotent:
/// `sanitize(sanitize(t)) == sanitize(t)` for all `t`.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // Printable ASCII is 0x20..=0x7E; everything else is dropped.
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_control_characters() {
        let input = "hello\u{0}\u{1}\u{8}world\u{1f}";
        assert_eq!(sanitize(input), "helloworld");
    }

    #[test]
    fn test_escapes_preserved_whitespace() {
        assert_eq!(sanitize("a\nb"), "a\\nb");
        assert_eq!(sanitize("a\rb"), "a\\rb");
        assert_eq!(sanitize("a\tb"), "a\\tb");
        assert_eq!(sanitize("line1\r\nline2"), "line1\\r\\nline2");
    }

    #[test]
    fn test_drops_non_ascii() {
        assert_eq!(sanitize("café"), "caf");
        assert_eq!(sanitize("日本語"), "");
        assert_eq!(sanitize("a\u{2014}b"), "ab");
    }

    #[test]
    fn test_preserves_printable_ascii() {
        let printable: String = (0x20u8..=0x7e).map(|b| b as char).collect();
        assert_eq!(sanitize(&printable), printable);
    }

    #[test]
    fn test_drops_delete_character() {
        assert_eq!(sanitize("a\u{7f}b"), "ab");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "plain text",
            "with\nnewlines\tand\rreturns",
            "unicode: héllo wörld 日本",
            "\u{0}\u{1}\u{2}control soup\u{1f}\u{7f}",
            "",
            "already \\n escaped",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_output_character_set() {
        let hostile = "a\u{0}b\nc\u{9d}d\te\u{80}f\u{7f}g";
        let cleaned = sanitize(hostile);
        assert!(cleaned
            .chars()
            .all(|c| c.is_ascii() && !c.is_ascii_control()));
    }
}
