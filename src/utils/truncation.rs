/// Maximum number of characters of code sent along with a log request.
pub const MAX_EXCERPT_CHARS: usize = 500;

/// Return at most `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn code_excerpt(code: &str) -> &str {
    truncate_chars(code, MAX_EXCERPT_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate_chars("resource", 500), "resource");
    }

    #[test]
    fn test_truncates_to_limit() {
        let code = "x".repeat(800);
        assert_eq!(code_excerpt(&code).len(), MAX_EXCERPT_CHARS);
    }

    #[test]
    fn test_multibyte_boundary() {
        let text = "héllo wörld";
        assert_eq!(truncate_chars(text, 2), "hé");
        assert_eq!(truncate_chars(text, 11), text);
    }
}
