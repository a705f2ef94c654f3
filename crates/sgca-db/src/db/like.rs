//! SQL LIKE/ILIKE pattern helpers for the name/text searches.

/// ## Summary
/// Escapes special SQL LIKE/ILIKE pattern characters.
///
/// Escapes `%`, `_`, and `\` so they match literally.
#[must_use]
pub fn escape_like_pattern(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' | '_' | '\\' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

/// ## Summary
/// Builds a contains-style ILIKE pattern for a user-supplied substring.
#[must_use]
pub fn contains_pattern(value: &str) -> String {
    format!("%{}%", escape_like_pattern(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("100%"), "100\\%");
        assert_eq!(escape_like_pattern("test_value"), "test\\_value");
        assert_eq!(escape_like_pattern("a\\b"), "a\\\\b");
        assert_eq!(escape_like_pattern("normal"), "normal");
    }

    #[test]
    fn test_contains_pattern() {
        assert_eq!(contains_pattern("Crear"), "%Crear%");
        assert_eq!(contains_pattern("50%"), "%50\\%%");
    }
}
