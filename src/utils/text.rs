/// Escape a value for use inside an AppleScript string literal
pub fn escape_applescript(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wrap a value in double quotes as an AppleScript string literal
pub fn applescript_string(value: &str) -> String {
    format!("\"{}\"", escape_applescript(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_applescript() {
        assert_eq!(escape_applescript("Dentist"), "Dentist");
        assert_eq!(escape_applescript(r#"Say "hi""#), r#"Say \"hi\""#);
        assert_eq!(escape_applescript(r"C:\temp"), r"C:\\temp");
        // Backslash before a quote must not unescape it
        assert_eq!(escape_applescript(r#"a\"b"#), r#"a\\\"b"#);
        assert_eq!(escape_applescript("It's fine"), "It's fine");
    }

    #[test]
    fn test_applescript_string() {
        assert_eq!(applescript_string(r#"Q"A"#), r#""Q\"A""#);
        assert_eq!(applescript_string(""), r#""""#);
    }
}
