//! PHP literal rendering.

/// Single-quoted PHP string literal.
pub fn string(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Text safe inside a `//` line comment.
///
/// Line breaks would end the comment and `?>` would leave PHP mode.
pub fn comment(text: &str) -> String {
    text.replace(['\r', '\n'], " ").replace("?>", "? >")
}

/// Short-syntax list of string literals: `['a', 'b']`.
pub fn string_list<S: AsRef<str>>(values: &[S]) -> String {
    let items: Vec<String> = values.iter().map(|v| string(v.as_ref())).collect();
    format!("[{}]", items.join(", "))
}

/// Short-syntax associative array from pre-rendered values: `['k' => v]`.
pub fn assoc(entries: &[(&str, String)]) -> String {
    let items: Vec<String> = entries
        .iter()
        .map(|(key, value)| format!("{} => {}", string(key), value))
        .collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_escaping() {
        assert_eq!(string("users"), "'users'");
        assert_eq!(string("it's"), r"'it\'s'");
        assert_eq!(string(r"C:\tmp"), r"'C:\\tmp'");
    }

    #[test]
    fn test_string_list() {
        assert_eq!(string_list(&["id"]), "['id']");
        assert_eq!(string_list(&["a", "b"]), "['a', 'b']");
        assert_eq!(string_list::<&str>(&[]), "[]");
    }

    #[test]
    fn test_comment_text() {
        assert_eq!(comment("users"), "users");
        assert_eq!(comment("a?>b"), "a? >b");
        assert_eq!(comment("line\r\nbreak"), "line  break");
    }

    #[test]
    fn test_assoc() {
        assert_eq!(assoc(&[]), "[]");
        assert_eq!(
            assoc(&[("null", "true".to_string()), ("limit", "255".to_string())]),
            "['null' => true, 'limit' => 255]"
        );
    }
}
