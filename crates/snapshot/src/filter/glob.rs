//! Shell-glob to regular-expression translation for ignore-file lines.
//!
//! Semantics follow conventional `fnmatch` matching: `*` matches any run of
//! characters including `/`, `?` matches one character, `[...]` is a
//! character class with `!` negation. The produced regex is anchored at both
//! ends so that a search behaves like a whole-string glob match.

use regex::Regex;

/// Translate ignore-file glob lines into regex strings.
///
/// Blank lines and `#` comments are dropped. Every other line (trimmed)
/// yields exactly one regex string; malformed constructs such as an
/// unterminated `[` are matched literally.
pub fn translate_globs<I, S>(globs: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    globs
        .into_iter()
        .filter_map(|glob| {
            let line = glob.as_ref().trim();
            if line.is_empty() || line.starts_with('#') {
                None
            } else {
                Some(translate(line))
            }
        })
        .collect()
}

/// Translate one glob into an anchored regex string.
pub fn translate(glob: &str) -> String {
    let chars: Vec<char> = glob.chars().collect();
    let mut body = String::with_capacity(glob.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => {
                while i + 1 < chars.len() && chars[i + 1] == '*' {
                    i += 1;
                }
                body.push_str(".*");
            }
            '?' => body.push('.'),
            '[' => match bracket_class(&chars, i) {
                Some((class, end)) => {
                    body.push_str(&class);
                    i = end;
                }
                None => body.push_str(r"\["),
            },
            c => body.push_str(&regex::escape(c.encode_utf8(&mut [0u8; 4]))),
        }
        i += 1;
    }

    format!(r"^(?s:{})\z", body)
}

/// Parse a character class starting at `chars[start] == '['`.
///
/// Returns the regex class and the index of the closing `]`, or `None` when
/// the class is unterminated or would not compile (e.g. a reversed range).
fn bracket_class(chars: &[char], start: usize) -> Option<(String, usize)> {
    let mut j = start + 1;
    if j < chars.len() && chars[j] == '!' {
        j += 1;
    }
    // A leading `]` is a member, not the terminator
    if j < chars.len() && chars[j] == ']' {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    if j >= chars.len() {
        return None;
    }

    let inner = &chars[start + 1..j];
    let mut class = String::from("[");
    for (k, &c) in inner.iter().enumerate() {
        match c {
            '!' if k == 0 => class.push('^'),
            '^' if k == 0 => class.push_str(r"\^"),
            // Characters with meaning inside a regex class body
            '\\' | '[' | ']' | '&' | '~' => {
                class.push('\\');
                class.push(c);
            }
            '-' if k > 0 && inner[k - 1] == '-' => class.push_str(r"\-"),
            _ => class.push(c),
        }
    }
    class.push(']');

    if Regex::new(&class).is_err() {
        return None;
    }

    Some((class, j))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn glob_matches(glob: &str, text: &str) -> bool {
        Regex::new(&translate(glob)).unwrap().is_match(text)
    }

    /// Reference matcher for `*`, `?` and literals.
    fn fnmatch(glob: &[char], text: &[char]) -> bool {
        match glob.split_first() {
            None => text.is_empty(),
            Some(('*', rest)) => (0..=text.len()).any(|k| fnmatch(rest, &text[k..])),
            Some(('?', rest)) => !text.is_empty() && fnmatch(rest, &text[1..]),
            Some((c, rest)) => text.first() == Some(c) && fnmatch(rest, &text[1..]),
        }
    }

    #[test]
    fn test_translate_globs_drops_blank_and_comments() {
        let globs = ["*.log", "", "   ", "# comment", "  dist/  "];
        let translated = translate_globs(globs);
        assert_eq!(translated.len(), 2);
        assert_eq!(translated[1], translate("dist/"));
    }

    #[test]
    fn test_star_crosses_separators() {
        assert!(glob_matches("*.log", "app.log"));
        assert!(glob_matches("*.log", "logs/app.log"));
        assert!(!glob_matches("*.log", "app.log.bak"));
        assert!(glob_matches("src/**", "src/a/b.rs"));
    }

    #[test]
    fn test_question_mark() {
        assert!(glob_matches("file?.txt", "file1.txt"));
        assert!(!glob_matches("file?.txt", "file10.txt"));
    }

    #[test]
    fn test_anchored_whole_string() {
        assert!(glob_matches("important.log", "important.log"));
        assert!(!glob_matches("important.log", "not_important.log"));
        assert!(!glob_matches("important.log", "important.log.1"));
    }

    #[test]
    fn test_character_classes() {
        assert!(glob_matches("data[0-9].csv", "data7.csv"));
        assert!(!glob_matches("data[0-9].csv", "datax.csv"));
        assert!(glob_matches("data[!0-9].csv", "datax.csv"));
        assert!(!glob_matches("data[!0-9].csv", "data7.csv"));
        assert!(glob_matches("[]]x", "]x"));
    }

    #[test]
    fn test_malformed_class_is_literal() {
        assert!(glob_matches("a[b", "a[b"));
        assert!(!glob_matches("a[b", "ab"));
        assert!(glob_matches("[z-a]", "[z-a]"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert!(glob_matches("a+b(c).{d}|e$", "a+b(c).{d}|e$"));
        assert!(!glob_matches("a.b", "axb"));
    }

    proptest! {
        #[test]
        fn prop_translated_regex_accepts_fnmatch_matches(
            glob in "[ab.*?/]{0,8}",
            text in "[ab./]{0,8}",
        ) {
            let g: Vec<char> = glob.chars().collect();
            let t: Vec<char> = text.chars().collect();
            if fnmatch(&g, &t) {
                prop_assert!(glob_matches(&glob, &text));
            }
        }

        #[test]
        fn prop_translate_always_compiles(glob in "\\PC{1,12}") {
            prop_assert!(Regex::new(&translate(&glob)).is_ok());
        }
    }
}
