use regex::Regex;
use std::str::Chars;

/// A shell-style wildcard pattern.
///
/// `*` matches any run of characters (path separators included), `?` matches exactly one
/// character, and `[...]` matches one character from a set, with `[!...]` or `[^...]` negating
/// the set. Everything else matches itself. A pattern must match the whole string.
#[derive(Clone, Debug)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let mut translated = String::from("^(?s:");
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            match c {
                '*' => translated.push_str(".*"),
                '?' => translated.push('.'),
                '[' => match translate_class(&mut chars) {
                    Some(class) => translated.push_str(&class),
                    None => translated.push_str(r"\["),
                },
                _ => translated.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
            }
        }
        translated.push_str(")$");

        let regex = Regex::new(&translated)?;
        Ok(Self { regex })
    }

    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

/// Translates the body of a bracket expression, leaving `chars` untouched if it is unterminated.
fn translate_class(chars: &mut Chars<'_>) -> Option<String> {
    let mut lookahead = chars.clone();
    let mut class = String::from("[");
    let mut first = true;

    if let Some('!' | '^') = lookahead.clone().next() {
        lookahead.next();
        class.push('^');
    }

    loop {
        match lookahead.next()? {
            ']' if !first => {
                class.push(']');
                break;
            }
            '-' if class.ends_with('-') => class.push_str(r"\-"),
            c @ ('\\' | '[' | ']' | '^' | '&' | '~') => {
                class.push('\\');
                class.push(c);
            }
            c => class.push(c),
        }
        first = false;
    }

    *chars = lookahead;
    Some(class)
}

#[cfg(test)]
mod tests {
    use crate::glob::Pattern;

    fn matches(pattern: &str, name: &str) -> bool {
        Pattern::new(pattern).unwrap().matches(name)
    }

    #[test]
    fn literals() {
        assert!(matches("MAPS.BSA", "MAPS.BSA"));
        assert!(!matches("MAPS.BSA", "MAPSXBSA"));
        assert!(!matches("MAPS", "MAPS.BSA"));
        assert!(matches("a+b(c)", "a+b(c)"));
    }

    #[test]
    fn stars() {
        assert!(matches("*.RMB", "BARRAA00.RMB"));
        assert!(matches("*.RMB", ".RMB"));
        assert!(!matches("*.RMB", "BARRAA00.RDB"));
        assert!(matches("*", ""));
        assert!(matches("sub/*", "sub/deeper/file"));
    }

    #[test]
    fn question_marks() {
        assert!(matches("MIDI.?", "MIDI.A"));
        assert!(!matches("MIDI.?", "MIDI."));
        assert!(!matches("MIDI.?", "MIDI.AB"));
    }

    #[test]
    fn classes() {
        assert!(matches("[AB]*", "BLOCK"));
        assert!(!matches("[AB]*", "CLOCK"));
        assert!(matches("FILE[0-9]", "FILE7"));
        assert!(!matches("FILE[0-9]", "FILEX"));
        assert!(matches("[!0-9]*", "X1"));
        assert!(!matches("[^0-9]*", "1X"));
        assert!(matches("[]]", "]"));
        assert!(matches("[a-]", "-"));
    }

    #[test]
    fn unterminated_classes_are_literal() {
        assert!(matches("[abc", "[abc"));
        assert!(!matches("[abc", "a"));
    }

    #[test]
    fn invalid_ranges_are_errors() {
        assert!(Pattern::new("[z-a]").is_err());
    }
}
