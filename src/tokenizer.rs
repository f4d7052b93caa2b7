use crate::error::SyntaxError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between words.
    Delimiter,
    Unquoted,
    SingleQuoted,
    DoubleQuoted,
}

/// Splits one input line into shell words.
///
/// Quoted runs stay whole and join with whatever touches them, so
/// `a'b c'"d"` is the single word `ab cd`. An empty quoted pair yields an
/// empty word; blank input yields no words at all. Every other character,
/// `#` included, is part of the word it appears in.
pub fn tokenize(line: &str) -> Result<Vec<String>, SyntaxError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut state = State::Delimiter;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        state = match (state, ch) {
            (State::Delimiter, c) if c.is_whitespace() => State::Delimiter,
            (State::Unquoted, c) if c.is_whitespace() => {
                words.push(std::mem::take(&mut current));
                State::Delimiter
            }
            (State::Delimiter | State::Unquoted, '\'') => State::SingleQuoted,
            (State::Delimiter | State::Unquoted, '"') => State::DoubleQuoted,
            (State::Delimiter | State::Unquoted, '\\') => {
                let escaped = chars.next().ok_or(SyntaxError::UnterminatedQuote)?;
                current.push(escaped);
                State::Unquoted
            }
            (State::Delimiter | State::Unquoted, c) => {
                current.push(c);
                State::Unquoted
            }
            (State::SingleQuoted, '\'') => State::Unquoted,
            (State::SingleQuoted, c) => {
                current.push(c);
                State::SingleQuoted
            }
            (State::DoubleQuoted, '"') => State::Unquoted,
            (State::DoubleQuoted, '\\') => {
                match chars.next() {
                    Some(c @ ('"' | '\\' | '$' | '`')) => current.push(c),
                    Some('\n') => {}
                    Some(c) => {
                        current.push('\\');
                        current.push(c);
                    }
                    None => return Err(SyntaxError::UnterminatedQuote),
                }
                State::DoubleQuoted
            }
            (State::DoubleQuoted, c) => {
                current.push(c);
                State::DoubleQuoted
            }
        };
    }

    match state {
        State::SingleQuoted | State::DoubleQuoted => return Err(SyntaxError::UnterminatedQuote),
        State::Unquoted => words.push(current),
        State::Delimiter => {}
    }

    tracing::trace!(?words, "tokenized line");
    return Ok(words);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        let words = tokenize("  echo   hello\tworld ").unwrap();
        assert_eq!(words, vec!["echo", "hello", "world"]);
    }

    #[test]
    fn single_quotes_keep_spaces() {
        let words = tokenize("echo a 'b c' d").unwrap();
        assert_eq!(words, vec!["echo", "a", "b c", "d"]);
    }

    #[test]
    fn adjacent_segments_join() {
        let words = tokenize(r#"echo a'b c'"d e"f"#).unwrap();
        assert_eq!(words, vec!["echo", "ab cd ef"]);
    }

    #[test]
    fn single_quotes_are_literal() {
        let words = tokenize(r#"echo 'a\b "c"'"#).unwrap();
        assert_eq!(words, vec!["echo", r#"a\b "c""#]);
    }

    #[test]
    fn double_quotes_allow_escapes() {
        let words = tokenize(r#"echo "say \"hi\" \\ there \n""#).unwrap();
        assert_eq!(words, vec!["echo", r#"say "hi" \ there \n"#]);
    }

    #[test]
    fn backslash_escapes_outside_quotes() {
        let words = tokenize(r"echo a\ b \'c").unwrap();
        assert_eq!(words, vec!["echo", "a b", "'c"]);
    }

    #[test]
    fn empty_quotes_make_an_empty_word() {
        let words = tokenize("echo '' x \"\"").unwrap();
        assert_eq!(words, vec!["echo", "", "x", ""]);
    }

    #[test]
    fn hash_is_an_ordinary_character() {
        let words = tokenize("echo a #b # c#d").unwrap();
        assert_eq!(words, vec!["echo", "a", "#b", "#", "c#d"]);
    }

    #[test]
    fn blank_line_has_no_words() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("   \t ").unwrap().is_empty());
    }

    #[test]
    fn unterminated_quote_is_rejected() {
        assert_eq!(tokenize("echo 'oops"), Err(SyntaxError::UnterminatedQuote));
        assert_eq!(tokenize("echo \"oops"), Err(SyntaxError::UnterminatedQuote));
        assert_eq!(tokenize("echo oops\\"), Err(SyntaxError::UnterminatedQuote));
    }

    #[test]
    fn redirection_operators_are_plain_words() {
        let words = tokenize("ls /nope 2> err.txt > out.txt").unwrap();
        assert_eq!(words, vec!["ls", "/nope", "2>", "err.txt", ">", "out.txt"]);
    }
}
