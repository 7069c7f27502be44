//! Word and list tokenization with ARFF quoting rules.

/// A word or list item; `quoted` distinguishes `'?'` (a label) from `?`
/// (missing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub text: String,
    pub quoted: bool,
}

impl Token {
    fn bare(text: &str) -> Self {
        Self {
            text: text.to_string(),
            quoted: false,
        }
    }

    fn quoted(text: String) -> Self {
        Self { text, quoted: true }
    }

    pub fn is_missing(&self) -> bool {
        !self.quoted && self.text == "?"
    }
}

/// Read up to the closing `quote`. `input` starts after the opening quote.
fn read_quoted(input: &str, quote: char) -> Result<(String, &str), String> {
    let mut text = String::new();
    let mut chars = input.char_indices();
    while let Some((index, ch)) = chars.next() {
        if ch == quote {
            return Ok((text, &input[index + ch.len_utf8()..]));
        }
        if ch == '\\' {
            match chars.next() {
                Some((_, 'n')) => text.push('\n'),
                Some((_, 't')) => text.push('\t'),
                Some((_, 'r')) => text.push('\r'),
                Some((_, escaped)) => text.push(escaped),
                None => break,
            }
        } else {
            text.push(ch);
        }
    }
    Err(format!("unterminated {quote} quote"))
}

fn opening_quote(input: &str) -> Option<char> {
    input.chars().next().filter(|ch| matches!(ch, '\'' | '"'))
}

/// Split off the first word of `input`, returning it and the remainder.
///
/// An unquoted word ends at whitespace or `{`.
pub(crate) fn next_word(input: &str) -> Result<(Token, &str), String> {
    let input = input.trim_start();
    if let Some(quote) = opening_quote(input) {
        let (text, rest) = read_quoted(&input[1..], quote)?;
        return Ok((Token::quoted(text), rest));
    }
    let end = input
        .find(|ch: char| ch.is_whitespace() || ch == '{')
        .unwrap_or(input.len());
    if end == 0 {
        return Err("expected a name".to_string());
    }
    Ok((Token::bare(&input[..end]), &input[end..]))
}

/// Split a comma-separated list, honoring quotes. Unquoted items are trimmed.
pub(crate) fn split_list(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut rest = input.trim();
    if rest.is_empty() {
        return Ok(tokens);
    }
    loop {
        rest = rest.trim_start();
        if let Some(quote) = opening_quote(rest) {
            let (text, after) = read_quoted(&rest[1..], quote)?;
            tokens.push(Token::quoted(text));
            rest = after.trim_start();
            match rest.chars().next() {
                None => return Ok(tokens),
                Some(',') => rest = &rest[1..],
                Some(other) => return Err(format!("unexpected '{other}' after quoted value")),
            }
        } else {
            match rest.split_once(',') {
                Some((item, after)) => {
                    tokens.push(Token::bare(item.trim()));
                    rest = after;
                }
                None => {
                    tokens.push(Token::bare(rest.trim()));
                    return Ok(tokens);
                }
            }
        }
    }
}
