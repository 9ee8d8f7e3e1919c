//! Line tokenizer for netlist input.

/// A blank-separated token on one netlist line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    /// The token's text
    pub text: &'a str,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Byte offset of the token within the whole input
    pub offset: usize,
}

/// One physical line of input, split into tokens.
#[derive(Debug, Clone)]
pub struct Line<'a> {
    /// Line text without the terminating newline
    pub text: &'a str,
    /// Line number (1-indexed)
    pub number: usize,
    /// Byte offset of the first character of the line
    pub offset: usize,
    /// Tokens on this line
    pub tokens: Vec<Token<'a>>,
}

impl<'a> Line<'a> {
    /// Whether the line holds nothing but blanks.
    pub fn is_blank(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Text of the token at `index`.
    pub fn word(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index).map(|t| t.text)
    }

    /// Text of the line starting at its first token.
    pub fn trimmed(&self) -> &'a str {
        self.text.trim_start_matches([' ', '\t'])
    }

    /// Column of the first token, or 1 for blank lines.
    pub fn first_column(&self) -> usize {
        self.tokens.first().map(|t| t.column).unwrap_or(1)
    }
}

/// Splits netlist input into lines of blank-separated tokens.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
        }
    }

    /// The full input being tokenized.
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Get the next line, or `None` at end of input.
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        if self.pos >= self.input.len() {
            return None;
        }

        let start = self.pos;
        let rest = &self.input[start..];
        let (raw, consumed) = match rest.find('\n') {
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len()),
        };
        let text = raw.strip_suffix('\r').unwrap_or(raw);

        let number = self.line;
        self.pos += consumed;
        self.line += 1;

        Some(Line {
            text,
            number,
            offset: start,
            tokens: tokenize(text, number, start),
        })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        self.next_line()
    }
}

fn tokenize(text: &str, line: usize, line_offset: usize) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        let blank = ch == ' ' || ch == '\t';
        match (blank, start) {
            (true, Some(s)) => {
                tokens.push(make_token(text, s, i, line, line_offset));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push(make_token(text, s, text.len(), line, line_offset));
    }

    tokens
}

fn make_token(text: &str, start: usize, end: usize, line: usize, line_offset: usize) -> Token<'_> {
    Token {
        text: &text[start..end],
        line,
        column: text[..start].chars().count() + 1,
        offset: line_offset + start,
    }
}

/// Whether `text` is a valid net name: alphanumerics plus `- : _ !`.
pub fn is_terminal(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | ':' | '_' | '!'))
}

/// Whether `text` is an identifier-like word (letters, digits, `_`).
pub fn is_identifier(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn suffix_multiplier(ch: char) -> Option<f64> {
    match ch {
        'p' => Some(1e-12),
        'n' => Some(1e-9),
        'u' | 'µ' => Some(1e-6),
        'm' => Some(1e-3),
        'k' | 'K' => Some(1e3),
        'M' => Some(1e6),
        'G' => Some(1e9),
        _ => None,
    }
}

/// Check whether a token matches the numeric literal pattern.
///
/// Pattern: `['+'|'-'] digits ['.' digits] [('e'|'E') ['+'|'-'] digits] [suffix]`,
/// where at least one mantissa digit is present and an exponent marker must
/// be followed by digits.
pub fn is_numeric_literal(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;

    if i < chars.len() && (chars[i] == '-' || chars[i] == '+') {
        i += 1;
    }

    // Mantissa
    let mut has_digits = false;
    while i < chars.len() && chars[i].is_ascii_digit() {
        has_digits = true;
        i += 1;
    }
    if i < chars.len() && chars[i] == '.' {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            has_digits = true;
            i += 1;
        }
    }
    if !has_digits {
        return false;
    }

    // Exponent
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '-' || chars[j] == '+') {
            j += 1;
        }
        let digits_start = j;
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        if j == digits_start {
            return false;
        }
        i = j;
    }

    // Unit suffix
    if i < chars.len() && suffix_multiplier(chars[i]).is_some() {
        i += 1;
    }

    i == chars.len()
}

/// Parse a number string with optional unit suffix.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    if !is_numeric_literal(text) {
        return None;
    }

    let (num_str, multiplier) = match text.chars().last().and_then(|c| suffix_multiplier(c).map(|m| (c, m))) {
        Some((last, mult)) => (&text[..text.len() - last.len_utf8()], mult),
        None => (text, 1.0),
    };

    num_str.parse::<f64>().ok().map(|v| v * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_value() {
        assert_relative_eq!(parse_value("10k").unwrap(), 10_000.0);
        assert_relative_eq!(parse_value("100n").unwrap(), 100e-9);
        assert_relative_eq!(parse_value("4.7u").unwrap(), 4.7e-6);
        assert_relative_eq!(parse_value("1M").unwrap(), 1_000_000.0);
        assert_relative_eq!(parse_value("2.2").unwrap(), 2.2);
        assert_relative_eq!(parse_value("1e-9").unwrap(), 1e-9);
        assert_relative_eq!(parse_value("-5").unwrap(), -5.0);
        assert_relative_eq!(parse_value(".5").unwrap(), 0.5);
    }

    #[test]
    fn test_non_numeric_values() {
        assert_eq!(parse_value("R"), None);
        assert_eq!(parse_value("inf"), None);
        assert_eq!(parse_value("NaN"), None);
        assert_eq!(parse_value("1e"), None);
        assert_eq!(parse_value("k"), None);
        assert_eq!(parse_value("10kk"), None);
        assert_eq!(parse_value("-"), None);
    }

    #[test]
    fn test_lexer_lines() {
        let input = "R1 in out 10k\r\n\n  V1\tin 0 5";
        let lines: Vec<_> = Lexer::new(input).collect();
        assert_eq!(lines.len(), 3);

        assert_eq!(lines[0].text, "R1 in out 10k");
        assert_eq!(lines[0].word(2), Some("out"));
        assert!(lines[1].is_blank());

        let v = &lines[2];
        assert_eq!(v.number, 3);
        assert_eq!(v.tokens[0].text, "V1");
        assert_eq!(v.tokens[0].column, 3);
        assert_eq!(v.tokens[1].text, "in");
        assert_eq!(&input[v.tokens[1].offset..v.tokens[1].offset + 2], "in");
        assert_eq!(v.trimmed(), "V1\tin 0 5");
    }

    #[test]
    fn test_terminal_shape() {
        assert!(is_terminal("n1"));
        assert!(is_terminal("vdd!"));
        assert!(is_terminal("X1:mid"));
        assert!(is_terminal("a-b_c"));
        assert!(!is_terminal("(n1"));
        assert!(!is_terminal("r=1"));
        assert!(!is_terminal(""));
    }
}
