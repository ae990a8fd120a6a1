//! Output rendering
//!
//! Turns the model's output into something a UI can show: pretty-printed JSON
//! split into colour-classified tokens, or HTML spans with inline colours.

use std::sync::LazyLock;

use regex::Regex;

/// `  "name": ` at the start of a pretty-printed line.
static KEY_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(\s*)("(?:[^"\\]|\\.)*")(:\s*)"#).expect("key prefix pattern is valid")
});

/// One value-side token per match; alternatives are tried in order.
static VALUE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?x)
        (?P<string>"(?:[^"\\]|\\.)*")
        | (?P<number>-?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?)
        | (?P<boolean>\btrue\b|\bfalse\b)
        | (?P<null>\bnull\b)
        | (?P<punct>[\[\]{},])
        | (?P<plain>[^"\[\]{},]+?)
        "#,
    )
    .expect("value token pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Key,
    String,
    Number,
    Boolean,
    Null,
    Punctuation,
    Plain,
}

impl TokenKind {
    fn color(self, text: &str) -> Option<&'static str> {
        match self {
            TokenKind::Key => Some("#7dd3fc"),
            TokenKind::String => Some("#98d982"),
            TokenKind::Number => Some("#fbbf24"),
            TokenKind::Boolean => Some("#c084fc"),
            TokenKind::Null => Some("#f87171"),
            TokenKind::Punctuation if text == "," => Some("#9ca3af"),
            TokenKind::Punctuation => Some("#ffffff"),
            TokenKind::Plain => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Pretty-print `text` with two-space indentation if it is valid JSON,
/// otherwise return it unchanged.
pub fn format_json_output(text: &str) -> String {
    serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| text.to_string())
}

/// Tokenize formatted output line by line.
///
/// Text that is not JSON comes back as one `Plain` token per line.
pub fn highlight(text: &str) -> Vec<Vec<Token>> {
    let formatted = format_json_output(text);
    let is_json = serde_json::from_str::<serde_json::Value>(&formatted).is_ok();
    formatted
        .split('\n')
        .map(|line| {
            if is_json {
                highlight_line(line)
            } else {
                vec![Token::new(TokenKind::Plain, line)]
            }
        })
        .collect()
}

fn highlight_line(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = line;

    if let Some(caps) = KEY_PREFIX.captures(line) {
        push_plain(&mut tokens, &caps[1]);
        tokens.push(Token::new(TokenKind::Key, &caps[2]));
        push_plain(&mut tokens, &caps[3]);
        rest = &line[caps.get(0).map_or(0, |m| m.end())..];
    }

    for caps in VALUE_TOKEN.captures_iter(rest) {
        let (kind, m) = if let Some(m) = caps.name("string") {
            (TokenKind::String, m)
        } else if let Some(m) = caps.name("number") {
            (TokenKind::Number, m)
        } else if let Some(m) = caps.name("boolean") {
            (TokenKind::Boolean, m)
        } else if let Some(m) = caps.name("null") {
            (TokenKind::Null, m)
        } else if let Some(m) = caps.name("punct") {
            (TokenKind::Punctuation, m)
        } else if let Some(m) = caps.name("plain") {
            (TokenKind::Plain, m)
        } else {
            continue;
        };
        if kind == TokenKind::Plain {
            push_plain(&mut tokens, m.as_str());
        } else {
            tokens.push(Token::new(kind, m.as_str()));
        }
    }
    tokens
}

/// Append plain text, merging with a preceding plain token.
fn push_plain(tokens: &mut Vec<Token>, text: &str) {
    if text.is_empty() {
        return;
    }
    match tokens.last_mut() {
        Some(last) if last.kind == TokenKind::Plain => last.text.push_str(text),
        _ => tokens.push(Token::new(TokenKind::Plain, text)),
    }
}

/// HTML markup for `text`, one `<div>` per line.
pub fn to_html(text: &str) -> String {
    let mut html = String::new();
    for line in highlight(text) {
        html.push_str("<div>");
        for token in &line {
            let escaped = escape_html(&token.text);
            match token.kind.color(&token.text) {
                Some(color) => {
                    html.push_str(&format!(r#"<span style="color: {color}">{escaped}</span>"#))
                }
                None => html.push_str(&escaped),
            }
        }
        html.push_str("</div>\n");
    }
    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(line: &[Token]) -> Vec<(TokenKind, &str)> {
        line.iter().map(|t| (t.kind, t.text.as_str())).collect()
    }

    #[test]
    fn formats_json_with_two_spaces() {
        assert_eq!(
            format_json_output(r#"{"title":"Dawn","scenes":[1]}"#),
            "{\n  \"title\": \"Dawn\",\n  \"scenes\": [\n    1\n  ]\n}"
        );
    }

    #[test]
    fn non_json_is_returned_unchanged() {
        let text = "A slow pan across the valley.";
        assert_eq!(format_json_output(text), text);
        assert_eq!(
            highlight(text),
            vec![vec![Token::new(TokenKind::Plain, text)]]
        );
    }

    #[test]
    fn classifies_keys_and_values() {
        let lines = highlight(r#"{"title":"Dawn","count":3,"loop":false,"music":null}"#);
        assert_eq!(lines.len(), 6);
        assert_eq!(kinds(&lines[0]), vec![(TokenKind::Punctuation, "{")]);
        assert_eq!(
            kinds(&lines[1]),
            vec![
                (TokenKind::Plain, "  "),
                (TokenKind::Key, "\"title\""),
                (TokenKind::Plain, ": "),
                (TokenKind::String, "\"Dawn\""),
                (TokenKind::Punctuation, ","),
            ]
        );
        assert_eq!(lines[2][3].kind, TokenKind::Number);
        assert_eq!(lines[3][3].kind, TokenKind::Boolean);
        assert_eq!(lines[4][3].kind, TokenKind::Null);
    }

    #[test]
    fn escaped_quotes_stay_inside_strings() {
        let lines = highlight(r#"{"line":"say \"cut\""}"#);
        assert_eq!(lines[1][3], Token::new(TokenKind::String, r#""say \"cut\"""#));
    }

    #[test]
    fn html_uses_palette_and_escapes() {
        let html = to_html(r#"{"fx":"<smoke> & mirrors","n":1}"#);
        assert!(html.contains(r##"<span style="color: #7dd3fc">&quot;fx&quot;</span>"##));
        assert!(html.contains("&lt;smoke&gt; &amp; mirrors"));
        assert!(html.contains(r##"<span style="color: #fbbf24">1</span>"##));
        assert!(html.contains(r##"<span style="color: #9ca3af">,</span>"##));
        assert!(html.contains(r##"<span style="color: #ffffff">{</span>"##));
        assert!(!html.contains("<smoke>"));
    }
}
