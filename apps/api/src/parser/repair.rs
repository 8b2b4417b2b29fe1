//! Fault-tolerant JSON repair.
//!
//! The model is told to answer with strict JSON, but real responses drift:
//! trailing commas, unquoted keys, single or smart quotes, truncated output.
//! `repair_json` accepts all of that and returns a best-effort
//! `serde_json::Value`. It is deliberately a narrow contract (text in,
//! value-or-nothing out) so its tolerance rules can be tested without the
//! network call that produces its input.

use serde_json::{Map, Number, Value};

/// Best-effort parse of near-JSON text. Strict JSON takes the fast path
/// through serde; everything else goes through the tolerant parser.
pub fn repair_json(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }
    let mut parser = Repairer {
        chars: text.chars().collect(),
        pos: 0,
    };
    parser.skip_ws();
    parser.parse_value()
}

/// Quote characters accepted as string delimiters. Smart quotes show up when
/// a response passed through a word processor or a chat UI.
const OPEN_QUOTES: &[char] = &['"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

fn closing_quotes(open: char) -> &'static [char] {
    match open {
        '"' => &['"'],
        '\'' => &['\''],
        '\u{201C}' | '\u{201D}' => &['\u{201C}', '\u{201D}'],
        _ => &['\u{2018}', '\u{2019}'],
    }
}

struct Repairer {
    chars: Vec<char>,
    pos: usize,
}

impl Repairer {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn parse_value(&mut self) -> Option<Value> {
        self.skip_ws();
        match self.peek()? {
            '{' => self.parse_object(),
            '[' => self.parse_array(),
            c if OPEN_QUOTES.contains(&c) => self.parse_string().map(Value::String),
            _ => self.parse_bareword(),
        }
    }

    /// Object bodies tolerate unquoted keys, `=` for `:`, stray and trailing
    /// commas, and truncation (EOF closes every open container).
    fn parse_object(&mut self) -> Option<Value> {
        self.bump(); // '{'
        let mut map = Map::new();
        loop {
            self.skip_ws();
            match self.peek() {
                None => break,
                Some('}') => {
                    self.bump();
                    break;
                }
                Some(',') => {
                    self.bump();
                    continue;
                }
                _ => {}
            }
            let key = if OPEN_QUOTES.contains(&self.peek()?) {
                self.parse_string()?
            } else {
                self.parse_identifier()
            };
            if key.is_empty() {
                // Unreadable character where a key should be; step over it.
                self.bump();
                continue;
            }
            self.skip_ws();
            if matches!(self.peek(), Some(':' | '=')) {
                self.bump();
            }
            let value = self.parse_value().unwrap_or(Value::Null);
            map.insert(key, value);
        }
        Some(Value::Object(map))
    }

    fn parse_array(&mut self) -> Option<Value> {
        self.bump(); // '['
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            match self.peek() {
                None => break,
                Some(']') => {
                    self.bump();
                    break;
                }
                Some(',') => {
                    self.bump();
                    continue;
                }
                _ => {}
            }
            match self.parse_value() {
                Some(value) => items.push(value),
                None => {
                    self.bump();
                }
            }
        }
        Some(Value::Array(items))
    }

    /// Reads a quoted string. An unterminated string is closed at EOF.
    fn parse_string(&mut self) -> Option<String> {
        let open = self.bump()?;
        let closers = closing_quotes(open);
        let mut out = String::new();
        while let Some(c) = self.bump() {
            if closers.contains(&c) {
                return Some(out);
            }
            if c != '\\' {
                out.push(c);
                continue;
            }
            match self.bump() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('u') => {
                    let mut code = String::new();
                    for _ in 0..4 {
                        match self.peek() {
                            Some(h) if h.is_ascii_hexdigit() => {
                                code.push(h);
                                self.bump();
                            }
                            _ => break,
                        }
                    }
                    if let Some(decoded) =
                        u32::from_str_radix(&code, 16).ok().and_then(char::from_u32)
                    {
                        out.push(decoded);
                    }
                }
                Some(other) => out.push(other),
                None => break,
            }
        }
        Some(out)
    }

    /// Reads an unquoted object key: everything up to a separator.
    fn parse_identifier(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if matches!(c, ':' | '=' | ',' | '}' | '\n') {
                break;
            }
            out.push(c);
            self.pos += 1;
        }
        out.trim().to_string()
    }

    /// Reads an unquoted value up to the next structural delimiter and
    /// classifies it: literal, number, or plain string.
    fn parse_bareword(&mut self) -> Option<Value> {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if matches!(c, ',' | '}' | ']' | '\n') {
                break;
            }
            out.push(c);
            self.pos += 1;
        }
        let word = out.trim();
        if word.is_empty() {
            return None;
        }
        match word {
            "true" | "True" => return Some(Value::Bool(true)),
            "false" | "False" => return Some(Value::Bool(false)),
            "null" | "None" => return Some(Value::Null),
            _ => {}
        }
        if let Ok(n) = word.parse::<i64>() {
            return Some(Value::Number(n.into()));
        }
        if let Ok(f) = word.parse::<f64>() {
            if let Some(n) = Number::from_f64(f) {
                return Some(Value::Number(n));
            }
        }
        Some(Value::String(word.to_string()))
    }
}
