//! Named parameter collection shared by the builders of one statement

use crate::Value;

/// Prefix of generated placeholder names
pub const PARAM_PREFIX: &str = ":qp";

/// Ordered mapping from placeholder name to bound value.
///
/// Generated names are the prefix followed by the collector's size at the
/// moment of allocation, moved forward past any name already merged in, so
/// a name is never handed out twice. A collector is append-only for the
/// lifetime of the statement it is collecting for. A collector has a single writer:
/// never share one between statements built concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamCollector {
    prefix: String,
    entries: Vec<(String, Value)>,
}

impl Default for ParamCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamCollector {
    pub fn new() -> Self {
        Self::with_prefix(PARAM_PREFIX)
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            entries: Vec::new(),
        }
    }

    /// Bind a value under a freshly allocated placeholder and return its name
    pub fn bind(&mut self, value: impl Into<Value>) -> String {
        let mut ordinal = self.entries.len();
        let mut name = format!("{}{}", self.prefix, ordinal);
        while self.get(&name).is_some() {
            ordinal += 1;
            name = format!("{}{}", self.prefix, ordinal);
        }
        self.entries.push((name.clone(), value.into()));
        name
    }

    /// Merge a pre-named binding, replacing the value of an existing entry
    /// with the same name in place.
    pub fn merge(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn into_vec(self) -> Vec<(String, Value)> {
        self.entries
    }
}

/// Rewrite named placeholders into positional `?` markers.
///
/// A placeholder name runs over every following word character, so `:qp10`
/// is never mistaken for `:qp1`. Names that the collector does not
/// know, and anything inside quoted literals or identifiers, are left alone.
/// Returns the rewritten SQL and the values in order of appearance.
pub fn to_positional(sql: &str, params: &ParamCollector) -> (String, Vec<Value>) {
    let mut out = String::with_capacity(sql.len());
    let mut values = Vec::new();
    let mut quote: Option<char> = None;
    let mut chars = sql.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' => {
                quote = Some(c);
                out.push(c);
            }
            ':' if matches!(chars.peek(), Some((_, n)) if is_name_char(*n)) => {
                let mut end = i + 1;
                while let Some((j, n)) = chars.peek().copied() {
                    if !is_name_char(n) {
                        break;
                    }
                    end = j + n.len_utf8();
                    chars.next();
                }
                let name = &sql[i..end];
                match params.get(name) {
                    Some(value) => {
                        out.push('?');
                        values.push(value.clone());
                    }
                    None => out.push_str(name),
                }
            }
            _ => out.push(c),
        }
    }

    (out, values)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
