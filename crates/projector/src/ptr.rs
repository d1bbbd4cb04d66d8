//! A minimal RFC 6901 JSON Pointer, parsed once at needle-compile time and
//! walked many times against incoming documents.

use serde_json::Value;
use std::fmt::Display;

/// One segment of a parsed JSON Pointer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Token {
    /// Array index, or an object property name that happens to look like one.
    Index(usize),
    /// Object property name.
    Property(String),
}

/// Pointer is a parsed JSON Pointer (RFC 6901), owned so it can live on a
/// compiled Needle for the lifetime of the process.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Pointer(Vec<Token>);

impl Pointer {
    /// Parse a JSON Pointer string into its tokens.
    ///
    /// Per RFC 6901, `~1` decodes to `/` and `~0` decodes to `~`; `~1` must be
    /// unescaped first since `~01` is the literal `~1`, not `/`.
    pub fn parse(s: &str) -> Pointer {
        if s.is_empty() {
            return Pointer(Vec::new());
        }
        let tokens = s
            .split('/')
            .skip(if s.starts_with('/') { 1 } else { 0 })
            .map(|t| t.replace("~1", "/").replace("~0", "~"))
            .map(|t| match usize::from_str_radix(&t, 10) {
                // A leading zero or explicit sign is a property name, not an index
                // (mirrors RFC 6901's array-index grammar, which forbids both).
                Ok(ind) if (t == "0" || !t.starts_with('0')) && !t.starts_with('+') => {
                    Token::Index(ind)
                }
                _ => Token::Property(t),
            })
            .collect();
        Pointer(tokens)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve this pointer against a document, returning the located value
    /// or None if any segment along the path doesn't exist.
    pub fn query<'v>(&self, doc: &'v Value) -> Option<&'v Value> {
        let mut v = doc;
        for token in &self.0 {
            let next = match (v, token) {
                (Value::Object(map), Token::Property(prop)) => map.get(prop),
                (Value::Object(map), Token::Index(ind)) => map.get(&ind.to_string()),
                (Value::Array(arr), Token::Index(ind)) => arr.get(*ind),
                (Value::Array(_), Token::Property(_)) => None,
                _ => None,
            };
            v = next?;
        }
        Some(v)
    }
}

impl Display for Pointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn escape(s: &str) -> String {
            s.replace('~', "~0").replace('/', "~1")
        }
        for token in &self.0 {
            write!(f, "/")?;
            match token {
                Token::Index(ind) => write!(f, "{ind}")?,
                Token::Property(p) => write!(f, "{}", escape(p))?,
            }
        }
        Ok(())
    }
}

impl<S: AsRef<str>> From<S> for Pointer {
    fn from(s: S) -> Self {
        Pointer::parse(s.as_ref())
    }
}
