use std::fmt;

/// What the caller is looking for: a stable identifier or a display name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Lookup {
    ById(i64),
    ByName(String),
}

impl Lookup {
    /// Interpret a raw token: anything that parses as an `i64` is an id.
    ///
    /// An all-digit collection name can only be reached through
    /// [`Lookup::ByName`] directly.
    pub fn parse(token: &str) -> Self {
        match token.parse::<i64>() {
            Ok(id) => Lookup::ById(id),
            Err(_) => Lookup::ByName(token.to_string()),
        }
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::ById(id) => write!(f, "id: {}", id),
            Lookup::ByName(name) => write!(f, "name: {}", name),
        }
    }
}
