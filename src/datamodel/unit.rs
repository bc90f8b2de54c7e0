use std::fmt;

/// Measurement unit of a series. Two units are equal when their names are,
/// the description is only informative.
#[derive(Debug, Clone)]
pub struct Unit {
    pub name: String,
    pub description: Option<String>,
}

impl Unit {
    pub fn new(name: String, description: Option<String>) -> Self {
        Unit { name, description }
    }

    pub fn bits_per_second() -> Self {
        Unit::new("bps".to_string(), Some("bits per second".to_string()))
    }

    pub fn milliseconds() -> Self {
        Unit::new("ms".to_string(), Some("milliseconds".to_string()))
    }

    pub fn percent() -> Self {
        Unit::new("%".to_string(), Some("percent".to_string()))
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Unit {}

impl From<&str> for Unit {
    fn from(name: &str) -> Self {
        Unit::new(name.to_string(), None)
    }
}

// Implement display for Unit
impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
