use smallvec::SmallVec;
use std::fmt;

pub type DimensionLabels = SmallVec<[String; 4]>;

/// Ordered tuple of labels identifying what a series measures.
///
/// Equality, hashing and ordering are structural and order-significant:
/// `("host1", "pingtest")` and `("pingtest", "host1")` are different keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dimension(DimensionLabels);

impl Dimension {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Dimension(labels.into_iter().map(Into::into).collect())
    }

    /// Returns a copy of this dimension with one more label at the end.
    pub fn with(&self, label: &str) -> Self {
        let mut labels = self.0.clone();
        labels.push(label.to_string());
        Dimension(labels)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Dimension {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Dimension::new(iter)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("-"))
    }
}
