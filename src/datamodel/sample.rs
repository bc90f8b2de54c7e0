use super::LographDateTime;

/// One observation of a series. The key is normally a timestamp but any
/// comparable value works.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<K = LographDateTime> {
    pub key: K,
    pub value: f64,
}

impl<K> Sample<K> {
    pub fn new(key: K, value: f64) -> Self {
        Sample { key, value }
    }
}
