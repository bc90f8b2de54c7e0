use super::{Dimension, LographDateTime, Sample, Unit};
use crate::error::{LographError, Result};
use std::cmp::Ordering;
use std::fmt;

/// An ordered, dimensioned and unit-tagged collection of samples.
///
/// Samples are appended in parsing order. They are only sorted by key when
/// [`Series::sort`] is called, which the store does after every merge.
#[derive(Debug, Clone)]
pub struct Series<K = LographDateTime> {
    pub dimension: Dimension,
    pub unit: Unit,
    /// Z-order hint for rendering. Higher is drawn on top.
    pub priority: i32,
    is_continuous: bool,
    samples: Vec<Sample<K>>,
}

impl<K> Series<K> {
    /// A continuous series, rendered as a line.
    pub fn new(dimension: Dimension, unit: Unit) -> Self {
        Series {
            dimension,
            unit,
            priority: 0,
            is_continuous: true,
            samples: Vec::new(),
        }
    }

    /// A discrete series, rendered as sparse bars.
    pub fn discrete(dimension: Dimension, unit: Unit) -> Self {
        Series {
            is_continuous: false,
            ..Series::new(dimension, unit)
        }
    }

    pub fn is_continuous(&self) -> bool {
        self.is_continuous
    }

    pub fn append(&mut self, key: K, value: f64) {
        self.samples.push(Sample::new(key, value));
    }

    pub fn samples(&self) -> &[Sample<K>] {
        &self.samples
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.samples.iter().map(|s| &s.key)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.value)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Absorbs the samples of `other`. Both series must share dimension and unit.
    ///
    /// The result is not sorted, call [`Series::sort`] afterwards.
    pub fn merge(&mut self, other: Series<K>) -> Result<()> {
        if other.dimension != self.dimension || other.unit != self.unit {
            return Err(LographError::AggregationKeyMismatch {
                expected: format!("{} ({})", self.dimension, self.unit),
                found: format!("{} ({})", other.dimension, other.unit),
            });
        }
        self.samples.extend(other.samples);
        Ok(())
    }
}

impl<K: PartialOrd> Series<K> {
    /// Stable sort by key, ties keep their relative order.
    pub fn sort(&mut self) {
        self.samples
            .sort_by(|a, b| a.key.partial_cmp(&b.key).unwrap_or(Ordering::Equal));
    }
}

impl<K> fmt::Display for Series<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} records)", self.dimension, self.len())
    }
}
