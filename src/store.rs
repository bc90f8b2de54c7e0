use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{Level, event};

use crate::datamodel::{Dimension, LographDateTime, Series};
use crate::error::Result;

type SeriesFilter<K> = Box<dyn Fn(&Series<K>) -> bool>;

/// Series keyed by dimension, merged across every parsed file.
///
/// The store owns its series. A series whose dimension is new is moved in,
/// otherwise its samples are absorbed by the stored one. Either way the
/// stored series is sorted by key afterwards. Samples are never deduplicated.
pub struct SeriesStore<K = LographDateTime> {
    series_set: BTreeMap<Dimension, Series<K>>,
    sources: Vec<PathBuf>,
    filter: Option<SeriesFilter<K>>,
}

impl<K> Default for SeriesStore<K> {
    fn default() -> Self {
        SeriesStore {
            series_set: BTreeMap::new(),
            sources: Vec::new(),
            filter: None,
        }
    }
}

impl<K: PartialOrd> SeriesStore<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, new_series: Series<K>) -> Result<()> {
        match self.series_set.get_mut(&new_series.dimension) {
            Some(series) => {
                series.merge(new_series)?;
                series.sort();
                event!(Level::TRACE, "Merged into {}", series);
            }
            None => {
                let mut series = new_series;
                series.sort();
                event!(Level::TRACE, "New series {}", series);
                self.series_set.insert(series.dimension.clone(), series);
            }
        }
        Ok(())
    }

    /// Records a successfully parsed file.
    pub fn add_source(&mut self, path: impl Into<PathBuf>) {
        self.sources.push(path.into());
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn has_source(&self, path: &Path) -> bool {
        self.sources.iter().any(|p| p == path)
    }

    /// Installs the predicate used by iteration, replacing any previous one.
    pub fn filter<F>(&mut self, predicate: F)
    where
        F: Fn(&Series<K>) -> bool + 'static,
    {
        self.filter = Some(Box::new(predicate));
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    fn accepts(filter: &Option<SeriesFilter<K>>, series: &Series<K>) -> bool {
        filter.as_ref().is_none_or(|f| f(series))
    }

    /// Series passing the filter, in dimension order.
    pub fn iter(&self) -> impl Iterator<Item = &Series<K>> + '_ {
        self.series_set
            .values()
            .filter(|s| Self::accepts(&self.filter, s))
    }

    /// Mutable access to the series passing the filter, to adjust priorities.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Series<K>> + '_ {
        let filter = &self.filter;
        self.series_set
            .values_mut()
            .filter(move |s| Self::accepts(filter, s))
    }

    pub fn get(&self, dimension: &Dimension) -> Option<&Series<K>> {
        self.series_set.get(dimension)
    }

    /// Number of stored series, regardless of the filter.
    pub fn len(&self) -> usize {
        self.series_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series_set.is_empty()
    }
}

impl<'a, K: PartialOrd> IntoIterator for &'a SeriesStore<K> {
    type Item = &'a Series<K>;
    type IntoIter = Box<dyn Iterator<Item = &'a Series<K>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl<K> fmt::Debug for SeriesStore<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeriesStore")
            .field("series", &self.series_set.keys().collect::<Vec<_>>())
            .field("sources", &self.sources)
            .field("filtered", &self.filter.is_some())
            .finish()
    }
}
