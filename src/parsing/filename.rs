use crate::datamodel::Dimension;
use std::path::Path;

const LOG_SUFFIX: &str = ".log";

/// True when the file name starts with the family prefix.
pub fn matches_family(path: &Path, family: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(family))
}

/// Splits the file name, without its `.log` suffix, on underscores.
///
/// `pingtest_hostA.log` gives `("pingtest", "hostA")`.
pub fn dimension_prefix(path: &Path) -> Option<Dimension> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(LOG_SUFFIX).unwrap_or(name);
    if stem.is_empty() {
        return None;
    }
    Some(Dimension::new(stem.split('_')))
}
