use crate::error::DosError;
use std::collections::BTreeMap;

/// String-keyed, string-valued metadata attached to a DOS series.
///
/// A `BTreeMap` keeps iteration order deterministic, which matters for
/// generated labels and for the ordering of grouped sums.
pub type Info = BTreeMap<String, String>;

const LABEL_KEY: &str = "label";

/// Returns the key/value pairs present, with identical values, in both maps.
pub fn intersection(a: &Info, b: &Info) -> Info {
    a.iter()
        .filter(|(key, value)| b.get(*key) == Some(*value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Returns `true` when every criterion pair is present and equal in `info`.
///
/// An empty set of criteria matches everything.
pub fn matches(info: &Info, criteria: &Info) -> bool {
    criteria
        .iter()
        .all(|(key, value)| info.get(key) == Some(value))
}

/// Restricts `info` to the given keys; keys missing from `info` are skipped.
pub fn restrict<S: AsRef<str>>(info: &Info, keys: &[S]) -> Info {
    info.iter()
        .filter(|(key, _)| keys.iter().any(|k| k.as_ref() == key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Generates a legend label: the `label` entry if present, otherwise all
/// pairs formatted as `key: value` and joined by `"; "`.
pub fn label_from_info(info: &Info) -> String {
    match info.get(LABEL_KEY) {
        Some(label) => label.clone(),
        None => info
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect::<Vec<_>>()
            .join("; "),
    }
}

/// Sets the `label` entry, replacing any previous value.
pub fn set_label(info: &mut Info, label: &str) {
    info.insert(LABEL_KEY.to_string(), label.to_string());
}

/// Builds an [`Info`] from loosely typed key/value pairs.
///
/// Every value must already be a string; anything else is rejected with
/// [`DosError::InvalidInfo`].
pub fn try_from_pairs<K, I>(pairs: I) -> Result<Info, DosError>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Option<String>)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| {
            let key = key.into();
            match value {
                Some(value) => Ok((key, value)),
                None => Err(DosError::InvalidInfo { key }),
            }
        })
        .collect()
}

/// Convenience constructor used heavily in tests and examples.
pub fn from_pairs<const N: usize>(pairs: [(&str, &str); N]) -> Info {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
