//! Shared helpers for the analysis stages.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Render a number of seconds as `"Xm Ys"`.
///
/// Uses floor division and a non-negative remainder, so `-1` renders as
/// `"-1m 59s"`.
///
/// # Example
///
/// ```
/// use campaign_eda::utils::seconds_to_minutes;
///
/// assert_eq!(seconds_to_minutes(125), "2m 5s");
/// assert_eq!(seconds_to_minutes(60), "1m 0s");
/// ```
pub fn seconds_to_minutes(seconds: i64) -> String {
    format!("{}m {}s", seconds.div_euclid(60), seconds.rem_euclid(60))
}

/// Partition values by key. Keys come back in ascending order and each
/// group keeps the input order of its values.
pub fn group_values<K, I>(pairs: I) -> BTreeMap<K, Vec<f64>>
where
    K: Ord,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for (key, value) in pairs {
        groups.entry(key).or_default().push(value);
    }
    groups
}

/// Create the parent directory of an output file if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_to_minutes() {
        assert_eq!(seconds_to_minutes(125), "2m 5s");
        assert_eq!(seconds_to_minutes(59), "0m 59s");
        assert_eq!(seconds_to_minutes(60), "1m 0s");
        assert_eq!(seconds_to_minutes(0), "0m 0s");
        assert_eq!(seconds_to_minutes(4918), "81m 58s");
    }

    #[test]
    fn test_seconds_to_minutes_negative_uses_floor() {
        assert_eq!(seconds_to_minutes(-1), "-1m 59s");
    }

    #[test]
    fn test_group_values_sorted_keys() {
        let groups = group_values(vec![
            ("technician", 120.0),
            ("admin.", 61.0),
            ("technician", 90.0),
        ]);
        let keys: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(keys, vec!["admin.", "technician"]);
        assert_eq!(groups["technician"], vec![120.0, 90.0]);
    }

    #[test]
    fn test_ensure_parent_dir_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a/b/report.csv");
        ensure_parent_dir(&target).unwrap();
        assert!(dir.path().join("a/b").is_dir());
    }

    #[test]
    fn test_ensure_parent_dir_bare_file_name() {
        assert!(ensure_parent_dir(Path::new("report.csv")).is_ok());
    }
}
