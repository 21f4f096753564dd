use std::fs;
use std::path::Path;

use crate::error::PipelineError;

/// A directory entry selected for execution, tagged with its parsed order.
///
/// The name is kept exactly as listed, prefix included, so it can be used for
/// extension lookup and handed to the interpreter unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStep {
    /// Integer prefix; the sort key for the whole run.
    pub order: i64,
    /// Entry name as listed.
    pub name: String,
}

/// Parse the integer prefix of an entry name, if it has one.
///
/// The name is split at its first `-`; names without a hyphen, or whose left
/// part is not a decimal integer, are not part of the pipeline.
pub(crate) fn parse_order(name: &str) -> Option<i64> {
    let (prefix, _) = name.split_once('-')?;
    prefix.parse().ok()
}

/// Order the eligible entries of a directory listing by integer prefix.
///
/// Pure over the listed names, so ordering and validation are testable
/// without a filesystem. Two entries parsing to the same integer fail the
/// whole call; no partial result is returned.
pub(crate) fn order_entries<I>(names: I) -> Result<Vec<PipelineStep>, PipelineError>
where
    I: IntoIterator<Item = String>,
{
    let mut steps: Vec<PipelineStep> = names
        .into_iter()
        .filter_map(|name| parse_order(&name).map(|order| PipelineStep { order, name }))
        .collect();
    // Name as secondary key keeps the duplicate-prefix error deterministic.
    steps.sort_by(|a, b| (a.order, &a.name).cmp(&(b.order, &b.name)));
    for pair in steps.windows(2) {
        if pair[0].order == pair[1].order {
            return Err(PipelineError::DuplicatePrefix {
                order: pair[0].order,
                first: pair[0].name.clone(),
                second: pair[1].name.clone(),
            });
        }
    }
    Ok(steps)
}

/// List `directory` and return its eligible entries in execution order.
///
/// Only the immediate listing is read; subdirectories are not recursed into,
/// and entries are judged by name alone.
pub fn discover(directory: &Path) -> Result<Vec<PipelineStep>, PipelineError> {
    let list_dir_error = |source| PipelineError::ListDir {
        directory: directory.display().to_string(),
        source,
    };
    let mut names = Vec::new();
    for entry in fs::read_dir(directory).map_err(list_dir_error)? {
        let entry = entry.map_err(list_dir_error)?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    order_entries(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn parses_integer_prefixes() {
        assert_eq!(parse_order("1-fetch.sh"), Some(1));
        assert_eq!(parse_order("10-a.sh"), Some(10));
        assert_eq!(parse_order("+3-b.py"), Some(3));
        assert_eq!(parse_order("1-2-c.sh"), Some(1));
    }

    #[test]
    fn rejects_names_without_prefix() {
        assert_eq!(parse_order("myproject.py"), None);
        assert_eq!(parse_order("random.txt"), None);
        assert_eq!(parse_order("a-1.sh"), None);
        assert_eq!(parse_order("-1-negative.sh"), None);
        assert_eq!(parse_order("1.sh"), None);
    }

    #[test]
    fn orders_numerically_not_lexicographically() {
        let steps = order_entries(names(&["10-a.sh", "2-b.py", "1-c.py"])).unwrap();
        let ordered: Vec<&str> = steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(ordered, vec!["1-c.py", "2-b.py", "10-a.sh"]);
    }

    #[test]
    fn excludes_ineligible_entries() {
        let steps =
            order_entries(names(&["1-run.sh", "notes.txt", "image.jpeg", "nope"])).unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].name, "1-run.sh");
        assert_eq!(steps[0].order, 1);
    }

    #[test]
    fn duplicate_prefixes_fail_the_whole_discovery() {
        let err = order_entries(names(&["2-b.py", "02-c.sh"])).unwrap_err();
        match err {
            PipelineError::DuplicatePrefix {
                order,
                first,
                second,
            } => {
                assert_eq!(order, 2);
                assert_eq!(first, "02-c.sh");
                assert_eq!(second, "2-b.py");
            }
            other => panic!("expected DuplicatePrefix, got {other:?}"),
        }
    }

    #[test]
    fn ordering_is_deterministic() {
        let listing = &["3-c.R", "1-a.sh", "2-b.py", "readme.md"];
        let first = order_entries(names(listing)).unwrap();
        let second = order_entries(names(listing)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn discover_reads_the_directory_listing() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["2-b.py", "1-a.sh", "skipme.txt"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        let steps = discover(dir.path()).unwrap();
        let ordered: Vec<&str> = steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(ordered, vec!["1-a.sh", "2-b.py"]);
    }

    #[test]
    fn discover_missing_directory_is_an_error() {
        let err = discover(Path::new("/definitely/not/a/real/dir")).unwrap_err();
        assert!(matches!(err, PipelineError::ListDir { .. }));
    }
}
