use std::path::{Path, PathBuf};

use regex::Regex;
use tokio::fs;
use tracing::{debug, warn};

use crate::types::RefreshError;

/// A resolved almanac script inside the resource directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptHandle {
    pub path: PathBuf,
    pub file_name: String,
}

/// Find the almanac script in `dir`.
///
/// Script names must match `^\w+\.\d+[smhd]\.<ext>$`, a plain base
/// name carrying exactly one interval token. When several candidates
/// exist the lexicographically first one wins so reruns stay
/// deterministic.
pub async fn locate_script(dir: &Path, extension: &str) -> Result<ScriptHandle, RefreshError> {
    let pattern = Regex::new(&format!(r"^\w+\.\d+[smhd]\.{}$", regex::escape(extension)))
        .map_err(|err| RefreshError::Config(format!("Invalid script name pattern: {err}")))?;

    let mut entries = fs::read_dir(dir).await.map_err(|err| {
        RefreshError::Config(format!(
            "Failed to read scripts directory {}: {err}",
            dir.display()
        ))
    })?;

    let mut matches = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if pattern.is_match(name) {
            matches.push(name.to_string());
        }
    }

    if matches.is_empty() {
        return Err(RefreshError::ScriptNotFound {
            dir: dir.to_path_buf(),
        });
    }

    matches.sort();
    if matches.len() > 1 {
        warn!(
            dir = %dir.display(),
            candidates = matches.len(),
            "Multiple almanac scripts match; picking the lexicographically first"
        );
    }

    let file_name = matches.remove(0);
    debug!(script = %file_name, "Almanac script resolved");
    Ok(ScriptHandle {
        path: dir.join(&file_name),
        file_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "").expect("write fixture");
    }

    #[tokio::test]
    async fn finds_the_single_match() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "solar_calendar.48m.py");
        touch(dir.path(), "README.md");

        let script = locate_script(dir.path(), "py").await.expect("located");
        assert_eq!(script.file_name, "solar_calendar.48m.py");
        assert_eq!(script.path, dir.path().join("solar_calendar.48m.py"));
    }

    #[tokio::test]
    async fn errors_when_nothing_matches() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "notes.txt");

        let err = locate_script(dir.path(), "py").await.unwrap_err();
        assert!(matches!(err, RefreshError::ScriptNotFound { .. }));
    }

    #[tokio::test]
    async fn multiple_matches_pick_the_sorted_first() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "zodiac.1h.py");
        touch(dir.path(), "almanac.5m.py");

        let script = locate_script(dir.path(), "py").await.expect("located");
        assert_eq!(script.file_name, "almanac.5m.py");
    }

    #[tokio::test]
    async fn rejects_names_outside_the_convention() {
        let dir = tempfile::tempdir().expect("tempdir");
        // No interval token, dotted base name, wrong extension.
        touch(dir.path(), "almanac.py");
        touch(dir.path(), "a.b.10m.py");
        touch(dir.path(), "almanac.10m.sh");

        let err = locate_script(dir.path(), "py").await.unwrap_err();
        assert!(matches!(err, RefreshError::ScriptNotFound { .. }));
    }

    #[tokio::test]
    async fn honours_the_configured_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "almanac.10m.sh");

        let script = locate_script(dir.path(), "sh").await.expect("located");
        assert_eq!(script.file_name, "almanac.10m.sh");
    }
}
