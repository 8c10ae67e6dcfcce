use std::fs;
use std::path::Path;

use regex::Regex;

use stowin_constants::DEFAULT_IGNORE_PATTERNS;
use stowin_error::{Result, StowError};

/// Compiled ignore patterns, GNU-stow flavoured: a pattern containing a slash
/// is matched against the slash-prefixed path relative to the package root,
/// any other pattern against the basename alone.
#[derive(Debug)]
pub struct IgnoreList {
    patterns: Vec<Regex>,
}

impl IgnoreList {
    pub fn new<S: AsRef<str>>(sources: &[S]) -> Result<Self> {
        let mut patterns = Vec::with_capacity(sources.len());
        for source in sources {
            let source = source.as_ref();
            let regex = Regex::new(source)
                .map_err(|e| StowError::InvalidPattern(source.to_string(), e.to_string()))?;
            patterns.push(regex);
        }
        Ok(Self { patterns })
    }

    pub fn defaults() -> Result<Self> {
        Self::new(DEFAULT_IGNORE_PATTERNS)
    }

    /// Read newline-delimited patterns from an ignore file, falling back to
    /// the compiled-in defaults when the file does not exist. Blank lines and
    /// `#` comments are skipped.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Self::defaults();
        }

        let content = fs::read_to_string(path)?;
        let lines: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();
        Self::new(&lines)
    }

    #[must_use]
    pub fn matches(&self, rel: &Path) -> bool {
        let slashed = format!("/{}", rel.display());
        let basename = rel
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.patterns.iter().any(|regex| {
            if regex.as_str().contains('/') {
                regex.is_match(&slashed)
            } else {
                regex.is_match(&basename)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_patterns_cover_info_dir_and_git() {
        let ignore = IgnoreList::defaults().unwrap();
        assert!(ignore.matches(&PathBuf::from("share/info/dir")));
        assert!(ignore.matches(&PathBuf::from(".git")));
        assert!(ignore.matches(&PathBuf::from("src/.gitignore")));
        assert!(!ignore.matches(&PathBuf::from("bin/tool")));
        assert!(!ignore.matches(&PathBuf::from("share/info/foo.info")));
    }

    #[test]
    fn slash_patterns_anchor_to_package_root() {
        let ignore = IgnoreList::new(&["^/doc"]).unwrap();
        assert!(ignore.matches(&PathBuf::from("doc/index.html")));
        assert!(!ignore.matches(&PathBuf::from("share/doc/index.html")));
    }

    #[test]
    fn loads_patterns_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("ignore");
        fs::write(&file, "# comment\n\n^/share/info/dir$\nbak$\n").unwrap();

        let ignore = IgnoreList::load(&file).unwrap();
        assert!(ignore.matches(&PathBuf::from("share/info/dir")));
        assert!(ignore.matches(&PathBuf::from("bin/tool.bak")));
        assert!(!ignore.matches(&PathBuf::from(".git")));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        match IgnoreList::new(&["("]) {
            Err(StowError::InvalidPattern(pattern, _)) => assert_eq!(pattern, "("),
            other => panic!("expected InvalidPattern, got {other:?}"),
        }
    }
}
