use std::fs;
use std::path::{Path, PathBuf};

use stowin_constants::STOW_SUBDIR;
use stowin_error::{Result, StowError};
use stowin_utils::relative_to;

use crate::ignore::IgnoreList;

/// Projects package directories into the shared prefix as symlinks and
/// retracts them again. Holds no state about the tree: every decision is
/// re-derived from the filesystem via [`crate::resolve::resolve`].
pub struct SymlinkFarm {
    prefix: PathBuf,
    store_root: PathBuf,
    ignore: IgnoreList,
}

impl SymlinkFarm {
    /// `prefix` must be absolute and lexically normalized; callers usually
    /// canonicalize it once at the entry point.
    #[must_use]
    pub fn new(prefix: &Path, ignore: IgnoreList) -> Self {
        Self {
            prefix: prefix.to_path_buf(),
            store_root: prefix.join(STOW_SUBDIR),
            ignore,
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    #[must_use]
    pub fn store_root(&self) -> &Path {
        &self.store_root
    }

    pub(crate) fn ignore(&self) -> &IgnoreList {
        &self.ignore
    }

    pub(crate) fn package_dir(&self, name: &str) -> Result<PathBuf> {
        let dir = self.store_root.join(name);
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(StowError::UnknownPackage(name.to_string()))
        }
    }

    /// Create a relative symlink at `link` pointing to the absolute `target`.
    pub(crate) fn place_link(&self, link: &Path, target: &Path) -> Result<()> {
        let parent = link
            .parent()
            .ok_or_else(|| StowError::Io(format!("link path {} has no parent", link.display())))?;
        let rel = relative_to(parent, target);
        std::os::unix::fs::symlink(&rel, link)?;
        Ok(())
    }
}

/// Directory entries sorted by name for deterministic traversal.
pub(crate) fn sorted_entries(dir: &Path) -> Result<Vec<fs::DirEntry>> {
    let mut entries: Vec<fs::DirEntry> = fs::read_dir(dir)?.collect::<std::io::Result<_>>()?;
    entries.sort_by_key(std::fs::DirEntry::file_name);
    Ok(entries)
}
