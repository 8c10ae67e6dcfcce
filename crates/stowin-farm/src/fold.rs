use std::fs;
use std::path::Path;

use stowin_error::{Result, StowError};

use crate::farm::{SymlinkFarm, sorted_entries};
use crate::resolve::{Resolved, resolve};

/// Outcome of a fold: how many links were created, how many paths were
/// already in place from an earlier fold of the same package, and how many
/// entries the ignore list filtered out.
#[derive(Debug, Default)]
pub struct FoldReport {
    pub placed: usize,
    pub kept: usize,
    pub skipped: usize,
    pub warnings: Vec<StowError>,
}

impl SymlinkFarm {
    /// Make the package's directory tree visible under the shared prefix
    /// with the minimum number of symlinks.
    ///
    /// Whole subtrees become a single link where nothing else occupies the
    /// path. Where another package already owns the path as a directory
    /// link, that link is unfolded one level into a real directory to make
    /// room, and folding continues underneath. A real file, or a second
    /// package's file at the same path, aborts with
    /// `ConflictWithForeignFile` and leaves that path untouched.
    pub fn fold(&self, name: &str) -> Result<FoldReport> {
        let pkg_dir = self.package_dir(name)?;
        let mut report = FoldReport::default();
        self.fold_dir(name, &pkg_dir, Path::new(""), &mut report)?;
        Ok(report)
    }

    fn fold_dir(
        &self,
        name: &str,
        pkg_root: &Path,
        rel: &Path,
        report: &mut FoldReport,
    ) -> Result<()> {
        for entry in sorted_entries(&pkg_root.join(rel))? {
            let rel_child = rel.join(entry.file_name());
            if self.ignore().matches(&rel_child) {
                report.skipped += 1;
                continue;
            }
            let is_dir = entry.file_type().map_err(StowError::from)?.is_dir();
            self.fold_entry(name, pkg_root, &rel_child, is_dir, report)?;
        }
        Ok(())
    }

    fn fold_entry(
        &self,
        name: &str,
        pkg_root: &Path,
        rel: &Path,
        is_dir: bool,
        report: &mut FoldReport,
    ) -> Result<()> {
        let target = self.prefix().join(rel);
        let source = pkg_root.join(rel);

        match resolve(&target, self.store_root())? {
            Resolved::Missing => {
                self.place_link(&target, &source)?;
                report.placed += 1;
                Ok(())
            }
            Resolved::RealDir => {
                if is_dir {
                    self.fold_dir(name, pkg_root, rel, report)
                } else {
                    Err(StowError::ConflictWithForeignFile(target.display().to_string()))
                }
            }
            Resolved::RealFile => {
                Err(StowError::ConflictWithForeignFile(target.display().to_string()))
            }
            Resolved::PackageLink { name: owner, .. } if owner == name => {
                report.kept += 1;
                Ok(())
            }
            Resolved::PackageLink { .. } => {
                match fs::metadata(&target) {
                    Err(_) => {
                        // Link into the store that no longer resolves.
                        report
                            .warnings
                            .push(StowError::DanglingLink(target.display().to_string()));
                        report.skipped += 1;
                        Ok(())
                    }
                    Ok(meta) if meta.is_dir() && is_dir => {
                        // Two packages share this directory: unfold the
                        // owner's subtree link one level, then fold our
                        // entries into the now-real directory.
                        self.split_link(&target)?;
                        self.fold_dir(name, pkg_root, rel, report)
                    }
                    Ok(_) => {
                        // Same path claimed as a file by another package.
                        Err(StowError::ConflictWithForeignFile(target.display().to_string()))
                    }
                }
            }
            Resolved::ForeignLink(_) => {
                if fs::metadata(&target).is_ok() {
                    Err(StowError::ConflictWithForeignFile(target.display().to_string()))
                } else {
                    report
                        .warnings
                        .push(StowError::DanglingLink(target.display().to_string()));
                    report.skipped += 1;
                    Ok(())
                }
            }
        }
    }

    /// Replace a directory link with a real directory holding one link per
    /// entry of the previous owner's subtree.
    fn split_link(&self, target: &Path) -> Result<()> {
        let owner_dir = fs::canonicalize(target)?;
        fs::remove_file(target)?;
        fs::create_dir(target)?;
        for child in sorted_entries(&owner_dir)? {
            let child_name = child.file_name();
            self.place_link(&target.join(&child_name), &owner_dir.join(&child_name))?;
        }
        Ok(())
    }
}
