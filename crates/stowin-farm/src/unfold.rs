use std::fs;
use std::path::Path;

use stowin_constants::PREFIX_LAYOUT;
use stowin_error::{Result, StowError};

use crate::farm::{SymlinkFarm, sorted_entries};
use crate::resolve::{Resolved, resolve};

#[derive(Debug, Default)]
pub struct UnfoldReport {
    pub removed: usize,
    pub collapsed: usize,
    pub warnings: Vec<StowError>,
}

impl SymlinkFarm {
    /// Remove every symlink under the prefix that resolves into the named
    /// package's directory, then restore minimality: a directory left with
    /// entries of exactly one other package is folded back into a single
    /// subtree link. Real directories are never deleted; a directory left
    /// empty existed before the package was folded and stays.
    ///
    /// Safe to run against a partially folded package; paths that were never
    /// placed are skipped.
    pub fn unfold(&self, name: &str) -> Result<UnfoldReport> {
        let pkg_dir = self.package_dir(name)?;
        let mut report = UnfoldReport::default();
        self.unfold_dir(name, &pkg_dir, Path::new(""), &mut report)?;
        Ok(report)
    }

    fn unfold_dir(
        &self,
        name: &str,
        pkg_root: &Path,
        rel: &Path,
        report: &mut UnfoldReport,
    ) -> Result<()> {
        for entry in sorted_entries(&pkg_root.join(rel))? {
            let rel_child = rel.join(entry.file_name());
            if self.ignore().matches(&rel_child) {
                continue;
            }
            let target = self.prefix().join(&rel_child);

            match resolve(&target, self.store_root())? {
                Resolved::PackageLink { name: owner, .. } if owner == name => {
                    fs::remove_file(&target)?;
                    report.removed += 1;
                }
                Resolved::RealDir => {
                    if entry.file_type().map_err(StowError::from)?.is_dir() {
                        self.unfold_dir(name, pkg_root, &rel_child, report)?;
                        self.maybe_collapse(&rel_child, report)?;
                    }
                }
                Resolved::ForeignLink(_) => {
                    if fs::metadata(&target).is_err() {
                        report
                            .warnings
                            .push(StowError::DanglingLink(target.display().to_string()));
                    }
                }
                // Another package's link, a foreign file, or nothing at all:
                // not ours to touch.
                Resolved::PackageLink { .. } | Resolved::RealFile | Resolved::Missing => {}
            }
        }
        Ok(())
    }

    /// Re-fold a directory after this package's links were removed from it.
    /// The standard prefix layout and the prefix's direct children are owned
    /// by setup and never collapsed. Fold only materializes directories when
    /// splitting a shared subtree link, and a split directory always keeps
    /// the other owner's links, so anything found empty here predates the
    /// fold and is left in place.
    fn maybe_collapse(&self, rel: &Path, report: &mut UnfoldReport) -> Result<()> {
        let rel_str = rel.to_string_lossy();
        if rel.components().count() <= 1 || PREFIX_LAYOUT.iter().any(|d| *d == rel_str) {
            return Ok(());
        }

        let dir = self.prefix().join(rel);
        let entries = sorted_entries(&dir)?;
        if entries.is_empty() {
            return Ok(());
        }

        let mut sole_owner: Option<String> = None;
        for entry in &entries {
            let Resolved::PackageLink { name, .. } = resolve(&entry.path(), self.store_root())?
            else {
                return Ok(());
            };
            if let Some(owner) = &sole_owner {
                if *owner != name {
                    return Ok(());
                }
            } else {
                sole_owner = Some(name);
            }
        }

        if let Some(owner) = sole_owner {
            let owner_subtree = self.store_root().join(&owner).join(rel);
            if !owner_subtree.is_dir() {
                return Ok(());
            }
            for entry in entries {
                fs::remove_file(entry.path())?;
            }
            fs::remove_dir(&dir)?;
            self.place_link(&dir, &owner_subtree)?;
            report.collapsed += 1;
        }
        Ok(())
    }
}
