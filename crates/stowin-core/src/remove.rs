use std::path::Path;

use stowin_constants::IGNORE_FILE;
use stowin_error::{Result, StowError};
use stowin_farm::{IgnoreList, SymlinkFarm};
use stowin_store::PackageStore;

use crate::context::{home_dir, resolve_prefix};

pub struct RemoveManager;

impl RemoveManager {
    pub fn remove(&self, name: &str, target: Option<&str>, debug: bool) -> Result<()> {
        let home = home_dir()?;
        let prefix = resolve_prefix(target, &home)?;
        self.remove_at(name, &prefix, &home, debug)
    }

    /// Unfold first, then delete the package directory. If unfolding fails
    /// the package directory stays in place; deleting it with links still
    /// pointing in would leave the prefix dangling.
    pub fn remove_at(&self, name: &str, prefix: &Path, home: &Path, debug: bool) -> Result<()> {
        let store = PackageStore::open(prefix);
        if !store.contains(name) {
            return Err(StowError::UnknownPackage(name.to_string()));
        }

        let ignore = IgnoreList::load(&home.join(IGNORE_FILE))?;
        let farm = SymlinkFarm::new(prefix, ignore);

        stowin_logger::status(&format!("Unlinking {name}..."));
        let report = farm.unfold(name)?;
        for warning in &report.warnings {
            stowin_logger::warn(&warning.to_string());
        }
        stowin_logger::debug(
            &format!("Removed {} links, collapsed {} dirs", report.removed, report.collapsed),
            debug,
        );

        store.remove(name)?;
        stowin_logger::finish(&format!("removed {name}"));
        Ok(())
    }
}
