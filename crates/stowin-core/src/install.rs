use std::path::Path;

use stowin_constants::IGNORE_FILE;
use stowin_error::Result;
use stowin_farm::{IgnoreList, SymlinkFarm};
use stowin_source::SourceSpec;
use stowin_store::PackageStore;

use crate::context::{home_dir, resolve_prefix};

/// Drives one install through its states: source ready, built, registered,
/// folded. Register failure aborts before the farm is touched; a fold
/// failure rolls the farm and the store back so no partial install is left
/// behind.
pub struct InstallManager;

impl InstallManager {
    pub fn install(&self, name: &str, source: &str, target: Option<&str>, debug: bool) -> Result<()> {
        let home = home_dir()?;
        let prefix = resolve_prefix(target, &home)?;
        self.install_at(name, source, &prefix, &home, debug)
    }

    pub fn install_at(
        &self,
        name: &str,
        source: &str,
        prefix: &Path,
        home: &Path,
        debug: bool,
    ) -> Result<()> {
        let spec = SourceSpec::parse(source);
        stowin_logger::status(&format!("Preparing source for {name}..."));
        let workdir = tempfile::tempdir()?;
        let source_dir = stowin_source::fetch(&spec, workdir.path())?;

        let store = PackageStore::open(prefix);
        let registration = store.register(name)?;

        stowin_logger::status(&format!("Building {name}..."));
        stowin_builder::build(&source_dir, registration.staging_path(), debug)?;

        // Commit point: the package directory appears under its identity.
        let package_dir = registration.commit()?;
        stowin_logger::debug(&format!("Committed {}", package_dir.display()), debug);

        let ignore = IgnoreList::load(&home.join(IGNORE_FILE))?;
        let farm = SymlinkFarm::new(prefix, ignore);

        stowin_logger::status(&format!("Linking {name} into {}...", prefix.display()));
        match farm.fold(name) {
            Ok(report) => {
                for warning in &report.warnings {
                    stowin_logger::warn(&warning.to_string());
                }
                stowin_logger::finish(&format!(
                    "installed {name} ({} links, {} skipped)",
                    report.placed, report.skipped
                ));
                Ok(())
            }
            Err(err) => {
                // Roll back to the pre-install state, then re-surface the
                // original failure.
                stowin_logger::error(&format!("Linking {name} failed, rolling back"));
                if let Err(undo) = farm.unfold(name) {
                    stowin_logger::warn(&format!("Rollback unfold failed: {undo}"));
                }
                if let Err(undo) = store.remove(name) {
                    stowin_logger::warn(&format!("Rollback remove failed: {undo}"));
                }
                Err(err)
            }
        }
    }
}
