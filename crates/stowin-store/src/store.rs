use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use stowin_constants::STOW_SUBDIR;
use stowin_error::{Result, StowError};

/// Collection of isolated per-package directories under `<prefix>/stow`.
///
/// One directory per package identity, created whole via rename and removed
/// whole. The farm reads these directories but never writes into them.
pub struct PackageStore {
    root: PathBuf,
}

impl PackageStore {
    #[must_use]
    pub fn open(prefix: &Path) -> Self {
        Self {
            root: prefix.join(STOW_SUBDIR),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn package_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.package_path(name).is_dir()
    }

    /// Reserve a package identity and hand out a staging directory for the
    /// caller to populate. Nothing appears under the final identity until
    /// [`RegisteredPackage::commit`] renames the staging directory into place.
    pub fn register(&self, name: &str) -> Result<RegisteredPackage> {
        validate_name(name)?;

        if self.contains(name) {
            return Err(StowError::DuplicatePackage(name.to_string()));
        }

        fs::create_dir_all(&self.root)
            .map_err(|e| StowError::StoreFailed(name.to_string(), e.to_string()))?;

        let staging = tempfile::Builder::new()
            .prefix(".staging-")
            .tempdir_in(&self.root)
            .map_err(|e| StowError::StoreFailed(name.to_string(), e.to_string()))?;

        Ok(RegisteredPackage {
            name: name.to_string(),
            dest: self.package_path(name),
            staging,
        })
    }

    /// Delete a package directory as a unit. Callers must retract the farm's
    /// links into it first, or those links are left dangling.
    pub fn remove(&self, name: &str) -> Result<()> {
        let path = self.package_path(name);
        if !path.is_dir() {
            return Err(StowError::UnknownPackage(name.to_string()));
        }
        fs::remove_dir_all(&path)
            .map_err(|e| StowError::StoreFailed(name.to_string(), e.to_string()))?;
        Ok(())
    }

    /// Installed identities, sorted. Staging directories are hidden.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if !name.starts_with('.') {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

/// A reserved identity plus its staging directory. Dropping the handle
/// without committing discards the staging directory and releases nothing
/// under the final identity.
#[derive(Debug)]
pub struct RegisteredPackage {
    name: String,
    dest: PathBuf,
    staging: TempDir,
}

impl RegisteredPackage {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory the builder populates with the package's installed tree.
    #[must_use]
    pub fn staging_path(&self) -> &Path {
        self.staging.path()
    }

    /// Rename the populated staging directory into its final place. The
    /// rename is the commit point: of two racing registrations for the same
    /// identity, exactly one rename lands and the other maps to
    /// `DuplicatePackage`.
    pub fn commit(self) -> Result<PathBuf> {
        if self.dest.exists() {
            return Err(StowError::DuplicatePackage(self.name));
        }

        match fs::rename(self.staging.path(), &self.dest) {
            Ok(()) => Ok(self.dest),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists || e.kind() == io::ErrorKind::DirectoryNotEmpty => {
                Err(StowError::DuplicatePackage(self.name))
            }
            Err(e) => Err(StowError::StoreFailed(self.name, e.to_string())),
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    let ok = !name.is_empty()
        && !name.starts_with('.')
        && !name.contains('/')
        && !name.contains('\0');
    if ok {
        Ok(())
    } else {
        Err(StowError::StoreFailed(
            name.to_string(),
            "package names must be non-empty, unhidden and slash-free".to_string(),
        ))
    }
}
