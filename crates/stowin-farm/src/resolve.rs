use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use stowin_utils::normalize_lexically;

/// What currently sits at a path under the shared prefix. Re-derived from the
/// filesystem on every call; the fold state is never cached.
#[derive(Debug)]
pub enum Resolved {
    Missing,
    RealDir,
    RealFile,
    /// A symlink resolving to `<store-root>/<name>/<subpath>`.
    PackageLink { name: String, subpath: PathBuf },
    /// A symlink that does not resolve into the package store.
    ForeignLink(PathBuf),
}

/// Classify `path` against the store rooted at `store_root`. Both paths must
/// be absolute; `store_root` must be lexically normalized. Symlink targets are
/// resolved lexically so that dangling links still classify.
pub fn resolve(path: &Path, store_root: &Path) -> io::Result<Resolved> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Resolved::Missing),
        Err(e) => return Err(e),
    };

    if meta.file_type().is_symlink() {
        let raw_target = fs::read_link(path)?;
        let absolute = if raw_target.is_absolute() {
            raw_target.clone()
        } else {
            path.parent()
                .map_or_else(|| raw_target.clone(), |parent| parent.join(&raw_target))
        };
        let absolute = normalize_lexically(&absolute);

        if let Ok(inside) = absolute.strip_prefix(store_root) {
            let mut parts = inside.components();
            if let Some(Component::Normal(name)) = parts.next() {
                if let Some(name) = name.to_str() {
                    return Ok(Resolved::PackageLink {
                        name: name.to_string(),
                        subpath: parts.as_path().to_path_buf(),
                    });
                }
            }
        }
        return Ok(Resolved::ForeignLink(raw_target));
    }

    if meta.is_dir() {
        Ok(Resolved::RealDir)
    } else {
        Ok(Resolved::RealFile)
    }
}
