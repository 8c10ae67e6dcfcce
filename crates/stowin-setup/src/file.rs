use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use stowin_error::{Result, StowError};

use crate::inject::{inject_block, inject_lines};

const LOCK_ATTEMPTS: u32 = 40;
const LOCK_RETRY_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, PartialEq, Eq)]
pub enum Applied {
    Changed,
    Unchanged,
}

/// Ensure `content` appears in the file exactly once, delimited by `marker`
/// lines. The read-modify-write runs under a sibling lock file and lands via
/// an atomic replace, so racing invocations cannot duplicate the block and a
/// crash cannot leave a half-written file.
pub fn ensure_block(path: &Path, marker: &str, content: &str) -> Result<Applied> {
    let _guard = FileLock::acquire(path)?;
    let old = read_or_empty(path)?;
    match inject_block(&old, marker, content) {
        Some(new) => {
            write_atomic(path, &new)?;
            Ok(Applied::Changed)
        }
        None => Ok(Applied::Unchanged),
    }
}

/// Ensure every line of `lines` appears verbatim in the file, appending the
/// missing ones once. Same locking and atomic-replace discipline as
/// [`ensure_block`].
pub fn ensure_lines(path: &Path, lines: &[&str]) -> Result<Applied> {
    let _guard = FileLock::acquire(path)?;
    let old = read_or_empty(path)?;
    match inject_lines(&old, lines) {
        Some(new) => {
            write_atomic(path, &new)?;
            Ok(Applied::Changed)
        }
        None => Ok(Applied::Unchanged),
    }
}

fn read_or_empty(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| StowError::Io(format!("{} has no parent directory", path.display())))?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(path)
        .map_err(|e| StowError::Io(e.to_string()))?;
    Ok(())
}

/// Advisory lock via `O_CREAT|O_EXCL` on a sibling `.lock` file, with a
/// bounded wait. Released on drop, including on error paths.
struct FileLock {
    path: PathBuf,
}

impl FileLock {
    fn acquire(target: &Path) -> Result<Self> {
        let mut name = target.file_name().unwrap_or_default().to_os_string();
        name.push(".lock");
        let path = target.with_file_name(name);

        for _ in 0..LOCK_ATTEMPTS {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => return Ok(Self { path }),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    thread::sleep(LOCK_RETRY_DELAY);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(StowError::LockTimeout(path.display().to_string()))
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
