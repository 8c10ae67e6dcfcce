use std::path::{Path, PathBuf};

use stowin_constants::{
    DEFAULT_IGNORE_PATTERNS, ENV_BLOCK_MARKER, ENV_BLOCK_TEMPLATE, IGNORE_FILE, PREFIX_LAYOUT,
    RC_FILE,
};
use stowin_error::Result;
use stowin_utils::ensure_dir_exists;

use crate::file::{Applied, ensure_block, ensure_lines};

/// First-run bootstrap: prefix layout, shell environment block, ignore file.
/// Every step is idempotent, so re-running setup is always safe.
pub struct Setup {
    prefix: PathBuf,
    home: PathBuf,
}

impl Setup {
    #[must_use]
    pub fn new(prefix: &Path, home: &Path) -> Self {
        Self {
            prefix: prefix.to_path_buf(),
            home: home.to_path_buf(),
        }
    }

    pub fn run(&self, debug: bool) -> Result<()> {
        self.create_layout(debug)?;

        let rc = self.home.join(RC_FILE);
        let block = ENV_BLOCK_TEMPLATE.replace("{prefix}", &self.prefix.display().to_string());
        match ensure_block(&rc, ENV_BLOCK_MARKER, &block)? {
            Applied::Changed => stowin_logger::status(&format!("Updated {}", rc.display())),
            Applied::Unchanged => {
                stowin_logger::debug(&format!("{} already configured", rc.display()), debug);
            }
        }

        let ignore = self.home.join(IGNORE_FILE);
        match ensure_lines(&ignore, DEFAULT_IGNORE_PATTERNS)? {
            Applied::Changed => stowin_logger::status(&format!("Updated {}", ignore.display())),
            Applied::Unchanged => {
                stowin_logger::debug(&format!("{} already configured", ignore.display()), debug);
            }
        }

        Ok(())
    }

    fn create_layout(&self, debug: bool) -> Result<()> {
        for dir in PREFIX_LAYOUT {
            let path = self.prefix.join(dir);
            ensure_dir_exists(&path)?;
            stowin_logger::debug(&format!("Ensured {}", path.display()), debug);
        }
        Ok(())
    }
}
