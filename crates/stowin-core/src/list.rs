use stowin_error::Result;
use stowin_store::PackageStore;

use crate::context::{home_dir, resolve_prefix};

pub struct ListManager;

impl ListManager {
    pub fn list(&self, target: Option<&str>) -> Result<Vec<String>> {
        let home = home_dir()?;
        let prefix = resolve_prefix(target, &home)?;
        let store = PackageStore::open(&prefix);
        store.list()
    }
}
