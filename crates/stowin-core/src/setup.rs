use stowin_error::Result;
use stowin_setup::Setup;

use crate::context::{home_dir, resolve_prefix};

pub struct SetupManager;

impl SetupManager {
    pub fn run(&self, target: Option<&str>, debug: bool) -> Result<()> {
        let home = home_dir()?;
        let prefix = resolve_prefix(target, &home)?;
        Setup::new(&prefix, &home).run(debug)?;
        stowin_logger::finish("setup complete");
        Ok(())
    }
}
