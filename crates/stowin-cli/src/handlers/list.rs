use anyhow::Result;
use owo_colors::OwoColorize;

pub struct ListHandler;

impl ListHandler {
    pub fn list(target: Option<&str>) -> Result<()> {
        let names = stowin_core::list(target)?;

        if names.is_empty() {
            stowin_logger::info("No packages installed");
            return Ok(());
        }

        for name in names {
            println!("{}", name.bright_white());
        }
        Ok(())
    }
}
