use anyhow::Result;
use owo_colors::OwoColorize;

pub struct SetupHandler;

impl SetupHandler {
    pub fn setup(target: Option<&str>, debug: bool) -> Result<()> {
        println!(
            "{} {}",
            "stowin".bright_cyan().bold(),
            "setup".bright_white()
        );
        println!();

        stowin_core::setup(target, debug)
    }
}
