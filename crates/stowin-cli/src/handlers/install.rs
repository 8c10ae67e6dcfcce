use anyhow::Result;
use owo_colors::OwoColorize;

pub struct InstallHandler;

impl InstallHandler {
    pub fn install(name: &str, source: &str, target: Option<&str>, debug: bool) -> Result<()> {
        println!(
            "{} {} {}",
            "stowin".bright_cyan().bold(),
            "install".bright_white(),
            name.bright_white()
        );
        println!();

        stowin_core::install(name, source, target, debug)
    }
}
