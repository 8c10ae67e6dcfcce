use anyhow::Result;
use owo_colors::OwoColorize;

pub struct RemoveHandler;

impl RemoveHandler {
    pub fn remove(names: &[String], target: Option<&str>, debug: bool) -> Result<()> {
        let name_list = names.join(" ");
        println!(
            "{} {} {}",
            "stowin".bright_cyan().bold(),
            "remove".bright_white(),
            name_list.bright_white()
        );
        println!();

        for name in names {
            stowin_core::remove(name, target, debug)?;
        }
        Ok(())
    }
}
