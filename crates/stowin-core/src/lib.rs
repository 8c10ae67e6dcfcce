pub mod context;
pub mod install;
pub mod list;
pub mod remove;
pub mod setup;

pub use install::InstallManager;
pub use list::ListManager;
pub use remove::RemoveManager;
pub use setup::SetupManager;

pub fn install(name: &str, source: &str, target: Option<&str>, debug: bool) -> anyhow::Result<()> {
    let manager = InstallManager;
    manager
        .install(name, source, target, debug)
        .map_err(|e| anyhow::anyhow!(e))
}

pub fn remove(name: &str, target: Option<&str>, debug: bool) -> anyhow::Result<()> {
    let manager = RemoveManager;
    manager
        .remove(name, target, debug)
        .map_err(|e| anyhow::anyhow!(e))
}

pub fn list(target: Option<&str>) -> anyhow::Result<Vec<String>> {
    let manager = ListManager;
    manager.list(target).map_err(|e| anyhow::anyhow!(e))
}

pub fn setup(target: Option<&str>, debug: bool) -> anyhow::Result<()> {
    let manager = SetupManager;
    manager.run(target, debug).map_err(|e| anyhow::anyhow!(e))
}
