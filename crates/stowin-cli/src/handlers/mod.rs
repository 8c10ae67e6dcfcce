pub mod install;
pub mod list;
pub mod remove;
pub mod setup;

pub use install::InstallHandler;
pub use list::ListHandler;
pub use remove::RemoveHandler;
pub use setup::SetupHandler;
