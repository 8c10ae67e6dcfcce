pub mod file;
pub mod inject;
pub mod setup;

pub use file::{Applied, ensure_block, ensure_lines};
pub use setup::Setup;
