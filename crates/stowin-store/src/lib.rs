pub mod store;

pub use store::{PackageStore, RegisteredPackage};
