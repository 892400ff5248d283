pub mod init;
pub mod store;

pub use init::randomize;
pub use store::{LoadError, Weights};
