//! Command implementations for OxiPack CLI.

pub mod batch;
pub mod info;
pub mod methods;

pub use batch::{BatchArgs, cmd_compress, cmd_decompress};
pub use info::cmd_info;
pub use methods::cmd_methods;
