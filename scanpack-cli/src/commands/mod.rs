//! Command implementations for the ScanPack CLI.

pub mod config;
pub mod decode;
pub mod encode;
pub mod info;
pub mod test;

pub use config::cmd_config;
pub use decode::cmd_decode;
pub use encode::{EncodeOverrides, cmd_encode};
pub use info::cmd_info;
pub use test::cmd_test;
