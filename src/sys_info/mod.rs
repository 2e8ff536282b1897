pub mod endianness;
pub mod host;
#[allow(clippy::module_inception)]
pub mod sys_info;

pub use endianness::{ByteOrder, EndianError};
pub use sys_info::{SysInfo, get_sys_info};
