//! uxrgen: Micro XRCE-DDS type support from installed ROS 2 interfaces.
//!
//! Reads a list of `package/MessageType` entries, locates each message's
//! `.idl` in the package's installed share directory, and runs the
//! Micro XRCE-DDS generator once per package.

pub mod cli;
pub mod core;
pub mod report;
pub mod transport;
