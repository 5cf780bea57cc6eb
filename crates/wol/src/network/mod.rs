pub mod interface;

pub use interface::{enumerate_interfaces, InterfaceAddrs};
