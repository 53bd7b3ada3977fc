pub mod config_io;
pub mod dispatch;
pub mod http_store;
pub mod memory_store;
pub mod store;
