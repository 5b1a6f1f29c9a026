pub mod config;
pub mod logging;

pub mod archiver;
pub mod checksum;
pub mod extract;
pub mod fetch;
pub mod history;
pub mod storage;
pub mod verify;
