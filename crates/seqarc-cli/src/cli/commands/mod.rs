//! CLI command handlers. Each command is in its own file.

mod checksum;
mod run;
mod status;
mod verify;

pub use checksum::run_checksum;
pub use run::{run_archive, RunOverrides};
pub use status::run_status;
pub use verify::run_verify;
