//! CLI command implementations

pub mod init;
pub mod redact;
pub mod run;
pub mod validate;
