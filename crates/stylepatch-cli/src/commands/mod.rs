//! Subcommand implementations.

pub mod apply;
pub mod init;
pub mod list_formatters;
pub mod output;
