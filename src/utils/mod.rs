pub mod file_operations;
pub mod latex_command;

pub use file_operations::{copy_with_metadata, first_existing, safe_relative_path, CopyOutcome};
pub use latex_command::{command_arguments, strip_comment, LineFilter};
