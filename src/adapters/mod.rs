//! Adapters: concrete implementations of the domain ports.

pub mod passwd_file;
pub mod recording;
pub mod shell;

pub use passwd_file::PasswdFileLookup;
pub use recording::RecordingRunner;
pub use shell::ShellRunner;
