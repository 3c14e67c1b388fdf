//! Appender implementations

pub mod console;
pub mod file;
pub mod null;

pub use console::{ConsoleAppender, ConsoleStream};
pub use file::FileAppender;
pub use null::NullAppender;

pub use crate::core::Appender;
