//! Command descriptors and the registry that resolves them.

mod descriptor;
mod registry;

pub use descriptor::{Command, CommandKind, DefaultHandler, Handler};
pub use registry::CommandRegistry;
