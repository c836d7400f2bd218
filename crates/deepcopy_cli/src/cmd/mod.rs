/// Deep copy and verification command.
pub mod copy;
/// Node shape listing command.
pub mod shape;
/// Built-in type table listing command.
pub mod types;
/// Shared output helpers.
pub(crate) mod util;
