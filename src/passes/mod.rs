// Passes over the statement tree, each one a visitor implementation.

pub mod counter;
pub mod folder;
pub mod resolver;

pub use counter::StatementCounter;
pub use folder::ConstantFolder;
pub use resolver::{resolve_names, NameResolver};
