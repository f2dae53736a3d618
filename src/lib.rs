pub mod ast;
pub mod passes;
pub mod samples;
pub mod semantic;
pub mod utils;

pub use utils::errors;

pub const VERSION: &str = "0.1.0";
