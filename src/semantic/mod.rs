pub mod symboltable;
pub mod visiters;

pub use symboltable::{ProcedureEntry, ProcedureId, ScopeId, Symbol, SymbolTable, SymbolType};
pub use visiters::{StatementVisitor, StatementVisitorMut};
