
// Abstract syntax tree of PL/0 statements.
// This module contains all statement node types and related traits.

mod traits;
pub use traits::{Node, StatementVariant};

// AST node modules
mod location;
mod declarations;
mod expressions;
mod statements;

pub use location::Location;
pub use declarations::{DeclList, ProcedureDecl};
pub use expressions::{BinaryOperator, ExpKind, ExpNode, UnaryOperator};
pub use statements::{
    AssignmentNode, BlockNode, CallNode, DoBranchNode, DoNode, ErrorNode, IfNode, ListNode,
    ReadNode, SkipNode, Statement, WhileNode, WriteNode,
};
