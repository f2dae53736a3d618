/*
*                    pl0tree -- statement tree of the PL/0 front end.
*
* block      = { "procedure" ident "=" block ";" } statement ;
* statement  = [ lvalue { "," lvalue } ":=" expression { "," expression }
*            | "call" ident
*            | "begin" statement { ";" statement } "end"
*            | "if" condition "then" statement [ "else" statement ]
*            | "while" condition "do" statement
*            | "do" branch { "[]" branch } "od"
*            | "read" lvalue
*            | "write" expression
*            | "skip" ] ;
* branch     = condition "then" statement [ "exit" ] ;
*/

use std::fmt;
use crate::ast::Location;
use crate::semantic::visiters::{StatementVisitor, StatementVisitorMut};
use crate::utils::errors::Pl0Result;

/// The twelve kinds of statement node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementVariant {
    Error,
    Block,
    Assignment,
    Read,
    Write,
    Call,
    List,
    If,
    While,
    Skip,
    Do,
    DoBranch,
}

impl StatementVariant {
    pub const ALL: [StatementVariant; 12] = [
        StatementVariant::Error,
        StatementVariant::Block,
        StatementVariant::Assignment,
        StatementVariant::Read,
        StatementVariant::Write,
        StatementVariant::Call,
        StatementVariant::List,
        StatementVariant::If,
        StatementVariant::While,
        StatementVariant::Skip,
        StatementVariant::Do,
        StatementVariant::DoBranch,
    ];
}

impl fmt::Display for StatementVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

pub trait Node {
    fn location(&self) -> Location;
    fn variant(&self) -> StatementVariant;
    /// Diagnostic rendering, children indented one level deeper than `level`.
    fn render(&self, level: usize) -> String;
    fn accept(&self, visitor: &mut dyn StatementVisitor) -> Pl0Result<()>;
    fn accept_mut(&mut self, visitor: &mut dyn StatementVisitorMut) -> Pl0Result<()>;
}
