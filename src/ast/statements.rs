use std::fmt;
use std::mem;
use crate::ast::{DeclList, ExpNode, Location, Node, StatementVariant};
use crate::semantic::symboltable::{ProcedureId, ScopeId};
use crate::semantic::visiters::{StatementVisitor, StatementVisitorMut};
use crate::utils::config::keywords::{ERROR_STATEMENT, EXIT, SKIP};
use crate::utils::config::render::new_line;
use crate::utils::errors::{Pl0Error, Pl0Result};

/// A statement of the program, one variant per statement form.
///
/// A node keeps its variant for its whole life. Passes may overwrite the
/// replaceable expression slots and the call entry, nothing else.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Error(ErrorNode),
    Block(BlockNode),
    Assignment(AssignmentNode),
    Read(ReadNode),
    Write(WriteNode),
    Call(CallNode),
    List(ListNode),
    If(IfNode),
    While(WhileNode),
    Skip(SkipNode),
    Do(DoNode),
    /// A branch on its own; only meaningful inside a `Do`.
    DoBranch(DoBranchNode),
}

impl Statement {
    pub fn error(location: Location) -> Self {
        Statement::Error(ErrorNode::new(location))
    }

    pub fn skip(location: Location) -> Self {
        Statement::Skip(SkipNode::new(location))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Statement::Error(_))
    }

    fn node(&self) -> &dyn Node {
        match self {
            Statement::Error(node) => node,
            Statement::Block(node) => node,
            Statement::Assignment(node) => node,
            Statement::Read(node) => node,
            Statement::Write(node) => node,
            Statement::Call(node) => node,
            Statement::List(node) => node,
            Statement::If(node) => node,
            Statement::While(node) => node,
            Statement::Skip(node) => node,
            Statement::Do(node) => node,
            Statement::DoBranch(node) => node,
        }
    }

    fn node_mut(&mut self) -> &mut dyn Node {
        match self {
            Statement::Error(node) => node,
            Statement::Block(node) => node,
            Statement::Assignment(node) => node,
            Statement::Read(node) => node,
            Statement::Write(node) => node,
            Statement::Call(node) => node,
            Statement::List(node) => node,
            Statement::If(node) => node,
            Statement::While(node) => node,
            Statement::Skip(node) => node,
            Statement::Do(node) => node,
            Statement::DoBranch(node) => node,
        }
    }
}

impl Node for Statement {
    fn location(&self) -> Location {
        self.node().location()
    }

    fn variant(&self) -> StatementVariant {
        self.node().variant()
    }

    fn render(&self, level: usize) -> String {
        self.node().render(level)
    }

    fn accept(&self, visitor: &mut dyn StatementVisitor) -> Pl0Result<()> {
        self.node().accept(visitor)
    }

    fn accept_mut(&mut self, visitor: &mut dyn StatementVisitorMut) -> Pl0Result<()> {
        self.node_mut().accept_mut(visitor)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(0))
    }
}

macro_rules! into_statement {
    ($($node:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$node> for Statement {
                fn from(node: $node) -> Self {
                    Statement::$variant(node)
                }
            }
        )*
    };
}

into_statement! {
    ErrorNode => Error,
    BlockNode => Block,
    AssignmentNode => Assignment,
    ReadNode => Read,
    WriteNode => Write,
    CallNode => Call,
    ListNode => List,
    IfNode => If,
    WhileNode => While,
    SkipNode => Skip,
    DoNode => Do,
    DoBranchNode => DoBranch,
}

/// Stands in for a statement that failed to parse or check.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorNode {
    location: Location,
}

impl ErrorNode {
    pub fn new(location: Location) -> Self {
        Self { location }
    }
}

impl Node for ErrorNode {
    fn location(&self) -> Location {
        self.location
    }
    fn variant(&self) -> StatementVariant {
        StatementVariant::Error
    }
    fn render(&self, _level: usize) -> String {
        ERROR_STATEMENT.to_string()
    }
    fn accept(&self, visitor: &mut dyn StatementVisitor) -> Pl0Result<()> {
        visitor.visit_error(self)
    }
    fn accept_mut(&mut self, visitor: &mut dyn StatementVisitorMut) -> Pl0Result<()> {
        visitor.visit_error(self)
    }
}

/// Declarations and body of a procedure or of the main program.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockNode {
    location: Location,
    procedures: DeclList,
    body: Box<Statement>,
    scope: ScopeId,
}

impl BlockNode {
    pub fn new(location: Location, procedures: DeclList, body: Statement, scope: ScopeId) -> Self {
        Self {
            location,
            procedures,
            body: Box::new(body),
            scope,
        }
    }

    pub fn procedures(&self) -> &DeclList {
        &self.procedures
    }

    /// Bodies of the declared procedures, in declaration order.
    pub fn procedure_blocks_mut(&mut self) -> impl Iterator<Item = &mut dyn Node> + '_ {
        self.procedures.blocks_mut()
    }

    pub fn body(&self) -> &Statement {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut dyn Node {
        &mut *self.body
    }

    /// Scope of the block's locals; owned by the symbol table.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }
}

impl Node for BlockNode {
    fn location(&self) -> Location {
        self.location
    }
    fn variant(&self) -> StatementVariant {
        StatementVariant::Block
    }
    fn render(&self, level: usize) -> String {
        format!(
            "{}{}BEGIN{}{}{}END",
            self.procedures.render(level + 1),
            new_line(level),
            new_line(level + 1),
            self.body.render(level + 1),
            new_line(level)
        )
    }
    fn accept(&self, visitor: &mut dyn StatementVisitor) -> Pl0Result<()> {
        visitor.visit_block(self)
    }
    fn accept_mut(&mut self, visitor: &mut dyn StatementVisitorMut) -> Pl0Result<()> {
        visitor.visit_block(self)
    }
}

/// Parallel assignment `t1, ..., tn := v1, ..., vn`.
///
/// Both sides always have the same length. Operands are rewritten one slot
/// at a time, so no rewrite can change the arity.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentNode {
    location: Location,
    targets: Vec<ExpNode>,
    values: Vec<ExpNode>,
}

impl AssignmentNode {
    pub fn new(location: Location, targets: Vec<ExpNode>, values: Vec<ExpNode>) -> Pl0Result<Self> {
        if targets.len() != values.len() {
            return Err(Pl0Error::ArityMismatch {
                targets: targets.len(),
                values: values.len(),
                line: location.line,
            });
        }
        Ok(Self {
            location,
            targets,
            values,
        })
    }

    pub fn single(location: Location, target: ExpNode, value: ExpNode) -> Self {
        Self {
            location,
            targets: vec![target],
            values: vec![value],
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn targets(&self) -> &[ExpNode] {
        &self.targets
    }

    pub fn values(&self) -> &[ExpNode] {
        &self.values
    }

    pub fn target(&self, index: usize) -> Option<&ExpNode> {
        self.targets.get(index)
    }

    pub fn value(&self, index: usize) -> Option<&ExpNode> {
        self.values.get(index)
    }

    pub fn pair(&self, index: usize) -> Option<(&ExpNode, &ExpNode)> {
        Some((self.targets.get(index)?, self.values.get(index)?))
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&ExpNode, &ExpNode)> {
        self.targets.iter().zip(self.values.iter())
    }

    /// Replace one target, returning the expression it held.
    pub fn set_target(&mut self, index: usize, target: ExpNode) -> Pl0Result<ExpNode> {
        let line = self.location.line;
        Self::replace_slot(&mut self.targets, index, target, line)
    }

    /// Replace one value, returning the expression it held.
    pub fn set_value(&mut self, index: usize, value: ExpNode) -> Pl0Result<ExpNode> {
        let line = self.location.line;
        Self::replace_slot(&mut self.values, index, value, line)
    }

    fn replace_slot(slots: &mut [ExpNode], index: usize, exp: ExpNode, line: usize) -> Pl0Result<ExpNode> {
        let len = slots.len();
        let slot = slots
            .get_mut(index)
            .ok_or(Pl0Error::SlotOutOfRange { index, len, line })?;
        Ok(mem::replace(slot, exp))
    }
}

impl Node for AssignmentNode {
    fn location(&self) -> Location {
        self.location
    }
    fn variant(&self) -> StatementVariant {
        StatementVariant::Assignment
    }
    fn render(&self, _level: usize) -> String {
        let join = |exps: &[ExpNode]| {
            exps.iter()
                .map(|exp| exp.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!("{} := {}", join(&self.targets), join(&self.values))
    }
    fn accept(&self, visitor: &mut dyn StatementVisitor) -> Pl0Result<()> {
        visitor.visit_assignment(self)
    }
    fn accept_mut(&mut self, visitor: &mut dyn StatementVisitorMut) -> Pl0Result<()> {
        visitor.visit_assignment(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadNode {
    location: Location,
    target: ExpNode,
}

impl ReadNode {
    pub fn new(location: Location, target: ExpNode) -> Self {
        Self { location, target }
    }

    pub fn target(&self) -> &ExpNode {
        &self.target
    }

    pub fn set_target(&mut self, target: ExpNode) -> ExpNode {
        mem::replace(&mut self.target, target)
    }
}

impl Node for ReadNode {
    fn location(&self) -> Location {
        self.location
    }
    fn variant(&self) -> StatementVariant {
        StatementVariant::Read
    }
    fn render(&self, _level: usize) -> String {
        format!("READ {}", self.target)
    }
    fn accept(&self, visitor: &mut dyn StatementVisitor) -> Pl0Result<()> {
        visitor.visit_read(self)
    }
    fn accept_mut(&mut self, visitor: &mut dyn StatementVisitorMut) -> Pl0Result<()> {
        visitor.visit_read(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WriteNode {
    location: Location,
    value: ExpNode,
}

impl WriteNode {
    pub fn new(location: Location, value: ExpNode) -> Self {
        Self { location, value }
    }

    pub fn value(&self) -> &ExpNode {
        &self.value
    }

    pub fn set_value(&mut self, value: ExpNode) -> ExpNode {
        mem::replace(&mut self.value, value)
    }
}

impl Node for WriteNode {
    fn location(&self) -> Location {
        self.location
    }
    fn variant(&self) -> StatementVariant {
        StatementVariant::Write
    }
    fn render(&self, _level: usize) -> String {
        format!("WRITE {}", self.value)
    }
    fn accept(&self, visitor: &mut dyn StatementVisitor) -> Pl0Result<()> {
        visitor.visit_write(self)
    }
    fn accept_mut(&mut self, visitor: &mut dyn StatementVisitorMut) -> Pl0Result<()> {
        visitor.visit_write(self)
    }
}

/// Procedure call. `entry` stays empty until a resolver binds the name.
#[derive(Debug, Clone, PartialEq)]
pub struct CallNode {
    location: Location,
    name: String,
    entry: Option<ProcedureId>,
}

impl CallNode {
    pub fn new(location: Location, name: impl Into<String>) -> Self {
        Self {
            location,
            name: name.into(),
            entry: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry(&self) -> Option<ProcedureId> {
        self.entry
    }

    pub fn is_resolved(&self) -> bool {
        self.entry.is_some()
    }

    /// Bind the call. Returns the previous binding, if any.
    pub fn set_entry(&mut self, entry: ProcedureId) -> Option<ProcedureId> {
        self.entry.replace(entry)
    }
}

impl Node for CallNode {
    fn location(&self) -> Location {
        self.location
    }
    fn variant(&self) -> StatementVariant {
        StatementVariant::Call
    }
    fn render(&self, _level: usize) -> String {
        format!("CALL {}", self.name)
    }
    fn accept(&self, visitor: &mut dyn StatementVisitor) -> Pl0Result<()> {
        visitor.visit_call(self)
    }
    fn accept_mut(&mut self, visitor: &mut dyn StatementVisitorMut) -> Pl0Result<()> {
        visitor.visit_call(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListNode {
    location: Location,
    statements: Vec<Statement>,
}

impl ListNode {
    pub fn new(location: Location, statements: Vec<Statement>) -> Self {
        Self {
            location,
            statements,
        }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Children for in-place rewriting. Nodes can be visited and their
    /// replaceable slots changed, but a child cannot be swapped out:
    ///
    /// ```compile_fail
    /// use pl0tree::ast::{ExpNode, ListNode, Location, Statement, WriteNode};
    ///
    /// let at = Location::new(1, 1);
    /// let mut list = ListNode::new(at, vec![WriteNode::new(at, ExpNode::identifier(at, "x")).into()]);
    /// for child in list.statements_mut() {
    ///     *child = Statement::error(at);
    /// }
    /// ```
    pub fn statements_mut(&mut self) -> impl Iterator<Item = &mut dyn Node> + '_ {
        self.statements.iter_mut().map(|s| s as &mut dyn Node)
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Node for ListNode {
    fn location(&self) -> Location {
        self.location
    }
    fn variant(&self) -> StatementVariant {
        StatementVariant::List
    }
    fn render(&self, level: usize) -> String {
        let separator = format!(";{}", new_line(level));
        self.statements
            .iter()
            .map(|s| s.render(level))
            .collect::<Vec<_>>()
            .join(&separator)
    }
    fn accept(&self, visitor: &mut dyn StatementVisitor) -> Pl0Result<()> {
        visitor.visit_statement_list(self)
    }
    fn accept_mut(&mut self, visitor: &mut dyn StatementVisitorMut) -> Pl0Result<()> {
        visitor.visit_statement_list(self)
    }
}

/// `if` with both branches present; a missing `else` is a `Skip`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfNode {
    location: Location,
    condition: ExpNode,
    then_branch: Box<Statement>,
    else_branch: Box<Statement>,
}

impl IfNode {
    pub fn new(location: Location, condition: ExpNode, then_branch: Statement, else_branch: Statement) -> Self {
        Self {
            location,
            condition,
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    /// `if` without `else`.
    pub fn without_else(location: Location, condition: ExpNode, then_branch: Statement) -> Self {
        Self::new(location, condition, then_branch, Statement::skip(location))
    }

    pub fn condition(&self) -> &ExpNode {
        &self.condition
    }

    pub fn set_condition(&mut self, condition: ExpNode) -> ExpNode {
        mem::replace(&mut self.condition, condition)
    }

    pub fn then_branch(&self) -> &Statement {
        &self.then_branch
    }

    pub fn then_branch_mut(&mut self) -> &mut dyn Node {
        &mut *self.then_branch
    }

    pub fn else_branch(&self) -> &Statement {
        &self.else_branch
    }

    pub fn else_branch_mut(&mut self) -> &mut dyn Node {
        &mut *self.else_branch
    }
}

impl Node for IfNode {
    fn location(&self) -> Location {
        self.location
    }
    fn variant(&self) -> StatementVariant {
        StatementVariant::If
    }
    fn render(&self, level: usize) -> String {
        format!(
            "IF {} THEN{}{}{}ELSE{}{}",
            self.condition,
            new_line(level + 1),
            self.then_branch.render(level + 1),
            new_line(level),
            new_line(level + 1),
            self.else_branch.render(level + 1)
        )
    }
    fn accept(&self, visitor: &mut dyn StatementVisitor) -> Pl0Result<()> {
        visitor.visit_if(self)
    }
    fn accept_mut(&mut self, visitor: &mut dyn StatementVisitorMut) -> Pl0Result<()> {
        visitor.visit_if(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileNode {
    location: Location,
    condition: ExpNode,
    body: Box<Statement>,
}

impl WhileNode {
    pub fn new(location: Location, condition: ExpNode, body: Statement) -> Self {
        Self {
            location,
            condition,
            body: Box::new(body),
        }
    }

    pub fn condition(&self) -> &ExpNode {
        &self.condition
    }

    pub fn set_condition(&mut self, condition: ExpNode) -> ExpNode {
        mem::replace(&mut self.condition, condition)
    }

    pub fn body(&self) -> &Statement {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut dyn Node {
        &mut *self.body
    }
}

impl Node for WhileNode {
    fn location(&self) -> Location {
        self.location
    }
    fn variant(&self) -> StatementVariant {
        StatementVariant::While
    }
    fn render(&self, level: usize) -> String {
        format!(
            "WHILE {} DO{}{}",
            self.condition,
            new_line(level + 1),
            self.body.render(level + 1)
        )
    }
    fn accept(&self, visitor: &mut dyn StatementVisitor) -> Pl0Result<()> {
        visitor.visit_while(self)
    }
    fn accept_mut(&mut self, visitor: &mut dyn StatementVisitorMut) -> Pl0Result<()> {
        visitor.visit_while(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkipNode {
    location: Location,
}

impl SkipNode {
    pub fn new(location: Location) -> Self {
        Self { location }
    }
}

impl Node for SkipNode {
    fn location(&self) -> Location {
        self.location
    }
    fn variant(&self) -> StatementVariant {
        StatementVariant::Skip
    }
    fn render(&self, _level: usize) -> String {
        SKIP.to_string()
    }
    fn accept(&self, visitor: &mut dyn StatementVisitor) -> Pl0Result<()> {
        visitor.visit_skip(self)
    }
    fn accept_mut(&mut self, visitor: &mut dyn StatementVisitorMut) -> Pl0Result<()> {
        visitor.visit_skip(self)
    }
}

/// Guarded-command loop `do g1 then s1 [] ... od`.
///
/// Branches are kept in the order they were written. Which branch runs when
/// several guards hold, and what an empty loop means, is up to the pass
/// interpreting the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DoNode {
    location: Location,
    branches: Vec<DoBranchNode>,
}

impl DoNode {
    pub fn new(location: Location, branches: Vec<DoBranchNode>) -> Self {
        Self { location, branches }
    }

    pub fn branches(&self) -> &[DoBranchNode] {
        &self.branches
    }

    pub fn branches_mut(&mut self) -> impl Iterator<Item = &mut dyn Node> + '_ {
        self.branches.iter_mut().map(|b| b as &mut dyn Node)
    }

    /// Guards in branch order.
    pub fn conditions(&self) -> Vec<&ExpNode> {
        self.branches.iter().map(DoBranchNode::condition).collect()
    }

    pub fn has_exit(&self) -> bool {
        self.branches.iter().any(DoBranchNode::exit)
    }
}

impl Node for DoNode {
    fn location(&self) -> Location {
        self.location
    }
    fn variant(&self) -> StatementVariant {
        StatementVariant::Do
    }
    fn render(&self, level: usize) -> String {
        let mut result = String::from("DO");
        for branch in &self.branches {
            result.push_str(&new_line(level + 1));
            result.push_str(&branch.render(level + 1));
        }
        result.push_str(&new_line(level));
        result.push_str("OD");
        result
    }
    fn accept(&self, visitor: &mut dyn StatementVisitor) -> Pl0Result<()> {
        visitor.visit_do(self)
    }
    fn accept_mut(&mut self, visitor: &mut dyn StatementVisitorMut) -> Pl0Result<()> {
        visitor.visit_do(self)
    }
}

/// One guard and body of a `do` loop. Selecting an `exit` branch leaves the
/// loop once its body has run.
#[derive(Debug, Clone, PartialEq)]
pub struct DoBranchNode {
    location: Location,
    condition: ExpNode,
    body: Box<Statement>,
    exit: bool,
}

impl DoBranchNode {
    pub fn new(location: Location, condition: ExpNode, body: Statement, exit: bool) -> Self {
        Self {
            location,
            condition,
            body: Box::new(body),
            exit,
        }
    }

    pub fn condition(&self) -> &ExpNode {
        &self.condition
    }

    pub fn set_condition(&mut self, condition: ExpNode) -> ExpNode {
        mem::replace(&mut self.condition, condition)
    }

    pub fn body(&self) -> &Statement {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut dyn Node {
        &mut *self.body
    }

    pub fn exit(&self) -> bool {
        self.exit
    }
}

impl Node for DoBranchNode {
    fn location(&self) -> Location {
        self.location
    }
    fn variant(&self) -> StatementVariant {
        StatementVariant::DoBranch
    }
    fn render(&self, level: usize) -> String {
        let mut result = format!("{} THEN {}", self.condition, self.body.render(level));
        if self.exit {
            result.push(' ');
            result.push_str(EXIT);
        }
        result
    }
    fn accept(&self, visitor: &mut dyn StatementVisitor) -> Pl0Result<()> {
        visitor.visit_do_branch(self)
    }
    fn accept_mut(&mut self, visitor: &mut dyn StatementVisitorMut) -> Pl0Result<()> {
        visitor.visit_do_branch(self)
    }
}

impl fmt::Display for DoBranchNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(0))
    }
}
