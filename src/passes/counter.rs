use std::collections::HashMap;
use crate::ast::{
    AssignmentNode, BlockNode, CallNode, DoBranchNode, DoNode, ErrorNode, IfNode, ListNode, Node,
    ReadNode, SkipNode, StatementVariant, WhileNode, WriteNode,
};
use crate::semantic::visiters::StatementVisitor;
use crate::utils::errors::Pl0Result;

/// Walks a whole tree and tallies what it finds.
///
/// `executed` counts simple statements (assignment, read, write, call, skip).
/// Composite statements are walked but not counted. Error nodes are tallied
/// apart and never counted as executed.
#[derive(Debug, Default)]
pub struct StatementCounter {
    executed: usize,
    errors: usize,
    visits: HashMap<StatementVariant, usize>,
}

impl StatementCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn executed(&self) -> usize {
        self.executed
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    /// How many nodes of `variant` were visited, counted or not.
    pub fn visits(&self, variant: StatementVariant) -> usize {
        self.visits.get(&variant).copied().unwrap_or(0)
    }

    fn record(&mut self, variant: StatementVariant) {
        *self.visits.entry(variant).or_insert(0) += 1;
    }

    fn record_simple(&mut self, variant: StatementVariant) -> Pl0Result<()> {
        self.record(variant);
        self.executed += 1;
        Ok(())
    }
}

impl StatementVisitor for StatementCounter {
    fn visit_error(&mut self, _node: &ErrorNode) -> Pl0Result<()> {
        self.record(StatementVariant::Error);
        self.errors += 1;
        Ok(())
    }

    fn visit_block(&mut self, node: &BlockNode) -> Pl0Result<()> {
        self.record(StatementVariant::Block);
        for procedure in node.procedures().procedures() {
            procedure.block().accept(self)?;
        }
        node.body().accept(self)
    }

    fn visit_assignment(&mut self, _node: &AssignmentNode) -> Pl0Result<()> {
        self.record_simple(StatementVariant::Assignment)
    }

    fn visit_read(&mut self, _node: &ReadNode) -> Pl0Result<()> {
        self.record_simple(StatementVariant::Read)
    }

    fn visit_write(&mut self, _node: &WriteNode) -> Pl0Result<()> {
        self.record_simple(StatementVariant::Write)
    }

    fn visit_call(&mut self, _node: &CallNode) -> Pl0Result<()> {
        self.record_simple(StatementVariant::Call)
    }

    fn visit_statement_list(&mut self, node: &ListNode) -> Pl0Result<()> {
        self.record(StatementVariant::List);
        for statement in node.statements() {
            statement.accept(self)?;
        }
        Ok(())
    }

    fn visit_if(&mut self, node: &IfNode) -> Pl0Result<()> {
        self.record(StatementVariant::If);
        node.then_branch().accept(self)?;
        node.else_branch().accept(self)
    }

    fn visit_while(&mut self, node: &WhileNode) -> Pl0Result<()> {
        self.record(StatementVariant::While);
        node.body().accept(self)
    }

    fn visit_skip(&mut self, _node: &SkipNode) -> Pl0Result<()> {
        self.record_simple(StatementVariant::Skip)
    }

    fn visit_do(&mut self, node: &DoNode) -> Pl0Result<()> {
        self.record(StatementVariant::Do);
        for branch in node.branches() {
            branch.accept(self)?;
        }
        Ok(())
    }

    fn visit_do_branch(&mut self, node: &DoBranchNode) -> Pl0Result<()> {
        self.record(StatementVariant::DoBranch);
        node.body().accept(self)
    }
}
