use crate::ast::{
    AssignmentNode, BlockNode, CallNode, DoBranchNode, DoNode, ErrorNode, IfNode, ListNode,
    ReadNode, SkipNode, WhileNode, WriteNode,
};
use crate::utils::errors::Pl0Result;

/// One operation per statement variant.
///
/// `accept` on a node calls exactly the matching operation once. Nothing
/// recurses on its own: an implementation that wants to see children calls
/// `accept` on them itself, in whatever order the pass needs.
///
/// An Error node has already been reported by whoever built it, so the
/// default `visit_error` does nothing and a pass should keep going.
pub trait StatementVisitor {
    fn visit_error(&mut self, _node: &ErrorNode) -> Pl0Result<()> {
        Ok(())
    }
    fn visit_block(&mut self, node: &BlockNode) -> Pl0Result<()>;
    fn visit_assignment(&mut self, node: &AssignmentNode) -> Pl0Result<()>;
    fn visit_read(&mut self, node: &ReadNode) -> Pl0Result<()>;
    fn visit_write(&mut self, node: &WriteNode) -> Pl0Result<()>;
    fn visit_call(&mut self, node: &CallNode) -> Pl0Result<()>;
    fn visit_statement_list(&mut self, node: &ListNode) -> Pl0Result<()>;
    fn visit_if(&mut self, node: &IfNode) -> Pl0Result<()>;
    fn visit_while(&mut self, node: &WhileNode) -> Pl0Result<()>;
    fn visit_skip(&mut self, node: &SkipNode) -> Pl0Result<()>;
    fn visit_do(&mut self, node: &DoNode) -> Pl0Result<()>;
    fn visit_do_branch(&mut self, node: &DoBranchNode) -> Pl0Result<()>;
}

/// Same protocol as [`StatementVisitor`] for passes that rewrite the
/// replaceable fields of the nodes they visit.
pub trait StatementVisitorMut {
    fn visit_error(&mut self, _node: &mut ErrorNode) -> Pl0Result<()> {
        Ok(())
    }
    fn visit_block(&mut self, node: &mut BlockNode) -> Pl0Result<()>;
    fn visit_assignment(&mut self, node: &mut AssignmentNode) -> Pl0Result<()>;
    fn visit_read(&mut self, node: &mut ReadNode) -> Pl0Result<()>;
    fn visit_write(&mut self, node: &mut WriteNode) -> Pl0Result<()>;
    fn visit_call(&mut self, node: &mut CallNode) -> Pl0Result<()>;
    fn visit_statement_list(&mut self, node: &mut ListNode) -> Pl0Result<()>;
    fn visit_if(&mut self, node: &mut IfNode) -> Pl0Result<()>;
    fn visit_while(&mut self, node: &mut WhileNode) -> Pl0Result<()>;
    fn visit_skip(&mut self, node: &mut SkipNode) -> Pl0Result<()>;
    fn visit_do(&mut self, node: &mut DoNode) -> Pl0Result<()>;
    fn visit_do_branch(&mut self, node: &mut DoBranchNode) -> Pl0Result<()>;
}
