use crate::ast::{
    AssignmentNode, BlockNode, CallNode, DoBranchNode, DoNode, ExpKind, ExpNode, IfNode, ListNode,
    Node, ReadNode, SkipNode, WhileNode, WriteNode,
};
use crate::semantic::visiters::StatementVisitorMut;
use crate::utils::errors::Pl0Result;

/// Replaces constant sub-expressions by their value.
///
/// Only replaceable slots are touched, and assignment values are rewritten
/// one index at a time. Targets are left alone.
#[derive(Debug, Default)]
pub struct ConstantFolder {
    rewrites: usize,
}

impl ConstantFolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots rewritten so far.
    pub fn rewrites(&self) -> usize {
        self.rewrites
    }

    fn fold_slot(&mut self, exp: &ExpNode) -> Option<ExpNode> {
        let folded = fold(exp)?;
        self.rewrites += 1;
        Some(folded)
    }
}

/// Folded copy of `exp`, or `None` if nothing in it folds.
pub fn fold(exp: &ExpNode) -> Option<ExpNode> {
    let location = exp.location();
    match exp.kind() {
        ExpKind::Unary { op, operand } => {
            let new_operand = fold(operand);
            let current = new_operand.as_ref().unwrap_or(&**operand);
            match current.as_constant().and_then(|value| op.apply(value)) {
                Some(value) => Some(ExpNode::constant(location, value)),
                None => new_operand.map(|operand| ExpNode::unary(location, *op, operand)),
            }
        }
        ExpKind::Binary { op, left, right } => {
            let new_left = fold(left);
            let new_right = fold(right);
            let l = new_left.as_ref().unwrap_or(&**left);
            let r = new_right.as_ref().unwrap_or(&**right);
            if let (Some(a), Some(b)) = (l.as_constant(), r.as_constant()) {
                if let Some(value) = op.apply(a, b) {
                    return Some(ExpNode::constant(location, value));
                }
            }
            if new_left.is_none() && new_right.is_none() {
                return None;
            }
            let (l, r) = (l.clone(), r.clone());
            Some(ExpNode::binary(location, *op, l, r))
        }
        ExpKind::Narrow(inner) => fold(inner).map(ExpNode::narrow),
        ExpKind::Widen(inner) => fold(inner).map(ExpNode::widen),
        ExpKind::Error | ExpKind::Const(_) | ExpKind::Identifier(_) | ExpKind::Variable { .. } => None,
    }
}

impl StatementVisitorMut for ConstantFolder {
    fn visit_block(&mut self, node: &mut BlockNode) -> Pl0Result<()> {
        for block in node.procedure_blocks_mut() {
            block.accept_mut(self)?;
        }
        node.body_mut().accept_mut(self)
    }

    fn visit_assignment(&mut self, node: &mut AssignmentNode) -> Pl0Result<()> {
        for index in 0..node.len() {
            let folded = match node.value(index) {
                Some(value) => self.fold_slot(value),
                None => None,
            };
            if let Some(value) = folded {
                node.set_value(index, value)?;
            }
        }
        Ok(())
    }

    fn visit_read(&mut self, _node: &mut ReadNode) -> Pl0Result<()> {
        Ok(())
    }

    fn visit_write(&mut self, node: &mut WriteNode) -> Pl0Result<()> {
        if let Some(value) = self.fold_slot(node.value()) {
            node.set_value(value);
        }
        Ok(())
    }

    fn visit_call(&mut self, _node: &mut CallNode) -> Pl0Result<()> {
        Ok(())
    }

    fn visit_statement_list(&mut self, node: &mut ListNode) -> Pl0Result<()> {
        for statement in node.statements_mut() {
            statement.accept_mut(self)?;
        }
        Ok(())
    }

    fn visit_if(&mut self, node: &mut IfNode) -> Pl0Result<()> {
        if let Some(condition) = self.fold_slot(node.condition()) {
            node.set_condition(condition);
        }
        node.then_branch_mut().accept_mut(self)?;
        node.else_branch_mut().accept_mut(self)
    }

    fn visit_while(&mut self, node: &mut WhileNode) -> Pl0Result<()> {
        if let Some(condition) = self.fold_slot(node.condition()) {
            node.set_condition(condition);
        }
        node.body_mut().accept_mut(self)
    }

    fn visit_skip(&mut self, _node: &mut SkipNode) -> Pl0Result<()> {
        Ok(())
    }

    fn visit_do(&mut self, node: &mut DoNode) -> Pl0Result<()> {
        for branch in node.branches_mut() {
            branch.accept_mut(self)?;
        }
        Ok(())
    }

    fn visit_do_branch(&mut self, node: &mut DoBranchNode) -> Pl0Result<()> {
        if let Some(condition) = self.fold_slot(node.condition()) {
            node.set_condition(condition);
        }
        node.body_mut().accept_mut(self)
    }
}
