use crate::ast::{
    AssignmentNode, BlockNode, CallNode, DoBranchNode, DoNode, ExpKind, ExpNode, IfNode, ListNode,
    Node, ReadNode, SkipNode, WhileNode, WriteNode,
};
use crate::semantic::symboltable::{ScopeId, SymbolTable, SymbolType};
use crate::semantic::visiters::StatementVisitorMut;
use crate::utils::errors::{Pl0Error, Pl0Result};

/// Binds names against the symbol table.
///
/// Calls get their procedure entry. Identifiers become variables, or the
/// constant's value. A name that does not resolve is recorded as a
/// diagnostic and its slot becomes an error expression, so one bad name
/// does not stop the rest of the tree from being resolved.
pub struct NameResolver<'a> {
    table: &'a SymbolTable,
    scopes: Vec<ScopeId>,
    diagnostics: Vec<Pl0Error>,
    resolved_calls: usize,
}

impl<'a> NameResolver<'a> {
    pub fn new(table: &'a SymbolTable) -> Self {
        Self {
            table,
            scopes: Vec::new(),
            diagnostics: Vec::new(),
            resolved_calls: 0,
        }
    }

    pub fn diagnostics(&self) -> &[Pl0Error] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Pl0Error> {
        self.diagnostics
    }

    pub fn resolved_calls(&self) -> usize {
        self.resolved_calls
    }

    fn current_scope(&self) -> ScopeId {
        self.scopes.last().copied().unwrap_or_else(|| self.table.root())
    }

    fn report(&mut self, error: Pl0Error) {
        self.diagnostics.push(error);
    }

    // Procedures first, then the body. The caller owns the scope push and pop.
    fn resolve_block(&mut self, node: &mut BlockNode) -> Pl0Result<()> {
        for block in node.procedure_blocks_mut() {
            block.accept_mut(self)?;
        }
        node.body_mut().accept_mut(self)
    }

    /// Resolve every name in `exp`. `None` when nothing changed.
    fn resolve_exp(&mut self, exp: &ExpNode, lvalue: bool) -> Pl0Result<Option<ExpNode>> {
        let location = exp.location();
        let line = location.line;
        match exp.kind() {
            ExpKind::Identifier(name) => {
                let table = self.table;
                let replacement = match table.lookup_scoped(self.current_scope(), name)? {
                    None => {
                        self.report(Pl0Error::UndefinedSymbol { name: name.clone(), line });
                        ExpNode::error(location)
                    }
                    Some((declared_in, symbol)) => match symbol.symbol_type {
                        SymbolType::Variable => ExpNode::variable(location, name.clone(), declared_in),
                        SymbolType::Constant(value) if !lvalue => ExpNode::constant(location, value),
                        ref other => {
                            let found = other.kind_name().to_string();
                            self.report(Pl0Error::TypeMismatch {
                                expected: if lvalue { "Variable" } else { "Variable or Constant" }.to_string(),
                                found,
                                name: name.clone(),
                                line,
                            });
                            ExpNode::error(location)
                        }
                    },
                };
                Ok(Some(replacement))
            }
            ExpKind::Unary { op, operand } => Ok(self
                .resolve_exp(operand, false)?
                .map(|operand| ExpNode::unary(location, *op, operand))),
            ExpKind::Binary { op, left, right } => {
                let new_left = self.resolve_exp(left, false)?;
                let new_right = self.resolve_exp(right, false)?;
                if new_left.is_none() && new_right.is_none() {
                    return Ok(None);
                }
                Ok(Some(ExpNode::binary(
                    location,
                    *op,
                    new_left.unwrap_or_else(|| (**left).clone()),
                    new_right.unwrap_or_else(|| (**right).clone()),
                )))
            }
            ExpKind::Narrow(inner) => Ok(self.resolve_exp(inner, lvalue)?.map(ExpNode::narrow)),
            ExpKind::Widen(inner) => Ok(self.resolve_exp(inner, lvalue)?.map(ExpNode::widen)),
            ExpKind::Error | ExpKind::Const(_) | ExpKind::Variable { .. } => Ok(None),
        }
    }
}

impl StatementVisitorMut for NameResolver<'_> {
    fn visit_block(&mut self, node: &mut BlockNode) -> Pl0Result<()> {
        self.scopes.push(node.scope());
        let result = self.resolve_block(node);
        self.scopes.pop();
        result
    }

    fn visit_assignment(&mut self, node: &mut AssignmentNode) -> Pl0Result<()> {
        for index in 0..node.len() {
            let (target, value) = match node.pair(index) {
                Some((target, value)) => (target.clone(), value.clone()),
                None => break,
            };
            if let Some(target) = self.resolve_exp(&target, true)? {
                node.set_target(index, target)?;
            }
            if let Some(value) = self.resolve_exp(&value, false)? {
                node.set_value(index, value)?;
            }
        }
        Ok(())
    }

    fn visit_read(&mut self, node: &mut ReadNode) -> Pl0Result<()> {
        if let Some(target) = self.resolve_exp(node.target(), true)? {
            node.set_target(target);
        }
        Ok(())
    }

    fn visit_write(&mut self, node: &mut WriteNode) -> Pl0Result<()> {
        if let Some(value) = self.resolve_exp(node.value(), false)? {
            node.set_value(value);
        }
        Ok(())
    }

    fn visit_call(&mut self, node: &mut CallNode) -> Pl0Result<()> {
        let line = node.location().line;
        let table = self.table;
        match table.type_check(self.current_scope(), node.name(), "Procedure", line) {
            Ok(symbol) => {
                if let SymbolType::Procedure(entry) = symbol.symbol_type {
                    node.set_entry(entry);
                    self.resolved_calls += 1;
                }
            }
            Err(error @ (Pl0Error::UndefinedSymbol { .. } | Pl0Error::TypeMismatch { .. })) => {
                self.report(error)
            }
            Err(error) => return Err(error),
        }
        Ok(())
    }

    fn visit_statement_list(&mut self, node: &mut ListNode) -> Pl0Result<()> {
        for statement in node.statements_mut() {
            statement.accept_mut(self)?;
        }
        Ok(())
    }

    fn visit_if(&mut self, node: &mut IfNode) -> Pl0Result<()> {
        if let Some(condition) = self.resolve_exp(node.condition(), false)? {
            node.set_condition(condition);
        }
        node.then_branch_mut().accept_mut(self)?;
        node.else_branch_mut().accept_mut(self)
    }

    fn visit_while(&mut self, node: &mut WhileNode) -> Pl0Result<()> {
        if let Some(condition) = self.resolve_exp(node.condition(), false)? {
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
        if let Some(condition) = self.resolve_exp(node.condition(), false)? {
            node.set_condition(condition);
        }
        node.body_mut().accept_mut(self)
    }
}

/// Resolve a whole program, returning the name errors found.
pub fn resolve_names(program: &mut BlockNode, table: &SymbolTable) -> Pl0Result<Vec<Pl0Error>> {
    let mut resolver = NameResolver::new(table);
    program.accept_mut(&mut resolver)?;
    Ok(resolver.into_diagnostics())
}
