use crate::ast::{BlockNode, Location, Node};
use crate::semantic::symboltable::ProcedureId;
use crate::utils::config::render::new_line;

/// A procedure declared inside a block, together with its own body.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureDecl {
    location: Location,
    name: String,
    entry: ProcedureId,
    block: BlockNode,
}

impl ProcedureDecl {
    pub fn new(location: Location, name: impl Into<String>, entry: ProcedureId, block: BlockNode) -> Self {
        Self {
            location,
            name: name.into(),
            entry,
            block,
        }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry(&self) -> ProcedureId {
        self.entry
    }

    pub fn block(&self) -> &BlockNode {
        &self.block
    }

    pub fn render(&self, level: usize) -> String {
        format!(
            "{}PROCEDURE {} ={}",
            new_line(level),
            self.name,
            self.block.render(level + 1)
        )
    }
}

/// Procedures declared in one block, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclList {
    procedures: Vec<ProcedureDecl>,
}

impl DeclList {
    pub fn new(procedures: Vec<ProcedureDecl>) -> Self {
        Self { procedures }
    }

    pub fn procedures(&self) -> &[ProcedureDecl] {
        &self.procedures
    }

    pub fn blocks_mut(&mut self) -> impl Iterator<Item = &mut dyn Node> + '_ {
        self.procedures.iter_mut().map(|p| &mut p.block as &mut dyn Node)
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }

    pub fn render(&self, level: usize) -> String {
        self.procedures.iter().map(|p| p.render(level)).collect()
    }
}
