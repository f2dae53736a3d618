use std::collections::HashMap;
use std::fmt;
use crate::utils::config::symbols::is_valid_identifier;
use crate::utils::errors::{Pl0Error, Pl0Result};

/// Handle to a scope owned by a [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope#{}", self.0)
    }
}

/// Handle to a procedure entry owned by a [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcedureId(usize);

impl ProcedureId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ProcedureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "proc#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SymbolType {
    Constant(i64),
    Variable,
    Procedure(ProcedureId),
}

impl SymbolType {
    pub fn kind_name(&self) -> &'static str {
        match self {
            SymbolType::Constant(_) => "Constant",
            SymbolType::Variable => "Variable",
            SymbolType::Procedure(_) => "Procedure",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub symbol_type: SymbolType,
    pub line_number: usize,
    pub level: usize,
}

impl Symbol {
    pub fn new(symbol_type: SymbolType, line_number: usize, level: usize) -> Self {
        Self {
            symbol_type,
            line_number,
            level,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProcedureEntry {
    pub name: String,
    pub line_number: usize,
    /// Scope the procedure name is declared in.
    pub defining_scope: ScopeId,
    /// Scope holding the procedure's own locals.
    pub local_scope: ScopeId,
}

#[derive(Debug)]
struct Scope {
    parent: Option<ScopeId>,
    level: usize,
    symbols: HashMap<String, Symbol>,
}

/// Arena of lexical scopes and procedure entries.
///
/// Statement trees refer into it through [`ScopeId`] and [`ProcedureId`]
/// and never own any of its contents.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    procedures: Vec<ProcedureEntry>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope {
                parent: None,
                level: 0,
                symbols: HashMap::new(),
            }],
            procedures: Vec::new(),
        }
    }

    /// The program-level scope.
    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn push_scope(&mut self, parent: ScopeId) -> Pl0Result<ScopeId> {
        let level = self.scope(parent)?.level + 1;
        self.scopes.push(Scope {
            parent: Some(parent),
            level,
            symbols: HashMap::new(),
        });
        Ok(ScopeId(self.scopes.len() - 1))
    }

    pub fn parent(&self, scope: ScopeId) -> Pl0Result<Option<ScopeId>> {
        Ok(self.scope(scope)?.parent)
    }

    pub fn level(&self, scope: ScopeId) -> Pl0Result<usize> {
        Ok(self.scope(scope)?.level)
    }

    pub fn insert(&mut self, scope: ScopeId, name: &str, symbol: Symbol) -> Pl0Result<()> {
        if !is_valid_identifier(name) {
            return Err(Pl0Error::InvalidIdentifier {
                identifier: name.to_string(),
                line: symbol.line_number,
            });
        }
        let target = self
            .scopes
            .get_mut(scope.0)
            .ok_or(Pl0Error::UnknownScope(scope.0))?;
        if target.symbols.contains_key(name) {
            return Err(Pl0Error::SymbolAlreadyDefined {
                name: name.to_string(),
                line: symbol.line_number,
            });
        }
        target.symbols.insert(name.to_string(), symbol);
        Ok(())
    }

    pub fn define_constant(&mut self, scope: ScopeId, name: &str, value: i64, line: usize) -> Pl0Result<()> {
        let level = self.level(scope)?;
        self.insert(scope, name, Symbol::new(SymbolType::Constant(value), line, level))
    }

    pub fn define_variable(&mut self, scope: ScopeId, name: &str, line: usize) -> Pl0Result<()> {
        let level = self.level(scope)?;
        self.insert(scope, name, Symbol::new(SymbolType::Variable, line, level))
    }

    /// Declares a procedure in `scope` and opens the nested scope for its body.
    pub fn define_procedure(&mut self, scope: ScopeId, name: &str, line: usize) -> Pl0Result<ProcedureId> {
        let level = self.level(scope)?;
        let id = ProcedureId(self.procedures.len());
        self.insert(scope, name, Symbol::new(SymbolType::Procedure(id), line, level))?;
        let local_scope = self.push_scope(scope)?;
        self.procedures.push(ProcedureEntry {
            name: name.to_string(),
            line_number: line,
            defining_scope: scope,
            local_scope,
        });
        Ok(id)
    }

    pub fn procedure(&self, id: ProcedureId) -> Pl0Result<&ProcedureEntry> {
        self.procedures
            .get(id.0)
            .ok_or(Pl0Error::UnknownProcedure(id.0))
    }

    // Look a name up from `scope` outwards, innermost first.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Pl0Result<Option<&Symbol>> {
        Ok(self.lookup_with_distance(scope, name)?.map(|(symbol, _)| symbol))
    }

    /// Like [`SymbolTable::lookup`], also returning how many static levels
    /// out from `scope` the symbol was found.
    pub fn lookup_with_distance(&self, scope: ScopeId, name: &str) -> Pl0Result<Option<(&Symbol, usize)>> {
        let current_level = self.level(scope)?;
        Ok(self
            .lookup_scoped(scope, name)?
            .map(|(found_in, symbol)| (symbol, current_level.saturating_sub(self.scopes[found_in.0].level))))
    }

    /// Like [`SymbolTable::lookup`], also returning the scope that declares the symbol.
    pub fn lookup_scoped(&self, scope: ScopeId, name: &str) -> Pl0Result<Option<(ScopeId, &Symbol)>> {
        let mut cursor = Some(scope);
        while let Some(id) = cursor {
            let frame = self.scope(id)?;
            if let Some(symbol) = frame.symbols.get(name) {
                return Ok(Some((id, symbol)));
            }
            cursor = frame.parent;
        }
        Ok(None)
    }

    // Type check a symbol by name and expected kind. Returns the symbol if it matches.
    pub fn type_check(&self, scope: ScopeId, name: &str, expected: &str, line_number: usize) -> Pl0Result<&Symbol> {
        let symbol = self
            .lookup(scope, name)?
            .ok_or_else(|| Pl0Error::UndefinedSymbol {
                name: name.to_string(),
                line: line_number,
            })?;
        if symbol.symbol_type.kind_name() != expected {
            return Err(Pl0Error::TypeMismatch {
                expected: expected.to_string(),
                found: symbol.symbol_type.kind_name().to_string(),
                name: name.to_string(),
                line: line_number,
            });
        }
        Ok(symbol)
    }

    pub fn contains(&self, scope: ScopeId, name: &str) -> bool {
        matches!(self.lookup(scope, name), Ok(Some(_)))
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn procedure_count(&self) -> usize {
        self.procedures.len()
    }

    fn scope(&self, id: ScopeId) -> Pl0Result<&Scope> {
        self.scopes.get(id.0).ok_or(Pl0Error::UnknownScope(id.0))
    }
}
