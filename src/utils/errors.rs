use thiserror::Error;

#[derive(Debug, Error)]
pub enum Pl0Error {
    // Tree construction and rewriting contract violations
    #[error("Arity mismatch at line {line}: {targets} target(s) but {values} value(s)")]
    ArityMismatch {
        targets: usize,
        values: usize,
        line: usize,
    },
    #[error("Slot {index} out of range at line {line}: assignment has {len} pair(s)")]
    SlotOutOfRange {
        index: usize,
        len: usize,
        line: usize,
    },

    // Semantic analysis errors
    #[error("Undefined symbol '{name}' at line {line}")]
    UndefinedSymbol {
        name: String,
        line: usize,
    },
    #[error("Type mismatch at line {line}: expected {expected} but found {found} for '{name}'")]
    TypeMismatch {
        expected: String,
        found: String,
        name: String,
        line: usize,
    },
    #[error("Symbol '{name}' already defined at line {line}")]
    SymbolAlreadyDefined {
        name: String,
        line: usize,
    },
    #[error("Invalid identifier '{identifier}' at line {line}")]
    InvalidIdentifier {
        identifier: String,
        line: usize,
    },
    #[error("Unknown scope #{0}")]
    UnknownScope(usize),
    #[error("Unknown procedure entry #{0}")]
    UnknownProcedure(usize),

    // Compilation pipeline errors
    #[error("Compilation error in {stage}: {message}")]
    CompilationError {
        stage: String,
        message: String,
    },
}

impl Pl0Error {
    /// Create a compilation error for a specific stage
    pub fn compilation_error(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Pl0Error::CompilationError {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Source line the error refers to, if it carries one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Pl0Error::ArityMismatch { line, .. }
            | Pl0Error::SlotOutOfRange { line, .. }
            | Pl0Error::UndefinedSymbol { line, .. }
            | Pl0Error::TypeMismatch { line, .. }
            | Pl0Error::SymbolAlreadyDefined { line, .. }
            | Pl0Error::InvalidIdentifier { line, .. } => Some(*line),
            Pl0Error::UnknownScope(_)
            | Pl0Error::UnknownProcedure(_)
            | Pl0Error::CompilationError { .. } => None,
        }
    }
}

// Type alias for Result with Pl0Error
pub type Pl0Result<T> = Result<T, Pl0Error>;
