use std::fmt;
use crate::ast::Location;
use crate::semantic::symboltable::ScopeId;
use crate::utils::config::keywords::ERROR_EXPRESSION;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl BinaryOperator {
    /// Evaluate on constants. Relations yield 1 or 0; `None` on division by zero or overflow.
    pub fn apply(self, left: i64, right: i64) -> Option<i64> {
        match self {
            BinaryOperator::Add => left.checked_add(right),
            BinaryOperator::Sub => left.checked_sub(right),
            BinaryOperator::Mul => left.checked_mul(right),
            BinaryOperator::Div => left.checked_div(right),
            BinaryOperator::Equal => Some((left == right) as i64),
            BinaryOperator::NotEqual => Some((left != right) as i64),
            BinaryOperator::Less => Some((left < right) as i64),
            BinaryOperator::LessEqual => Some((left <= right) as i64),
            BinaryOperator::Greater => Some((left > right) as i64),
            BinaryOperator::GreaterEqual => Some((left >= right) as i64),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Equal => "=",
            BinaryOperator::NotEqual => "#",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Neg,
    Odd,
}

impl UnaryOperator {
    pub fn apply(self, operand: i64) -> Option<i64> {
        match self {
            UnaryOperator::Neg => operand.checked_neg(),
            UnaryOperator::Odd => Some((operand % 2 != 0) as i64),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpKind {
    Error,
    Const(i64),
    /// A name the resolver has not looked at yet.
    Identifier(String),
    /// A name bound to a variable in `scope`.
    Variable { name: String, scope: ScopeId },
    Unary { op: UnaryOperator, operand: Box<ExpNode> },
    Binary { op: BinaryOperator, left: Box<ExpNode>, right: Box<ExpNode> },
    Narrow(Box<ExpNode>),
    Widen(Box<ExpNode>),
}

/// Expression operand carried by statement nodes.
///
/// The statement tree only stores, replaces and renders these.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpNode {
    location: Location,
    kind: ExpKind,
}

impl ExpNode {
    pub fn new(location: Location, kind: ExpKind) -> Self {
        Self { location, kind }
    }

    pub fn error(location: Location) -> Self {
        Self::new(location, ExpKind::Error)
    }

    pub fn constant(location: Location, value: i64) -> Self {
        Self::new(location, ExpKind::Const(value))
    }

    pub fn identifier(location: Location, name: impl Into<String>) -> Self {
        Self::new(location, ExpKind::Identifier(name.into()))
    }

    pub fn variable(location: Location, name: impl Into<String>, scope: ScopeId) -> Self {
        Self::new(location, ExpKind::Variable { name: name.into(), scope })
    }

    pub fn unary(location: Location, op: UnaryOperator, operand: ExpNode) -> Self {
        Self::new(location, ExpKind::Unary { op, operand: Box::new(operand) })
    }

    pub fn binary(location: Location, op: BinaryOperator, left: ExpNode, right: ExpNode) -> Self {
        Self::new(
            location,
            ExpKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
        )
    }

    pub fn narrow(inner: ExpNode) -> Self {
        Self::new(inner.location, ExpKind::Narrow(Box::new(inner)))
    }

    pub fn widen(inner: ExpNode) -> Self {
        Self::new(inner.location, ExpKind::Widen(Box::new(inner)))
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn kind(&self) -> &ExpKind {
        &self.kind
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, ExpKind::Error)
    }

    pub fn is_lvalue(&self) -> bool {
        matches!(self.kind, ExpKind::Identifier(_) | ExpKind::Variable { .. })
    }

    pub fn as_constant(&self) -> Option<i64> {
        match self.kind {
            ExpKind::Const(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for ExpNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExpKind::Error => write!(f, "{}", ERROR_EXPRESSION),
            ExpKind::Const(value) => write!(f, "{}", value),
            ExpKind::Identifier(name) => write!(f, "{}", name),
            ExpKind::Variable { name, .. } => write!(f, "{}", name),
            ExpKind::Unary { op: UnaryOperator::Neg, operand } => write!(f, "-{}", operand),
            ExpKind::Unary { op: UnaryOperator::Odd, operand } => write!(f, "odd {}", operand),
            ExpKind::Binary { op, left, right } => write!(f, "({} {} {})", left, op.symbol(), right),
            ExpKind::Narrow(inner) => write!(f, "narrow({})", inner),
            ExpKind::Widen(inner) => write!(f, "widen({})", inner),
        }
    }
}
