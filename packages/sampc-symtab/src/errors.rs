use sampc_diagnostics::Diagnostic;
use sampc_syntax::TokenKind;
use thiserror::Error;

use crate::layout::RegionFull;
use crate::symbol_id::SymbolId;

// Error codes for declarations (E0200–E0299).

pub const E0200: &str = "E0200";
pub const E0201: &str = "E0201";
pub const E0202: &str = "E0202";
pub const E0203: &str = "E0203";
pub const E0204: &str = "E0204";
pub const E0205: &str = "E0205";
pub const E0206: &str = "E0206";
pub const E0207: &str = "E0207";
pub const E0208: &str = "E0208";
pub const E0209: &str = "E0209";
pub const E0210: &str = "E0210";
pub const W0200: &str = "W0200";
pub const W0201: &str = "W0201";

/// Internal invariant violation. The symbol table cannot be trusted after
/// one of these, so callers propagate it and abort the compilation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Bug {
    #[error("symbol {0} was released or never existed")]
    DeadSymbol(SymbolId),

    #[error("'{name}' is not owned by any open scope")]
    Unowned { name: String },

    #[error("no open scope")]
    NoOpenScope,

    #[error("variable '{name}' placed before it was declared")]
    UnplacedVariable { name: String },

    #[error("lookup called for {0:?} token")]
    UnexpectedToken(TokenKind),
}

pub type Result<T> = std::result::Result<T, Bug>;

pub fn duplicate_name(name: &str, line: u32) -> Diagnostic {
    Diagnostic::error(E0200, "duplicate_name", &format!("duplicate name {name}"), line)
}

pub fn undeclared_variable(name: &str, line: u32) -> Diagnostic {
    Diagnostic::error(
        E0201,
        "undeclared_variable",
        &format!("undeclared variable {name}"),
        line,
    )
}

pub fn unexpected_parameter(name: &str, line: u32) -> Diagnostic {
    Diagnostic::error(
        E0202,
        "unexpected_parameter",
        &format!("unexpected parameter {name}"),
        line,
    )
}

pub fn function_used_as_variable(name: &str, line: u32) -> Diagnostic {
    Diagnostic::error(
        E0203,
        "function_used_as_variable",
        &format!("function {name} used as variable"),
        line,
    )
}

pub fn variable_used_as_function(name: &str, line: u32) -> Diagnostic {
    Diagnostic::error(
        E0204,
        "variable_used_as_function",
        &format!("variable {name} used as function"),
        line,
    )
}

pub fn parameter_declared_twice(name: &str, line: u32) -> Diagnostic {
    Diagnostic::error(
        E0205,
        "parameter_declared_twice",
        &format!("parameter {name} declared twice"),
        line,
    )
}

pub fn not_a_parameter(name: &str, line: u32) -> Diagnostic {
    Diagnostic::error(E0206, "not_a_parameter", &format!("{name} is not a parameter"), line)
}

pub fn duplicate_parameter(name: &str, line: u32) -> Diagnostic {
    Diagnostic::error(
        E0207,
        "duplicate_parameter",
        &format!("duplicate parameter {name}"),
        line,
    )
}

pub fn function_same_as_global(name: &str, line: u32) -> Diagnostic {
    Diagnostic::error(
        E0208,
        "function_same_as_global",
        &format!("function name {name} same as global variable"),
        line,
    )
}

pub fn duplicate_function(name: &str, line: u32) -> Diagnostic {
    Diagnostic::error(
        E0209,
        "duplicate_function",
        &format!("duplicate function definition {name}"),
        line,
    )
}

pub fn region_overflow(name: &str, full: RegionFull, line: u32) -> Diagnostic {
    Diagnostic::error(
        E0210,
        "region_overflow",
        &format!("storage for {name} overflows the {} region", full.region),
        line,
    )
}

pub fn arity_mismatch(name: &str, expected: usize, line: u32) -> Diagnostic {
    Diagnostic::warning(
        W0200,
        "arity_mismatch",
        &format!("function {name} should have {expected} argument(s)"),
        line,
    )
}

pub fn undefined_function(name: &str, line: u32) -> Diagnostic {
    Diagnostic::warning(
        W0201,
        "undefined_function",
        &format!("undefined function {name}"),
        line,
    )
}
