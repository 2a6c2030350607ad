use std::fmt;

/// Stable index of a symbol record in the binding chain's arena.
///
/// Ids are never reused, so an id that outlives its scope pop stays
/// detectably dead instead of aliasing a newer binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The role an identifier currently plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Seen by the lexer, not yet declared.
    Undeclared,
    /// Function with a body.
    Function,
    /// Function called before its body was seen.
    ForwardFunction,
    Variable,
    /// Linked into a function header that is still being parsed.
    Parameter,
}

impl SymbolKind {
    /// Short name used in trace output.
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Undeclared => "udecl",
            SymbolKind::Function => "fct",
            SymbolKind::ForwardFunction => "udef fct",
            SymbolKind::Variable => "var",
            SymbolKind::Parameter => "parm",
        }
    }

    pub fn is_function(self) -> bool {
        matches!(self, SymbolKind::Function | SymbolKind::ForwardFunction)
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
