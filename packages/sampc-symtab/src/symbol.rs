use crate::symbol_id::{SymbolId, SymbolKind};

/// Block depth of the top-level (global) region.
pub const GLOBAL_DEPTH: u32 = 1;
/// Block depth of a function header's parameter region.
pub const PARAM_DEPTH: u32 = 2;
/// Block depth of a function body's outermost block.
pub const BODY_DEPTH: u32 = 3;

/// Role-dependent extra data of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// Expected argument count of a function; `None` until first observed.
    Arity(Option<usize>),
    /// Previously linked parameter of the same header (the list is built
    /// by prepending, so this points towards the first parameter).
    NextParam(Option<SymbolId>),
}

/// A single entry in the symbol table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub kind: SymbolKind,
    /// 0 for fresh or global-anchored entries, then 1 (global), 2
    /// (parameters), 3 and deeper (blocks inside a function).
    pub block_depth: u32,
    /// Offset inside the region selected by `block_depth`.
    pub offset: u32,
    /// 0 for a scalar, N for an array of N elements.
    pub size: u32,
    /// Pointer levels: 0 for `int x`, 2 for `int **x`.
    pub ref_level: u32,
    pub is_void: bool,
    pub payload: Payload,
}

impl Symbol {
    pub(crate) fn undeclared(id: SymbolId, name: String) -> Self {
        Self {
            id,
            name,
            kind: SymbolKind::Undeclared,
            block_depth: 0,
            offset: 0,
            size: 0,
            ref_level: 0,
            is_void: false,
            payload: Payload::Arity(None),
        }
    }

    /// Number of storage slots the symbol occupies in its region.
    pub fn slots(&self) -> u32 {
        self.size.max(1)
    }

    pub fn arity(&self) -> Option<usize> {
        match self.payload {
            Payload::Arity(arity) => arity,
            Payload::NextParam(_) => None,
        }
    }

    pub fn next_param(&self) -> Option<SymbolId> {
        match self.payload {
            Payload::NextParam(next) => next,
            Payload::Arity(_) => None,
        }
    }

    /// Forget an observed arity. Parameter links are left alone.
    pub(crate) fn reset_arity(&mut self) {
        if let Payload::Arity(_) = self.payload {
            self.payload = Payload::Arity(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_for_scalars_and_arrays() {
        let mut sym = Symbol::undeclared(SymbolId(0), "a".into());
        assert_eq!(sym.slots(), 1);
        sym.size = 5;
        assert_eq!(sym.slots(), 5);
    }

    #[test]
    fn test_reset_arity_keeps_parameter_link() {
        let mut sym = Symbol::undeclared(SymbolId(1), "p".into());
        sym.payload = Payload::NextParam(Some(SymbolId(0)));
        sym.reset_arity();
        assert_eq!(sym.next_param(), Some(SymbolId(0)));

        sym.payload = Payload::Arity(Some(2));
        sym.reset_arity();
        assert_eq!(sym.arity(), None);
        assert_eq!(sym.payload, Payload::Arity(None));
    }
}
