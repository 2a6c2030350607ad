//! Parameter lists of function headers and arity bookkeeping.

use tracing::{debug, trace};

use crate::errors::{self, Result};
use crate::symbol::{Payload, PARAM_DEPTH};
use crate::symbol_id::{SymbolId, SymbolKind};
use crate::SymbolTable;

/// Parameters linked so far for one function header.
///
/// The list is threaded through the parameters themselves
/// ([`Payload::NextParam`]); this value only names the most recently
/// linked one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParamList {
    head: Option<SymbolId>,
    len: usize,
}

impl ParamList {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Most recently linked parameter.
    pub fn head(&self) -> Option<SymbolId> {
        self.head
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl SymbolTable {
    /// Add `id` as the next parameter of the header being parsed. A name
    /// bound outside the header gets a fresh binding; a name that is
    /// already a parameter of this header is reported and `list` is
    /// returned unchanged.
    pub fn link_parameter(&mut self, id: SymbolId, list: ParamList) -> Result<ParamList> {
        let sym = self.entry(id)?;
        let (name, kind) = (sym.name.clone(), sym.kind);

        let id = match kind {
            SymbolKind::Parameter => {
                self.report(errors::duplicate_parameter(&name, self.line));
                return Ok(list);
            }
            SymbolKind::Function | SymbolKind::ForwardFunction | SymbolKind::Variable => {
                self.chain.create(&name)?
            }
            SymbolKind::Undeclared => {
                self.chain.adopt(id)?;
                id
            }
        };

        let sym = self.entry_mut(id)?;
        sym.kind = SymbolKind::Parameter;
        sym.block_depth = PARAM_DEPTH;
        sym.payload = Payload::NextParam(list.head);
        trace!(name = %sym.name, position = list.len, "parameter");
        Ok(ParamList {
            head: Some(id),
            len: list.len + 1,
        })
    }

    /// The parameters of `list` in declaration order.
    pub fn parameters(&self, list: ParamList) -> Result<Vec<SymbolId>> {
        let mut ids = Vec::with_capacity(list.len);
        let mut cursor = list.head;
        while let Some(id) = cursor {
            ids.push(id);
            cursor = self.entry(id)?.next_param();
        }
        ids.reverse();
        Ok(ids)
    }

    /// Close a header: parameters without a type declaration become plain
    /// variables. Returns the parameter count.
    pub fn finish_parameters(&mut self, list: ParamList) -> Result<usize> {
        let ids = self.parameters(list)?;
        for &id in &ids {
            let sym = self.entry_mut(id)?;
            if sym.kind == SymbolKind::Parameter {
                sym.kind = SymbolKind::Variable;
            }
        }
        Ok(ids.len())
    }

    /// Number the parameters of `list` 0, 1, 2, ... in declaration order,
    /// one slot each whatever their declared size.
    pub fn allocate_parameters(&mut self, list: ParamList) -> Result<()> {
        self.layout.reset_parameters();
        for id in self.parameters(list)? {
            match self.layout.place_parameter() {
                Ok(offset) => self.entry_mut(id)?.offset = offset,
                Err(full) => {
                    let name = self.entry(id)?.name.clone();
                    self.report(errors::region_overflow(&name, full, self.line));
                }
            }
        }
        let words = self.layout.parameter_count();
        debug!(words, "parameter region has {words} word(s)");
        Ok(())
    }

    /// Record that `func` was defined or called with `count` arguments.
    ///
    /// The first observation fixes the arity; a later disagreement is only
    /// a warning, calls with a different count still compile.
    pub fn check_arity(&mut self, func: SymbolId, count: usize) -> Result<()> {
        let line = self.line;
        let sym = self.entry_mut(func)?;
        let payload = sym.payload;
        let mismatch = match payload {
            Payload::Arity(None) => {
                sym.payload = Payload::Arity(Some(count));
                None
            }
            Payload::Arity(Some(expected)) if expected != count => {
                Some(errors::arity_mismatch(&sym.name, expected, line))
            }
            Payload::Arity(Some(_)) | Payload::NextParam(_) => None,
        };
        if let Some(diag) = mismatch {
            self.report(diag);
        }
        Ok(())
    }
}
