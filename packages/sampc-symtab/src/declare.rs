//! Kind transitions requested by the grammar.
//!
//! Each transition checks the symbol's current kind against the requested
//! role. A mismatch is reported as a diagnostic and the transition still
//! hands back a usable symbol, so parsing can go on and find later errors.

use tracing::{error, trace};

use crate::errors::{self, Bug, Result};
use crate::layout::Region;
use crate::symbol::{BODY_DEPTH, GLOBAL_DEPTH, PARAM_DEPTH};
use crate::symbol_id::{SymbolId, SymbolKind};
use crate::SymbolTable;

impl SymbolTable {
    /// Declare `id` as a variable of the current block and give it storage.
    ///
    /// `size` is 0 for a scalar or the element count of an array. A name
    /// that is already bound gets a fresh binding; if the old binding
    /// belongs to the same block (or is a parameter and this is the
    /// function's outermost block) that is a duplicate.
    pub fn declare_variable(&mut self, id: SymbolId, size: u32, ref_level: u32) -> Result<SymbolId> {
        let depth = self.depth();
        let sym = self.entry(id)?;
        let (name, kind, sym_depth) = (sym.name.clone(), sym.kind, sym.block_depth);

        let id = match kind {
            SymbolKind::Undeclared => {
                self.chain.adopt(id)?;
                id
            }
            SymbolKind::Variable | SymbolKind::Function | SymbolKind::ForwardFunction => {
                if sym_depth == depth || (sym_depth == PARAM_DEPTH && depth == BODY_DEPTH) {
                    self.report(errors::duplicate_name(&name, self.line));
                }
                self.chain.create(&name)?
            }
            SymbolKind::Parameter => {
                self.report(errors::unexpected_parameter(&name, self.line));
                id
            }
        };

        let Some(region) = Region::of_depth(depth) else {
            error!(name = %name, "variable declared outside of any scope");
            return Err(Bug::UnplacedVariable { name });
        };

        let sym = self.entry_mut(id)?;
        sym.kind = SymbolKind::Variable;
        sym.block_depth = depth;
        sym.size = size;
        sym.ref_level = ref_level;
        let slots = sym.slots();

        match self.layout.place_variable(region, slots) {
            Ok(Some(offset)) => self.entry_mut(id)?.offset = offset,
            Ok(None) => {}
            Err(full) => self.report(errors::region_overflow(&name, full, self.line)),
        }
        let sym = self.entry(id)?;
        trace!(name = %sym.name, depth, offset = sym.offset, size, ref_level, "variable");
        Ok(id)
    }

    /// Type declaration of a parameter between the header's `)` and the
    /// body, e.g. `int *p;` in `f(p) int *p; { ... }`.
    ///
    /// The parameter stays linked into its header's list; its offset comes
    /// from [`SymbolTable::allocate_parameters`].
    pub fn declare_parameter_type(&mut self, id: SymbolId, size: u32, ref_level: u32) -> Result<SymbolId> {
        let depth = self.depth();
        let sym = self.entry(id)?;
        let (name, kind, sym_depth) = (sym.name.clone(), sym.kind, sym.block_depth);

        let id = match kind {
            SymbolKind::Parameter => id,
            SymbolKind::Variable if sym_depth == PARAM_DEPTH => {
                self.report(errors::parameter_declared_twice(&name, self.line));
                return Ok(id);
            }
            SymbolKind::Variable
            | SymbolKind::Undeclared
            | SymbolKind::Function
            | SymbolKind::ForwardFunction => {
                self.report(errors::not_a_parameter(&name, self.line));
                self.chain.create(&name)?
            }
        };

        let sym = self.entry_mut(id)?;
        sym.kind = SymbolKind::Variable;
        sym.block_depth = depth;
        sym.size = size;
        sym.ref_level = ref_level;
        trace!(name = %sym.name, size, ref_level, "parameter type");
        Ok(id)
    }

    /// Start the definition of function `id`. A forward reference becomes
    /// the definition; anything else already bound under the name is an
    /// error and the symbol is returned untouched.
    pub fn declare_function(&mut self, id: SymbolId) -> Result<SymbolId> {
        let sym = self.entry(id)?;
        let (name, kind) = (sym.name.clone(), sym.kind);

        match kind {
            SymbolKind::Undeclared | SymbolKind::ForwardFunction => {}
            SymbolKind::Variable => {
                self.report(errors::function_same_as_global(&name, self.line));
                return Ok(id);
            }
            SymbolKind::Function => {
                self.report(errors::duplicate_function(&name, self.line));
                return Ok(id);
            }
            SymbolKind::Parameter => {
                self.report(errors::unexpected_parameter(&name, self.line));
                return Ok(id);
            }
        }

        let sym = self.entry_mut(id)?;
        sym.kind = SymbolKind::Function;
        sym.block_depth = GLOBAL_DEPTH;
        trace!(name = %sym.name, "function");
        Ok(id)
    }

    /// Use of `id` as a variable; returns its array size (0 for a scalar).
    ///
    /// An undeclared name or a stray parameter is reported and then turned
    /// into a variable of the current block, so that later uses stay quiet.
    pub fn reference_variable(&mut self, id: SymbolId) -> Result<u32> {
        let depth = self.depth();
        let sym = self.entry(id)?;
        let (name, kind, size) = (sym.name.clone(), sym.kind, sym.size);

        match kind {
            SymbolKind::Variable => return Ok(size),
            SymbolKind::Function | SymbolKind::ForwardFunction => {
                self.report(errors::function_used_as_variable(&name, self.line));
                return Ok(size);
            }
            SymbolKind::Undeclared => {
                self.report(errors::undeclared_variable(&name, self.line));
                self.chain.adopt(id)?;
            }
            SymbolKind::Parameter => {
                self.report(errors::unexpected_parameter(&name, self.line));
            }
        }

        let sym = self.entry_mut(id)?;
        sym.kind = SymbolKind::Variable;
        sym.block_depth = depth;
        Ok(size)
    }

    /// Call of `id`. The first call of an unknown name makes it a forward
    /// reference pinned to the global end, so it outlives the block the
    /// call appeared in.
    pub fn reference_function(&mut self, id: SymbolId) -> Result<SymbolId> {
        let sym = self.entry(id)?;
        let (name, kind) = (sym.name.clone(), sym.kind);

        match kind {
            SymbolKind::Undeclared => {}
            SymbolKind::Function | SymbolKind::ForwardFunction => return Ok(id),
            SymbolKind::Parameter => {
                self.report(errors::unexpected_parameter(&name, self.line));
                self.entry_mut(id)?.reset_arity();
                return Ok(id);
            }
            SymbolKind::Variable => {
                self.report(errors::variable_used_as_function(&name, self.line));
                self.entry_mut(id)?.reset_arity();
                return Ok(id);
            }
        }

        self.chain.pin_to_global_end(id)?;
        let sym = self.entry_mut(id)?;
        sym.kind = SymbolKind::ForwardFunction;
        sym.block_depth = GLOBAL_DEPTH;
        trace!(name = %sym.name, "forward reference");
        Ok(id)
    }

    /// Pointer level of a declarator, e.g. 2 for `int **x`.
    pub fn set_reference_level(&mut self, id: SymbolId, ref_level: u32) -> Result<()> {
        self.entry_mut(id)?.ref_level = ref_level;
        Ok(())
    }

    pub fn set_function_type(&mut self, id: SymbolId, is_void: bool) -> Result<()> {
        self.entry_mut(id)?.is_void = is_void;
        Ok(())
    }
}
