pub mod config;
pub mod declare;
pub mod errors;
pub mod layout;
pub mod params;
pub mod scope;
pub mod symbol;
pub mod symbol_id;

use sampc_diagnostics::{Diagnostic, Diagnostics};
use sampc_syntax::{Token, TokenKind};
use tracing::{debug, error, trace};

pub use crate::config::SymtabConfig;
pub use crate::errors::{Bug, Result};
pub use crate::layout::{Region, RegionFull, StorageLayout};
pub use crate::params::ParamList;
pub use crate::scope::BindingChain;
pub use crate::symbol::{Payload, Symbol, BODY_DEPTH, GLOBAL_DEPTH, PARAM_DEPTH};
pub use crate::symbol_id::{SymbolId, SymbolKind};

/// What the lexer gets back for a looked-up token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Visible binding of an identifier, created on first sight.
    Symbol(SymbolId),
    /// Saved text of a constant.
    Literal(String),
}

/// Symbol table and storage layout of one compilation unit.
///
/// The grammar layer drives it in reduction order: scope events, lexer
/// lookups and declaration transitions. Recoverable problems end up in
/// [`SymbolTable::diagnostics`]; an `Err(Bug)` means the table is corrupt
/// and compilation must stop.
#[derive(Debug)]
pub struct SymbolTable {
    chain: BindingChain,
    layout: StorageLayout,
    diagnostics: Diagnostics,
    /// Line of the most recently looked-up token.
    line: u32,
}

impl SymbolTable {
    /// Open the global scope and register the entry point as a function
    /// that still has to be defined.
    pub fn new(config: &SymtabConfig) -> Result<Self> {
        let mut table = Self {
            chain: BindingChain::new(),
            layout: StorageLayout::new(config.global_base),
            diagnostics: Diagnostics::new(),
            line: 0,
        };
        table.push_scope();
        let entry = table.chain.create(&config.entry_point)?;
        table.entry_mut(entry)?.kind = SymbolKind::ForwardFunction;
        table.chain.pin_to_global_end(entry)?;
        Ok(table)
    }

    /// Lexer hook: resolve an identifier (creating it if unseen) or save
    /// the text of a constant.
    pub fn lookup(&mut self, token: &Token) -> Result<Lookup> {
        self.line = token.line;
        match token.kind {
            kind if !kind.needs_lookup() => {
                error!(kind = ?kind, line = token.line, "lookup of a token without a binding");
                Err(Bug::UnexpectedToken(kind))
            }
            TokenKind::Constant => Ok(Lookup::Literal(token.text.clone())),
            _ => {
                let id = match self.chain.find(&token.text) {
                    Some(id) => id,
                    None => self.chain.create(&token.text)?,
                };
                Ok(Lookup::Symbol(id))
            }
        }
    }

    /// Open a block and return its depth.
    pub fn push_scope(&mut self) -> u32 {
        let depth = self.chain.push_scope();
        self.layout.enter_scope(depth);
        trace!(depth, "push scope");
        depth
    }

    /// Close the innermost block. Functions that were called but never
    /// defined are reported once, when their binding is released.
    pub fn pop_scope(&mut self) -> Result<()> {
        let depth = self.chain.depth();
        let released = self.chain.pop_scope()?;
        self.layout.exit_scope(depth);
        for sym in released {
            if sym.kind.is_function() {
                trace!(
                    name = %sym.name,
                    kind = %sym.kind,
                    depth = sym.block_depth,
                    offset = sym.offset,
                    return_type = if sym.is_void { "void" } else { "int" },
                    "popping"
                );
            } else {
                trace!(
                    name = %sym.name,
                    kind = %sym.kind,
                    depth = sym.block_depth,
                    offset = sym.offset,
                    "popping"
                );
            }
            if sym.kind == SymbolKind::ForwardFunction {
                self.report(errors::undefined_function(&sym.name, self.line));
            }
        }
        Ok(())
    }

    /// Close the parameter scope of `func` once its body is done and
    /// return the number of local slots the function needs.
    pub fn finish_function(&mut self, func: SymbolId) -> Result<u32> {
        let name = self.entry(func)?.name.clone();
        self.pop_scope()?;
        let words = self.layout.local_size();
        debug!(function = %name, words, "local region has {words} word(s)");
        Ok(words)
    }

    /// Close the global scope and return the size of the global region.
    pub fn finish_program(&mut self) -> Result<u32> {
        self.pop_scope()?;
        let words = self.layout.global_size();
        debug!(words, "global region has {words} word(s)");
        Ok(words)
    }

    /// The visible binding of `name`.
    pub fn find(&self, name: &str) -> Option<SymbolId> {
        self.chain.find(name)
    }

    /// A live symbol, or `None` once its scope was popped.
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.chain.get(id)
    }

    pub fn depth(&self) -> u32 {
        self.chain.depth()
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn chain(&self) -> &BindingChain {
        &self.chain
    }

    pub fn layout(&self) -> &StorageLayout {
        &self.layout
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.error_count()
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    pub(crate) fn report(&mut self, diag: Diagnostic) {
        debug!(code = %diag.code, line = diag.line, "{}", diag.message);
        self.diagnostics.push(diag);
    }

    pub(crate) fn entry(&self, id: SymbolId) -> Result<&Symbol> {
        match self.chain.get(id) {
            Some(sym) => Ok(sym),
            None => {
                error!(%id, "access to released symbol");
                Err(Bug::DeadSymbol(id))
            }
        }
    }

    pub(crate) fn entry_mut(&mut self, id: SymbolId) -> Result<&mut Symbol> {
        match self.chain.get_mut(id) {
            Some(sym) => Ok(sym),
            None => {
                error!(%id, "access to released symbol");
                Err(Bug::DeadSymbol(id))
            }
        }
    }
}
