//! The binding chain: every live symbol, which scope releases it, and
//! which binding of a name is currently visible.
//!
//! Symbols live in an arena addressed by [`SymbolId`]. Each open scope owns
//! a release set; popping the scope frees exactly that set. Pinned symbols
//! (the "global end") belong to no scope and survive every pop except the
//! one that closes the outermost scope.

use std::collections::HashMap;

use tracing::error;

use crate::errors::{Bug, Result};
use crate::symbol::Symbol;
use crate::symbol_id::SymbolId;

#[derive(Debug, Default)]
pub struct BindingChain {
    /// Arena of symbol records; a slot becomes `None` once released.
    slots: Vec<Option<Symbol>>,
    /// Release sets of the open scopes, outermost first (`frames[0]` is depth 1).
    frames: Vec<Vec<SymbolId>>,
    /// Global end of the chain, in pin order.
    pinned: Vec<SymbolId>,
    /// Live bindings per name; the last one is visible. Pinned bindings sit
    /// at the front so any scoped binding of the same name hides them.
    bindings: HashMap<String, Vec<SymbolId>>,
}

impl BindingChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scope depth (number of open scopes).
    pub fn depth(&self) -> u32 {
        self.frames.len() as u32
    }

    /// Open a new scope and return its depth.
    pub fn push_scope(&mut self) -> u32 {
        self.frames.push(Vec::new());
        self.depth()
    }

    /// Close the innermost scope, releasing every symbol it owns.
    ///
    /// Closing the outermost scope also releases the pinned symbols. The
    /// released records are returned most recent first.
    pub fn pop_scope(&mut self) -> Result<Vec<Symbol>> {
        let Some(frame) = self.frames.pop() else {
            error!("pop_scope with no open scope");
            return Err(Bug::NoOpenScope);
        };
        let mut released: Vec<SymbolId> = frame.into_iter().rev().collect();
        if self.frames.is_empty() {
            released.append(&mut self.pinned);
        }
        Ok(released
            .into_iter()
            .filter_map(|id| self.release(id))
            .collect())
    }

    /// Create an undeclared symbol owned by the innermost scope. It hides
    /// every older binding of the same name.
    pub fn create(&mut self, name: &str) -> Result<SymbolId> {
        let id = SymbolId(self.slots.len() as u32);
        let Some(frame) = self.frames.last_mut() else {
            error!(name, "create with no open scope");
            return Err(Bug::NoOpenScope);
        };
        frame.push(id);
        self.slots.push(Some(Symbol::undeclared(id, name.to_string())));
        self.bindings.entry(name.to_string()).or_default().push(id);
        Ok(id)
    }

    /// The visible binding of `name`, if any.
    pub fn find(&self, name: &str) -> Option<SymbolId> {
        self.bindings.get(name).and_then(|ids| ids.last().copied())
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Move `id` out of its scope into the global end so that no ordinary
    /// scope pop releases it. Pinning a pinned symbol does nothing.
    pub fn pin_to_global_end(&mut self, id: SymbolId) -> Result<()> {
        if self.is_pinned(id) {
            return Ok(());
        }
        let name = self.name_of(id)?;
        if !self.detach(id) {
            error!(%id, name = %name, "pin_to_global_end: symbol not in any scope");
            return Err(Bug::Unowned { name });
        }
        self.pinned.push(id);

        let pinned = &self.pinned;
        if let Some(ids) = self.bindings.get_mut(&name) {
            ids.retain(|&other| other != id);
            let at = ids.iter().take_while(|other| pinned.contains(*other)).count();
            ids.insert(at, id);
        }
        Ok(())
    }

    /// Hand ownership of `id` to the innermost scope, so that it is
    /// released together with the block it was declared in.
    pub fn adopt(&mut self, id: SymbolId) -> Result<()> {
        if self.is_pinned(id) || self.frames.last().is_some_and(|f| f.contains(&id)) {
            return Ok(());
        }
        let name = self.name_of(id)?;
        if !self.detach(id) {
            error!(%id, name = %name, "adopt: symbol not in any scope");
            return Err(Bug::Unowned { name });
        }
        match self.frames.last_mut() {
            Some(frame) => {
                frame.push(id);
                Ok(())
            }
            None => Err(Bug::NoOpenScope),
        }
    }

    pub fn is_pinned(&self, id: SymbolId) -> bool {
        self.pinned.contains(&id)
    }

    /// Pinned symbols in global-end order.
    pub fn pinned(&self) -> &[SymbolId] {
        &self.pinned
    }

    /// Number of live symbols.
    pub fn len(&self) -> usize {
        self.frames.iter().map(Vec::len).sum::<usize>() + self.pinned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of live symbols named `name`, visible or hidden.
    pub fn bindings_of(&self, name: &str) -> usize {
        self.bindings.get(name).map_or(0, Vec::len)
    }

    /// Iterate over the live symbols in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.slots.iter().flatten()
    }

    fn name_of(&self, id: SymbolId) -> Result<String> {
        match self.get(id) {
            Some(sym) => Ok(sym.name.clone()),
            None => {
                error!(%id, "access to released symbol");
                Err(Bug::DeadSymbol(id))
            }
        }
    }

    /// Remove `id` from whichever scope owns it.
    fn detach(&mut self, id: SymbolId) -> bool {
        for frame in self.frames.iter_mut().rev() {
            if let Some(pos) = frame.iter().position(|&other| other == id) {
                frame.remove(pos);
                return true;
            }
        }
        false
    }

    fn release(&mut self, id: SymbolId) -> Option<Symbol> {
        let sym = self.slots.get_mut(id.index())?.take()?;
        if let Some(ids) = self.bindings.get_mut(&sym.name) {
            ids.retain(|&other| other != id);
            if ids.is_empty() {
                self.bindings.remove(&sym.name);
            }
        }
        Some(sym)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_binding_hides_outer_until_pop() {
        let mut chain = BindingChain::new();
        chain.push_scope();
        let outer = chain.create("x").unwrap();
        chain.push_scope();
        let inner = chain.create("x").unwrap();
        assert_eq!(chain.find("x"), Some(inner));
        assert_eq!(chain.bindings_of("x"), 2);

        let released = chain.pop_scope().unwrap();
        assert_eq!(released.len(), 1);
        assert_eq!(released[0].id, inner);
        assert_eq!(chain.find("x"), Some(outer));
        assert!(chain.get(inner).is_none());
        assert_eq!(chain.iter().map(|s| s.id).collect::<Vec<_>>(), [outer]);
    }

    #[test]
    fn test_pop_releases_most_recent_first() {
        let mut chain = BindingChain::new();
        chain.push_scope();
        chain.push_scope();
        chain.create("a").unwrap();
        chain.create("b").unwrap();
        let names: Vec<_> = chain
            .pop_scope()
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn test_pinned_symbol_survives_inner_pops() {
        let mut chain = BindingChain::new();
        chain.push_scope();
        chain.push_scope();
        chain.push_scope();
        let g = chain.create("g").unwrap();
        chain.pin_to_global_end(g).unwrap();
        chain.pop_scope().unwrap();
        chain.pop_scope().unwrap();
        assert_eq!(chain.find("g"), Some(g));
        assert_eq!(chain.pinned(), &[g]);

        let released = chain.pop_scope().unwrap();
        assert_eq!(released.len(), 1);
        assert!(chain.is_empty());
    }

    #[test]
    fn test_scoped_binding_hides_pinned_one() {
        let mut chain = BindingChain::new();
        chain.push_scope();
        chain.push_scope();
        let f = chain.create("f").unwrap();
        chain.pin_to_global_end(f).unwrap();
        let local = chain.create("f").unwrap();
        assert_eq!(chain.find("f"), Some(local));
        chain.pop_scope().unwrap();
        assert_eq!(chain.find("f"), Some(f));
    }

    #[test]
    fn test_pin_of_released_symbol_is_a_bug() {
        let mut chain = BindingChain::new();
        chain.push_scope();
        chain.push_scope();
        let t = chain.create("t").unwrap();
        chain.pop_scope().unwrap();
        assert_eq!(chain.pin_to_global_end(t), Err(Bug::DeadSymbol(t)));
    }

    #[test]
    fn test_adopt_moves_ownership_inward() {
        let mut chain = BindingChain::new();
        chain.push_scope();
        let y = chain.create("y").unwrap();
        chain.push_scope();
        chain.adopt(y).unwrap();
        chain.pop_scope().unwrap();
        assert_eq!(chain.find("y"), None);
        assert_eq!(chain.len(), 0);
    }

    #[test]
    fn test_pop_without_scope_is_a_bug() {
        let mut chain = BindingChain::new();
        assert_eq!(chain.pop_scope(), Err(Bug::NoOpenScope));
        assert_eq!(chain.create("x"), Err(Bug::NoOpenScope));
    }
}
