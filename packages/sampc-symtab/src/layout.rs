//! Offsets in the three storage regions.
//!
//! Global variables are laid out once for the whole program, locals per
//! function body and parameters per function header. The counters only
//! move on declarations and on the scope events forwarded by the symbol
//! table.

use std::fmt;

use thiserror::Error;

use crate::symbol::{BODY_DEPTH, GLOBAL_DEPTH, PARAM_DEPTH};

/// Storage region selected by a symbol's block depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Global,
    Parameter,
    Local,
}

impl Region {
    /// `None` for depth 0: such a symbol was never placed in a scope.
    pub fn of_depth(depth: u32) -> Option<Region> {
        match depth {
            0 => None,
            GLOBAL_DEPTH => Some(Region::Global),
            PARAM_DEPTH => Some(Region::Parameter),
            _ => Some(Region::Local),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Region::Global => "global",
            Region::Parameter => "parameter",
            Region::Local => "local",
        })
    }
}

/// A placement would run a region's counter past `u32::MAX`. The counter
/// is left where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{region} region overflow")]
pub struct RegionFull {
    pub region: Region,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    global_next: u32,
    local_next: u32,
    local_max: u32,
    /// Local counter at the entry of each open nested block.
    saved: Vec<u32>,
    param_next: u32,
}

impl StorageLayout {
    /// `global_base` is the first usable global slot; the ones below it
    /// are reserved.
    pub fn new(global_base: u32) -> Self {
        Self {
            global_next: global_base,
            local_next: 0,
            local_max: 0,
            saved: Vec::new(),
            param_next: 0,
        }
    }

    /// A scope at `depth` was opened.
    pub fn enter_scope(&mut self, depth: u32) {
        match depth {
            PARAM_DEPTH => self.reset_parameters(),
            BODY_DEPTH => {
                self.local_next = 0;
                self.local_max = 0;
                self.saved.clear();
            }
            d if d > BODY_DEPTH => self.saved.push(self.local_next),
            _ => {}
        }
    }

    /// The scope at `depth` is being closed. Storage of a nested block is
    /// handed back so sibling blocks can reuse it.
    pub fn exit_scope(&mut self, depth: u32) {
        if depth >= BODY_DEPTH {
            self.local_max = self.local_max.max(self.local_next);
        }
        if depth > BODY_DEPTH {
            if let Some(saved) = self.saved.pop() {
                self.local_next = saved;
            }
        }
    }

    /// Reserve `slots` consecutive slots for a variable. Variables in the
    /// parameter region get their offset from the parameter list instead.
    pub fn place_variable(&mut self, region: Region, slots: u32) -> Result<Option<u32>, RegionFull> {
        let counter = match region {
            Region::Global => &mut self.global_next,
            Region::Local => &mut self.local_next,
            Region::Parameter => return Ok(None),
        };
        let offset = *counter;
        *counter = offset.checked_add(slots).ok_or(RegionFull { region })?;
        Ok(Some(offset))
    }

    /// Start numbering a new parameter list.
    pub fn reset_parameters(&mut self) {
        self.param_next = 0;
    }

    /// Next parameter slot; every parameter takes exactly one.
    pub fn place_parameter(&mut self) -> Result<u32, RegionFull> {
        let offset = self.param_next;
        self.param_next = offset.checked_add(1).ok_or(RegionFull {
            region: Region::Parameter,
        })?;
        Ok(offset)
    }

    /// Size of the global region, reserved slots included.
    pub fn global_size(&self) -> u32 {
        self.global_next
    }

    /// High-water mark of the current (or last finished) function's locals.
    pub fn local_size(&self) -> u32 {
        self.local_max.max(self.local_next)
    }

    pub fn parameter_count(&self) -> u32 {
        self.param_next
    }
}

impl Default for StorageLayout {
    fn default() -> Self {
        Self::new(1)
    }
}
