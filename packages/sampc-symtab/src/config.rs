use serde::Deserialize;

/// Settings a driver may override before the first declaration is seen.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SymtabConfig {
    /// First global slot handed out; slots below it stay reserved.
    pub global_base: u32,
    /// Function the program starts in. It is expected to be defined
    /// somewhere in the unit, so it starts out as a forward reference.
    pub entry_point: String,
}

impl Default for SymtabConfig {
    fn default() -> Self {
        Self {
            global_base: 1,
            entry_point: "main".to_string(),
        }
    }
}

impl SymtabConfig {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
