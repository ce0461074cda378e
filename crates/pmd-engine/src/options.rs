use serde::{Deserialize, Serialize};

/// Nesting limit used when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Knobs for a [`Parser`](crate::Parser).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Deepest allowed nesting of collapse/notification content.
    pub max_depth: usize,
    /// Emit a copy button in fenced code block headers.
    pub code_copy_button: bool,
    /// Grammar modules (by name) left out of the registry.
    pub disabled_modules: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            code_copy_button: true,
            disabled_modules: Vec::new(),
        }
    }
}
