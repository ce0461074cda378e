/// Failures inside the engine that are contained to a single block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("content nested too deeply (limit is {limit})")]
    TooDeeplyNested { limit: usize },
}

impl EngineError {
    /// Inline marker emitted in place of the block that failed.
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"pmd-error\">{}</div>",
            html_escape::encode_text(&self.to_string())
        )
    }
}

/// Reasons a grammar module is left out of the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("grammar module has an empty name")]
    EmptyName,
    #[error("duplicate grammar module `{0}`")]
    DuplicateName(String),
    #[error("unknown grammar module `{0}`")]
    UnknownModule(String),
}
