use crate::search::{DescriptionResult, Segment, TitleResult};

/// Result picked by the user when the UI was accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchSelection {
    Title(TitleResult),
    Description(DescriptionResult),
    Segment(Segment),
}

/// How an interactive session ended.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub accepted: bool,
    /// Query text as last typed.
    pub query: String,
    /// Shareable link for the final search state.
    pub link: String,
    pub selection: Option<SearchSelection>,
}
