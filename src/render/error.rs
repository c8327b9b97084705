//! Render Error Types

use crate::plugin::error::PluginError;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    /// Registry failure or guard-predicate error, propagated unswallowed
    #[error(transparent)]
    Plugin(#[from] PluginError),

    /// A slot transitively resolved back into itself
    #[error("Slot cycle detected while rendering '{slot_name}'")]
    SlotCycle { slot_name: String },
}
