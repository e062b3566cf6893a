pub mod core;

// Re-export key items for easy importing in this crate
pub use crate::core::types;

// Re-export key items for easy importing in other crates
pub use crate::core::diagnostics::{ConsoleDiagnostics, Diagnostics, RecordingDiagnostics};
pub use crate::core::expander::PathExpander;
pub use crate::core::logging::configure_logging;
pub use crate::core::main_shared::run_main;
pub use crate::core::resolver::{OptionsResolver, are_required_options_set};
pub use crate::core::store::{MemoryTaskStore, TaskConfigStore, TomlTaskStore};
