pub mod cli;
pub mod cmds;
pub mod diagnostics;
pub mod expander;
pub mod logging;
pub mod main_shared;
pub mod resolver;
pub mod store;
pub mod types;
