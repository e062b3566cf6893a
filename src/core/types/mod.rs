pub mod config;
mod error;
mod hooks;
mod ignore;
mod level;
mod resolved;

pub use error::*;
pub use hooks::*;
pub use ignore::*;
pub use level::*;
pub use resolved::*;
