pub mod check;
pub mod init;
pub mod resolve;

pub use check::execute_check;
pub use init::execute_init;
pub use resolve::execute_resolve;
