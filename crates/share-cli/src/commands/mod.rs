//! Command implementations for sharectl

pub mod list;
pub mod sync;
pub mod validate;

pub use list::run_list;
pub use sync::{run_check, run_sync};
pub use validate::run_validate;
