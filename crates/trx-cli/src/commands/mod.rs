//! Command implementations.

pub mod export;
pub mod list;
pub mod local;
pub mod runserver;

pub use self::export::execute_export;
pub use self::list::execute_list;
pub use self::local::execute_local;
pub use self::runserver::execute_runserver;
