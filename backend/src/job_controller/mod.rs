pub mod persist;
pub mod state;
