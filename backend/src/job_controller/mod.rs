pub mod save_guard;
pub mod state;
