pub mod history;
pub mod recency;
pub mod state;

pub use state::SessionState;
