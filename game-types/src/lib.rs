pub mod errors;
pub mod game;
pub mod scores;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use scores::*;
