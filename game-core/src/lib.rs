pub mod game_events;
pub mod game_state;
pub mod progression;
pub mod round;
pub mod scoring;
pub mod shuffle;
pub mod word_pool;

// Re-export main components
pub use game_events::*;
pub use game_state::*;
pub use progression::*;
pub use round::*;
pub use scoring::*;
pub use shuffle::*;
pub use word_pool::*;
