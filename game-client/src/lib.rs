pub mod command;
pub mod config;
pub mod countdown;
pub mod driver;
pub mod error;
pub mod profile;
pub mod render;
pub mod score_client;
pub mod word_source;

pub use command::Command;
pub use config::{Config, WordSourceKind};
pub use driver::{DriverInput, DriverOptions, Flow, GameDriver};
pub use error::ClientError;
pub use profile::ProfileStore;
pub use score_client::{HttpScoreService, ScoreError, ScoreService};
pub use word_source::{FileWordSource, FixedWordLists, HttpWordSource, WordSource};
