//! `bizlink-linkage` — entity resolution between two business directories.
//!
//! Pure engine crate: receives pre-loaded records, returns scored matches.
//! No CLI or filesystem dependencies.

pub mod abbreviations;
pub mod block;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod load;
pub mod model;
pub mod normalize;
pub mod output;
pub mod sanitize;
pub mod score;
pub mod summary;

pub use config::LinkConfig;
pub use engine::{load_input, run, run_with_progress};
pub use error::LinkError;
pub use model::{LinkInput, LinkResult, MatchResult, SourceRecord};
pub use normalize::{normalize, Normalizer};
pub use score::partial_ratio;
