//! Story progression core
//!
//! Pure decision logic. This module must stay free of rendering:
//! - State changes go through `GameController`
//! - Persistence goes through an injected `PersistentStore`
//! - Reactions leave as symbolic `EffectEvent`s

pub mod controller;
pub mod events;
pub mod graph;
pub mod ids;
pub mod progress;
pub mod queue;

pub use controller::{ChapterStatus, GameController, Outcome, Transition};
pub use events::{EffectEvent, EffectsSink, LogSink, Navigator, RecordingSink};
pub use graph::DependencyGraph;
pub use ids::{Chapter, HeartId, StarId};
pub use progress::ProgressState;
pub use queue::ActionQueue;
