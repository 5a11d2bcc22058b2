//! Storybook - chapter progression for a single-page interactive story
//!
//! Core modules:
//! - `story`: Chapters, hearts, the unlock graph and the game controller
//! - `persistence`: Best-effort key/value storage (LocalStorage on web)
//! - `settings`: Data-driven rule knobs (easter egg, bonus hearts, delays)
//!
//! Nothing in here renders. Every user-visible reaction leaves the core as a
//! symbolic [`story::EffectEvent`] for an external effects layer.

pub mod persistence;
pub mod settings;
pub mod story;

pub use persistence::{MemoryBackend, PersistentStore, StorageBackend, StorageError};
pub use settings::{ConfigError, StoryConfig};
pub use story::{
    ActionQueue, Chapter, ChapterStatus, DependencyGraph, EffectEvent, EffectsSink, GameController, HeartId,
    LogSink, Navigator, Outcome, ProgressState, RecordingSink, StarId, Transition,
};

/// Fixed storybook constants
pub mod consts {
    /// Number of chapters in the story
    pub const TOTAL_CHAPTERS: usize = 9;
    /// Number of hidden hearts (ids "1".."15")
    pub const TOTAL_HEARTS: usize = 15;
    /// Number of star widgets in the night sky
    pub const TOTAL_STARS: usize = 5;

    /// Storage key: ordered list of completed chapter ids
    pub const KEY_CHAPTERS_COMPLETED: &str = "chaptersCompleted";
    /// Storage key: list of found heart ids
    pub const KEY_HEARTS_FOUND: &str = "heartsFound";
    /// Storage key: one-shot journey completion flag
    pub const KEY_JOURNEY_COMPLETED: &str = "journeyCompleted";

    /// Every key this crate writes (cleared on reset)
    pub const ALL_KEYS: [&str; 3] = [
        KEY_CHAPTERS_COMPLETED,
        KEY_HEARTS_FOUND,
        KEY_JOURNEY_COMPLETED,
    ];
}
