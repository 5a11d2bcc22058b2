//! Symbolic effect events and the collaborators that consume them
//!
//! The core never plays a sound or draws a toast. It names what happened and
//! lets an [`EffectsSink`] decide how that looks and sounds.

use serde::Serialize;

use super::ids::{Chapter, HeartId};

/// Something the effects layer should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum EffectEvent {
    /// A locked chapter was clicked
    Blocked { chapter: Chapter },
    /// A chapter became playable
    Unlocked { chapter: Chapter },
    /// An unlocked or completed chapter was opened
    ChapterOpened { chapter: Chapter },
    /// A new heart was found
    HeartCollected { heart: HeartId, count: usize, total: usize },
    /// The hunt is over (once per page load)
    AllHeartsFound,
    /// A star widget was clicked
    StarClicked { count: u32 },
    /// The star easter egg fired
    EasterEggFound { bonus_hearts: usize },
    /// Every chapter is done (once ever)
    JourneyComplete { hearts_found: usize },
    /// The sound switch changed
    SoundToggled { enabled: bool },
}

impl EffectEvent {
    /// Stable symbolic name
    pub fn name(&self) -> &'static str {
        match self {
            EffectEvent::Blocked { .. } => "blocked",
            EffectEvent::Unlocked { .. } => "unlocked",
            EffectEvent::ChapterOpened { .. } => "chapter-opened",
            EffectEvent::HeartCollected { .. } => "heart-collected",
            EffectEvent::AllHeartsFound => "all-hearts-found",
            EffectEvent::StarClicked { .. } => "star-clicked",
            EffectEvent::EasterEggFound { .. } => "easter-egg-found",
            EffectEvent::JourneyComplete { .. } => "journey-complete",
            EffectEvent::SoundToggled { .. } => "sound-toggled",
        }
    }

    /// Chapter the event concerns, if any
    pub fn chapter(&self) -> Option<Chapter> {
        match self {
            EffectEvent::Blocked { chapter }
            | EffectEvent::Unlocked { chapter }
            | EffectEvent::ChapterOpened { chapter } => Some(*chapter),
            _ => None,
        }
    }

    /// JSON payload handed to the effects layer
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| format!("{{\"event\":\"{}\"}}", self.name()))
    }
}

/// Renders effects (sounds, toasts, particles) for symbolic events
pub trait EffectsSink {
    /// `sound_enabled` mirrors the player's sound switch at emit time
    fn emit(&mut self, event: &EffectEvent, sound_enabled: bool);
}

/// Opens chapter content
pub trait Navigator {
    fn go_to(&mut self, chapter: Chapter);
}

/// Sink that keeps every event (tests, replays)
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub events: Vec<EffectEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many events with this symbolic name were seen
    pub fn count(&self, name: &str) -> usize {
        self.events.iter().filter(|e| e.name() == name).count()
    }
}

impl EffectsSink for RecordingSink {
    fn emit(&mut self, event: &EffectEvent, _sound_enabled: bool) {
        self.events.push(*event);
    }
}

/// Sink that only logs; used by the native build
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EffectsSink for LogSink {
    fn emit(&mut self, event: &EffectEvent, sound_enabled: bool) {
        log::info!(
            "effect {} {}{}",
            event.name(),
            event.to_json(),
            if sound_enabled { "" } else { " (muted)" }
        );
    }
}

impl Navigator for Vec<Chapter> {
    fn go_to(&mut self, chapter: Chapter) {
        self.push(chapter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let chapter = Chapter::Hola;
        assert_eq!(EffectEvent::Blocked { chapter }.name(), "blocked");
        assert_eq!(EffectEvent::Unlocked { chapter }.name(), "unlocked");
        assert_eq!(EffectEvent::AllHeartsFound.name(), "all-hearts-found");
        assert_eq!(
            EffectEvent::EasterEggFound { bonus_hearts: 7 }.name(),
            "easter-egg-found"
        );
        assert_eq!(
            EffectEvent::JourneyComplete { hearts_found: 0 }.name(),
            "journey-complete"
        );
    }

    #[test]
    fn test_event_json_payload() {
        let heart = HeartId::new(12).unwrap();
        let event = EffectEvent::HeartCollected {
            heart,
            count: 3,
            total: 15,
        };
        assert_eq!(
            event.to_json(),
            r#"{"event":"heart-collected","heart":"12","count":3,"total":15}"#
        );
        assert_eq!(
            EffectEvent::Unlocked {
                chapter: Chapter::NewYear
            }
            .to_json(),
            r#"{"event":"unlocked","chapter":"newyear"}"#
        );
        assert_eq!(
            EffectEvent::AllHeartsFound.to_json(),
            r#"{"event":"all-hearts-found"}"#
        );
    }

    #[test]
    fn test_recording_sink_counts() {
        let mut sink = RecordingSink::new();
        sink.emit(&EffectEvent::AllHeartsFound, true);
        sink.emit(&EffectEvent::SoundToggled { enabled: false }, false);
        sink.emit(&EffectEvent::AllHeartsFound, true);
        assert_eq!(sink.count("all-hearts-found"), 2);
        assert_eq!(sink.count("sound-toggled"), 1);
    }
}
