//! Game controller
//!
//! Turns discrete user actions into progress changes and symbolic effects.
//! Every handler runs to completion (persistence included) and returns an
//! [`Outcome`] describing what changed; nothing is rendered here.

use std::collections::BTreeMap;

use crate::consts::*;
use crate::persistence::{PersistentStore, StorageBackend};
use crate::settings::StoryConfig;

use super::events::{EffectEvent, EffectsSink, Navigator};
use super::graph::DependencyGraph;
use super::ids::{Chapter, HeartId, StarId};
use super::progress::ProgressState;

/// Where a chapter stands, as last reported to the effects layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChapterStatus {
    /// Dependencies not yet completed
    #[default]
    Locked,
    /// Playable, not yet completed
    Unlocked,
    /// Done
    Completed,
}

/// A chapter status change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub chapter: Chapter,
    pub from: ChapterStatus,
    pub to: ChapterStatus,
}

/// Everything one action caused
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Chapter status changes, in chapter order
    pub transitions: Vec<Transition>,
    /// Effects to play, in order
    pub events: Vec<EffectEvent>,
    /// Chapter whose content should be opened
    pub navigate_to: Option<Chapter>,
    /// Sound switch after the action
    pub sound_enabled: bool,
}

impl Outcome {
    fn new(sound_enabled: bool) -> Self {
        Self {
            transitions: Vec::new(),
            events: Vec::new(),
            navigate_to: None,
            sound_enabled,
        }
    }

    /// True if the action changed nothing
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty() && self.events.is_empty() && self.navigate_to.is_none()
    }

    /// Whether an event with this symbolic name was produced
    pub fn has_event(&self, name: &str) -> bool {
        self.events.iter().any(|e| e.name() == name)
    }

    /// Hand events to the effects layer, then navigate if asked to
    pub fn dispatch(&self, sink: &mut impl EffectsSink, navigator: &mut impl Navigator) {
        for event in &self.events {
            sink.emit(event, self.sound_enabled);
        }
        if let Some(chapter) = self.navigate_to {
            navigator.go_to(chapter);
        }
    }
}

/// Owns the progress state and decides what every click means
pub struct GameController<B: StorageBackend> {
    store: PersistentStore<B>,
    progress: ProgressState,
    graph: DependencyGraph,
    config: StoryConfig,
    /// Last status reported per chapter
    statuses: BTreeMap<Chapter, ChapterStatus>,
    /// "All hearts found" already shown this page load
    hearts_announced: bool,
    /// "Journey complete" already shown by this controller
    journey_announced: bool,
}

impl<B: StorageBackend> GameController<B> {
    /// Load saved progress with the storybook's chapter chain and default rules.
    /// Call [`Self::start`] before handling clicks.
    pub fn new(store: PersistentStore<B>) -> Self {
        let progress = ProgressState::load(&store);
        Self {
            store,
            progress,
            graph: DependencyGraph::storybook(),
            config: StoryConfig::default(),
            statuses: Chapter::ALL
                .into_iter()
                .map(|c| (c, ChapterStatus::Locked))
                .collect(),
            hearts_announced: false,
            journey_announced: false,
        }
    }

    pub fn with_graph(mut self, graph: DependencyGraph) -> Self {
        self.graph = graph;
        self
    }

    /// Use `config` for the story rules. An invalid config is logged and the
    /// defaults are kept.
    pub fn with_config(mut self, config: StoryConfig) -> Self {
        match config.validate() {
            Ok(()) => self.config = config,
            Err(e) => log::warn!("{} - keeping default story rules", e),
        }
        self
    }

    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    pub fn store(&self) -> &PersistentStore<B> {
        &self.store
    }

    /// Give the store back (e.g. to simulate a page reload)
    pub fn into_store(self) -> PersistentStore<B> {
        self.store
    }

    pub fn status(&self, chapter: Chapter) -> ChapterStatus {
        self.statuses.get(&chapter).copied().unwrap_or_default()
    }

    /// Startup pass: report the saved chapter states, announce playable
    /// chapters and catch a journey finished before the flag was saved.
    pub fn start(&mut self) -> Outcome {
        let mut outcome = self.outcome();
        self.refresh_statuses(&mut outcome);
        self.check_journey_complete(&mut outcome);
        log::info!(
            "Story started: {}% complete, {}/{} hearts",
            self.progress.progress_percent(),
            self.progress.hearts_found(),
            TOTAL_HEARTS
        );
        outcome
    }

    /// Click on a chapter object
    pub fn on_chapter_click(&mut self, id: &str) -> Outcome {
        let mut outcome = self.outcome();
        let Some(chapter) = Chapter::from_str(id) else {
            log::debug!("Ignoring click on unknown chapter {:?}", id);
            return outcome;
        };

        match self.status(chapter) {
            ChapterStatus::Locked => {
                outcome.events.push(EffectEvent::Blocked { chapter });
            }
            ChapterStatus::Unlocked | ChapterStatus::Completed => {
                outcome.events.push(EffectEvent::ChapterOpened { chapter });
                outcome.navigate_to = Some(chapter);
            }
        }
        outcome
    }

    /// Entry point for chapter pages reporting that they were finished
    pub fn complete_chapter(&mut self, id: &str) -> Outcome {
        match Chapter::from_str(id) {
            Some(chapter) => self.complete(chapter),
            None => {
                log::debug!("Ignoring completion of unknown chapter {:?}", id);
                self.outcome()
            }
        }
    }

    /// Mark `chapter` completed, then cascade unlocks and the journey check
    pub fn complete(&mut self, chapter: Chapter) -> Outcome {
        let mut outcome = self.outcome();
        if !self.progress.complete_chapter(chapter, &mut self.store) {
            return outcome;
        }

        log::info!(
            "Chapter {} completed ({}%)",
            chapter,
            self.progress.progress_percent()
        );
        self.refresh_statuses(&mut outcome);
        self.check_journey_complete(&mut outcome);
        outcome
    }

    /// Click on a hidden heart
    pub fn on_heart_click(&mut self, id: &str) -> Outcome {
        let mut outcome = self.outcome();
        let Some(heart) = HeartId::from_str(id) else {
            log::debug!("Ignoring click on unknown heart {:?}", id);
            return outcome;
        };
        if !self.progress.collect_heart(heart, &mut self.store) {
            return outcome;
        }

        outcome.events.push(EffectEvent::HeartCollected {
            heart,
            count: self.progress.hearts_found(),
            total: TOTAL_HEARTS,
        });
        self.check_all_hearts(&mut outcome);
        outcome
    }

    /// Click on star widget `index` (0-based)
    pub fn on_star_click(&mut self, index: usize) -> Outcome {
        let mut outcome = self.outcome();
        if StarId::new(index).is_none() {
            log::debug!("Ignoring click on unknown star {}", index);
            return outcome;
        }

        let count = self.progress.increment_stars();
        outcome.events.push(EffectEvent::StarClicked { count });

        if count == self.config.easter_egg_clicks {
            let bonus = self.config.bonus_hearts().unwrap_or_else(|| {
                log::warn!("Unusable bonus heart range, granting none");
                Vec::new()
            });
            let added = self.progress.grant_hearts(bonus, &mut self.store);
            log::info!("Easter egg found, {} bonus hearts", added);
            outcome
                .events
                .push(EffectEvent::EasterEggFound { bonus_hearts: added });
            self.check_all_hearts(&mut outcome);
        }
        outcome
    }

    /// Flip the sound switch
    pub fn toggle_sound(&mut self) -> Outcome {
        let enabled = self.progress.toggle_sound();
        let mut outcome = self.outcome();
        outcome.events.push(EffectEvent::SoundToggled { enabled });
        outcome
    }

    /// Erase all saved progress and start over (caller confirms first)
    pub fn reset(&mut self) -> Outcome {
        self.store.clear_all();
        self.progress.reset();
        self.hearts_announced = false;
        self.journey_announced = false;
        log::info!("Progress reset");
        self.start()
    }

    fn outcome(&self) -> Outcome {
        Outcome::new(self.progress.sound_enabled())
    }

    /// Recompute every chapter's status and record what changed
    fn refresh_statuses(&mut self, outcome: &mut Outcome) {
        let open = self
            .graph
            .compute_newly_unlocked(self.progress.completed_chapters());

        for chapter in Chapter::ALL {
            let to = if self.progress.is_completed(chapter) {
                ChapterStatus::Completed
            } else if open.contains(&chapter) {
                ChapterStatus::Unlocked
            } else {
                ChapterStatus::Locked
            };

            let from = self.status(chapter);
            if from == to {
                continue;
            }
            self.statuses.insert(chapter, to);
            outcome.transitions.push(Transition { chapter, from, to });
            if to == ChapterStatus::Unlocked {
                log::info!("Chapter {} unlocked", chapter);
                outcome.events.push(EffectEvent::Unlocked { chapter });
            }
        }
    }

    fn check_all_hearts(&mut self, outcome: &mut Outcome) {
        if self.progress.all_hearts_found() && !self.hearts_announced {
            self.hearts_announced = true;
            log::info!("All hearts found");
            outcome.events.push(EffectEvent::AllHeartsFound);
        }
    }

    fn check_journey_complete(&mut self, outcome: &mut Outcome) {
        if !self.progress.is_journey_complete() || self.journey_announced {
            return;
        }
        if self.store.load_flag(KEY_JOURNEY_COMPLETED) {
            return;
        }

        self.store.set_flag(KEY_JOURNEY_COMPLETED);
        self.journey_announced = true;
        log::info!("Journey complete");
        outcome.events.push(EffectEvent::JourneyComplete {
            hearts_found: self.progress.hearts_found(),
        });
    }
}
