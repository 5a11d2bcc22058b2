//! Player progress: completed chapters, found hearts, stars, sound
//!
//! Chapters and hearts are persisted on every change. The star counter and
//! the sound switch only live for the current page load.

use crate::consts::*;
use crate::persistence::{PersistentStore, StorageBackend};

use super::ids::{Chapter, HeartId};

/// In-memory progress, owned by the game controller
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressState {
    /// Completed chapters in completion order (no duplicates)
    completed: Vec<Chapter>,
    /// Found hearts in discovery order (no duplicates)
    hearts: Vec<HeartId>,
    /// Star clicks this session
    stars_clicked: u32,
    sound_enabled: bool,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            completed: Vec::new(),
            hearts: Vec::new(),
            stars_clicked: 0,
            sound_enabled: true,
        }
    }
}

impl ProgressState {
    /// Load saved progress. Unknown or repeated ids are dropped.
    pub fn load<B: StorageBackend>(store: &PersistentStore<B>) -> Self {
        let mut state = Self::default();

        for id in store.load_list(KEY_CHAPTERS_COMPLETED) {
            match Chapter::from_str(&id) {
                Some(chapter) if !state.completed.contains(&chapter) => {
                    state.completed.push(chapter)
                }
                Some(_) => {}
                None => log::debug!("Ignoring unknown saved chapter {:?}", id),
            }
        }

        for id in store.load_list(KEY_HEARTS_FOUND) {
            match HeartId::from_str(&id) {
                Some(heart) if !state.hearts.contains(&heart) => state.hearts.push(heart),
                Some(_) => {}
                None => log::debug!("Ignoring unknown saved heart {:?}", id),
            }
        }

        log::info!(
            "Loaded progress: {} chapters, {} hearts",
            state.completed.len(),
            state.hearts.len()
        );
        state
    }

    pub fn completed_chapters(&self) -> &[Chapter] {
        &self.completed
    }

    pub fn found_hearts(&self) -> &[HeartId] {
        &self.hearts
    }

    pub fn is_completed(&self, chapter: Chapter) -> bool {
        self.completed.contains(&chapter)
    }

    pub fn has_heart(&self, heart: HeartId) -> bool {
        self.hearts.contains(&heart)
    }

    pub fn hearts_found(&self) -> usize {
        self.hearts.len()
    }

    pub fn all_hearts_found(&self) -> bool {
        self.hearts.len() >= TOTAL_HEARTS
    }

    pub fn stars_clicked(&self) -> u32 {
        self.stars_clicked
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Mark a chapter completed. Returns false if it already was.
    pub fn complete_chapter<B: StorageBackend>(
        &mut self,
        chapter: Chapter,
        store: &mut PersistentStore<B>,
    ) -> bool {
        if self.is_completed(chapter) {
            return false;
        }
        self.completed.push(chapter);
        self.save_chapters(store);
        true
    }

    /// Record a found heart. Returns false if it was already found.
    pub fn collect_heart<B: StorageBackend>(
        &mut self,
        heart: HeartId,
        store: &mut PersistentStore<B>,
    ) -> bool {
        if self.has_heart(heart) {
            return false;
        }
        self.hearts.push(heart);
        self.save_hearts(store);
        true
    }

    /// Add several hearts with a single write. Returns how many were new.
    pub fn grant_hearts<B: StorageBackend>(
        &mut self,
        hearts: impl IntoIterator<Item = HeartId>,
        store: &mut PersistentStore<B>,
    ) -> usize {
        let before = self.hearts.len();
        for heart in hearts {
            if !self.has_heart(heart) {
                self.hearts.push(heart);
            }
        }
        let added = self.hearts.len() - before;
        if added > 0 {
            self.save_hearts(store);
        }
        added
    }

    /// Count a star click, returning the new total
    pub fn increment_stars(&mut self) -> u32 {
        self.stars_clicked += 1;
        self.stars_clicked
    }

    /// Flip the sound switch, returning the new value
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    /// Completed share of the story in [0, 1]
    pub fn progress_fraction(&self) -> f32 {
        self.completed.len() as f32 / TOTAL_CHAPTERS as f32
    }

    /// Rounded percentage for the progress label
    pub fn progress_percent(&self) -> u32 {
        (self.progress_fraction() * 100.0).round() as u32
    }

    pub fn is_journey_complete(&self) -> bool {
        self.progress_fraction() >= 1.0
    }

    /// Forget everything (after the store has been cleared)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn save_chapters<B: StorageBackend>(&self, store: &mut PersistentStore<B>) {
        let ids: Vec<&str> = self.completed.iter().map(Chapter::as_str).collect();
        store.save_list(KEY_CHAPTERS_COMPLETED, &ids);
    }

    fn save_hearts<B: StorageBackend>(&self, store: &mut PersistentStore<B>) {
        let ids: Vec<String> = self.hearts.iter().map(HeartId::to_string).collect();
        store.save_list(KEY_HEARTS_FOUND, &ids);
    }
}
