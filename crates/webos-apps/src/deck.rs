//! Slide deck state.
//!
//! An ordered, never-empty list of slides persisted as one JSON array.
//! The deck always keeps at least one slide; deleting the last one is
//! refused rather than leaving an empty deck.

use log::warn;
use serde::{Deserialize, Serialize};
use webos_store::{SharedStorage, keys};

/// Background presets offered by the deck editor.
pub const BG_PRESETS: &[(&str, &str)] = &[
    ("Dark", "#1e1e2e"),
    ("Blue", "#1e3a5f"),
    ("Green", "#1a3a2a"),
    ("Purple", "#2d1b4e"),
    ("Red", "#3b1a1a"),
    ("Amber", "#3b2e1a"),
];

/// One slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub id: u64,
    pub title: String,
    pub body: String,
    /// Background color (one of [`BG_PRESETS`] or custom).
    pub bg: String,
}

/// The slide list plus the active selection.
pub struct DeckState {
    slides: Vec<Slide>,
    active: usize,
    next_id: u64,
    store: Option<SharedStorage>,
}

impl DeckState {
    /// A deck holding the starter slide, unpersisted.
    pub fn new() -> Self {
        let mut deck = Self {
            slides: Vec::new(),
            active: 0,
            next_id: 0,
            store: None,
        };
        let starter = deck.make_slide(
            "My Presentation".to_string(),
            "Double-click to edit".to_string(),
        );
        deck.slides.push(starter);
        deck
    }

    /// Load from `store`. A missing, malformed, or empty stored deck
    /// falls back to the starter slide.
    pub fn with_storage(store: SharedStorage) -> Self {
        let stored = store.borrow().get(keys::DECK);
        let mut deck = match stored {
            Some(json) => match serde_json::from_str::<Vec<Slide>>(&json) {
                Ok(slides) if !slides.is_empty() => {
                    let next_id = slides.iter().map(|s| s.id).max().unwrap_or(0) + 1;
                    Self {
                        slides,
                        active: 0,
                        next_id,
                        store: None,
                    }
                },
                Ok(_) => Self::new(),
                Err(e) => {
                    warn!("ignoring malformed deck data: {e}");
                    Self::new()
                },
            },
            None => Self::new(),
        };
        deck.store = Some(store);
        deck
    }

    fn make_slide(&mut self, title: String, body: String) -> Slide {
        let id = self.next_id;
        self.next_id += 1;
        Slide {
            id,
            title,
            body,
            bg: BG_PRESETS[0].1.to_string(),
        }
    }

    /// All slides in presentation order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Index of the selected slide.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The selected slide.
    pub fn active_slide(&self) -> &Slide {
        &self.slides[self.active.min(self.slides.len() - 1)]
    }

    /// Select a slide by index (clamped).
    pub fn select(&mut self, index: usize) {
        self.active = index.min(self.slides.len() - 1);
    }

    /// Append a fresh slide and select it.
    pub fn add(&mut self) {
        let slide = self.make_slide(
            "Untitled Slide".to_string(),
            "Click to edit content".to_string(),
        );
        self.slides.push(slide);
        self.active = self.slides.len() - 1;
        self.persist();
    }

    /// Duplicate the selected slide, inserting the copy right after it.
    pub fn duplicate(&mut self) {
        let src = self.active_slide().clone();
        let mut copy = self.make_slide(src.title, src.body);
        copy.bg = src.bg;
        self.slides.insert(self.active + 1, copy);
        self.active += 1;
        self.persist();
    }

    /// Delete the selected slide. Refused when it is the only one.
    pub fn delete(&mut self) {
        if self.slides.len() <= 1 {
            return;
        }
        self.slides.remove(self.active);
        if self.active >= self.slides.len() {
            self.active = self.slides.len() - 1;
        }
        self.persist();
    }

    /// Swap the selected slide with its predecessor.
    pub fn move_up(&mut self) {
        if self.active > 0 {
            self.slides.swap(self.active, self.active - 1);
            self.active -= 1;
            self.persist();
        }
    }

    /// Swap the selected slide with its successor.
    pub fn move_down(&mut self) {
        if self.active + 1 < self.slides.len() {
            self.slides.swap(self.active, self.active + 1);
            self.active += 1;
            self.persist();
        }
    }

    /// Edit the selected slide in place.
    pub fn update_active(&mut self, f: impl FnOnce(&mut Slide)) {
        let index = self.active;
        f(&mut self.slides[index]);
        self.persist();
    }

    fn persist(&self) {
        let Some(store) = &self.store else {
            return;
        };
        match serde_json::to_string(&self.slides) {
            Ok(json) => store.borrow_mut().set(keys::DECK, &json),
            Err(e) => warn!("failed to serialize deck data: {e}"),
        }
    }
}

impl Default for DeckState {
    fn default() -> Self {
        Self::new()
    }
}
