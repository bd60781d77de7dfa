use std::collections::HashSet;
use std::path::PathBuf;

use async_channel::{Receiver, Sender};

use crate::config::Config;
use crate::history::{self, LastViewed};
use crate::model::Recipe;
use crate::notify::{Notice, Notifier};
use crate::quantity::{format_quantity, scale_servings};
use crate::speech::{CommandSpeech, ReadAloud, SpeechBackend, UtteranceId};
use crate::timer::{StepTimers, TimerToggle};

/// Events fed back into a session from its timers and speech backend.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    TimerTick { step_id: String, generation: u64 },
    SpeechEnded(UtteranceId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Prev,
    Next,
}

/// An ingredient line at the current serving multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledIngredient {
    pub id: String,
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub checked: bool,
}

/// How a session reaches the world outside it.
pub struct SessionOptions {
    pub speech: Option<Box<dyn SpeechBackend>>,
    pub speech_rate: f32,
    pub share_base_url: String,
    /// Where to record the last viewed recipe; `None` skips it.
    pub last_viewed_path: Option<PathBuf>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        let config = Config::default();
        Self {
            speech: None,
            speech_rate: config.speech.rate,
            share_base_url: config.share_base_url,
            last_viewed_path: None,
        }
    }
}

impl SessionOptions {
    pub fn from_config(config: &Config) -> Self {
        let speech = if config.speech.enabled {
            CommandSpeech::detect(config.speech.command.as_deref())
                .map(|s| Box::new(s) as Box<dyn SpeechBackend>)
        } else {
            None
        };
        Self {
            speech,
            speech_rate: config.speech.rate,
            share_base_url: config.share_base_url.clone(),
            last_viewed_path: Some(LastViewed::path()),
        }
    }
}

/// Everything that lives only while one recipe is open.
///
/// Closing (or dropping) the session stops all timers and any speech.
pub struct CookingSession {
    pub(super) recipe: Recipe,
    pub(super) serving_multiplier: f64,
    pub(super) bookmarked: bool,
    pub(super) liked: bool,
    pub(super) active_step: Option<usize>,
    pub(super) checked: HashSet<String>,
    pub(super) timers: StepTimers,
    pub(super) read_aloud: ReadAloud,
    pub(super) notifier: Box<dyn Notifier>,
    pub(super) events: Sender<SessionEvent>,
    pub(super) share_base_url: String,
}

impl CookingSession {
    /// Open `recipe`. Timer ticks and speech endings arrive on the returned
    /// receiver and must be passed to `handle_session_event`.
    pub fn open(
        recipe: Recipe,
        notifier: Box<dyn Notifier>,
        options: SessionOptions,
    ) -> (Self, Receiver<SessionEvent>) {
        let (events, receiver) = async_channel::unbounded();

        if let Some(path) = &options.last_viewed_path {
            history::record_view(&recipe, path);
        }
        log::info!("Opened recipe {} ({})", recipe.id, recipe.title);

        let session = Self {
            timers: StepTimers::new(),
            read_aloud: ReadAloud::new(options.speech, options.speech_rate, events.clone()),
            recipe,
            serving_multiplier: 1.0,
            bookmarked: false,
            liked: false,
            active_step: None,
            checked: HashSet::new(),
            notifier,
            events,
            share_base_url: options.share_base_url,
        };
        (session, receiver)
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn serving_multiplier(&self) -> f64 {
        self.serving_multiplier
    }

    pub fn set_serving_multiplier(&mut self, multiplier: f64) {
        if multiplier > 0.0 && multiplier.is_finite() {
            self.serving_multiplier = multiplier;
        } else {
            log::warn!("Ignoring serving multiplier {multiplier}");
        }
    }

    pub fn servings(&self) -> String {
        scale_servings(self.recipe.servings, self.serving_multiplier)
    }

    pub fn scaled_ingredients(&self) -> Vec<ScaledIngredient> {
        self.recipe
            .ingredients
            .iter()
            .map(|i| ScaledIngredient {
                id: i.id.clone(),
                name: i.name.clone(),
                quantity: format_quantity(&i.quantity, self.serving_multiplier),
                unit: i.unit.clone(),
                checked: self.checked.contains(&i.id),
            })
            .collect()
    }

    /// Tick an ingredient off or back on. Returns whether it is now checked.
    pub fn toggle_ingredient(&mut self, ingredient_id: &str) -> bool {
        if self.checked.remove(ingredient_id) {
            false
        } else {
            self.checked.insert(ingredient_id.to_string());
            true
        }
    }

    pub fn is_checked(&self, ingredient_id: &str) -> bool {
        self.checked.contains(ingredient_id)
    }

    pub fn toggle_bookmark(&mut self) -> bool {
        self.bookmarked = !self.bookmarked;
        let text = if self.bookmarked {
            "Added to cookbook"
        } else {
            "Removed from cookbook"
        };
        self.notifier.notify(Notice::new(text));
        self.bookmarked
    }

    pub fn is_bookmarked(&self) -> bool {
        self.bookmarked
    }

    pub fn toggle_like(&mut self) -> bool {
        self.liked = !self.liked;
        let text = if self.liked {
            "Added to favorites"
        } else {
            "Removed from favorites"
        };
        self.notifier.notify(Notice::new(text));
        self.liked
    }

    pub fn is_liked(&self) -> bool {
        self.liked
    }

    pub fn active_step(&self) -> Option<usize> {
        self.active_step
    }

    /// Move the highlighted step. With none highlighted, next goes to the
    /// first step and prev to the last; otherwise movement stops at the ends.
    pub fn navigate(&mut self, direction: StepDirection) -> Option<usize> {
        let count = self.recipe.steps.len();
        if count == 0 {
            return None;
        }
        self.active_step = Some(match (self.active_step, direction) {
            (None, StepDirection::Next) => 0,
            (None, StepDirection::Prev) => count - 1,
            (Some(i), StepDirection::Next) => (i + 1).min(count - 1),
            (Some(i), StepDirection::Prev) => i.saturating_sub(1),
        });
        self.active_step
    }

    pub fn set_active_step(&mut self, index: usize) -> bool {
        if index < self.recipe.steps.len() {
            self.active_step = Some(index);
            true
        } else {
            false
        }
    }

    /// Start or cancel the countdown attached to a step.
    pub fn toggle_step_timer(&mut self, step_id: &str) -> TimerToggle {
        let (Some(step), Some(position)) =
            (self.recipe.step(step_id), self.recipe.step_position(step_id))
        else {
            log::warn!("Ignoring timer for unknown step {step_id}");
            return TimerToggle::UnknownStep;
        };
        let Some(minutes) = step.timer_minutes else {
            return TimerToggle::NoTimer;
        };
        self.timers.toggle(step_id, position, minutes, &self.events)
    }

    pub fn timers(&self) -> &StepTimers {
        &self.timers
    }

    /// Read a step (0-based) aloud, or stop reading. Returns the new latch.
    pub fn read_step_aloud(&mut self, index: usize) -> bool {
        match self.recipe.steps.get(index) {
            Some(step) => self.read_aloud.toggle(&step.description),
            None => false,
        }
    }

    pub fn stop_reading(&mut self) {
        self.read_aloud.cancel();
    }

    pub fn is_reading_aloud(&self) -> bool {
        self.read_aloud.is_reading()
    }

    pub fn can_read_aloud(&self) -> bool {
        self.read_aloud.is_available()
    }

    /// Shopping list text with quantities as written.
    pub fn ingredients_text(&self) -> String {
        let mut text = format!("Ingredients for {}:", self.recipe.title);
        for i in &self.recipe.ingredients {
            text.push_str(&format!("\n• {} {} {}", i.quantity, i.unit, i.name));
        }
        text
    }

    pub fn share_link(&self) -> String {
        format!(
            "{}/{}",
            self.share_base_url.trim_end_matches('/'),
            self.recipe.id
        )
    }

    /// Stop every timer and any speech. Safe to call more than once.
    pub fn close(&mut self) {
        self.timers.cancel_all();
        self.read_aloud.cancel();
    }
}

impl Drop for CookingSession {
    fn drop(&mut self) {
        self.close();
    }
}
