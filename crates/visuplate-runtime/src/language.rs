//! Language switch controller.
//!
//! A request flips `transitioning` on and updates the active language in the
//! same step, then schedules a settle message. Only the newest request's
//! settle message clears the flag: earlier timers are cancelled, and a stale
//! message that slipped past cancellation carries an old generation and is
//! ignored.
//!
//! # Invariants
//!
//! 1. `active` is always a code of the dictionary it was validated against.
//! 2. `transitioning` is true iff a settle for the current generation is
//!    outstanding.
//! 3. `settled == active` whenever `transitioning` is false.

use visuplate_i18n::{I18nError, LanguageDictionary};
use web_time::Duration;

use crate::timer::{TimerHandle, Timers};

/// Default delay before a language switch settles.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Busy flag and settle bookkeeping for language changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSwitch {
    active: String,
    settled: String,
    transitioning: bool,
    generation: u64,
    pending: Option<TimerHandle>,
    settle_delay: Duration,
}

impl LanguageSwitch {
    /// Start settled on `initial`.
    #[must_use]
    pub fn new(initial: impl Into<String>, settle_delay: Duration) -> Self {
        let initial = initial.into();
        Self {
            settled: initial.clone(),
            active: initial,
            transitioning: false,
            generation: 0,
            pending: None,
            settle_delay,
        }
    }

    /// Language the user last chose.
    #[must_use]
    pub fn active(&self) -> &str {
        &self.active
    }

    /// Language whose strings are on screen while the switch is in flight.
    #[must_use]
    pub fn settled(&self) -> &str {
        &self.settled
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Counter bumped by every accepted request.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Switch to `code`.
    ///
    /// `settle_msg` builds the message the timer delivers; it receives the new
    /// generation, which must be passed back to [`settle`](Self::settle).
    /// Returns that generation.
    pub fn request<M>(
        &mut self,
        code: &str,
        dictionary: &LanguageDictionary,
        timers: &mut dyn Timers<M>,
        settle_msg: impl FnOnce(u64) -> M,
    ) -> Result<u64, I18nError> {
        if !dictionary.contains(code) {
            return Err(I18nError::UnknownLanguage(code.to_owned()));
        }

        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }

        self.generation += 1;
        self.active = code.to_owned();
        self.transitioning = true;
        let msg = settle_msg(self.generation);
        self.pending = Some(timers.schedule_after(self.settle_delay, msg));

        tracing::info!(
            target: "visuplate.store",
            language = code,
            generation = self.generation,
            "language switch requested"
        );
        Ok(self.generation)
    }

    /// Apply a settle message. Returns `false` for a stale generation.
    pub fn settle(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.transitioning {
            tracing::debug!(
                target: "visuplate.store",
                generation,
                current = self.generation,
                "stale language settle ignored"
            );
            return false;
        }
        self.transitioning = false;
        self.pending = None;
        self.settled = self.active.clone();
        tracing::info!(
            target: "visuplate.store",
            language = %self.active,
            generation,
            "language switch settled"
        );
        true
    }
}
