//! # Debounce Module
//!
//! Trailing-edge debounce for interactive callers (a serving stepper, a text box):
//! only the last request in a burst runs, once the delay has passed without a
//! newer one. Built on Tokio timers, so callers must be inside a Tokio runtime.

use crate::ingredient_model::{Recipe, ScaledRecipe};
use crate::recipe_scaler::RecipeScaler;
use crate::scaling_errors::ScalingError;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, trace};

/// Outcome published by [`DebouncedScaler`]
pub type ScaleOutcome = Result<ScaledRecipe, ScalingError>;

/// Runs the most recent of a burst of calls after a quiet period
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<AbortHandle>>,
}

/// Handle to one scheduled call
#[derive(Debug)]
pub struct DebounceHandle {
    abort: AbortHandle,
}

impl DebounceHandle {
    /// Drop the scheduled call if it has not run yet
    pub fn cancel(&self) {
        self.abort.abort();
    }

    /// True once the call ran, was cancelled, or was superseded
    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `f` to run after the delay, superseding any call still waiting.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn call<F>(&self, f: F) -> DebounceHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let delay = self.delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            trace!("Debounce window of {:?} elapsed", delay);
            f();
        });

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(task.abort_handle());
        if let Some(previous) = previous {
            if !previous.is_finished() {
                debug!("Superseding pending debounced call");
            }
            previous.abort();
        }

        DebounceHandle {
            abort: task.abort_handle(),
        }
    }

    /// Drop the pending call, if any
    pub fn cancel(&self) {
        if let Some(pending) = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            debug!("Cancelling pending debounced call");
            pending.abort();
        }
    }

    /// True while a scheduled call is still waiting or running
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|pending| !pending.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Rescales one recipe on request, publishing only the latest settled target.
///
/// Results arrive on the [`watch::Receiver`] returned by [`DebouncedScaler::new`];
/// it holds `None` until the first request settles.
#[derive(Debug)]
pub struct DebouncedScaler {
    recipe: Arc<Recipe>,
    scaler: Arc<RecipeScaler>,
    debouncer: Debouncer,
    results: Arc<watch::Sender<Option<ScaleOutcome>>>,
}

impl DebouncedScaler {
    /// Create a debounced scaler using the scaler's configured delay
    pub fn new(recipe: Recipe, scaler: RecipeScaler) -> (Self, watch::Receiver<Option<ScaleOutcome>>) {
        let delay = Duration::from_millis(scaler.config().debounce_ms);
        let (sender, receiver) = watch::channel(None);
        debug!(
            "Creating debounced scaler for {} ingredients, delay {:?}",
            recipe.ingredients.len(),
            delay
        );

        let debounced = Self {
            recipe: Arc::new(recipe),
            scaler: Arc::new(scaler),
            debouncer: Debouncer::new(delay),
            results: Arc::new(sender),
        };
        (debounced, receiver)
    }

    /// Request a rescale to `target_servings`; earlier pending requests are dropped
    pub fn request(&self, target_servings: i64) -> DebounceHandle {
        let recipe = Arc::clone(&self.recipe);
        let scaler = Arc::clone(&self.scaler);
        let results = Arc::clone(&self.results);
        trace!("Rescale to {} servings requested", target_servings);

        self.debouncer.call(move || {
            let outcome = scaler.scale_recipe(&recipe, target_servings);
            debug!(
                "Publishing rescale to {} servings (ok: {})",
                target_servings,
                outcome.is_ok()
            );
            results.send_replace(Some(outcome));
        })
    }

    pub fn cancel(&self) {
        self.debouncer.cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }
}
