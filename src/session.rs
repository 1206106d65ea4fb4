//! The state of one interactive user session.

use crate::history::History;
use crate::outcome::Outcome;
use crate::predictor::{Evaluation, Predictor};
use crate::Context;

/// Owns the history of one user and the model trained from it. Every
/// operation goes through the session, so two sessions never share state.
pub struct Session {
    ctx: Context,
    history: History,
    predictor: Predictor,
}

impl Session {
    pub fn new(ctx: Context) -> Self {
        Self::with_history(ctx, History::new())
    }

    pub fn with_history(ctx: Context, history: History) -> Self {
        Self {
            ctx,
            history,
            predictor: Predictor::new(),
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    pub fn record(&mut self, outcome: Outcome) {
        log::debug!("Recorded {}", outcome);
        self.history.record(outcome);
    }

    pub fn extend<I: IntoIterator<Item = Outcome>>(&mut self, outcomes: I) {
        self.history.extend(outcomes);
    }

    /// Clear the history and the trained model.
    pub fn reset(&mut self) {
        log::debug!("Reset the history of {} outcomes", self.history.len());
        self.history.reset();
        self.predictor.invalidate();
    }

    pub fn evaluate(&mut self) -> Evaluation {
        self.predictor.evaluate(&self.history, &self.ctx)
    }
}
