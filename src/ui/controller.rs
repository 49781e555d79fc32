//! Screen controller: owns the recon state for one screen lifetime.
//!
//! All mutation goes through `&mut self`, so whichever task owns the
//! controller is the single writer. Background work (decode, inference)
//! reports back over a channel, tagged with the generation it was started
//! under; the reducer drops anything that is no longer current.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::gateway::{
    Failure, FailureKind, Gateway, GeminiBackend, InferenceError, InferenceOutcome,
};
use crate::request;
use crate::resolver::{DecodeStrategy, FsContentProvider, ImageReference, Resolver};
use crate::ui::mvi::Reducer;
use crate::ui::recon::{ReconIntent, ReconReducer, ReconScreen, ResultState};

struct Completion {
    generation: u64,
    outcome: InferenceOutcome,
}

/// Drives the resolve → build → submit pipeline and exposes the result state.
pub struct ReconController {
    screen: ReconScreen,
    observable: watch::Sender<ResultState>,
    resolver: Arc<Resolver>,
    gateway: Gateway,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: Option<JoinHandle<()>>,
}

impl ReconController {
    pub fn new(resolver: Resolver, gateway: Gateway) -> Self {
        let screen = ReconScreen::default();
        let (observable, _) = watch::channel(screen.result.clone());
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Self {
            screen,
            observable,
            resolver: Arc::new(resolver),
            gateway,
            completions_tx,
            completions_rx,
            in_flight: None,
        }
    }

    /// Wire a controller to the local file system and the Gemini backend.
    pub fn from_config(config: &Config) -> Result<Self, InferenceError> {
        let resolver = Resolver::new(
            Arc::new(FsContentProvider::new()),
            DecodeStrategy::select(config.decoder.strategy),
        );
        let gateway = Gateway::new(Arc::new(GeminiBackend::from_config(&config.backend)?));
        Ok(Self::new(resolver, gateway))
    }

    /// Observe the current result state.
    pub fn subscribe(&self) -> watch::Receiver<ResultState> {
        self.observable.subscribe()
    }

    pub fn state(&self) -> &ResultState {
        &self.screen.result
    }

    pub fn generation(&self) -> u64 {
        self.screen.generation
    }

    /// Accept a submission. The state is `Loading` when this returns.
    ///
    /// Any in-flight submission is superseded: its task is aborted and a
    /// late completion from it is discarded. Returns the new generation.
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, reference: ImageReference) -> u64 {
        self.dispatch(ReconIntent::Submit);
        let generation = self.screen.generation;

        if let Some(previous) = self.in_flight.take() {
            previous.abort();
            tracing::debug!(generation, "Superseded in-flight submission");
        }

        tracing::info!(generation, source = %reference.label(), "Submission accepted");

        let resolver = Arc::clone(&self.resolver);
        let gateway = self.gateway.clone();
        let completions = self.completions_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = run_pipeline(resolver, gateway, reference).await;
            let _ = completions.send(Completion {
                generation,
                outcome,
            });
        }));

        generation
    }

    /// Wait for the next background completion and apply it.
    ///
    /// Returns `true` if it changed the visible state, `false` if it was
    /// stale. Pends forever while nothing is in flight; cancel-safe, so it
    /// can sit in a `tokio::select!` loop.
    pub async fn next_completion(&mut self) -> bool {
        let Some(Completion {
            generation,
            outcome,
        }) = self.completions_rx.recv().await
        else {
            return false;
        };

        let before = self.screen.clone();
        self.dispatch(ReconIntent::Complete {
            generation,
            outcome,
        });

        let changed = self.screen != before;
        if !changed {
            tracing::debug!(
                generation,
                current = self.screen.generation,
                "Discarded stale completion"
            );
        }
        changed
    }

    fn dispatch(&mut self, intent: ReconIntent) {
        let current = std::mem::take(&mut self.screen);
        self.screen = ReconReducer::reduce(current, intent);
        self.observable.send_if_modified(|visible| {
            if *visible == self.screen.result {
                return false;
            }
            *visible = self.screen.result.clone();
            true
        });
    }
}

impl Drop for ReconController {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

/// Decode off the interactive task, then hand the request to the gateway.
///
/// Decode failures become the submission's outcome; nothing is sent to the
/// backend in that case.
async fn run_pipeline(
    resolver: Arc<Resolver>,
    gateway: Gateway,
    reference: ImageReference,
) -> InferenceOutcome {
    let label = reference.label();
    let decoded = match tokio::task::spawn_blocking(move || resolver.resolve(reference)).await {
        Ok(Ok(image)) => image,
        Ok(Err(err)) => {
            tracing::warn!(source = %label, error = %err, "Image decode failed");
            return InferenceOutcome::Fail(err.into());
        }
        Err(join_err) => {
            return InferenceOutcome::Fail(Failure {
                kind: FailureKind::Decode,
                message: format!("Image decoding task failed: {}", join_err),
            });
        }
    };

    tracing::debug!(
        source = %label,
        width = decoded.width(),
        height = decoded.height(),
        "Image decoded"
    );

    let pending = gateway.submit(&request::build(&decoded));
    drop(decoded);
    pending.await
}
