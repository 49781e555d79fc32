//! Async inference gateway.
//!
//! [`Gateway::submit`] copies the bitmap out of the borrowed request, so the
//! request (and the bitmap behind it) can be dropped right away, then runs
//! PNG encoding on the blocking pool and the backend call on the tokio
//! runtime. The returned [`PendingOutcome`] resolves to exactly one
//! [`InferenceOutcome`]. There are no retries; dropping the pending outcome
//! aborts the call.

mod backend;
mod error;
mod gemini;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::task::JoinHandle;

use crate::request::InferenceRequest;

pub use backend::{EncodedImage, InferenceBackend, InferenceFuture};
pub use error::{Failure, FailureKind, InferenceError, InferenceOutcome};
pub use gemini::GeminiBackend;

/// Dispatches inference requests off the interactive task.
#[derive(Clone)]
pub struct Gateway {
    backend: Arc<dyn InferenceBackend>,
}

impl Gateway {
    pub fn new(backend: Arc<dyn InferenceBackend>) -> Self {
        Self { backend }
    }

    /// Issue `request`. Must be called from within a tokio runtime.
    ///
    /// Only a pixel copy happens on the calling task; encoding is CPU-bound
    /// and runs under `spawn_blocking`.
    pub fn submit(&self, request: &InferenceRequest<'_>) -> PendingOutcome {
        let image = request.image.clone();
        let prompt = request.prompt;
        let backend = Arc::clone(&self.backend);

        let handle = tokio::spawn(async move {
            let encoded = tokio::task::spawn_blocking(move || EncodedImage::png(&image))
                .await
                .map_err(|e| {
                    InferenceError::Backend(format!("Image encoding task failed: {}", e))
                })??;
            tracing::debug!(bytes = encoded.bytes.len(), "Image encoded for upload");
            backend.infer(&encoded, prompt).await
        });

        PendingOutcome { handle }
    }
}

/// Future for a submitted request.
pub struct PendingOutcome {
    handle: JoinHandle<Result<String, InferenceError>>,
}

impl PendingOutcome {
    /// Abort the backend call. The outcome becomes `Fail(Cancelled)`.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

impl Future for PendingOutcome {
    type Output = InferenceOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle).poll(cx).map(|joined| match joined {
            Ok(Ok(text)) => InferenceOutcome::Ok(text),
            Ok(Err(err)) => InferenceOutcome::Fail(err.into()),
            Err(join_err) if join_err.is_cancelled() => {
                InferenceOutcome::Fail(InferenceError::Cancelled.into())
            }
            Err(join_err) => InferenceOutcome::Fail(
                InferenceError::Backend(format!("Inference task failed: {}", join_err)).into(),
            ),
        })
    }
}

impl Drop for PendingOutcome {
    fn drop(&mut self) {
        self.abort();
    }
}
