//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use parking_lot::Mutex;
use photo_recon::gateway::{
    EncodedImage, Gateway, InferenceBackend, InferenceError, InferenceFuture,
};
use photo_recon::resolver::{samples, DecodeStrategy, FsContentProvider, ImageReference, Resolver};
use photo_recon::ui::controller::ReconController;
use std::collections::HashMap;
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Write `content` to a `config.toml` inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn resolver() -> Resolver {
    Resolver::new(Arc::new(FsContentProvider::new()), DecodeStrategy::Streaming)
}

/// Backend that recognizes the bundled samples by their encoded bytes and
/// answers "This looks like a <name>." after an optional per-sample delay.
pub struct SampleEchoBackend {
    known: Vec<(Vec<u8>, &'static str)>,
    delays: HashMap<&'static str, Duration>,
    calls: Mutex<Vec<String>>,
}

impl SampleEchoBackend {
    pub fn new() -> Self {
        let resolver = resolver();
        let known = samples::catalogue()
            .iter()
            .enumerate()
            .map(|(index, sample)| {
                let image = resolver
                    .resolve(ImageReference::BuiltInSample(index))
                    .unwrap();
                (EncodedImage::png(&image).unwrap().bytes, sample.name)
            })
            .collect();
        Self {
            known,
            delays: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, name: &'static str, delay: Duration) -> Self {
        self.delays.insert(name, delay);
        self
    }

    /// Names of the samples the backend was asked about, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn answer_for(name: &str) -> String {
        format!("This looks like a {}.", name)
    }
}

impl InferenceBackend for SampleEchoBackend {
    fn infer<'a>(&'a self, image: &'a EncodedImage, _prompt: &'a str) -> InferenceFuture<'a> {
        Box::pin(async move {
            let name = self
                .known
                .iter()
                .find(|(bytes, _)| *bytes == image.bytes)
                .map(|(_, name)| *name)
                .unwrap_or("mystery");
            self.calls.lock().push(name.to_string());

            if let Some(delay) = self.delays.get(name) {
                tokio::time::sleep(*delay).await;
            }

            if name == "mystery" {
                return Err(InferenceError::Backend("Unrecognized image".to_string()));
            }
            Ok(Self::answer_for(name))
        })
    }
}

/// Controller wired to `backend` and the local file system.
pub fn controller_with(backend: Arc<dyn InferenceBackend>) -> ReconController {
    ReconController::new(resolver(), Gateway::new(backend))
}
