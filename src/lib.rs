//! Photo recognition pipeline: pick a photo, ask a generative model what it
//! shows, and track the result on screen.
//!
//! The flow is leaf-first:
//! [`resolver`] decodes an [`resolver::ImageReference`], [`request`] pairs the
//! bitmap with the fixed prompt, [`gateway`] runs the backend call off the
//! interactive task, and [`ui::controller::ReconController`] folds the outcome
//! into the observable [`ui::recon::ResultState`].

pub mod config;
pub mod gateway;
pub mod logging;
pub mod request;
pub mod resolver;
pub mod ui;
