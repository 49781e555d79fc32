//! Base trait for intents (user/system actions) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (picking a sample, opening a file)
/// - Background events (decode or inference completions)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
