//! Base trait for UI state in MVI architecture.

/// Marker trait for UI state objects.
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Self-contained (everything the view needs to render)
/// - Comparable (PartialEq, so observers can skip redundant renders)
/// - Constructible in their initial form via `Default`
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
