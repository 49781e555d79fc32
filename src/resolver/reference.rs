use std::fmt;
use std::path::PathBuf;

/// Opaque handle to user-selected content, granted by the host picker.
///
/// Callers never interpret the handle; only a [`ContentProvider`] does.
///
/// [`ContentProvider`]: super::ContentProvider
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentLocator(String);

impl ContentLocator {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File-system path for `file://` URIs and bare paths.
    pub(crate) fn to_path(&self) -> PathBuf {
        PathBuf::from(self.0.strip_prefix("file://").unwrap_or(&self.0))
    }
}

impl fmt::Display for ContentLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the user picked: a bundled sample or content from the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageReference {
    BuiltInSample(usize),
    UserContent(ContentLocator),
}

impl ImageReference {
    /// Short label for logs.
    pub fn label(&self) -> String {
        match self {
            ImageReference::BuiltInSample(index) => format!("sample #{}", index),
            ImageReference::UserContent(locator) => locator.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_uri_strips_scheme() {
        let locator = ContentLocator::new("file:///tmp/photo.jpg");
        assert_eq!(locator.to_path(), PathBuf::from("/tmp/photo.jpg"));
    }

    #[test]
    fn bare_path_is_kept() {
        let locator = ContentLocator::new("photos/cat.png");
        assert_eq!(locator.to_path(), PathBuf::from("photos/cat.png"));
    }

    #[test]
    fn labels() {
        assert_eq!(ImageReference::BuiltInSample(3).label(), "sample #3");
        assert_eq!(
            ImageReference::UserContent(ContentLocator::new("a.png")).label(),
            "a.png"
        );
    }
}
