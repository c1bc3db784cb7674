//! Stable image identity keys.
//!
//! History is scoped per image; the key must not collide across distinct
//! images opened in sequence. Project-backed images use their project file
//! id; standalone files fall back to name plus byte size.

/// Stable identity key for an open image.
///
/// # Example
///
/// ```rust
/// use grade_core::ImageIdent;
///
/// let a = ImageIdent::project("f81d4fae");
/// let b = ImageIdent::file("holiday.jpg", 4_812_331);
/// assert_ne!(a, b);
/// assert_eq!(b.as_str(), "file:holiday.jpg:4812331");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageIdent(String);

impl ImageIdent {
    /// Identity for a project-backed image.
    pub fn project(id: &str) -> Self {
        Self(format!("project:{id}"))
    }

    /// Identity for a standalone file, keyed by name and byte size.
    pub fn file(name: &str, size: u64) -> Self {
        Self(format!("file:{name}:{size}"))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageIdent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_sources_distinct_keys() {
        assert_ne!(ImageIdent::project("a"), ImageIdent::project("b"));
        assert_ne!(
            ImageIdent::file("a.png", 100),
            ImageIdent::file("a.png", 101)
        );
        assert_ne!(ImageIdent::project("a.png"), ImageIdent::file("a.png", 0));
    }
}
