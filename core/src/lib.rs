//! # Gleaner Core
//!
//! Extracts renderable mesh geometry from glTF documents by walking the raw
//! byte ranges behind accessors and buffer views.

pub mod gltf;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
