use std::collections::HashMap;

use image::RgbaImage;

use crate::error::QuiltError;

/// A named source image awaiting placement
#[derive(Debug, Clone)]
pub struct SpriteSource {
    /// Unique identifier within one packing job
    pub name: String,
    /// Decoded RGBA pixel data
    pub image: RgbaImage,
}

impl SpriteSource {
    pub fn new(name: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            name: name.into(),
            image,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Insertion-ordered set of source sprites, looked up by name during
/// compositing. Sprites are immutable once registered.
#[derive(Debug, Default)]
pub struct SpriteRegistry {
    sprites: Vec<SpriteSource>,
    by_name: HashMap<String, usize>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sprite. Names must be unique within the job.
    pub fn insert(&mut self, sprite: SpriteSource) -> Result<(), QuiltError> {
        if self.by_name.contains_key(&sprite.name) {
            return Err(QuiltError::DuplicateSprite(sprite.name));
        }
        self.by_name.insert(sprite.name.clone(), self.sprites.len());
        self.sprites.push(sprite);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&SpriteSource> {
        self.by_name.get(name).map(|&i| &self.sprites[i])
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Sprites in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SpriteSource> {
        self.sprites.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(name: &str) -> SpriteSource {
        SpriteSource::new(name, RgbaImage::new(4, 4))
    }

    #[test]
    fn test_lookup_by_name() {
        let mut registry = SpriteRegistry::new();
        registry.insert(sprite("hero")).unwrap();
        registry.insert(sprite("tree")).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("tree").unwrap().name, "tree");
        assert!(registry.get("rock").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = SpriteRegistry::new();
        registry.insert(sprite("hero")).unwrap();

        let err = registry.insert(sprite("hero")).unwrap_err();
        assert!(matches!(err, QuiltError::DuplicateSprite(name) if name == "hero"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_iteration_preserves_insertion_order() {
        let mut registry = SpriteRegistry::new();
        for name in ["c", "a", "b"] {
            registry.insert(sprite(name)).unwrap();
        }

        let names: Vec<_> = registry.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }
}
