mod loader;
mod source;

pub use loader::load_sprites;
pub use source::{SpriteRegistry, SpriteSource};
