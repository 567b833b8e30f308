pub mod atlas;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod packing;
pub mod sprite;

pub use atlas::{Atlas, AtlasBuilder, AtlasPage, PlacedRect};
pub use error::QuiltError;
pub use sprite::{SpriteRegistry, SpriteSource};
