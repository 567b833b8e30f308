mod builder;
mod compositor;
mod types;

pub use builder::AtlasBuilder;
pub use compositor::composite_page;
pub use types::{Atlas, AtlasPage, PlacedRect};
