use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Final placement of one sprite: page index plus the inner (unextruded)
/// rectangle in page coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedRect {
    pub name: String,
    /// 0-based index of the page this sprite landed on
    pub page: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One composite page of a packed atlas
#[derive(Debug)]
pub struct AtlasPage {
    pub index: u32,
    /// Actual used extent, may be smaller than the configured maximum
    pub width: u32,
    pub height: u32,
    /// Rendered page image; built once, never mutated afterwards
    pub image: RgbaImage,
}

/// A completed packing job: composite pages plus one placement per sprite,
/// in the original input order.
#[derive(Debug)]
pub struct Atlas {
    pub pages: Vec<AtlasPage>,
    pub placements: Vec<PlacedRect>,
}
