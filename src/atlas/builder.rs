use log::{debug, info};
use rayon::prelude::*;

use super::compositor::composite_page;
use super::types::{Atlas, AtlasPage, PlacedRect};
use crate::error::QuiltError;
use crate::packing::{Rect, SkylinePacker};
use crate::sprite::{SpriteRegistry, SpriteSource};

/// Configuration for atlas assembly
pub struct AtlasBuilder {
    pub max_width: u32,
    pub max_height: u32,
    pub padding: u32,
    pub extrude: u32,
}

impl AtlasBuilder {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
            padding: 0,
            extrude: 0,
        }
    }

    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn extrude(mut self, extrude: u32) -> Self {
        self.extrude = extrude;
        self
    }

    /// Pack every registered sprite and render the resulting pages.
    ///
    /// All-or-nothing: if any sprite exceeds the page capacity even alone,
    /// the call fails with the complete list of offending names and no
    /// pages are rendered. Identical inputs always produce an identical
    /// atlas.
    pub fn build(&self, registry: &SpriteRegistry) -> Result<Atlas, QuiltError> {
        if registry.is_empty() {
            return Err(QuiltError::NoImages);
        }

        let sprites: Vec<&SpriteSource> = registry.iter().collect();

        // Collect every sprite that cannot fit an empty page, so the caller
        // sees the complete list in one pass instead of the first offender.
        let unplaceable: Vec<String> = sprites
            .iter()
            .filter(|s| {
                s.width() + self.extrude * 2 > self.max_width
                    || s.height() + self.extrude * 2 > self.max_height
            })
            .map(|s| s.name.clone())
            .collect();
        if !unplaceable.is_empty() {
            return Err(QuiltError::Unplaceable {
                names: unplaceable,
                max_width: self.max_width,
                max_height: self.max_height,
            });
        }

        let placements = self.place_all(&sprites);
        debug_assert!(
            self.layout_is_valid(&placements),
            "packer produced an overlapping or out-of-bounds layout"
        );

        let page_count = placements.iter().map(|p| p.page + 1).max().unwrap_or(0);

        // Pages are independent once placement is fixed
        let pages: Vec<AtlasPage> = (0..page_count)
            .into_par_iter()
            .map(|page| {
                let on_page: Vec<&PlacedRect> =
                    placements.iter().filter(|p| p.page == page).collect();
                // Tight extent over the extruded rectangles
                let (width, height) = on_page.iter().fold((0, 0), |(w, h), p| {
                    (
                        w.max(p.x + p.width + self.extrude),
                        h.max(p.y + p.height + self.extrude),
                    )
                });
                composite_page(page, width, height, &on_page, registry, self.extrude)
            })
            .collect();

        info!(
            "Packed {} sprites onto {} page(s)",
            placements.len(),
            pages.len()
        );

        Ok(Atlas { pages, placements })
    }

    /// Place every sprite, opening pages as needed. Placement happens in
    /// area-descending order (ties keep input order) since larger items
    /// placed first fragment the skyline less; the returned placements are
    /// in registry order regardless.
    #[expect(clippy::cast_possible_truncation, reason = "page count never approaches u32::MAX")]
    fn place_all(&self, sprites: &[&SpriteSource]) -> Vec<PlacedRect> {
        let mut order: Vec<usize> = (0..sprites.len()).collect();
        order.sort_by(|&a, &b| {
            let area_a = u64::from(sprites[a].width()) * u64::from(sprites[a].height());
            let area_b = u64::from(sprites[b].width()) * u64::from(sprites[b].height());
            area_b.cmp(&area_a) // descending; sort is stable
        });

        let mut pages: Vec<SkylinePacker> = Vec::new();
        let mut placed: Vec<Option<PlacedRect>> = vec![None; sprites.len()];

        for i in order {
            let sprite = sprites[i];
            // Reserve extrusion border space during placement
            let w = sprite.width() + self.extrude * 2;
            let h = sprite.height() + self.extrude * 2;

            let mut position: Option<(u32, Rect)> = None;
            for (page, packer) in (0u32..).zip(pages.iter_mut()) {
                if let Some(rect) = packer.insert(w, h) {
                    position = Some((page, rect));
                    break;
                }
            }

            let (page, rect) = match position {
                Some(found) => found,
                None => {
                    let mut packer =
                        SkylinePacker::new(self.max_width, self.max_height, self.padding);
                    let page = pages.len() as u32;
                    // Size was validated against an empty page up front
                    let Some(rect) = packer.insert(w, h) else {
                        debug_assert!(false, "validated sprite failed to fit an empty page");
                        continue;
                    };
                    debug!("Opened page {}", page);
                    pages.push(packer);
                    (page, rect)
                }
            };

            // Stored coordinates are the inner (unextruded) position
            placed[i] = Some(PlacedRect {
                name: sprite.name.clone(),
                page,
                x: rect.x + self.extrude,
                y: rect.y + self.extrude,
                width: sprite.width(),
                height: sprite.height(),
            });
        }

        placed.into_iter().flatten().collect()
    }

    /// Defensive invariant check: extruded rectangles stay in bounds and
    /// never overlap on the same page. A failure here is a packer bug.
    fn layout_is_valid(&self, placements: &[PlacedRect]) -> bool {
        for (i, a) in placements.iter().enumerate() {
            let ra = Rect::new(a.x, a.y, a.width, a.height).inflate(self.extrude);
            if ra.right() > self.max_width || ra.bottom() > self.max_height {
                return false;
            }
            for b in &placements[i + 1..] {
                if b.page != a.page {
                    continue;
                }
                let rb = Rect::new(b.x, b.y, b.width, b.height).inflate(self.extrude);
                if ra.intersects(&rb) {
                    return false;
                }
            }
        }
        true
    }
}
