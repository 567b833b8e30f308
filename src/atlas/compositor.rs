use image::{RgbaImage, imageops};

use super::types::{AtlasPage, PlacedRect};
use crate::sprite::SpriteRegistry;

/// Render one page: blit every sprite placed on it into a transparent
/// buffer of the page's tight extent, then extrude sprite edges.
///
/// Source pixel data is read-only; the returned page owns its buffer.
pub fn composite_page(
    index: u32,
    width: u32,
    height: u32,
    placements: &[&PlacedRect],
    registry: &SpriteRegistry,
    extrude: u32,
) -> AtlasPage {
    let mut image = RgbaImage::new(width, height);

    for placed in placements {
        // Placements are produced from this registry's sprites
        #[expect(clippy::expect_used, reason = "placement names come from the registry")]
        let sprite = registry
            .get(&placed.name)
            .expect("placed sprite should be registered");

        if extrude > 0 {
            extrude_sprite(&mut image, &sprite.image, placed.x, placed.y, extrude);
        }

        imageops::replace(
            &mut image,
            &sprite.image,
            i64::from(placed.x),
            i64::from(placed.y),
        );
    }

    AtlasPage {
        index,
        width,
        height,
        image,
    }
}

/// Replicate the sprite's border pixels outward by `extrude` pixels on each
/// side, corners filled from the nearest corner pixel. Writes outside the
/// page bounds are skipped.
fn extrude_sprite(page: &mut RgbaImage, sprite: &RgbaImage, x: u32, y: u32, extrude: u32) {
    let (w, h) = sprite.dimensions();
    let (page_w, page_h) = page.dimensions();
    if w == 0 || h == 0 {
        return;
    }

    for e in 1..=extrude {
        // Top edge
        if y >= e {
            for sx in 0..w {
                let pixel = sprite.get_pixel(sx, 0);
                page.put_pixel(x + sx, y - e, *pixel);
            }
        }

        // Bottom edge
        if y + h - 1 + e < page_h {
            for sx in 0..w {
                let pixel = sprite.get_pixel(sx, h - 1);
                page.put_pixel(x + sx, y + h - 1 + e, *pixel);
            }
        }

        // Left edge
        if x >= e {
            for sy in 0..h {
                let pixel = sprite.get_pixel(0, sy);
                page.put_pixel(x - e, y + sy, *pixel);
            }
        }

        // Right edge
        if x + w - 1 + e < page_w {
            for sy in 0..h {
                let pixel = sprite.get_pixel(w - 1, sy);
                page.put_pixel(x + w - 1 + e, y + sy, *pixel);
            }
        }
    }

    // Corner blocks replicate the nearest corner pixel
    for dy in 1..=extrude {
        for dx in 1..=extrude {
            if x >= dx && y >= dy {
                page.put_pixel(x - dx, y - dy, *sprite.get_pixel(0, 0));
            }
            if x + w - 1 + dx < page_w && y >= dy {
                page.put_pixel(x + w - 1 + dx, y - dy, *sprite.get_pixel(w - 1, 0));
            }
            if x >= dx && y + h - 1 + dy < page_h {
                page.put_pixel(x - dx, y + h - 1 + dy, *sprite.get_pixel(0, h - 1));
            }
            if x + w - 1 + dx < page_w && y + h - 1 + dy < page_h {
                page.put_pixel(x + w - 1 + dx, y + h - 1 + dy, *sprite.get_pixel(w - 1, h - 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::SpriteSource;
    use image::Rgba;

    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    /// Sprite with a distinct pixel at every position
    fn gradient_sprite(name: &str, w: u32, h: u32) -> SpriteSource {
        let mut img = RgbaImage::new(w, h);
        for sy in 0..h {
            for sx in 0..w {
                #[expect(clippy::cast_possible_truncation, reason = "test sprites are tiny")]
                img.put_pixel(sx, sy, Rgba([(sx * 20) as u8, (sy * 20) as u8, 0, 255]));
            }
        }
        SpriteSource::new(name, img)
    }

    fn placed(name: &str, x: u32, y: u32, width: u32, height: u32) -> PlacedRect {
        PlacedRect {
            name: name.to_string(),
            page: 0,
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn test_blit_copies_pixels() {
        let mut registry = SpriteRegistry::new();
        registry.insert(gradient_sprite("a", 2, 2)).unwrap();

        let placement = placed("a", 1, 1, 2, 2);
        let page = composite_page(0, 4, 4, &[&placement], &registry, 0);

        let sprite = &registry.get("a").unwrap().image;
        assert_eq!(page.image.get_pixel(1, 1), sprite.get_pixel(0, 0));
        assert_eq!(page.image.get_pixel(2, 2), sprite.get_pixel(1, 1));

        // Untouched area stays transparent
        assert_eq!(*page.image.get_pixel(0, 0), CLEAR);
        assert_eq!(*page.image.get_pixel(3, 3), CLEAR);
    }

    #[test]
    fn test_extrusion_replicates_edges() {
        // 10x10 sprite at the page origin with extrude=2: the left and top
        // borders fall outside the page and are skipped, the right and
        // bottom borders replicate the edge pixels.
        let mut registry = SpriteRegistry::new();
        registry.insert(gradient_sprite("a", 10, 10)).unwrap();

        let placement = placed("a", 0, 0, 10, 10);
        let page = composite_page(0, 12, 12, &[&placement], &registry, 2);

        let sprite = &registry.get("a").unwrap().image;
        assert_eq!(page.image.get_pixel(10, 5), sprite.get_pixel(9, 5));
        assert_eq!(page.image.get_pixel(11, 5), sprite.get_pixel(9, 5));
        assert_eq!(page.image.get_pixel(5, 10), sprite.get_pixel(5, 9));
        assert_eq!(page.image.get_pixel(5, 11), sprite.get_pixel(5, 9));

        // Corner block replicates the corner pixel
        assert_eq!(page.image.get_pixel(10, 10), sprite.get_pixel(9, 9));
        assert_eq!(page.image.get_pixel(11, 11), sprite.get_pixel(9, 9));
        assert_eq!(page.image.get_pixel(10, 11), sprite.get_pixel(9, 9));
    }

    #[test]
    fn test_extrusion_fills_full_corner_blocks() {
        let mut registry = SpriteRegistry::new();
        registry.insert(gradient_sprite("a", 4, 4)).unwrap();

        let placement = placed("a", 2, 2, 4, 4);
        let page = composite_page(0, 8, 8, &[&placement], &registry, 2);

        let sprite = &registry.get("a").unwrap().image;
        // Every pixel of the 2x2 top-left corner block
        for py in 0..2 {
            for px in 0..2 {
                assert_eq!(page.image.get_pixel(px, py), sprite.get_pixel(0, 0));
            }
        }
        // Bottom-right block
        for py in 6..8 {
            for px in 6..8 {
                assert_eq!(page.image.get_pixel(px, py), sprite.get_pixel(3, 3));
            }
        }
        // Edge bands
        assert_eq!(page.image.get_pixel(2, 0), sprite.get_pixel(0, 0));
        assert_eq!(page.image.get_pixel(0, 3), sprite.get_pixel(0, 1));
    }

    #[test]
    fn test_extrusion_clipped_at_page_bounds_does_not_panic() {
        let mut registry = SpriteRegistry::new();
        registry.insert(gradient_sprite("a", 4, 4)).unwrap();

        // Page exactly the sprite size: every border write is out of bounds
        let placement = placed("a", 0, 0, 4, 4);
        let page = composite_page(0, 4, 4, &[&placement], &registry, 3);

        let sprite = &registry.get("a").unwrap().image;
        assert_eq!(page.image.get_pixel(0, 0), sprite.get_pixel(0, 0));
        assert_eq!(page.image.get_pixel(3, 3), sprite.get_pixel(3, 3));
    }
}
