use super::Rect;

/// One horizontal span of the skyline: the lowest free y over `[x, x + width)`.
#[derive(Debug, Clone, Copy)]
struct SkylineNode {
    x: u32,
    y: u32,
    width: u32,
}

/// Skyline bin packer for a single atlas page.
///
/// Keeps a left-to-right list of spans describing the lowest free vertical
/// position at each horizontal offset. Rectangles are placed at the lowest-y
/// span that fits, ties broken by lowest x.
pub struct SkylinePacker {
    page_width: u32,
    page_height: u32,
    padding: u32,
    nodes: Vec<SkylineNode>,
}

impl SkylinePacker {
    pub fn new(width: u32, height: u32, padding: u32) -> Self {
        Self {
            page_width: width,
            page_height: height,
            padding,
            nodes: vec![SkylineNode {
                x: 0,
                y: 0,
                width,
            }],
        }
    }

    /// Try to place a rectangle with the given dimensions.
    /// Returns the placed rectangle if it fits on this page.
    pub fn insert(&mut self, width: u32, height: u32) -> Option<Rect> {
        let rect = self.find_position(width, height)?;
        // Reserve trailing padding so the next sprite cannot touch this one.
        // The fit test above ignores padding, so a rectangle is never
        // rejected for the gap that would follow it at the page edge.
        let occupied = (rect.width + self.padding).min(self.page_width - rect.x);
        self.raise(rect.x, rect.bottom() + self.padding, occupied);
        Some(rect)
    }

    fn find_position(&self, width: u32, height: u32) -> Option<Rect> {
        let mut best: Option<Rect> = None;

        for index in 0..self.nodes.len() {
            let Some(y) = self.span_height(index, width) else {
                continue;
            };
            if y + height > self.page_height {
                continue;
            }

            let x = self.nodes[index].x;
            let better = match &best {
                None => true,
                Some(b) => y < b.y || (y == b.y && x < b.x),
            };
            if better {
                best = Some(Rect::new(x, y, width, height));
            }
        }

        best
    }

    /// Lowest y at which a span of `width` starting at node `index` can rest,
    /// or None if the span runs past the right page edge.
    fn span_height(&self, index: usize, width: u32) -> Option<u32> {
        let x = self.nodes[index].x;
        if x + width > self.page_width {
            return None;
        }

        let mut y = 0;
        let mut remaining = width;
        for node in &self.nodes[index..] {
            y = y.max(node.y);
            if node.width >= remaining {
                return Some(y);
            }
            remaining -= node.width;
        }

        // Nodes tile the full page width, so the span always terminates
        None
    }

    /// Raise the skyline to `top` over `[x, x + width)`.
    fn raise(&mut self, x: u32, top: u32, width: u32) {
        let end = x + width;
        // Placements always start on a node boundary
        let Some(index) = self.nodes.iter().position(|n| n.x >= x) else {
            return;
        };

        self.nodes.insert(
            index,
            SkylineNode {
                x,
                y: top,
                width,
            },
        );

        // Drop or clip the spans the new node shadows
        let mut i = index + 1;
        while i < self.nodes.len() && self.nodes[i].x < end {
            let node = self.nodes[i];
            if node.x + node.width <= end {
                self.nodes.remove(i);
            } else {
                self.nodes[i].width = node.x + node.width - end;
                self.nodes[i].x = end;
                break;
            }
        }

        self.merge();
    }

    /// Merge adjacent spans at the same height.
    fn merge(&mut self) {
        let mut i = 0;
        while i + 1 < self.nodes.len() {
            if self.nodes[i].y == self.nodes[i + 1].y {
                self.nodes[i].width += self.nodes[i + 1].width;
                self.nodes.remove(i + 1);
            } else {
                i += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_insert_at_origin() {
        let mut packer = SkylinePacker::new(100, 100, 0);
        let rect = packer.insert(50, 50).unwrap();

        assert_eq!(rect, Rect::new(0, 0, 50, 50));
    }

    #[test]
    fn test_lowest_y_wins() {
        let mut packer = SkylinePacker::new(100, 100, 0);
        packer.insert(30, 10).unwrap();

        // The floor right of the first rect is lower than its roof
        let rect = packer.insert(20, 10).unwrap();
        assert_eq!((rect.x, rect.y), (30, 0));

        let rect = packer.insert(50, 10).unwrap();
        assert_eq!((rect.x, rect.y), (50, 0));

        // Page width exhausted at y=0, next row starts on top
        let rect = packer.insert(100, 10).unwrap();
        assert_eq!((rect.x, rect.y), (0, 10));
    }

    #[test]
    fn test_span_over_multiple_nodes() {
        let mut packer = SkylinePacker::new(100, 100, 0);
        packer.insert(40, 20).unwrap();
        packer.insert(60, 10).unwrap();

        // 80 wide needs both spans; rests on the taller one
        let rect = packer.insert(80, 10).unwrap();
        assert_eq!((rect.x, rect.y), (0, 20));
    }

    #[test]
    fn test_too_large() {
        let mut packer = SkylinePacker::new(50, 50, 0);
        assert!(packer.insert(60, 10).is_none());
        assert!(packer.insert(10, 60).is_none());

        assert!(packer.insert(50, 50).is_some());
        assert!(packer.insert(1, 1).is_none());
    }

    #[test]
    fn test_no_overlaps() {
        let mut packer = SkylinePacker::new(128, 128, 0);
        let mut placed = Vec::new();
        for _ in 0..4 {
            placed.push(packer.insert(64, 64).unwrap());
        }
        assert!(packer.insert(64, 64).is_none());

        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn test_padding_separates_spans() {
        let mut packer = SkylinePacker::new(100, 100, 3);
        let first = packer.insert(10, 10).unwrap();
        let second = packer.insert(10, 10).unwrap();

        assert_eq!(first.x, 0);
        assert_eq!(second.x, 13);

        // Next row sits below the padding gap
        let mut packer = SkylinePacker::new(10, 100, 3);
        packer.insert(10, 10).unwrap();
        let below = packer.insert(10, 10).unwrap();
        assert_eq!(below.y, 13);
    }

    #[test]
    fn test_padding_does_not_block_page_edge() {
        // 10 + 4 padding would overhang the right edge, but the gap only
        // matters between sprites, so the fit must still succeed.
        let mut packer = SkylinePacker::new(20, 20, 4);
        packer.insert(10, 10).unwrap();

        let rect = packer.insert(6, 6).unwrap();
        assert_eq!((rect.x, rect.y), (14, 0));
    }
}
