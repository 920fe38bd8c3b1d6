use super::{DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key + command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for a frame.
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer; no per-frame allocation once warmed
///
/// # Composition
///
/// Each backdrop layer records into its own list. The host merges them into a
/// frame list with [`append`](Self::append) before handing it to renderers:
///
/// ```ignore
/// frame.clear();
/// frame.append(stars.list());
/// frame.append(particles.list());
/// ```
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes a draw command with the given z-index.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
        });

        self.sorted_dirty = true;
    }

    /// Re-records every item of `other` (in its insertion order) after the items
    /// already in `self`. Z values are kept; insertion order is renumbered.
    pub fn append(&mut self, other: &DrawList) {
        self.items.reserve(other.items.len());
        for item in &other.items {
            self.push(item.key.z, item.cmd.clone());
        }
    }

    /// Iterates items in paint order without cloning draw commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // Stable ordering is ensured by SortKey including insertion order.
        self.sorted_indices
            .sort_by(|&a, &b| self.items[a].key.cmp(&self.items[b].key));

        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    fn radius_of(item: &DrawItem) -> f32 {
        match &item.cmd {
            DrawCmd::Circle(c) => c.radius,
            DrawCmd::Line(l) => l.width,
        }
    }

    // ── paint order ───────────────────────────────────────────────────────

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut list = DrawList::new();
        list.push_solid_circle(ZIndex(1), Vec2::zero(), 1.0, Color::transparent());
        list.push_solid_circle(ZIndex(0), Vec2::zero(), 2.0, Color::transparent());
        list.push_solid_circle(ZIndex(1), Vec2::zero(), 3.0, Color::transparent());
        list.push_solid_circle(ZIndex(0), Vec2::zero(), 4.0, Color::transparent());

        let radii: Vec<f32> = list.iter_in_paint_order().map(radius_of).collect();
        assert_eq!(radii, vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn clear_resets_items_and_order() {
        let mut list = DrawList::new();
        list.push_line(ZIndex(0), Vec2::zero(), Vec2::new(1.0, 1.0), 1.0, Color::transparent());
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.iter_in_paint_order().count(), 0);

        list.push_solid_circle(ZIndex(0), Vec2::zero(), 1.0, Color::transparent());
        assert_eq!(list.items()[0].key.order, 0);
    }

    // ── append ────────────────────────────────────────────────────────────

    #[test]
    fn append_keeps_z_and_follows_existing_items() {
        let mut back = DrawList::new();
        back.push_line(ZIndex(0), Vec2::zero(), Vec2::new(5.0, 0.0), 1.0, Color::transparent());
        back.push_solid_circle(ZIndex(0), Vec2::zero(), 2.0, Color::transparent());

        let mut front = DrawList::new();
        front.push_solid_circle(ZIndex(1), Vec2::zero(), 3.0, Color::transparent());

        let mut frame = DrawList::new();
        frame.append(&front);
        frame.append(&back);

        assert_eq!(frame.len(), 3);
        let order: Vec<f32> = frame.iter_in_paint_order().map(radius_of).collect();
        // Back layer first despite being appended last.
        assert_eq!(order, vec![1.0, 2.0, 3.0]);
    }
}
