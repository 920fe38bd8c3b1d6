use std::cell::Cell;
use std::rc::Rc;

use astral_engine::coords::Viewport;

/// Shared, single-threaded viewport size.
///
/// Clones observe the same value. Layers hold a clone and read it every
/// frame; only the backdrop's resize entry point writes it. A write is visible
/// to the very next read.
#[derive(Debug, Clone, Default)]
pub struct ViewportSignal(Rc<Cell<Viewport>>);

impl ViewportSignal {
    pub fn new(viewport: Viewport) -> Self {
        Self(Rc::new(Cell::new(viewport)))
    }

    #[inline]
    pub fn get(&self) -> Viewport {
        self.0.get()
    }

    #[inline]
    pub fn set(&self, viewport: Viewport) {
        self.0.set(viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_writes() {
        let writer = ViewportSignal::new(Viewport::new(800.0, 600.0));
        let reader = writer.clone();
        writer.set(Viewport::new(320.0, 240.0));
        assert_eq!(reader.get(), Viewport::new(320.0, 240.0));
    }
}
