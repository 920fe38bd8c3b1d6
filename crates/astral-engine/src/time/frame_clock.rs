/// Per-frame snapshot handed to `App::on_frame`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FrameTime {
    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}

/// Counts the frames drawn for one window.
///
/// Backdrop layers advance one fixed step per frame, so the count is all the
/// timing the runtime keeps.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock and returns the snapshot for the frame being drawn.
    pub fn tick(&mut self) -> FrameTime {
        let ft = FrameTime { frame_index: self.frame_index };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_index_counts_ticks() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
        assert_eq!(clock.tick(), FrameTime { frame_index: 2 });
    }

    #[test]
    fn counter_wraps_instead_of_overflowing() {
        let mut clock = FrameClock { frame_index: u64::MAX };
        assert_eq!(clock.tick().frame_index, u64::MAX);
        assert_eq!(clock.tick().frame_index, 0);
    }
}
