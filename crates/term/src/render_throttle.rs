/// Redraw gate for the frame loop.
///
/// A frame whose fingerprint matches the last drawn one is skipped until
/// `min_static_interval_ms` has passed. Dragging and ticking change the
/// fingerprint, so the board still redraws immediately on input.
#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Forget the last frame so the next call always renders (resize).
    pub fn reset(&mut self) {
        self.has_rendered = false;
    }

    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64) -> bool {
        if !self.has_rendered || fingerprint != self.last_fingerprint {
            self.has_rendered = true;
            self.last_render_ms = now_ms;
            self.last_fingerprint = fingerprint;
            return true;
        }

        if now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms {
            self.last_render_ms = now_ms;
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_and_changes_render() {
        let mut t = RenderThrottle::new(250);
        assert!(t.should_render(0, 1));
        assert!(!t.should_render(10, 1));
        assert!(t.should_render(20, 2));
    }

    #[test]
    fn static_frame_refreshes_after_interval() {
        let mut t = RenderThrottle::new(250);
        assert!(t.should_render(0, 7));
        assert!(!t.should_render(249, 7));
        assert!(t.should_render(250, 7));
        assert!(!t.should_render(300, 7));
    }

    #[test]
    fn reset_forces_render() {
        let mut t = RenderThrottle::new(1000);
        assert!(t.should_render(0, 3));
        t.reset();
        assert!(t.should_render(1, 3));
    }
}
