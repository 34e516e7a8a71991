//! Latched "menu/HUD needs refresh" signal.
//!
//! Any number of `request` calls between two consumptions collapse into a
//! single `true` from `consume`. This is a latch, not a queue.

#[derive(Debug, Clone, Copy, Default)]
pub struct RefreshLatch {
    dirty: bool,
}

impl RefreshLatch {
    pub fn request(&mut self) {
        self.dirty = true;
    }

    pub fn is_set(&self) -> bool {
        self.dirty
    }

    /// Read and clear.
    pub fn consume(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_many_requests_one_consumption() {
        let mut latch = RefreshLatch::default();
        latch.request();
        latch.request();
        latch.request();
        assert!(latch.consume());
        assert!(!latch.consume());
    }

    #[test]
    fn test_consume_without_request() {
        let mut latch = RefreshLatch::default();
        assert!(!latch.is_set());
        assert!(!latch.consume());
    }
}
