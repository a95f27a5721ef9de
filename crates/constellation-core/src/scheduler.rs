use std::cell::Cell;
use std::rc::Rc;

/// Host frame-scheduling primitive.
///
/// The browser front end backs this with `requestAnimationFrame`; tests and
/// headless runs use [`ManualScheduler`] and step frames themselves.
pub trait FrameScheduler {
    /// Arm exactly one future frame callback.
    fn request_frame(&mut self);
}

/// Counts frame requests instead of firing them.
///
/// Clones share the same counter, so a test can keep one handle while the
/// animation driver owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    pending: Rc<Cell<u64>>,
    requested: Rc<Cell<u64>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one armed frame, if any.
    pub fn take_pending(&self) -> bool {
        let p = self.pending.get();
        if p == 0 {
            return false;
        }
        self.pending.set(p - 1);
        true
    }

    #[inline]
    pub fn pending(&self) -> u64 {
        self.pending.get()
    }

    /// Total requests ever made.
    #[inline]
    pub fn requested(&self) -> u64 {
        self.requested.get()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending.set(self.pending.get() + 1);
        self.requested.set(self.requested.get() + 1);
    }
}
