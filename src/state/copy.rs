#[cfg(test)]
#[path = "copy_test.rs"]
mod copy_test;

use std::time::Duration;

/// How long a "copied" marker stays visible.
pub const COPY_FEEDBACK_DURATION: Duration = Duration::from_secs(2);

/// Which list entry was just copied, if any. Presentational only.
///
/// Each mark gets a new generation; an expiry carries the generation it
/// was scheduled for, so an older timer never clears a newer mark.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CopyFeedback {
    active: Option<usize>,
    generation: u64,
}

impl CopyFeedback {
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Mark `index` as copied, replacing any previous mark. Returns the
    /// generation the expiry must present.
    pub fn mark(&mut self, index: usize) -> u64 {
        self.generation += 1;
        self.active = Some(index);
        self.generation
    }

    /// Follow the marked entry down one slot after a prepend.
    pub fn shift_down(&mut self) {
        if let Some(index) = &mut self.active {
            *index += 1;
        }
    }

    /// Clear the mark if it is still the one scheduled as `generation`.
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.active.is_none() {
            return false;
        }
        self.active = None;
        true
    }
}
