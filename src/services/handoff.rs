use std::sync::Mutex;

/// Transition-scoped payload slot. The value rides along with a single view
/// transition: the source view puts it, the destination takes it exactly
/// once, and a view entered out of order simply finds the slot empty.
pub struct Handoff<T> {
    slot: Mutex<Option<T>>,
}

impl<T> Handoff<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Stage a payload for the next transition. A value already staged but
    /// never taken is dropped.
    pub fn put(&self, value: T) {
        *self.slot.lock().unwrap() = Some(value);
    }

    pub fn take(&self) -> Option<T> {
        self.slot.lock().unwrap().take()
    }

    pub fn clear(&self) {
        *self.slot.lock().unwrap() = None;
    }
}

impl<T> Default for Handoff<T> {
    fn default() -> Self {
        Self::new()
    }
}
