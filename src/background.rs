use std::sync::{Arc, Mutex};

/// Result slot shared between the UI thread and one background job.
///
/// Every `start` swaps in a fresh slot, so a job started earlier can still
/// finish but its value lands in a slot nobody polls anymore. The latest
/// request always wins.
pub struct Pending<T> {
    slot: Arc<Mutex<Option<T>>>,
    active: bool,
}

/// Handle given to the background job to deliver its value
pub struct Completer<T> {
    slot: Arc<Mutex<Option<T>>>,
}

impl<T> Pending<T> {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            active: false,
        }
    }

    /// Begin a new job, superseding any job still in flight
    pub fn start(&mut self) -> Completer<T> {
        self.slot = Arc::new(Mutex::new(None));
        self.active = true;
        Completer {
            slot: Arc::clone(&self.slot),
        }
    }

    /// Forget the current job without waiting for it
    pub fn cancel(&mut self) {
        self.slot = Arc::new(Mutex::new(None));
        self.active = false;
    }

    /// Take the value of the current job if it has finished
    pub fn poll(&mut self) -> Option<T> {
        if !self.active {
            return None;
        }

        let value = match self.slot.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };

        if value.is_some() {
            self.active = false;
        }
        value
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl<T> Default for Pending<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Completer<T> {
    pub fn complete(self, value: T) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(value);
        }
    }
}
