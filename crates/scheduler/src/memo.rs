use parking_lot::Mutex;

/// Consecutive-duplicate gate.
///
/// Admits a value only when it differs from the previously admitted one.
/// Repeated clicks on the same target must not re-trigger the downstream
/// resolution pipeline; a different target, or a `reset`, re-opens the gate.
pub struct LastSeen<T>
where
    T: PartialEq + Send,
{
    last: Mutex<Option<T>>,
}

impl<T> LastSeen<T>
where
    T: PartialEq + Send,
{
    pub fn new() -> Self {
        Self {
            last: Mutex::new(None),
        }
    }

    /// Returns `true` and remembers `value` when it differs from the last
    /// admitted value; returns `false` for a consecutive duplicate.
    pub fn admit(&self, value: T) -> bool {
        let mut guard = self.last.lock();
        if guard.as_ref() == Some(&value) {
            return false;
        }
        *guard = Some(value);
        true
    }

    pub fn reset(&self) {
        *self.last.lock() = None;
    }
}

impl<T> Default for LastSeen<T>
where
    T: PartialEq + Send,
{
    fn default() -> Self {
        Self::new()
    }
}
