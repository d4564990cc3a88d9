use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockWriteGuard};

/// Caller-owned value with interior mutability.
///
/// `Shared<T>` is the handle a caller passes to a controlled dropdown: the
/// caller keeps one clone and writes to it, the dropdown keeps another and
/// only reads. Clones share the same value and dirty flag.
///
/// # Example
///
/// ```
/// use groupselect::Shared;
///
/// let fruit = Shared::new(Some("grapes".to_string()));
/// let view = fruit.clone();
/// fruit.set(Some("apple".to_string()));
/// assert_eq!(view.get().as_deref(), Some("apple"));
/// ```
#[derive(Debug)]
pub struct Shared<T> {
    inner: Arc<RwLock<T>>,
    dirty: Arc<AtomicBool>,
}

impl<T> Shared<T> {
    /// Create a new shared value
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Read the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        match self.inner.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    /// Set a new value
    pub fn set(&self, value: T) {
        *self.write() = value;
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Update the value using a closure
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        f(&mut self.write());
        self.dirty.store(true, Ordering::SeqCst);
    }

    fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Check if the value has been written since the last check
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_value_and_dirty_flag() {
        let a = Shared::new(1);
        let b = a.clone();
        assert!(!b.is_dirty());

        a.update(|v| *v += 1);
        assert_eq!(b.get(), 2);
        assert!(b.is_dirty());

        b.clear_dirty();
        assert!(!a.is_dirty());
    }

    #[test]
    fn test_writes_survive_poisoned_lock() {
        let s = Shared::new(1);
        let panicking = s.clone();
        let joined = std::thread::spawn(move || panicking.update(|_| panic!("writer died")))
            .join();
        assert!(joined.is_err());

        s.set(5);
        assert_eq!(s.get(), 5);
        s.update(|v| *v += 1);
        assert_eq!(s.get(), 6);
        assert!(s.is_dirty());
    }

    #[test]
    fn test_with_reads_in_place() {
        let s = Shared::new(String::from("leek"));
        assert_eq!(s.with(|v| v.len()), 4);
    }
}
