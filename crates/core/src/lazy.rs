use std::sync::{Mutex, OnceLock};

/// A lazily-initialized slot with a fallible, exactly-once loader.
///
/// Reads take the unsynchronized `OnceLock` fast path; the slow path
/// serializes concurrent first callers on a mutex so the loader runs once
/// before the value is published. A failed load publishes nothing, so the
/// next caller retries.
pub struct OnceCache<T> {
    slot: OnceLock<T>,
    init_lock: Mutex<()>,
}

impl<T> OnceCache<T> {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
            init_lock: Mutex::new(()),
        }
    }

    /// The published value, if a load has completed.
    pub fn get(&self) -> Option<&T> {
        self.slot.get()
    }

    pub fn get_or_try_init<E>(&self, load: impl FnOnce() -> Result<T, E>) -> Result<&T, E> {
        if let Some(value) = self.slot.get() {
            return Ok(value);
        }

        let _guard = self
            .init_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(value) = self.slot.get() {
            return Ok(value);
        }

        let value = load()?;
        Ok(self.slot.get_or_init(|| value))
    }
}

impl<T> Default for OnceCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn concurrent_first_callers_share_a_single_load() {
        let cache = OnceCache::new();
        let loads = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    let value = cache
                        .get_or_try_init(|| {
                            loads.fetch_add(1, Ordering::SeqCst);
                            Ok::<_, Infallible>(42u32)
                        })
                        .expect("init cannot fail");
                    assert_eq!(*value, 42);
                });
            }
        });

        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_load_publishes_nothing_and_retries() {
        let cache = OnceCache::<u32>::new();

        let error = cache
            .get_or_try_init(|| Err::<u32, &str>("boom"))
            .expect_err("first load fails");
        assert_eq!(error, "boom");
        assert!(cache.get().is_none());

        let value = cache
            .get_or_try_init(|| Ok::<_, &str>(7))
            .expect("second load succeeds");
        assert_eq!(*value, 7);
    }

    #[test]
    fn later_loaders_never_run() {
        let cache = OnceCache::new();
        cache
            .get_or_try_init(|| Ok::<_, Infallible>(1u32))
            .expect("first load");

        let value = cache
            .get_or_try_init(|| -> Result<u32, Infallible> {
                panic!("loader must not run after publication");
            })
            .expect("cached read");
        assert_eq!(*value, 1);
    }
}
