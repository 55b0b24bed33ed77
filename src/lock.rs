//! Per-strip update lock.

use core::hint::spin_loop;
use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::RawMutex;

/// Raw mutex backed by a flag owned by the mutex itself.
///
/// Unlike `CriticalSectionRawMutex`, two instances never wait on each other
/// and interrupts stay enabled while the lock is held. A contender busy-waits
/// until the holder is done, so a strip guarded by this lock must not be
/// updated from an interrupt that can preempt one of its own updates; use
/// `CriticalSectionRawMutex` there.
pub struct SpinRawMutex {
    locked: AtomicBool,
}

impl SpinRawMutex {
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    fn acquire(&self) {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            while self.locked.load(Ordering::Relaxed) {
                spin_loop();
            }
        }
    }
}

impl Default for SpinRawMutex {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases the flag when dropped, also on unwind
struct Release<'a>(&'a AtomicBool);

impl Drop for Release<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// Safety: `acquire` only returns once this thread has flipped the flag from
// unlocked to locked, and the flag is cleared only after `f` returns.
unsafe impl RawMutex for SpinRawMutex {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self::new();

    fn lock<R>(&self, f: impl FnOnce() -> R) -> R {
        self.acquire();
        let _release = Release(&self.locked);
        f()
    }
}
