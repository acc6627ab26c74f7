//! Thread pinning for the measuring thread.
//!
//! Wall-clock benchmarks are sensitive to the scheduler migrating the thread
//! between cores mid-measurement. On Linux the thread is pinned to the core it
//! is currently running on, and the original affinity mask is restored when the
//! guard is dropped. Other platforms get a no-op guard.

use std::sync::Once;

use log::warn;

static PIN_UNAVAILABLE: Once = Once::new();

// ============================================================================
// Linux implementation using libc
// ============================================================================

#[cfg(target_os = "linux")]
mod platform {
    use std::cell::RefCell;

    thread_local! {
        static SAVED_MASK: RefCell<Option<libc::cpu_set_t>> = const { RefCell::new(None) };
    }

    pub fn online_cores() -> Option<usize> {
        let n = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
        (n > 0).then_some(n as usize)
    }

    pub fn current_core() -> Option<usize> {
        let cpu = unsafe { libc::sched_getcpu() };
        (cpu >= 0).then_some(cpu as usize)
    }

    /// Remember the current mask; only the outermost pin saves it.
    pub fn save_mask() -> bool {
        SAVED_MASK.with(|cell| {
            let mut saved = cell.borrow_mut();
            if saved.is_some() {
                return true;
            }
            unsafe {
                let mut set: libc::cpu_set_t = std::mem::zeroed();
                if libc::sched_getaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &mut set) == 0 {
                    *saved = Some(set);
                    true
                } else {
                    false
                }
            }
        })
    }

    pub fn pin(core: usize) -> bool {
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            libc::CPU_ZERO(&mut set);
            libc::CPU_SET(core, &mut set);
            libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) == 0
        }
    }

    pub fn restore_mask() -> bool {
        SAVED_MASK.with(|cell| match cell.borrow_mut().take() {
            Some(set) => unsafe {
                libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) == 0
            },
            None => false,
        })
    }
}

// ============================================================================
// Fallback: pinning unsupported
// ============================================================================

#[cfg(not(target_os = "linux"))]
mod platform {
    pub fn online_cores() -> Option<usize> {
        std::thread::available_parallelism().ok().map(|n| n.get())
    }
    pub fn current_core() -> Option<usize> {
        None
    }
    pub fn save_mask() -> bool {
        true
    }
    pub fn pin(_core: usize) -> bool {
        false
    }
    pub fn restore_mask() -> bool {
        true
    }
}

/// Number of online cores, if the platform reports it.
pub fn online_cores() -> Option<usize> {
    platform::online_cores()
}

/// Pin the current thread to the core it is running on (core 0 if unknown).
///
/// # Returns
/// The core pinned to, or `None` if pinning is unavailable.
pub fn pin_to_current_core() -> Option<usize> {
    let core = platform::current_core().unwrap_or(0);
    if !platform::save_mask() {
        return None;
    }
    if platform::pin(core) {
        Some(core)
    } else {
        platform::restore_mask();
        None
    }
}

/// Restore the affinity mask saved by the last successful pin.
pub fn unpin() -> bool {
    platform::restore_mask()
}

// ============================================================================
// RAII Guard
// ============================================================================

/// Pins on creation, unpins on drop (also on unwind).
///
/// Guards nest: an inner guard leaves the mask saved by the outer one alone,
/// so only the outermost drop restores the original affinity.
pub struct CpuPinGuard {
    pinned_core: Option<usize>,
    owns_mask: bool,
}

impl CpuPinGuard {
    pub fn new() -> Self {
        let already_pinned = PIN_DEPTH.with(|d| {
            let depth = d.get();
            d.set(depth + 1);
            depth > 0
        });
        let pinned_core = if already_pinned {
            platform::current_core()
        } else {
            let core = pin_to_current_core();
            if core.is_none() {
                PIN_UNAVAILABLE.call_once(|| {
                    warn!("CPU pinning unavailable; measurements run unpinned");
                });
            }
            core
        };
        Self {
            pinned_core,
            owns_mask: !already_pinned,
        }
    }

    pub fn core_id(&self) -> Option<usize> {
        self.pinned_core
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned_core.is_some()
    }
}

thread_local! {
    static PIN_DEPTH: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

impl Drop for CpuPinGuard {
    fn drop(&mut self) {
        PIN_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
        if self.owns_mask && self.pinned_core.is_some() {
            unpin();
        }
    }
}

impl Default for CpuPinGuard {
    fn default() -> Self {
        Self::new()
    }
}
