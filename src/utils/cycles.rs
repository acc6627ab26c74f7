//! CPU cycle counter.
//!
//! Read around every timed repetition alongside the wall clock, so the report
//! can show cycles per element next to the microsecond figures. Enabled by the
//! default `cpu_cycles` feature on x86, x86_64 and aarch64; elsewhere (or with
//! the feature off) [`read_cycles`] returns `None` and the column stays empty.

/// Read the current CPU cycle counter / timer.
///
/// On x86_64: Uses RDTSC with LFENCE for serialization.
/// On aarch64: Uses CNTVCT_EL0 (virtual timer, accessible from userspace).
#[inline(always)]
pub fn read_cycles() -> Option<u64> {
    #[cfg(all(feature = "cpu_cycles", target_arch = "x86_64"))]
    {
        Some(read_cycles_x86_64())
    }

    #[cfg(all(feature = "cpu_cycles", target_arch = "x86"))]
    {
        Some(read_cycles_x86())
    }

    #[cfg(all(feature = "cpu_cycles", target_arch = "aarch64"))]
    {
        Some(read_cycles_aarch64())
    }

    #[cfg(not(all(
        feature = "cpu_cycles",
        any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")
    )))]
    {
        None
    }
}

/// Whether [`read_cycles`] yields values on this build.
pub const fn cycles_available() -> bool {
    cfg!(all(
        feature = "cpu_cycles",
        any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")
    ))
}

#[cfg(all(feature = "cpu_cycles", target_arch = "x86_64"))]
#[inline(always)]
fn read_cycles_x86_64() -> u64 {
    use core::arch::x86_64::*;
    unsafe {
        // LFENCE keeps RDTSC from being reordered around the measured code
        _mm_lfence();
        let cycles = _rdtsc();
        _mm_lfence();
        cycles
    }
}

#[cfg(all(feature = "cpu_cycles", target_arch = "x86"))]
#[inline(always)]
fn read_cycles_x86() -> u64 {
    use core::arch::x86::*;
    unsafe {
        _mm_lfence();
        let cycles = _rdtsc();
        _mm_lfence();
        cycles
    }
}

#[cfg(all(feature = "cpu_cycles", target_arch = "aarch64"))]
#[inline(always)]
fn read_cycles_aarch64() -> u64 {
    // Fixed-frequency virtual timer, not core cycles
    let val: u64;
    unsafe {
        core::arch::asm!("mrs {}, cntvct_el0", out(reg) val);
    }
    val
}

/// Cycles elapsed between two readings, if both were taken.
#[inline(always)]
pub fn cycles_between(start: Option<u64>, end: Option<u64>) -> Option<u64> {
    match (start, end) {
        (Some(s), Some(e)) => Some(e.saturating_sub(s)),
        _ => None,
    }
}
