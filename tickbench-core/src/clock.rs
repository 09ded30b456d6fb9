//! High-Precision Tick Counter
//!
//! Reads the TSC on x86_64 and CNTVCT_EL0 on AArch64 for cycle-level
//! resolution, with fallback to the OS monotonic clock (nanosecond units)
//! on other platforms. Ticks are opaque; `ticks_per_second` converts a
//! seconds budget into the counter's own unit.
//!
//! The measurement recipe is the canonical one for timestamp-counter reads:
//! a start timestamp is bracketed `sfence`/`now`/`lfence`, a stop timestamp
//! is preceded by `mfence`. The asymmetry keeps loads and stores of the code
//! under test from drifting across the reads while keeping the reads cheap.

use std::sync::OnceLock;

/// Read the platform tick counter. Monotonic within a single CPU.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub fn now() -> i64 {
    // SAFETY: RDTSC is available on all x86_64 CPUs.
    unsafe { core::arch::x86_64::_rdtsc() as i64 }
}

/// Read the virtual counter timer on AArch64 (comparable to x86 TSC).
#[cfg(target_arch = "aarch64")]
#[inline(always)]
pub fn now() -> i64 {
    let cnt: u64;
    // SAFETY: CNTVCT_EL0 is accessible from EL0 (userspace) on all
    // AArch64 implementations.
    unsafe {
        std::arch::asm!("mrs {}, cntvct_el0", out(reg) cnt, options(nostack, nomem));
    }
    cnt as i64
}

/// OS monotonic clock fallback; one tick is one nanosecond.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline(always)]
pub fn now() -> i64 {
    use std::time::Instant;
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    let epoch = *EPOCH.get_or_init(Instant::now);
    epoch.elapsed().as_nanos() as i64
}

/// Whether this platform reads a hardware cycle counter.
pub const HAS_CYCLE_COUNTER: bool = cfg!(target_arch = "x86_64") || cfg!(target_arch = "aarch64");

// ─── Fences ──────────────────────────────────────────────────────────────────

/// Store fence. Issued immediately before a start timestamp.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub fn sfence() {
    // SAFETY: SFENCE has no preconditions.
    unsafe { core::arch::x86_64::_mm_sfence() }
}

/// Load fence. Issued immediately after a start timestamp.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub fn lfence() {
    // SAFETY: LFENCE has no preconditions.
    unsafe { core::arch::x86_64::_mm_lfence() }
}

/// Full fence. Issued immediately before a stop timestamp.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub fn mfence() {
    // SAFETY: MFENCE has no preconditions.
    unsafe { core::arch::x86_64::_mm_mfence() }
}

/// Store fence (dmb ishst).
#[cfg(target_arch = "aarch64")]
#[inline(always)]
pub fn sfence() {
    // SAFETY: barrier instruction, no operands.
    unsafe { std::arch::asm!("dmb ishst", options(nostack, preserves_flags)) }
}

/// Instruction barrier; serializes the counter read that precedes it.
#[cfg(target_arch = "aarch64")]
#[inline(always)]
pub fn lfence() {
    // SAFETY: barrier instruction, no operands.
    unsafe { std::arch::asm!("isb", options(nostack, preserves_flags)) }
}

/// Full fence (dmb ish).
#[cfg(target_arch = "aarch64")]
#[inline(always)]
pub fn mfence() {
    // SAFETY: barrier instruction, no operands.
    unsafe { std::arch::asm!("dmb ish", options(nostack, preserves_flags)) }
}

/// Store fence; compiler-level only on platforms without a cycle counter.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline(always)]
pub fn sfence() {
    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::Release);
}

/// Load fence; compiler-level only on platforms without a cycle counter.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline(always)]
pub fn lfence() {
    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::Acquire);
}

/// Full fence; compiler-level only on platforms without a cycle counter.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline(always)]
pub fn mfence() {
    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
}

// ─── Frequency probe ─────────────────────────────────────────────────────────

/// Approximate tick frequency of [`now`], in ticks per second.
///
/// Probed once and cached. The value is approximate; it is only used to
/// convert a seconds budget into a tick budget.
pub fn ticks_per_second() -> i64 {
    static FREQ: OnceLock<i64> = OnceLock::new();
    *FREQ.get_or_init(|| {
        let freq = probe_frequency();
        tracing::debug!(ticks_per_second = freq, "tick frequency probe");
        freq
    })
}

#[cfg(target_arch = "x86_64")]
fn probe_frequency() -> i64 {
    #[cfg(target_os = "linux")]
    {
        if let Some(hz) = cpuinfo_hz() {
            return hz;
        }
    }
    calibrate()
}

#[cfg(target_arch = "aarch64")]
fn probe_frequency() -> i64 {
    let freq: u64;
    // SAFETY: CNTFRQ_EL0 is readable from EL0 on all AArch64 implementations.
    unsafe {
        std::arch::asm!("mrs {}, cntfrq_el0", out(reg) freq, options(nostack, nomem));
    }
    freq as i64
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn probe_frequency() -> i64 {
    1_000_000_000
}

/// Parse the first `cpu MHz` line of /proc/cpuinfo into Hz.
#[cfg(all(target_arch = "x86_64", target_os = "linux"))]
fn cpuinfo_hz() -> Option<i64> {
    let text = std::fs::read_to_string("/proc/cpuinfo").ok()?;
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("cpu MHz") {
            let mhz: f64 = rest.split(':').nth(1)?.trim().parse().ok()?;
            return Some((mhz * 1_000_000.0) as i64);
        }
    }
    None
}

/// Measure the tick counter against the OS clock over a short spin.
#[cfg(target_arch = "x86_64")]
fn calibrate() -> i64 {
    use std::time::{Duration, Instant};

    let spin = Duration::from_millis(10);
    let t0 = now();
    let wall = Instant::now();
    while wall.elapsed() < spin {
        std::hint::spin_loop();
    }
    let ticks = now() - t0;
    (ticks as f64 / wall.elapsed().as_secs_f64()) as i64
}
