//! Benchmark environment setup.
//!
//! Pins the current thread to the CPU it is running on, raises its
//! scheduling class, and checks the frequency governor. Everything here is
//! best-effort: failures are logged and never abort a run. On platforms
//! without these knobs the whole setup is a no-op.

/// Prepare the current thread for measurement. Called once before the first
/// entry runs.
#[cfg(target_os = "linux")]
pub fn setup_environment() {
    let cpu = current_cpu();
    check_governor(cpu);
    if let Err(e) = pin_to_cpu(cpu) {
        tracing::debug!(cpu, error = %e, "CPU pinning failed");
    }
    raise_priority();
}

/// No environment knobs on this platform.
#[cfg(not(target_os = "linux"))]
pub fn setup_environment() {}

#[cfg(target_os = "linux")]
fn current_cpu() -> usize {
    // SAFETY: sched_getcpu takes no arguments and cannot fault.
    let cpu = unsafe { libc::sched_getcpu() };
    if cpu < 0 { 0 } else { cpu as usize }
}

/// Pin the current thread to one CPU so the tick counter stays coherent.
#[cfg(target_os = "linux")]
pub fn pin_to_cpu(cpu: usize) -> Result<(), std::io::Error> {
    use std::mem::MaybeUninit;

    unsafe {
        let mut set = MaybeUninit::<libc::cpu_set_t>::zeroed();
        let set_ref = set.assume_init_mut();

        libc::CPU_ZERO(set_ref);
        libc::CPU_SET(cpu, set_ref);

        let result = libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), set_ref);

        if result == 0 {
            Ok(())
        } else {
            Err(std::io::Error::last_os_error())
        }
    }
}

/// CPU pinning not supported on this platform.
#[cfg(not(target_os = "linux"))]
pub fn pin_to_cpu(_cpu: usize) -> Result<(), std::io::Error> {
    Ok(())
}

/// Move to the batch scheduling class at its maximum priority.
#[cfg(target_os = "linux")]
fn raise_priority() {
    unsafe {
        let mut param: libc::sched_param = std::mem::zeroed();
        param.sched_priority = libc::sched_get_priority_max(libc::SCHED_BATCH);
        if libc::sched_setscheduler(0, libc::SCHED_BATCH, &param) != 0 {
            tracing::debug!(
                error = %std::io::Error::last_os_error(),
                "sched_setscheduler failed"
            );
        }
    }
}

/// Warn when the governor is not "performance" and try to switch it.
/// The write needs root and is allowed to fail.
#[cfg(target_os = "linux")]
fn check_governor(cpu: usize) {
    let path = format!("/sys/devices/system/cpu/cpu{cpu}/cpufreq/scaling_governor");
    let governor = match std::fs::read_to_string(&path) {
        Ok(s) => s.trim().to_string(),
        Err(e) => {
            tracing::debug!(cpu, error = %e, "governor unreadable");
            return;
        }
    };
    if governor != "performance" {
        eprintln!(
            "\x1b[33;1mWARNING: CPU scaling detected! Run this to disable:\n\
             sudo cpupower frequency-set --governor performance\x1b[0m"
        );
        if std::fs::write(&path, "performance").is_ok() {
            tracing::info!(cpu, "switched governor to performance");
        } else {
            tracing::debug!(cpu, previous = %governor, "could not switch governor");
        }
    }
}
