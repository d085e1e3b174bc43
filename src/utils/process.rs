//! Process counters for the health and metrics documents.
//!
//! Memory and CPU figures come from procfs, so they are only available on
//! Linux. Elsewhere both probes return `None` and the documents report `null`.

use std::fs;

use serde::Serialize;

/// Kernel clock ticks per second for `/proc/<pid>/stat` times (`USER_HZ`).
///
/// Assumed rather than queried with `sysconf(_SC_CLK_TCK)`. The kernel
/// reports these times in `USER_HZ`, which is 100 on every mainstream
/// architecture independent of `CONFIG_HZ`. A kernel built with a different
/// `USER_HZ` would scale the reported CPU times.
const CLOCK_TICKS_PER_SEC: u64 = 100;
const MICROS_PER_TICK: u64 = 1_000_000 / CLOCK_TICKS_PER_SEC;

/// Resident and virtual memory of this process, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryUsage {
    pub rss: u64,
    pub peak_rss: u64,
    pub virtual_size: u64,
}

/// CPU time consumed by this process, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CpuUsage {
    pub user: u64,
    pub system: u64,
}

pub fn memory_usage() -> Option<MemoryUsage> {
    let status = fs::read_to_string("/proc/self/status").ok()?;
    parse_memory(&status)
}

pub fn cpu_usage() -> Option<CpuUsage> {
    let stat = fs::read_to_string("/proc/self/stat").ok()?;
    parse_cpu(&stat)
}

/// Parses the `Vm*` lines of `/proc/<pid>/status` (values in kB).
fn parse_memory(status: &str) -> Option<MemoryUsage> {
    let field = |name: &str| -> Option<u64> {
        status
            .lines()
            .find_map(|line| line.strip_prefix(name))
            .and_then(|rest| rest.trim_start_matches(':').split_whitespace().next())
            .and_then(|kb| kb.parse::<u64>().ok())
            .map(|kb| kb * 1024)
    };

    Some(MemoryUsage {
        rss: field("VmRSS")?,
        peak_rss: field("VmHWM").unwrap_or(0),
        virtual_size: field("VmSize")?,
    })
}

/// Parses `utime` and `stime` out of `/proc/<pid>/stat`.
fn parse_cpu(stat: &str) -> Option<CpuUsage> {
    // The command name may contain spaces; fields resume after its closing paren.
    let rest = &stat[stat.rfind(')')? + 1..];
    let fields: Vec<&str> = rest.split_whitespace().collect();

    // `rest` starts at field 3 (state); utime and stime are fields 14 and 15.
    let utime: u64 = fields.get(11)?.parse().ok()?;
    let stime: u64 = fields.get(12)?.parse().ok()?;

    Some(CpuUsage {
        user: utime * MICROS_PER_TICK,
        system: stime * MICROS_PER_TICK,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS: &str = "Name:\tdevops-status-api\n\
        VmPeak:\t  120000 kB\n\
        VmSize:\t  110000 kB\n\
        VmHWM:\t    9000 kB\n\
        VmRSS:\t    8000 kB\n\
        Threads:\t4\n";

    #[test]
    fn parses_memory_from_status() {
        let usage = parse_memory(STATUS).unwrap();

        assert_eq!(usage.rss, 8000 * 1024);
        assert_eq!(usage.peak_rss, 9000 * 1024);
        assert_eq!(usage.virtual_size, 110000 * 1024);
    }

    #[test]
    fn memory_requires_rss() {
        assert!(parse_memory("Name:\tx\nVmSize:\t 1 kB\n").is_none());
    }

    #[test]
    fn cpu_ticks_assume_user_hz_of_100() {
        assert_eq!(CLOCK_TICKS_PER_SEC, 100);
        assert_eq!(MICROS_PER_TICK, 10_000);
        assert_eq!(parse_cpu("1 (p) S 0 0 0 0 0 0 0 0 0 0 1 0").unwrap().user, 10_000);
    }

    #[test]
    fn parses_cpu_from_stat_with_spaces_in_name() {
        let stat = "1234 (my (odd) proc) S 1 1234 1234 0 -1 4194560 100 0 0 0 250 75 0 0 20 0 4 0 100 0";
        let usage = parse_cpu(stat).unwrap();

        assert_eq!(usage.user, 250 * MICROS_PER_TICK);
        assert_eq!(usage.system, 75 * MICROS_PER_TICK);
    }

    #[test]
    fn truncated_stat_yields_none() {
        assert!(parse_cpu("1234 (proc) S 1 2").is_none());
        assert!(parse_cpu("garbage").is_none());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn reads_live_counters_on_linux() {
        assert!(memory_usage().is_some_and(|m| m.rss > 0));
        assert!(cpu_usage().is_some());
    }
}
