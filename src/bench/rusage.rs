use cfg_if::cfg_if;

/// Process resource counters sampled from the OS.
///
/// `max_rss_kb` is the process resident-memory high-water mark, not an
/// instantaneous figure, so a "before" sample is itself the peak up to
/// that point in the process lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResourceUsage {
    /// user CPU time (seconds)
    pub user_cpu_sec: f64,
    /// system CPU time (seconds)
    pub system_cpu_sec: f64,
    /// peak resident set size (KB)
    pub max_rss_kb: i64,
}

impl ResourceUsage {
    /// Sample the calling process via `getrusage(RUSAGE_SELF)`.
    ///
    /// Returns zeroed counters on platforms without `getrusage`.
    pub fn now() -> Self {
        cfg_if! {
            if #[cfg(unix)] {
                Self::now_unix()
            } else {
                Self::default()
            }
        }
    }

    /// Counter deltas `self - earlier` for the CPU fields.  The RSS
    /// fields are high-water marks and are reported as-is, not
    /// differenced.
    pub fn cpu_delta(&self, earlier: &ResourceUsage) -> (f64, f64) {
        (
            self.user_cpu_sec - earlier.user_cpu_sec,
            self.system_cpu_sec - earlier.system_cpu_sec,
        )
    }

    #[cfg(unix)]
    fn now_unix() -> Self {
        let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
        let ret = unsafe { libc::getrusage(libc::RUSAGE_SELF, &mut usage) };
        if ret != 0 {
            return Self::default();
        }

        cfg_if! {
            if #[cfg(target_os = "macos")] {
                // macOS reports ru_maxrss in bytes
                let max_rss_kb = (usage.ru_maxrss / 1024) as i64;
            } else {
                let max_rss_kb = usage.ru_maxrss as i64;
            }
        }

        Self {
            user_cpu_sec: timeval_sec(usage.ru_utime),
            system_cpu_sec: timeval_sec(usage.ru_stime),
            max_rss_kb,
        }
    }
}

#[cfg(unix)]
fn timeval_sec(tv: libc::timeval) -> f64 {
    tv.tv_sec as f64 + tv.tv_usec as f64 * 1e-6
}
