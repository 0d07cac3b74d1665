//! Filesystem usage the way `df` reports it.
//!
//! Blocks reserved for root count neither as used nor as available, so the
//! percentage is taken over `used + available` rather than the raw size.

use std::path::Path;

use crate::core::dashboard::DiskUsage;
#[cfg(unix)]
use crate::error::DashError;
use crate::error::Result;

/// Block counts of one mounted filesystem, as returned by `statvfs(3)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsStats {
    pub fragment_size: u64,
    pub blocks: u64,
    pub free_blocks: u64,
    pub available_blocks: u64,
}

impl FsStats {
    pub fn usage(&self) -> DiskUsage {
        let used = self.blocks.saturating_sub(self.free_blocks) * self.fragment_size;
        let available = self.available_blocks * self.fragment_size;
        let reachable = used + available;

        let percent = if reachable > 0 {
            let raw = used as f64 / reachable as f64 * 100.0;
            ((raw * 10.0).round() / 10.0) as f32
        } else {
            0.0
        };

        DiskUsage {
            percent,
            used_bytes: used,
        }
    }
}

#[cfg(unix)]
pub fn statvfs(path: &Path) -> Result<FsStats> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|_| {
        DashError::metric_collection(format!("invalid path {}", path.display()))
    })?;

    // SAFETY: `c_path` is NUL-terminated and `stat` is a plain C struct that
    // statvfs fills in completely on success.
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if rc != 0 {
        return Err(std::io::Error::last_os_error().into());
    }

    Ok(FsStats {
        fragment_size: stat.f_frsize as u64,
        blocks: stat.f_blocks as u64,
        free_blocks: stat.f_bfree as u64,
        available_blocks: stat.f_bavail as u64,
    })
}

/// Usage of the filesystem holding `path`.
#[cfg(unix)]
pub fn disk_usage(path: &Path) -> Result<DiskUsage> {
    Ok(statvfs(path)?.usage())
}
