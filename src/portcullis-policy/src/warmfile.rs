//! Pre-opened file cache backing the restricted-open trap handler.
//!
//! Some sandboxed code legitimately re-reads a single configuration file
//! after the filter is armed (the GPU process re-reads the Mesa driver
//! configuration during initialization). Opening by path is no longer
//! possible at that point, so the file is opened once before arming and
//! every later `open(2)` of that exact path is answered from the cached
//! descriptor inside the trap handler.

use std::ffi::CStr;
use std::io;
use std::sync::atomic::{AtomicI32, Ordering};

use libc::c_int;

use crate::verdict::SyscallData;

/// The Mesa driver configuration the GPU process re-reads after arming.
pub static GPU_DRIVER_CONFIG: WarmedFile = WarmedFile::new(c"/etc/drirc");

const FD_UNOPENED: i32 = -2;
const FD_FAILED: i32 = -1;

/// One pre-opened read-only file: the path it answers for plus the cached
/// descriptor slot.
///
/// The record owns all of the shim's mutable state. [`WarmedFile::warm`]
/// runs before the filter is armed and performs the only real `open(2)`;
/// [`WarmedFile::serve_cached`] runs inside the signal handler and only
/// ever duplicates. A failed warm is latched, so the trap path degrades to
/// reporting the file as nonexistent instead of retrying an open it is no
/// longer allowed to make.
#[derive(Debug)]
pub struct WarmedFile {
    path: &'static CStr,
    fd: AtomicI32,
}

impl WarmedFile {
    pub const fn new(path: &'static CStr) -> Self {
        Self {
            path,
            fd: AtomicI32::new(FD_UNOPENED),
        }
    }

    /// The exact path this record answers for.
    pub fn path(&self) -> &'static CStr {
        self.path
    }

    /// Check if a descriptor is cached and servable.
    pub fn is_warmed(&self) -> bool {
        self.fd.load(Ordering::Acquire) >= 0
    }

    /// Pre-open the file read-only and publish the descriptor.
    ///
    /// The first call performs the real open; warming an already-warmed
    /// record is a no-op. Once a warm has failed the failure is latched
    /// and later calls keep reporting the file as missing, so the trap
    /// path never retries an open it is no longer allowed to make.
    pub fn warm(&self) -> io::Result<()> {
        match self.fd.load(Ordering::Acquire) {
            FD_UNOPENED => {}
            FD_FAILED => return Err(io::Error::from_raw_os_error(libc::ENOENT)),
            _ => return Ok(()),
        }
        let fd = unsafe { libc::open(self.path.as_ptr(), libc::O_RDONLY) };
        if fd < 0 {
            let err = io::Error::last_os_error();
            self.fd.store(FD_FAILED, Ordering::Release);
            return Err(err);
        }
        // First warm wins; the descriptor stays owned by the record.
        if self
            .fd
            .compare_exchange(FD_UNOPENED, fd, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            unsafe { libc::close(fd) };
        }
        Ok(())
    }

    /// Serve a duplicate of the cached descriptor, rewound to the start of
    /// the file.
    ///
    /// Returns `-ENOENT` when nothing is cached and `-ENOMEM` when
    /// duplication fails, mirroring what `open(2)` would report. Never
    /// opens anything, so it is safe to call from the signal handler while
    /// the filter is live. Duplicates share one file description; the
    /// rewind on every serve means a caller that opens, reads and closes
    /// sees the whole file regardless of what earlier callers read.
    pub fn serve_cached(&self) -> isize {
        let fd = self.fd.load(Ordering::Acquire);
        if fd < 0 {
            return -(libc::ENOENT as isize);
        }
        let duplicate = unsafe { libc::dup(fd) };
        if duplicate < 0 {
            return -(libc::ENOMEM as isize);
        }
        if unsafe { libc::lseek(duplicate, 0, libc::SEEK_SET) } == -1 {
            unsafe { libc::close(duplicate) };
            return -(libc::ENOMEM as isize);
        }
        duplicate as isize
    }
}

/// Trap-side emulation of `open(2)` against one warmed file.
///
/// Only the exact warmed path, requested with exactly `O_RDONLY`, is
/// served; any other path, flag combination or null pointer reads as
/// nonexistent. A real open here would re-enter the filter, so this
/// never opens.
pub fn cached_open_trap(file: &WarmedFile, data: &SyscallData) -> isize {
    let pathname = data.args[0] as *const libc::c_char;
    if pathname.is_null() {
        return -(libc::ENOENT as isize);
    }
    // The pointer targets our own address space; the trapped caller was
    // about to hand it to the kernel.
    let requested = unsafe { CStr::from_ptr(pathname) };
    if requested != file.path {
        return -(libc::ENOENT as isize);
    }
    if data.args[1] as c_int != libc::O_RDONLY {
        return -(libc::ENOENT as isize);
    }
    file.serve_cached()
}
