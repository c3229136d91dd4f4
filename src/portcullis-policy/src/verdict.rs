//! Verdict types shared by policies, the filter compiler and the trap
//! handlers.

use std::fmt;

use portcullis_syscalls::Sysno;

use crate::warmfile::WarmedFile;

/// Snapshot of one intercepted syscall: the identifier and its six raw
/// argument registers, exactly as the kernel reported them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyscallData {
    pub nr: Sysno,
    pub args: [u64; 6],
}

impl SyscallData {
    pub const fn new(nr: Sysno, args: [u64; 6]) -> Self {
        Self { nr, args }
    }
}

/// What the in-process trap handler does with a bounced syscall.
#[derive(Debug, Clone, Copy)]
pub enum TrapKind {
    /// Crash the process at an address that encodes the syscall, so the
    /// crash report names the call that was attempted.
    Crash,
    /// Emulate `open(2)` of one pre-opened path by duplicating its cached
    /// descriptor.
    CachedOpen(&'static WarmedFile),
}

impl PartialEq for TrapKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TrapKind::Crash, TrapKind::Crash) => true,
            (TrapKind::CachedOpen(a), TrapKind::CachedOpen(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

impl Eq for TrapKind {}

/// Decision for a single syscall identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Let the syscall through to the kernel.
    Allow,
    /// Fail the syscall with this errno without executing it.
    Errno(i32),
    /// Bounce the syscall to the in-process trap handler.
    Trap(TrapKind),
}

impl Verdict {
    /// Check if this verdict lets the syscall execute.
    pub fn is_allow(&self) -> bool {
        matches!(self, Verdict::Allow)
    }

    /// Check if this verdict diverts the syscall to a trap handler.
    pub fn is_trap(&self) -> bool {
        matches!(self, Verdict::Trap(_))
    }

    /// Get the errno carried by a deny verdict, if any.
    pub fn errno(&self) -> Option<i32> {
        match self {
            Verdict::Errno(errno) => Some(*errno),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Allow => write!(f, "allow"),
            Verdict::Errno(errno) => write!(f, "errno({errno})"),
            Verdict::Trap(TrapKind::Crash) => write!(f, "trap(crash)"),
            Verdict::Trap(TrapKind::CachedOpen(_)) => write!(f, "trap(cached-open)"),
        }
    }
}
