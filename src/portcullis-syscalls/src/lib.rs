//! Portcullis syscall classification - semantic tables over raw syscall numbers
//!
//! This crate knows *what a syscall is*, not what to do about it. It maps
//! every known syscall number of the compiled architecture to exactly one
//! semantic class (filesystem-by-path, debug/introspection, address space,
//! ...) through a dense table built at compile time. Policy layers combine
//! the classes into verdicts.
//!
//! Supported numbering schemes: x86-64 and 32-bit x86, selected by
//! `cfg(target_arch)`. On any other architecture the table is empty and
//! every identifier reads as unclassified, which the policy layers treat
//! as hostile.

mod class;

#[cfg(target_arch = "x86_64")]
mod table_x86_64;
#[cfg(target_arch = "x86_64")]
use table_x86_64 as table;

#[cfg(target_arch = "x86")]
mod table_x86;
#[cfg(target_arch = "x86")]
use table_x86 as table;

#[cfg(not(any(target_arch = "x86_64", target_arch = "x86")))]
mod table {
    //! Fallback for architectures without a table: the range is empty, so
    //! nothing classifies and range checks always fail.
    use crate::Sysno;

    pub const MIN_SYSCALL: Sysno = 0;
    pub const MAX_SYSCALL: Sysno = -1;
    pub(crate) static CLASS_TABLE: [u64; 0] = [];
}

pub use class::SyscallClass;
pub use table::{MAX_SYSCALL, MIN_SYSCALL};

/// Raw syscall identifier as the kernel reports it.
///
/// Values outside `[MIN_SYSCALL, MAX_SYSCALL]` are representable on purpose;
/// callers decide what out-of-range means for them.
pub type Sysno = libc::c_long;

/// Whether the compiled table covers this identifier.
pub fn is_in_table_range(nr: Sysno) -> bool {
    (MIN_SYSCALL..=MAX_SYSCALL).contains(&nr)
}

/// Look up the semantic class of a syscall.
///
/// Unclassified and out-of-range identifiers return the empty class.
pub fn classify(nr: Sysno) -> SyscallClass {
    if !is_in_table_range(nr) {
        return SyscallClass::empty();
    }
    SyscallClass::from_bits_retain(table::CLASS_TABLE[nr as usize])
}
