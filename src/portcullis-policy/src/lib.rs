//! Syscall policies for the portcullis sandbox.
//!
//! This crate holds the decision side of the sandbox:
//! - Pure per-process-type policies over the syscall taxonomy
//! - The crash trap handler, which faults at an address encoding the
//!   denied syscall
//! - The cached-open trap handler, which answers `open(2)` of one warmed
//!   path from a pre-opened descriptor
//!
//! Policies are deliberately plain copyable values. The same [`Policy`] is
//! walked at arming time to compile the kernel filter and re-evaluated
//! inside the signal handler to dispatch traps, and the two sides must
//! agree call for call.

#[cfg(test)]
mod tests;

mod crash;
mod policy;
mod verdict;
mod warmfile;

// Re-export all public types
pub use crash::{crash_on_denied_syscall, fault_addresses};
pub use policy::{Policy, PolicyKind, PolicyOptions, ProcessType};
pub use verdict::{SyscallData, TrapKind, Verdict};
pub use warmfile::{GPU_DRIVER_CONFIG, WarmedFile, cached_open_trap};
