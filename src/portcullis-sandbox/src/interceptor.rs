//! The seam between lifecycle decisions and kernel enforcement.

use portcullis_policy::Policy;

use crate::error::SandboxError;

/// Installs a compiled policy into the kernel for the calling process.
///
/// The lifecycle controller drives this trait, which keeps the irreversible
/// kernel call substitutable: tests use a recording fake, production uses
/// [`crate::KernelSeccomp`].
pub trait SyscallInterceptor {
    /// Check whether this kernel can install a filter at all.
    fn is_supported(&self) -> bool;

    /// Install `policy` for the calling process and all of its threads.
    /// There is no uninstall; a successful return means the filter is live
    /// for the rest of the process lifetime.
    fn install(&self, policy: Policy) -> Result<(), SandboxError>;
}
