//! Process sandboxing via seccomp-BPF.
//!
//! This crate is the enforcement half of portcullis:
//! - Compiling a policy into a classic-BPF filter program
//! - Installing it under no-new-privs, synchronized across threads
//! - The SIGSYS trampoline that runs trap verdicts in-process
//! - The arming lifecycle with its configuration gates
//!
//! The decision half (taxonomy, policies, trap handlers) lives in
//! `portcullis-policy`. Arming is a one-way door: there is no API to relax
//! or remove a live filter.


mod error;
mod interceptor;
mod lifecycle;
mod options;

// The trampoline decodes registers through glibc's ucontext layout, so the
// real backend needs gnu on top of the kernel and architecture.
#[cfg(all(
    target_os = "linux",
    target_env = "gnu",
    any(target_arch = "x86_64", target_arch = "x86")
))]
mod bpf;
#[cfg(all(
    target_os = "linux",
    target_env = "gnu",
    any(target_arch = "x86_64", target_arch = "x86")
))]
mod kernel;

#[cfg(not(all(
    target_os = "linux",
    target_env = "gnu",
    any(target_arch = "x86_64", target_arch = "x86")
)))]
mod kernel {
    //! Stub backend for platforms without the seccomp support we target.

    use portcullis_policy::Policy;

    use crate::error::SandboxError;
    use crate::interceptor::SyscallInterceptor;

    /// Placeholder backend: reports no support and refuses installs.
    #[derive(Debug, Default)]
    pub struct KernelSeccomp;

    impl KernelSeccomp {
        pub fn new() -> Self {
            Self
        }
    }

    impl SyscallInterceptor for KernelSeccomp {
        fn is_supported(&self) -> bool {
            false
        }

        fn install(&self, _policy: Policy) -> Result<(), SandboxError> {
            Err(SandboxError::Unsupported)
        }
    }
}

// Re-export all public types
pub use error::{SandboxError, SandboxResult};
pub use interceptor::SyscallInterceptor;
pub use kernel::KernelSeccomp;
pub use lifecycle::{ArmOutcome, SandboxLifecycle};
pub use options::SandboxOptions;
