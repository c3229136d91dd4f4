//! Error types for sandbox arming.

use std::io;

use thiserror::Error;

pub type SandboxResult<T> = Result<T, SandboxError>;

/// Errors that can occur while arming the syscall filter.
#[derive(Debug, Error)]
pub enum SandboxError {
    /// The kernel cannot install a seccomp-BPF filter
    #[error("seccomp filter mode is not supported by this kernel")]
    Unsupported,

    /// A filter is already live for this process
    #[error("a syscall filter is already armed for this process")]
    AlreadyArmed,

    /// The compiled program exceeds the kernel instruction budget
    #[error("compiled filter is {len} instructions, over the kernel limit")]
    FilterTooLarge { len: usize },

    /// Registering the SIGSYS trap handler failed
    #[error("could not register the SIGSYS handler: {0}")]
    SigsysHandler(#[source] io::Error),

    /// PR_SET_NO_NEW_PRIVS was refused
    #[error("could not set no-new-privs: {0}")]
    NoNewPrivs(#[source] io::Error),

    /// The seccomp(2) call itself failed
    #[error("could not install the seccomp filter: {0}")]
    InstallFilter(#[source] io::Error),
}
