//! Arming state machine.
//!
//! Ties the pieces together in the one order that works: decide whether the
//! filter is wanted, check kernel support, warm caches while the process
//! can still open files, then install. Arming is once per process and
//! irreversible.

use portcullis_policy::{Policy, ProcessType};

use crate::error::{SandboxError, SandboxResult};
use crate::interceptor::SyscallInterceptor;
use crate::options::SandboxOptions;

/// How an arm attempt ended. Declines are normal operation; anything that
/// went wrong while the filter was actually wanted surfaces as a
/// [`SandboxError`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmOutcome {
    /// The filter is live.
    Armed,
    /// Configuration switches keep the filter off for every process.
    DeclinedByFlags,
    /// This process type runs unfiltered under the current switches.
    DeclinedForProcessType,
    /// The kernel cannot install a filter.
    Unsupported,
}

/// Drives policy selection, warmup and installation exactly once.
#[derive(Debug)]
pub struct SandboxLifecycle {
    options: SandboxOptions,
    armed: bool,
}

impl SandboxLifecycle {
    pub fn new(options: SandboxOptions) -> Self {
        Self {
            options,
            armed: false,
        }
    }

    pub fn options(&self) -> &SandboxOptions {
        &self.options
    }

    /// Whether a previous [`SandboxLifecycle::arm`] call armed the filter.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Try to arm the syscall filter for `process`.
    pub fn arm(
        &mut self,
        process: ProcessType,
        interceptor: &dyn SyscallInterceptor,
    ) -> SandboxResult<ArmOutcome> {
        if self.armed {
            return Err(SandboxError::AlreadyArmed);
        }
        if !self.options.filter_desired() {
            tracing::info!("Syscall filter disabled by flags for {} process", process);
            return Ok(ArmOutcome::DeclinedByFlags);
        }
        if !self.options.should_enable_for(process) {
            tracing::info!("Syscall filter not enabled for {} process", process);
            return Ok(ArmOutcome::DeclinedForProcessType);
        }
        if !interceptor.is_supported() {
            tracing::warn!(
                "Kernel lacks seccomp filter support; {} process runs unfiltered",
                process
            );
            return Ok(ArmOutcome::Unsupported);
        }
        let policy = Policy::for_process(process, self.options.policy);
        // Warm caches while open(2) and dlopen(3) still work.
        policy.warm_up();
        interceptor.install(policy)?;
        self.armed = true;
        tracing::info!("Armed {} policy for {} process", policy, process);
        Ok(ArmOutcome::Armed)
    }
}
