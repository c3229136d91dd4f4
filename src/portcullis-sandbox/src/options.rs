//! Sandbox configuration.
//!
//! Mirrors the embedder's command-line surface: each switch disables one
//! layer, and everything defaults to the sandbox being on.

use serde::{Deserialize, Serialize};

use portcullis_policy::{PolicyOptions, ProcessType};

/// Switches gating whether the filter arms at all, plus the policy knobs
/// forwarded to policy selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SandboxOptions {
    /// Master switch: run with no sandbox layers at all.
    pub disable_sandbox: bool,
    /// Disable just the syscall filter layer.
    pub disable_syscall_filter: bool,
    /// Keep the GPU process out of the syscall filter.
    pub disable_gpu_sandbox: bool,
    /// Knobs forwarded to [`portcullis_policy::Policy::for_process`].
    pub policy: PolicyOptions,
}

impl SandboxOptions {
    /// Whether the syscall filter layer is wanted at all.
    pub fn filter_desired(&self) -> bool {
        !self.disable_sandbox && !self.disable_syscall_filter
    }

    /// Whether the filter should arm for this process type under these
    /// switches.
    pub fn should_enable_for(&self, process: ProcessType) -> bool {
        match process {
            ProcessType::Gpu => !self.disable_gpu_sandbox,
            _ => true,
        }
    }
}
