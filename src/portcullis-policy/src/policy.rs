//! Per-process-type syscall policies.
//!
//! Every policy is a pure function from syscall identifier to [`Verdict`]:
//! no ambient state, no argument inspection, total over the whole identifier
//! space. The filter compiler walks the function once to build the kernel
//! filter, and the trap handler re-evaluates the same function to recover
//! the verdict that diverted a call, so purity here is load-bearing.

use std::ffi::CStr;
use std::fmt;

use serde::{Deserialize, Serialize};

use portcullis_syscalls::{SyscallClass, Sysno, classify, is_in_table_range};

use crate::verdict::{TrapKind, Verdict};
#[cfg(target_arch = "x86_64")]
use crate::warmfile::GPU_DRIVER_CONFIG;
use crate::warmfile::WarmedFile;

/// Sandboxed process flavors. [`Policy::for_process`] maps each one to the
/// policy it runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessType {
    /// Talks to the GPU driver; needs ioctl and a few driver quirks.
    Gpu,
    /// Hosts plugin code; needs scheduling and SysV shared memory.
    Plugin,
    /// Renders untrusted content.
    Renderer,
    /// Runs untrusted background work.
    Worker,
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessType::Gpu => "gpu",
            ProcessType::Plugin => "plugin",
            ProcessType::Renderer => "renderer",
            ProcessType::Worker => "worker",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for ProcessType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gpu" => Ok(ProcessType::Gpu),
            "plugin" => Ok(ProcessType::Plugin),
            "renderer" => Ok(ProcessType::Renderer),
            "worker" => Ok(ProcessType::Worker),
            _ => Err(format!(
                "Unknown process type: '{s}'. Valid types: gpu, plugin, renderer, worker"
            )),
        }
    }
}

/// Tunable policy behavior, captured by value when a policy is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PolicyOptions {
    /// Let the GPU process issue real `open(2)` calls. Accelerated video
    /// decoding opens device nodes that a cached descriptor cannot stand
    /// in for.
    pub accelerated_video_decode: bool,
    /// Fail GPU `socket(2)` probes with EACCES instead of crashing. Binary
    /// drivers probe for sockets during initialization and handle the
    /// refusal gracefully.
    pub deny_gpu_socket_probe: bool,
    /// Keep SysV shared memory attach, control and detach open to plugin
    /// processes.
    pub allow_plugin_shared_memory: bool,
    /// Run the GPU process under the plain denylist policy instead of the
    /// refined GPU policy.
    pub gpu_denylist_only: bool,
}

impl Default for PolicyOptions {
    fn default() -> Self {
        Self {
            accelerated_video_decode: false,
            deny_gpu_socket_probe: true,
            allow_plugin_shared_memory: true,
            gpu_denylist_only: false,
        }
    }
}

/// Classes every baseline-derived policy lets through.
pub(crate) const BASELINE_ALLOWED: SyscallClass = SyscallClass::ADDRESS_SPACE
    .union(SyscallClass::BASIC_SCHEDULER)
    .union(SyscallClass::CLOCK_READ)
    .union(SyscallClass::EPOLL)
    .union(SyscallClass::FD_LOCAL)
    .union(SyscallClass::FD_STAT)
    .union(SyscallClass::FUTEX)
    .union(SyscallClass::GENERAL_IO)
    .union(SyscallClass::IDENTITY_READ)
    .union(SyscallClass::KERNEL_INTERNAL)
    .union(SyscallClass::KILL_SIGNALING)
    .union(SyscallClass::PIPE_PAIR)
    .union(SyscallClass::PRCTL)
    .union(SyscallClass::PROCESS_LIFECYCLE)
    .union(SyscallClass::SIGNAL_INSTALL);

/// Classes the baseline hides by reporting paths as nonexistent.
pub(crate) const BASELINE_HIDDEN_FILESYSTEM: SyscallClass =
    SyscallClass::PATH_FILESYSTEM.union(SyscallClass::CURRENT_DIRECTORY);

/// Classes the baseline refuses outright with EPERM.
pub(crate) const BASELINE_REFUSED: SyscallClass =
    SyscallClass::UMASK.union(SyscallClass::FD_MUTATION);

/// Classes the baseline watches: using one crashes the process with an
/// identifying fault address.
pub(crate) const BASELINE_WATCHED: SyscallClass = SyscallClass::ADMIN
    .union(SyscallClass::ADVANCED_SCHEDULER)
    .union(SyscallClass::ADVANCED_TIMER)
    .union(SyscallClass::ASYNC_IO)
    .union(SyscallClass::DEBUG_INTROSPECTION)
    .union(SyscallClass::EVENTFD)
    .union(SyscallClass::EXTENDED_ATTRIBUTES)
    .union(SyscallClass::FANOTIFY)
    .union(SyscallClass::FS_CONTROL)
    .union(SyscallClass::GLOBAL_FS_VIEW)
    .union(SyscallClass::INOTIFY)
    .union(SyscallClass::INTERVAL_TIMER)
    .union(SyscallClass::KERNEL_MODULE)
    .union(SyscallClass::KEY_MANAGEMENT)
    .union(SyscallClass::NUMA_MEMORY)
    .union(SyscallClass::POSIX_MESSAGE_QUEUE)
    .union(SyscallClass::PRIVILEGE_CHANGE)
    .union(SyscallClass::PROCESS_ENVIRONMENT)
    .union(SyscallClass::PROCESS_GROUP_SESSION)
    .union(SyscallClass::SOCKET_INFO)
    .union(SyscallClass::SOCKET_MULTIPLEX)
    .union(SyscallClass::SYSTEM_STATUS)
    .union(SyscallClass::SYSV_IPC_MULTIPLEX)
    .union(SyscallClass::SYSV_MESSAGE_QUEUE)
    .union(SyscallClass::SYSV_SEMAPHORES)
    .union(SyscallClass::SYSV_SHARED_MEMORY)
    .union(SyscallClass::UNSORTED);

/// The short list of syscalls that let one process inspect or manipulate
/// another. Even the permissive denylist policy crashes on these.
const PTRACE_DENYLIST: &[Sysno] = &[
    libc::SYS_migrate_pages,
    libc::SYS_move_pages,
    libc::SYS_process_vm_readv,
    libc::SYS_process_vm_writev,
    libc::SYS_ptrace,
];

/// Shared object the accelerated video decoder loads after the filter is
/// armed; it has to be pulled in while dlopen still works.
const VIDEO_DRIVER_PATH: &CStr = c"/usr/lib64/va/drivers/i965_drv_video.so";

/// Which decision table drives a [`Policy`].
#[derive(Debug, Clone, Copy)]
pub enum PolicyKind {
    /// The shared substrate: allow the safe classes, hide the filesystem,
    /// crash on everything watched or unknown.
    Baseline,
    /// Baseline plus the device, socket and open handling the GPU stack
    /// needs, serving `open(2)` of the warmed path from `cache`.
    Gpu { cache: &'static WarmedFile },
    /// Baseline plus the scheduling and SysV shared memory surface plugin
    /// runtimes rely on.
    Plugin,
    /// Allow everything in table range except the ptrace denylist.
    DenylistPtrace,
    /// Allow everything in table range. An explicit escape hatch; never
    /// chosen by [`Policy::for_process`].
    AllowAll,
}

/// A pure, copyable decision function from syscall identifier to verdict.
#[derive(Debug, Clone, Copy)]
pub struct Policy {
    kind: PolicyKind,
    options: PolicyOptions,
}

impl Policy {
    /// Select the policy a process type runs under.
    ///
    /// Renderers and workers get the denylist policy. On anything other
    /// than x86-64 every process type degrades to the denylist, because
    /// only the 64-bit refined tables are maintained.
    pub fn for_process(process: ProcessType, options: PolicyOptions) -> Self {
        #[cfg(target_arch = "x86_64")]
        let kind = match process {
            ProcessType::Gpu if options.gpu_denylist_only => PolicyKind::DenylistPtrace,
            ProcessType::Gpu => PolicyKind::Gpu {
                cache: &GPU_DRIVER_CONFIG,
            },
            ProcessType::Plugin => PolicyKind::Plugin,
            ProcessType::Renderer | ProcessType::Worker => PolicyKind::DenylistPtrace,
        };
        #[cfg(not(target_arch = "x86_64"))]
        let kind = {
            let _ = process;
            PolicyKind::DenylistPtrace
        };
        Self { kind, options }
    }

    /// The shared baseline on its own.
    pub fn baseline(options: PolicyOptions) -> Self {
        Self {
            kind: PolicyKind::Baseline,
            options,
        }
    }

    /// A GPU policy serving `open(2)` from a caller-provided record instead
    /// of the stock driver configuration.
    pub fn gpu_with_cache(options: PolicyOptions, cache: &'static WarmedFile) -> Self {
        Self {
            kind: PolicyKind::Gpu { cache },
            options,
        }
    }

    /// The unrestricted policy.
    pub fn allow_all() -> Self {
        Self {
            kind: PolicyKind::AllowAll,
            options: PolicyOptions::default(),
        }
    }

    pub fn kind(&self) -> PolicyKind {
        self.kind
    }

    pub fn options(&self) -> PolicyOptions {
        self.options
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self.kind {
            PolicyKind::Baseline => "baseline",
            PolicyKind::Gpu { .. } => "gpu",
            PolicyKind::Plugin => "plugin",
            PolicyKind::DenylistPtrace => "denylist-ptrace",
            PolicyKind::AllowAll => "allow-all",
        }
    }

    /// Decide the verdict for one syscall identifier. Pure and total.
    pub fn evaluate(&self, nr: Sysno) -> Verdict {
        match self.kind {
            PolicyKind::Baseline => self.evaluate_baseline(nr),
            PolicyKind::Gpu { cache } => self.evaluate_gpu(nr, cache),
            PolicyKind::Plugin => self.evaluate_plugin(nr),
            PolicyKind::DenylistPtrace => evaluate_denylist_ptrace(nr),
            PolicyKind::AllowAll => evaluate_allow_all(nr),
        }
    }

    /// Pre-open and pre-load everything this policy's trap handlers rely
    /// on. Must run before the filter is armed, while the process can
    /// still open files and load shared objects. Failures degrade the
    /// corresponding trap path to `-ENOENT` and are logged, not fatal.
    pub fn warm_up(&self) {
        let PolicyKind::Gpu { cache } = self.kind else {
            return;
        };
        match cache.warm() {
            Ok(()) => {
                tracing::debug!("Warmed {:?} for sandboxed reopening", cache.path());
            }
            Err(err) => {
                tracing::warn!("Could not warm {:?}: {}", cache.path(), err);
            }
        }
        if self.options.accelerated_video_decode {
            preload_video_driver();
        }
    }

    fn evaluate_baseline(&self, nr: Sysno) -> Verdict {
        let class = classify(nr);
        if class.intersects(BASELINE_ALLOWED) {
            return Verdict::Allow;
        }
        // Filesystem access is denied by pretending paths do not exist.
        if class.intersects(BASELINE_HIDDEN_FILESYSTEM) {
            return Verdict::Errno(libc::ENOENT);
        }
        if class.intersects(BASELINE_REFUSED) {
            return Verdict::Errno(libc::EPERM);
        }
        // Watched and unclassified alike: fail closed, loudly.
        Verdict::Trap(TrapKind::Crash)
    }

    fn evaluate_gpu(&self, nr: Sysno, cache: &'static WarmedFile) -> Verdict {
        // Device control is the GPU process's whole job.
        if nr == libc::SYS_ioctl {
            return Verdict::Allow;
        }
        #[cfg(target_arch = "x86_64")]
        if nr == libc::SYS_socket && self.options.deny_gpu_socket_probe {
            return Verdict::Errno(libc::EACCES);
        }
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        if nr == libc::SYS_open {
            return if self.options.accelerated_video_decode {
                Verdict::Allow
            } else {
                Verdict::Trap(TrapKind::CachedOpen(cache))
            };
        }
        #[cfg(not(any(target_arch = "x86_64", target_arch = "x86")))]
        let _ = cache;
        if classify(nr).intersects(SyscallClass::EVENTFD) {
            return Verdict::Allow;
        }
        self.evaluate_baseline(nr)
    }

    fn evaluate_plugin(&self, nr: Sysno) -> Verdict {
        // Plugin runtimes poll affinity and process times from tight loops.
        if nr == libc::SYS_sched_getaffinity
            || nr == libc::SYS_sched_setscheduler
            || nr == libc::SYS_times
        {
            return Verdict::Allow;
        }
        // Plugins probe devices they will never get.
        if nr == libc::SYS_ioctl {
            return Verdict::Errno(libc::ENOTTY);
        }
        #[cfg(target_arch = "x86_64")]
        {
            if nr == libc::SYS_socket {
                return Verdict::Errno(libc::EACCES);
            }
            if self.options.allow_plugin_shared_memory
                && classify(nr).intersects(SyscallClass::SYSV_SHARED_MEMORY)
            {
                return Verdict::Allow;
            }
        }
        self.evaluate_baseline(nr)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn evaluate_denylist_ptrace(nr: Sysno) -> Verdict {
    if !is_in_table_range(nr) {
        return Verdict::Errno(libc::ENOSYS);
    }
    if PTRACE_DENYLIST.contains(&nr) {
        return Verdict::Trap(TrapKind::Crash);
    }
    Verdict::Allow
}

fn evaluate_allow_all(nr: Sysno) -> Verdict {
    if is_in_table_range(nr) {
        Verdict::Allow
    } else {
        Verdict::Errno(libc::ENOSYS)
    }
}

fn preload_video_driver() {
    let handle = unsafe {
        libc::dlopen(
            VIDEO_DRIVER_PATH.as_ptr(),
            libc::RTLD_NOW | libc::RTLD_GLOBAL | libc::RTLD_NODELETE,
        )
    };
    if handle.is_null() {
        tracing::warn!("Could not preload video driver {:?}", VIDEO_DRIVER_PATH);
    } else {
        tracing::debug!("Preloaded video driver {:?}", VIDEO_DRIVER_PATH);
    }
}
