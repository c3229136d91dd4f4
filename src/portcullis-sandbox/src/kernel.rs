//! Kernel enforcement: filter installation and the SIGSYS trampoline.
//!
//! The trampoline runs with the filter already live, so it must never issue
//! a filtered syscall itself; a nested SIGSYS inside the handler makes the
//! kernel kill the process outright. It recovers what to do by re-evaluating
//! the published policy for the bounced syscall number: policies are pure,
//! so the answer always matches the installed filter.

use std::io;
use std::mem;

use once_cell::sync::OnceCell;

use portcullis_policy::{
    Policy, SyscallData, TrapKind, Verdict, cached_open_trap, crash_on_denied_syscall,
};
use portcullis_syscalls::Sysno;

use crate::bpf::{self, SockFilter, SockFprog};
use crate::error::SandboxError;
use crate::interceptor::SyscallInterceptor;

/// The policy consulted by the trampoline. Published exactly once, before
/// the filter starts bouncing syscalls.
static INSTALLED_POLICY: OnceCell<Policy> = OnceCell::new();

/// `si_code` value for a SIGSYS raised by a seccomp filter.
const SYS_SECCOMP: libc::c_int = 1;

const SECCOMP_SET_MODE_FILTER: libc::c_uint = 1;
const SECCOMP_FILTER_FLAG_TSYNC: libc::c_ulong = 1;

/// Leading fields of `siginfo_t` as glibc lays them out for SIGSYS. libc
/// does not expose the `si_syscall` accessor everywhere, so the layout is
/// spelled out; the padding word exists only on 64-bit, where the union
/// that follows the three header ints is pointer-aligned.
#[repr(C)]
#[allow(dead_code)]
struct SigsysInfo {
    si_signo: libc::c_int,
    si_errno: libc::c_int,
    si_code: libc::c_int,
    #[cfg(target_arch = "x86_64")]
    _pad: libc::c_int,
    call_addr: *mut libc::c_void,
    syscall: libc::c_int,
    arch: libc::c_uint,
}

#[cfg(target_arch = "x86_64")]
fn syscall_data_from_context(info: &SigsysInfo, context: &libc::ucontext_t) -> SyscallData {
    let gregs = &context.uc_mcontext.gregs;
    SyscallData::new(
        info.syscall as Sysno,
        [
            gregs[libc::REG_RDI as usize] as u64,
            gregs[libc::REG_RSI as usize] as u64,
            gregs[libc::REG_RDX as usize] as u64,
            gregs[libc::REG_R10 as usize] as u64,
            gregs[libc::REG_R8 as usize] as u64,
            gregs[libc::REG_R9 as usize] as u64,
        ],
    )
}

#[cfg(target_arch = "x86_64")]
fn set_syscall_result(context: &mut libc::ucontext_t, result: isize) {
    context.uc_mcontext.gregs[libc::REG_RAX as usize] = result as i64;
}

#[cfg(target_arch = "x86")]
fn syscall_data_from_context(info: &SigsysInfo, context: &libc::ucontext_t) -> SyscallData {
    let gregs = &context.uc_mcontext.gregs;
    SyscallData::new(
        info.syscall as Sysno,
        [
            gregs[libc::REG_EBX as usize] as u32 as u64,
            gregs[libc::REG_ECX as usize] as u32 as u64,
            gregs[libc::REG_EDX as usize] as u32 as u64,
            gregs[libc::REG_ESI as usize] as u32 as u64,
            gregs[libc::REG_EDI as usize] as u32 as u64,
            gregs[libc::REG_EBP as usize] as u32 as u64,
        ],
    )
}

#[cfg(target_arch = "x86")]
fn set_syscall_result(context: &mut libc::ucontext_t, result: isize) {
    context.uc_mcontext.gregs[libc::REG_EAX as usize] = result as i32;
}

/// SIGSYS handler. Async-signal-safe: no allocation, no locks, no
/// formatting, and no syscalls beyond what the trap handlers themselves
/// are allowed.
extern "C" fn sigsys_trampoline(
    signo: libc::c_int,
    info: *mut libc::siginfo_t,
    context: *mut libc::c_void,
) {
    if signo != libc::SIGSYS || info.is_null() || context.is_null() {
        return;
    }
    let info = unsafe { &*(info as *const SigsysInfo) };
    if info.si_code != SYS_SECCOMP {
        return;
    }
    let Some(policy) = INSTALLED_POLICY.get() else {
        // A bounced syscall with no published policy has nothing sane to
        // resume into.
        crash_on_denied_syscall(&SyscallData::new(info.syscall as Sysno, [0; 6]));
    };
    let context = unsafe { &mut *(context as *mut libc::ucontext_t) };
    let data = syscall_data_from_context(info, context);
    match policy.evaluate(data.nr) {
        Verdict::Trap(TrapKind::Crash) => crash_on_denied_syscall(&data),
        Verdict::Trap(TrapKind::CachedOpen(file)) => {
            let result = cached_open_trap(file, &data);
            set_syscall_result(context, result);
        }
        // Allow and errno verdicts never bounce. Reaching here means the
        // filter and the policy disagree; fail closed.
        Verdict::Allow | Verdict::Errno(_) => crash_on_denied_syscall(&data),
    }
}

fn install_sigsys_handler() -> io::Result<()> {
    let mut action: libc::sigaction = unsafe { mem::zeroed() };
    action.sa_sigaction = sigsys_trampoline as usize;
    action.sa_flags = libc::SA_SIGINFO;
    unsafe { libc::sigemptyset(&mut action.sa_mask) };
    if unsafe { libc::sigaction(libc::SIGSYS, &action, std::ptr::null_mut()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

fn enable_no_new_privs() -> io::Result<()> {
    if unsafe { libc::prctl(libc::PR_SET_NO_NEW_PRIVS, 1, 0, 0, 0) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

fn install_filter(program: &[SockFilter]) -> io::Result<()> {
    let prog = SockFprog {
        len: program.len() as u16,
        filter: program.as_ptr(),
    };
    let rc = unsafe {
        libc::syscall(
            libc::SYS_seccomp,
            SECCOMP_SET_MODE_FILTER,
            SECCOMP_FILTER_FLAG_TSYNC,
            &prog as *const SockFprog,
        )
    };
    if rc == -1 {
        return Err(io::Error::last_os_error());
    }
    if rc != 0 {
        // TSYNC failure reports the id of the thread that blocked
        // synchronization, without touching errno.
        return Err(io::Error::from_raw_os_error(libc::EAGAIN));
    }
    Ok(())
}

/// Probe for seccomp filter mode without installing anything.
///
/// A null program never installs: EFAULT means the kernel parsed the call
/// and choked on the pointer, so filter mode exists. ENOSYS or EINVAL mean
/// it does not.
fn probe_filter_support() -> bool {
    if unsafe { libc::prctl(libc::PR_GET_SECCOMP, 0, 0, 0, 0) } < 0 {
        return false;
    }
    let rc = unsafe {
        libc::syscall(
            libc::SYS_seccomp,
            SECCOMP_SET_MODE_FILTER,
            0 as libc::c_ulong,
            std::ptr::null::<SockFprog>(),
        )
    };
    rc == -1 && io::Error::last_os_error().raw_os_error() == Some(libc::EFAULT)
}

/// The real seccomp-BPF backend.
#[derive(Debug, Default)]
pub struct KernelSeccomp;

impl KernelSeccomp {
    pub fn new() -> Self {
        Self
    }
}

impl SyscallInterceptor for KernelSeccomp {
    fn is_supported(&self) -> bool {
        probe_filter_support()
    }

    fn install(&self, policy: Policy) -> Result<(), SandboxError> {
        let program = bpf::compile_policy(&policy)?;
        // Publish before arming: from the first bounced call onward the
        // trampoline consults this copy. One filter per process lifetime.
        if INSTALLED_POLICY.set(policy).is_err() {
            return Err(SandboxError::AlreadyArmed);
        }
        install_sigsys_handler().map_err(SandboxError::SigsysHandler)?;
        enable_no_new_privs().map_err(SandboxError::NoNewPrivs)?;
        install_filter(&program).map_err(SandboxError::InstallFilter)?;
        tracing::info!(
            "Seccomp filter installed: {} policy, {} instructions",
            policy,
            program.len()
        );
        Ok(())
    }
}
