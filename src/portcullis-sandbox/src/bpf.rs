//! Classic-BPF filter compilation.
//!
//! Compiles a [`Policy`] into the `sock_filter` program the kernel runs on
//! every syscall. The program checks the audit architecture first, refuses
//! the x32 ABI on x86-64, then resolves the syscall number against the
//! policy's verdicts through coalesced equality and range jumps. Numbers
//! past the end of the table fall through to the policy's out-of-range
//! verdict.
//!
//! The structures and opcodes are spelled out here rather than pulled from
//! a binding: `seccomp_data` offsets and BPF opcode values are kernel ABI
//! and fixed for all time.

use portcullis_policy::{Policy, Verdict};
use portcullis_syscalls::{MAX_SYSCALL, MIN_SYSCALL};

use crate::error::SandboxError;

/// One classic-BPF instruction, `struct sock_filter`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct SockFilter {
    pub code: u16,
    pub jt: u8,
    pub jf: u8,
    pub k: u32,
}

/// `struct sock_fprog`: the instruction vector handed to seccomp(2).
#[repr(C)]
pub(crate) struct SockFprog {
    pub len: u16,
    pub filter: *const SockFilter,
}

pub(crate) const BPF_LD: u16 = 0x00;
pub(crate) const BPF_JMP: u16 = 0x05;
pub(crate) const BPF_RET: u16 = 0x06;
pub(crate) const BPF_W: u16 = 0x00;
pub(crate) const BPF_ABS: u16 = 0x20;
pub(crate) const BPF_JEQ: u16 = 0x10;
pub(crate) const BPF_JGT: u16 = 0x20;
pub(crate) const BPF_JGE: u16 = 0x30;
pub(crate) const BPF_K: u16 = 0x00;

pub(crate) const SECCOMP_RET_KILL_PROCESS: u32 = 0x8000_0000;
pub(crate) const SECCOMP_RET_TRAP: u32 = 0x0003_0000;
pub(crate) const SECCOMP_RET_ERRNO: u32 = 0x0005_0000;
pub(crate) const SECCOMP_RET_ALLOW: u32 = 0x7fff_0000;
const SECCOMP_RET_DATA: u32 = 0x0000_ffff;

/// Offsets into `struct seccomp_data`.
const SECCOMP_DATA_NR: u32 = 0;
const SECCOMP_DATA_ARCH: u32 = 4;

#[cfg(target_arch = "x86_64")]
pub(crate) const AUDIT_ARCH_CURRENT: u32 = 0xc000_003e; // AUDIT_ARCH_X86_64
#[cfg(target_arch = "x86")]
pub(crate) const AUDIT_ARCH_CURRENT: u32 = 0x4000_0003; // AUDIT_ARCH_I386

/// x32 syscalls report the x86-64 audit architecture with this bit set in
/// the number. The tables do not describe that ABI, so such calls are
/// killed outright.
#[cfg(target_arch = "x86_64")]
pub(crate) const X32_SYSCALL_BIT: u32 = 0x4000_0000;

/// Kernel limit on filter length, BPF_MAXINSNS.
const BPF_MAXINSNS: usize = 4096;

const fn stmt(code: u16, k: u32) -> SockFilter {
    SockFilter {
        code,
        jt: 0,
        jf: 0,
        k,
    }
}

const fn jump(code: u16, k: u32, jt: u8, jf: u8) -> SockFilter {
    SockFilter { code, jt, jf, k }
}

/// Map a verdict to the seccomp return action encoding it.
pub(crate) fn action_for_verdict(verdict: Verdict) -> u32 {
    match verdict {
        Verdict::Allow => SECCOMP_RET_ALLOW,
        Verdict::Errno(errno) => SECCOMP_RET_ERRNO | (errno as u32 & SECCOMP_RET_DATA),
        Verdict::Trap(_) => SECCOMP_RET_TRAP,
    }
}

/// A maximal range of consecutive syscall numbers sharing one action.
struct ActionRun {
    lo: u32,
    hi: u32,
    action: u32,
}

fn action_runs(policy: &Policy) -> Vec<ActionRun> {
    let mut runs: Vec<ActionRun> = Vec::new();
    for nr in MIN_SYSCALL..=MAX_SYSCALL {
        let action = action_for_verdict(policy.evaluate(nr));
        match runs.last_mut() {
            Some(run) if run.action == action && run.hi + 1 == nr as u32 => run.hi = nr as u32,
            _ => runs.push(ActionRun {
                lo: nr as u32,
                hi: nr as u32,
                action,
            }),
        }
    }
    // Runs sharing the fallthrough action are dead weight; numbers in them
    // reach the tail return anyway.
    let tail = action_for_verdict(policy.evaluate(MAX_SYSCALL + 1));
    runs.retain(|run| run.action != tail);
    runs
}

fn emit_run(program: &mut Vec<SockFilter>, run: &ActionRun) {
    if run.lo == run.hi {
        // if (nr == lo) return action
        program.push(jump(BPF_JMP | BPF_JEQ | BPF_K, run.lo, 0, 1));
    } else {
        // if (lo <= nr && nr <= hi) return action
        program.push(jump(BPF_JMP | BPF_JGE | BPF_K, run.lo, 0, 2));
        program.push(jump(BPF_JMP | BPF_JGT | BPF_K, run.hi, 1, 0));
    }
    program.push(stmt(BPF_RET | BPF_K, run.action));
}

/// Compile `policy` into a kernel-loadable filter program.
pub(crate) fn compile_policy(policy: &Policy) -> Result<Vec<SockFilter>, SandboxError> {
    let mut program = Vec::new();

    // Calls from a foreign ABI would be resolved against the wrong table;
    // kill the process rather than misread them.
    program.push(stmt(BPF_LD | BPF_W | BPF_ABS, SECCOMP_DATA_ARCH));
    program.push(jump(BPF_JMP | BPF_JEQ | BPF_K, AUDIT_ARCH_CURRENT, 1, 0));
    program.push(stmt(BPF_RET | BPF_K, SECCOMP_RET_KILL_PROCESS));

    program.push(stmt(BPF_LD | BPF_W | BPF_ABS, SECCOMP_DATA_NR));
    #[cfg(target_arch = "x86_64")]
    {
        program.push(jump(BPF_JMP | BPF_JGE | BPF_K, X32_SYSCALL_BIT, 0, 1));
        program.push(stmt(BPF_RET | BPF_K, SECCOMP_RET_KILL_PROCESS));
    }

    for run in action_runs(policy) {
        emit_run(&mut program, &run);
    }
    program.push(stmt(
        BPF_RET | BPF_K,
        action_for_verdict(policy.evaluate(MAX_SYSCALL + 1)),
    ));

    if program.len() > BPF_MAXINSNS {
        return Err(SandboxError::FilterTooLarge {
            len: program.len(),
        });
    }
    Ok(program)
}
