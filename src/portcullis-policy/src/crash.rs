//! Deliberate crash for denied syscalls.
//!
//! A watched syscall does not simply fail. The process writes to an unmapped
//! address derived from the syscall identifier and its first two arguments,
//! so the fault address in the crash report names the call that was
//! attempted. Everything here runs inside a signal handler and must stay
//! async-signal-safe: no allocation, no locking, no formatting.

use crate::verdict::SyscallData;

/// Receives the encoded fault addresses. Production writes straight through
/// each address (and faults on the first unmapped one); tests record the
/// sequence instead.
pub(crate) trait FaultSink {
    fn store(&mut self, addr: usize);
}

/// Compute the two fault addresses for a trapped syscall, most specific
/// first.
///
/// The identifier keeps its low bits as-is when it is in the plausible
/// range `0..1024`; anything else collapses to zero. The first two syscall
/// arguments contribute one byte each, shifted to bits 12 and 20. The
/// second address drops the argument bytes again in case the first one
/// happens to land on a mapped page.
pub fn fault_addresses(data: &SyscallData) -> [usize; 2] {
    let mut encoded: u64 = if data.nr >= 0 && data.nr < 1024 {
        data.nr as u64
    } else {
        0
    };
    encoded |= (data.args[0] & 0xff) << 12;
    encoded |= (data.args[1] & 0xff) << 20;
    [encoded as usize, (encoded & 0xfff) as usize]
}

pub(crate) fn store_fault_markers(sink: &mut impl FaultSink, data: &SyscallData) {
    let [specific, truncated] = fault_addresses(data);
    sink.store(specific);
    sink.store(truncated);
}

struct RawFaultingStore;

impl FaultSink for RawFaultingStore {
    fn store(&mut self, addr: usize) {
        // Expected to fault. The volatile write keeps the optimizer from
        // removing a store to memory we never read back.
        unsafe { core::ptr::write_volatile(addr as *mut u8, 0) };
    }
}

/// Crash the calling process, encoding `data` into the fault address.
///
/// Never returns. If both marker addresses turn out to be mapped, the
/// process exits rather than resuming the denied syscall.
pub fn crash_on_denied_syscall(data: &SyscallData) -> ! {
    store_fault_markers(&mut RawFaultingStore, data);
    loop {
        // _exit can itself be subject to the filter; keep trying rather
        // than fall through.
        unsafe { libc::_exit(1) };
    }
}
