//! Semantic classes of Linux system calls.
//!
//! Each classified syscall carries exactly one class bit; the classes form a
//! partition of the known syscall surface for the compiled architecture.
//! Policies decide verdicts per class (or per individual syscall) instead of
//! maintaining one membership predicate per class.

use bitflags::bitflags;

bitflags! {
    /// Semantic tag of a system call.
    ///
    /// The empty set means the syscall is unknown to the table (either a
    /// hole in the numbering, a syscall newer than the table, or an
    /// out-of-range identifier). Policies treat unknown as hostile.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SyscallClass: u64 {
        /// Sends signals to processes or threads (`kill`, `tkill`, ...).
        const KILL_SIGNALING = 1 << 0;
        /// Reads wall-clock or calendar time. Clock mutation is elsewhere.
        const CLOCK_READ = 1 << 1;
        /// Reads or moves the current working directory.
        const CURRENT_DIRECTORY = 1 << 2;
        const UMASK = 1 << 3;
        /// Reaches the filesystem through a pathname (may create fds).
        const PATH_FILESYSTEM = 1 << 4;
        /// Reads metadata of an already-open descriptor.
        const FD_STAT = 1 << 5;
        /// Mutates filesystem state through an already-open descriptor.
        const FD_MUTATION = 1 << 6;
        /// Reads process/thread identity (uids, gids, pids).
        const IDENTITY_READ = 1 << 7;
        /// Changes credentials or hardware privilege level.
        const PRIVILEGE_CHANGE = 1 << 8;
        const PROCESS_GROUP_SESSION = 1 << 9;
        /// Installs or returns from signal handlers.
        const SIGNAL_INSTALL = 1 << 10;
        /// Purely local descriptor plumbing (`close`, `dup`, `fcntl`, ...).
        const FD_LOCAL = 1 << 11;
        /// Kernel-internal entry points (`restart_syscall`).
        const KERNEL_INTERNAL = 1 << 12;
        /// Process and thread creation, exit and reaping.
        const PROCESS_LIFECYCLE = 1 << 13;
        const FUTEX = 1 << 14;
        /// Creates local byte channels (`pipe`, `pipe2`, `socketpair`).
        const PIPE_PAIR = 1 << 15;
        /// Queries or tunes existing sockets (64-bit widths only).
        const SOCKET_INFO = 1 << 16;
        /// The 32-bit `socketcall` multiplexer.
        const SOCKET_MULTIPLEX = 1 << 17;
        /// Manages the process's own address space.
        const ADDRESS_SPACE = 1 << 18;
        /// Descriptor read/write/poll traffic.
        const GENERAL_IO = 1 << 19;
        const PRCTL = 1 << 20;
        /// Yield, pause, sleep.
        const BASIC_SCHEDULER = 1 << 21;
        const EPOLL = 1 << 22;
        /// Machine administration (reboot, hostname, kernel log).
        const ADMIN = 1 << 23;
        const KERNEL_MODULE = 1 << 24;
        /// Changes the process's view of the filesystem tree.
        const GLOBAL_FS_VIEW = 1 << 25;
        /// Mounts, quotas, swap.
        const FS_CONTROL = 1 << 26;
        /// NUMA and page-placement control.
        const NUMA_MEMORY = 1 << 27;
        const POSIX_MESSAGE_QUEUE = 1 << 28;
        /// Accounting, rlimits, personality.
        const PROCESS_ENVIRONMENT = 1 << 29;
        /// Debugging and cross-process introspection (`ptrace`, ...).
        const DEBUG_INTROSPECTION = 1 << 30;
        /// Global system status (`uname`, `sysinfo`, ...).
        const SYSTEM_STATUS = 1 << 31;
        const EVENTFD = 1 << 32;
        /// Kernel async I/O contexts.
        const ASYNC_IO = 1 << 33;
        /// Kernel key retention service.
        const KEY_MANAGEMENT = 1 << 34;
        const SYSV_SEMAPHORES = 1 << 35;
        /// SysV shared memory attach/control/detach. `shmget` is
        /// deliberately not a member: segment creation stays unclassified.
        const SYSV_SHARED_MEMORY = 1 << 36;
        const SYSV_MESSAGE_QUEUE = 1 << 37;
        /// The 32-bit `ipc` multiplexer.
        const SYSV_IPC_MULTIPLEX = 1 << 38;
        /// Priorities, affinities, scheduling classes.
        const ADVANCED_SCHEDULER = 1 << 39;
        const INOTIFY = 1 << 40;
        const FANOTIFY = 1 << 41;
        /// `alarm` and the interval timers.
        const INTERVAL_TIMER = 1 << 42;
        /// POSIX timers and timerfd.
        const ADVANCED_TIMER = 1 << 43;
        const EXTENDED_ATTRIBUTES = 1 << 44;
        /// Known but vestigial or unimplemented entries, kept classified so
        /// they do not read as table holes.
        const UNSORTED = 1 << 45;
    }
}
