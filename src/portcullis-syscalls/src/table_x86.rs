//! Classification table for the 32-bit x86 syscall numbering.
//!
//! The 32-bit table carries the multiplexers (`socketcall`, `ipc`), the
//! `*64` large-file variants, the `*32` id variants and a number of
//! vestigial entries that never existed on 64-bit.

use libc::c_long;

use crate::Sysno;
use crate::class::SyscallClass;

pub const MIN_SYSCALL: Sysno = 0;
pub const MAX_SYSCALL: Sysno = 462;

const TABLE_LEN: usize = MAX_SYSCALL as usize + 1;

const KILL_SIGNALING: &[c_long] = &[libc::SYS_kill, libc::SYS_tkill, libc::SYS_tgkill];

const CLOCK_READ: &[c_long] = &[libc::SYS_clock_gettime, libc::SYS_gettimeofday, libc::SYS_time];

const CURRENT_DIRECTORY: &[c_long] = &[libc::SYS_getcwd, libc::SYS_chdir, libc::SYS_fchdir];

const UMASK: &[c_long] = &[libc::SYS_umask];

const PATH_FILESYSTEM: &[c_long] = &[
    libc::SYS_access,
    libc::SYS_chmod,
    libc::SYS_chown,
    libc::SYS_chown32,
    libc::SYS_creat,
    libc::SYS_execve,
    libc::SYS_faccessat,
    libc::SYS_fchmodat,
    libc::SYS_fchownat,
    libc::SYS_fstatat64,
    libc::SYS_futimesat,
    libc::SYS_lchown,
    libc::SYS_lchown32,
    libc::SYS_link,
    libc::SYS_linkat,
    libc::SYS_lookup_dcookie,
    libc::SYS_lstat,
    libc::SYS_oldlstat,
    libc::SYS_lstat64,
    libc::SYS_mkdir,
    libc::SYS_mkdirat,
    libc::SYS_mknod,
    libc::SYS_mknodat,
    libc::SYS_open,
    libc::SYS_openat,
    libc::SYS_readlink,
    libc::SYS_readlinkat,
    libc::SYS_rename,
    libc::SYS_renameat,
    libc::SYS_rmdir,
    libc::SYS_stat,
    libc::SYS_oldstat,
    libc::SYS_stat64,
    libc::SYS_statfs,
    libc::SYS_statfs64,
    libc::SYS_symlink,
    libc::SYS_symlinkat,
    libc::SYS_truncate,
    libc::SYS_truncate64,
    libc::SYS_unlink,
    libc::SYS_unlinkat,
    libc::SYS_uselib,
    libc::SYS_ustat,
    libc::SYS_utime,
    libc::SYS_utimensat,
    libc::SYS_utimes,
];

const FD_STAT: &[c_long] = &[libc::SYS_fstat, libc::SYS_fstat64];

const FD_MUTATION: &[c_long] = &[
    libc::SYS_fallocate,
    libc::SYS_fchmod,
    libc::SYS_fchown,
    libc::SYS_fchown32,
    libc::SYS_ftruncate,
    libc::SYS_ftruncate64,
    libc::SYS_getdents,
    libc::SYS_getdents64,
    libc::SYS_readdir,
];

const IDENTITY_READ: &[c_long] = &[
    libc::SYS_capget,
    libc::SYS_getegid,
    libc::SYS_getegid32,
    libc::SYS_geteuid,
    libc::SYS_geteuid32,
    libc::SYS_getgid,
    libc::SYS_getgid32,
    libc::SYS_getgroups,
    libc::SYS_getgroups32,
    libc::SYS_getpid,
    libc::SYS_getppid,
    libc::SYS_getresgid,
    libc::SYS_getresgid32,
    libc::SYS_getresuid,
    libc::SYS_getresuid32,
    libc::SYS_getsid,
    libc::SYS_gettid,
    libc::SYS_getuid,
    libc::SYS_getuid32,
];

const PRIVILEGE_CHANGE: &[c_long] = &[
    libc::SYS_capset,
    libc::SYS_ioperm,
    libc::SYS_iopl,
    libc::SYS_setfsgid,
    libc::SYS_setfsgid32,
    libc::SYS_setfsuid,
    libc::SYS_setfsuid32,
    libc::SYS_setgid,
    libc::SYS_setgid32,
    libc::SYS_setgroups,
    libc::SYS_setgroups32,
    libc::SYS_setregid,
    libc::SYS_setregid32,
    libc::SYS_setresgid,
    libc::SYS_setresgid32,
    libc::SYS_setresuid,
    libc::SYS_setresuid32,
    libc::SYS_setreuid,
    libc::SYS_setreuid32,
    libc::SYS_setuid,
    libc::SYS_setuid32,
];

const PROCESS_GROUP_SESSION: &[c_long] = &[
    libc::SYS_setpgid,
    libc::SYS_getpgrp,
    libc::SYS_setsid,
    libc::SYS_getpgid,
];

const SIGNAL_INSTALL: &[c_long] = &[
    libc::SYS_rt_sigaction,
    libc::SYS_rt_sigprocmask,
    libc::SYS_rt_sigreturn,
    libc::SYS_sigaction,
    libc::SYS_sigprocmask,
    libc::SYS_sigreturn,
];

const FD_LOCAL: &[c_long] = &[
    libc::SYS_close,
    libc::SYS_dup,
    libc::SYS_dup2,
    libc::SYS_dup3,
    libc::SYS_fcntl,
    libc::SYS_fcntl64,
];

const KERNEL_INTERNAL: &[c_long] = &[libc::SYS_restart_syscall];

const PROCESS_LIFECYCLE: &[c_long] = &[
    libc::SYS_clone,
    libc::SYS_exit,
    libc::SYS_exit_group,
    libc::SYS_wait4,
    libc::SYS_waitid,
    libc::SYS_waitpid,
];

const FUTEX: &[c_long] = &[
    libc::SYS_futex,
    libc::SYS_get_robust_list,
    libc::SYS_set_robust_list,
];

const EPOLL: &[c_long] = &[
    libc::SYS_epoll_create,
    libc::SYS_epoll_create1,
    libc::SYS_epoll_ctl,
    libc::SYS_epoll_wait,
];

const PIPE_PAIR: &[c_long] = &[libc::SYS_pipe, libc::SYS_pipe2];

const SOCKET_MULTIPLEX: &[c_long] = &[libc::SYS_socketcall];

const ADDRESS_SPACE: &[c_long] = &[
    libc::SYS_brk,
    libc::SYS_madvise,
    libc::SYS_mlock,
    libc::SYS_mmap,
    libc::SYS_mmap2,
    libc::SYS_mprotect,
    libc::SYS_munlock,
    libc::SYS_munmap,
];

const GENERAL_IO: &[c_long] = &[
    libc::SYS_lseek,
    libc::SYS__llseek,
    libc::SYS_poll,
    libc::SYS_ppoll,
    libc::SYS_pselect6,
    libc::SYS_read,
    libc::SYS_readv,
    libc::SYS_select,
    libc::SYS__newselect,
    libc::SYS_write,
    libc::SYS_writev,
];

const PRCTL: &[c_long] = &[libc::SYS_prctl];

const BASIC_SCHEDULER: &[c_long] = &[libc::SYS_sched_yield, libc::SYS_pause, libc::SYS_nanosleep];

const ADMIN: &[c_long] = &[
    libc::SYS_bdflush,
    libc::SYS_kexec_load,
    libc::SYS_reboot,
    libc::SYS_setdomainname,
    libc::SYS_sethostname,
    libc::SYS_syslog,
];

const KERNEL_MODULE: &[c_long] = &[
    libc::SYS_create_module,
    libc::SYS_delete_module,
    libc::SYS_get_kernel_syms,
    libc::SYS_init_module,
    libc::SYS_query_module,
];

const GLOBAL_FS_VIEW: &[c_long] = &[libc::SYS_pivot_root, libc::SYS_chroot, libc::SYS_sync];

const FS_CONTROL: &[c_long] = &[
    libc::SYS_mount,
    libc::SYS_nfsservctl,
    libc::SYS_quotactl,
    libc::SYS_swapoff,
    libc::SYS_swapon,
    libc::SYS_umount,
    libc::SYS_umount2,
];

const NUMA_MEMORY: &[c_long] = &[
    libc::SYS_get_mempolicy,
    libc::SYS_getcpu,
    libc::SYS_mbind,
    libc::SYS_migrate_pages,
    libc::SYS_move_pages,
    libc::SYS_set_mempolicy,
];

const POSIX_MESSAGE_QUEUE: &[c_long] = &[
    libc::SYS_mq_getsetattr,
    libc::SYS_mq_notify,
    libc::SYS_mq_open,
    libc::SYS_mq_timedreceive,
    libc::SYS_mq_timedsend,
    libc::SYS_mq_unlink,
];

const PROCESS_ENVIRONMENT: &[c_long] = &[
    libc::SYS_acct,
    libc::SYS_getrlimit,
    libc::SYS_ugetrlimit,
    libc::SYS_ulimit,
    libc::SYS_getrusage,
    libc::SYS_personality,
    libc::SYS_prlimit64,
    libc::SYS_setrlimit,
    libc::SYS_times,
];

const DEBUG_INTROSPECTION: &[c_long] = &[
    libc::SYS_ptrace,
    libc::SYS_process_vm_readv,
    libc::SYS_process_vm_writev,
    libc::SYS_kcmp,
];

const SYSTEM_STATUS: &[c_long] = &[
    libc::SYS__sysctl,
    libc::SYS_sysfs,
    libc::SYS_sysinfo,
    libc::SYS_uname,
    libc::SYS_olduname,
    libc::SYS_oldolduname,
];

const EVENTFD: &[c_long] = &[libc::SYS_eventfd, libc::SYS_eventfd2];

const ASYNC_IO: &[c_long] = &[
    libc::SYS_io_cancel,
    libc::SYS_io_destroy,
    libc::SYS_io_getevents,
    libc::SYS_io_setup,
    libc::SYS_io_submit,
];

const KEY_MANAGEMENT: &[c_long] = &[libc::SYS_add_key, libc::SYS_keyctl, libc::SYS_request_key];

const SYSV_IPC_MULTIPLEX: &[c_long] = &[libc::SYS_ipc];

const ADVANCED_SCHEDULER: &[c_long] = &[
    libc::SYS_ioprio_get,
    libc::SYS_ioprio_set,
    libc::SYS_sched_get_priority_max,
    libc::SYS_sched_get_priority_min,
    libc::SYS_sched_getaffinity,
    libc::SYS_sched_getparam,
    libc::SYS_sched_getscheduler,
    libc::SYS_sched_rr_get_interval,
    libc::SYS_sched_setaffinity,
    libc::SYS_sched_setparam,
    libc::SYS_sched_setscheduler,
];

const INOTIFY: &[c_long] = &[
    libc::SYS_inotify_add_watch,
    libc::SYS_inotify_init,
    libc::SYS_inotify_init1,
    libc::SYS_inotify_rm_watch,
];

const FANOTIFY: &[c_long] = &[libc::SYS_fanotify_init, libc::SYS_fanotify_mark];

const INTERVAL_TIMER: &[c_long] = &[libc::SYS_getitimer, libc::SYS_alarm, libc::SYS_setitimer];

const ADVANCED_TIMER: &[c_long] = &[
    libc::SYS_timer_create,
    libc::SYS_timer_delete,
    libc::SYS_timer_getoverrun,
    libc::SYS_timer_gettime,
    libc::SYS_timer_settime,
    libc::SYS_timerfd_create,
    libc::SYS_timerfd_gettime,
    libc::SYS_timerfd_settime,
];

const EXTENDED_ATTRIBUTES: &[c_long] = &[
    libc::SYS_fgetxattr,
    libc::SYS_flistxattr,
    libc::SYS_fremovexattr,
    libc::SYS_fsetxattr,
    libc::SYS_getxattr,
    libc::SYS_lgetxattr,
    libc::SYS_listxattr,
    libc::SYS_llistxattr,
    libc::SYS_lremovexattr,
    libc::SYS_lsetxattr,
    libc::SYS_removexattr,
    libc::SYS_setxattr,
];

const UNSORTED: &[c_long] = &[
    libc::SYS_name_to_handle_at,
    libc::SYS_open_by_handle_at,
    libc::SYS_perf_event_open,
    libc::SYS_syncfs,
    libc::SYS_vhangup,
    // Reserved or never-implemented numbers.
    libc::SYS_afs_syscall,
    libc::SYS_break,
    libc::SYS_getpmsg,
    libc::SYS_gtty,
    libc::SYS_idle,
    libc::SYS_lock,
    libc::SYS_mpx,
    libc::SYS_prof,
    libc::SYS_profil,
    libc::SYS_putpmsg,
    libc::SYS_stty,
    libc::SYS_vserver,
];

pub(crate) static CLASS_TABLE: [u64; TABLE_LEN] = build();

const fn mark(table: &mut [u64; TABLE_LEN], group: &[c_long], bits: u64) {
    let mut i = 0;
    while i < group.len() {
        // An identifier past MAX_SYSCALL fails the build here.
        table[group[i] as usize] |= bits;
        i += 1;
    }
}

const fn build() -> [u64; TABLE_LEN] {
    let mut t = [0u64; TABLE_LEN];
    mark(&mut t, KILL_SIGNALING, SyscallClass::KILL_SIGNALING.bits());
    mark(&mut t, CLOCK_READ, SyscallClass::CLOCK_READ.bits());
    mark(&mut t, CURRENT_DIRECTORY, SyscallClass::CURRENT_DIRECTORY.bits());
    mark(&mut t, UMASK, SyscallClass::UMASK.bits());
    mark(&mut t, PATH_FILESYSTEM, SyscallClass::PATH_FILESYSTEM.bits());
    mark(&mut t, FD_STAT, SyscallClass::FD_STAT.bits());
    mark(&mut t, FD_MUTATION, SyscallClass::FD_MUTATION.bits());
    mark(&mut t, IDENTITY_READ, SyscallClass::IDENTITY_READ.bits());
    mark(&mut t, PRIVILEGE_CHANGE, SyscallClass::PRIVILEGE_CHANGE.bits());
    mark(
        &mut t,
        PROCESS_GROUP_SESSION,
        SyscallClass::PROCESS_GROUP_SESSION.bits(),
    );
    mark(&mut t, SIGNAL_INSTALL, SyscallClass::SIGNAL_INSTALL.bits());
    mark(&mut t, FD_LOCAL, SyscallClass::FD_LOCAL.bits());
    mark(&mut t, KERNEL_INTERNAL, SyscallClass::KERNEL_INTERNAL.bits());
    mark(&mut t, PROCESS_LIFECYCLE, SyscallClass::PROCESS_LIFECYCLE.bits());
    mark(&mut t, FUTEX, SyscallClass::FUTEX.bits());
    mark(&mut t, EPOLL, SyscallClass::EPOLL.bits());
    mark(&mut t, PIPE_PAIR, SyscallClass::PIPE_PAIR.bits());
    mark(&mut t, SOCKET_MULTIPLEX, SyscallClass::SOCKET_MULTIPLEX.bits());
    mark(&mut t, ADDRESS_SPACE, SyscallClass::ADDRESS_SPACE.bits());
    mark(&mut t, GENERAL_IO, SyscallClass::GENERAL_IO.bits());
    mark(&mut t, PRCTL, SyscallClass::PRCTL.bits());
    mark(&mut t, BASIC_SCHEDULER, SyscallClass::BASIC_SCHEDULER.bits());
    mark(&mut t, ADMIN, SyscallClass::ADMIN.bits());
    mark(&mut t, KERNEL_MODULE, SyscallClass::KERNEL_MODULE.bits());
    mark(&mut t, GLOBAL_FS_VIEW, SyscallClass::GLOBAL_FS_VIEW.bits());
    mark(&mut t, FS_CONTROL, SyscallClass::FS_CONTROL.bits());
    mark(&mut t, NUMA_MEMORY, SyscallClass::NUMA_MEMORY.bits());
    mark(
        &mut t,
        POSIX_MESSAGE_QUEUE,
        SyscallClass::POSIX_MESSAGE_QUEUE.bits(),
    );
    mark(
        &mut t,
        PROCESS_ENVIRONMENT,
        SyscallClass::PROCESS_ENVIRONMENT.bits(),
    );
    mark(
        &mut t,
        DEBUG_INTROSPECTION,
        SyscallClass::DEBUG_INTROSPECTION.bits(),
    );
    mark(&mut t, SYSTEM_STATUS, SyscallClass::SYSTEM_STATUS.bits());
    mark(&mut t, EVENTFD, SyscallClass::EVENTFD.bits());
    mark(&mut t, ASYNC_IO, SyscallClass::ASYNC_IO.bits());
    mark(&mut t, KEY_MANAGEMENT, SyscallClass::KEY_MANAGEMENT.bits());
    mark(
        &mut t,
        SYSV_IPC_MULTIPLEX,
        SyscallClass::SYSV_IPC_MULTIPLEX.bits(),
    );
    mark(
        &mut t,
        ADVANCED_SCHEDULER,
        SyscallClass::ADVANCED_SCHEDULER.bits(),
    );
    mark(&mut t, INOTIFY, SyscallClass::INOTIFY.bits());
    mark(&mut t, FANOTIFY, SyscallClass::FANOTIFY.bits());
    mark(&mut t, INTERVAL_TIMER, SyscallClass::INTERVAL_TIMER.bits());
    mark(&mut t, ADVANCED_TIMER, SyscallClass::ADVANCED_TIMER.bits());
    mark(
        &mut t,
        EXTENDED_ATTRIBUTES,
        SyscallClass::EXTENDED_ATTRIBUTES.bits(),
    );
    mark(&mut t, UNSORTED, SyscallClass::UNSORTED.bits());
    t
}
