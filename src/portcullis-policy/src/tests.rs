//! Tests for the portcullis policy crate.
//!
//! These tests verify:
//! 1. Verdict and trap-kind semantics
//! 2. Crash fault-address encoding and store ordering
//! 3. Warmed-file cache behavior, including the trap-side open emulation
//! 4. Per-policy verdicts for the baseline, GPU, plugin and denylist tables
//! 5. Policy selection per process type and option knobs
//! 6. Whole-policy properties: totality, determinism, fail-closed
//!
//! Nothing here installs a kernel filter; that is irreversible and belongs
//! to the enforcement crate's integration story.

use super::*;

mod verdict_tests {
    use super::*;

    static FILE_A: WarmedFile = WarmedFile::new(c"/tmp/portcullis-eq-a");
    static FILE_B: WarmedFile = WarmedFile::new(c"/tmp/portcullis-eq-b");

    #[test]
    fn test_verdict_accessors() {
        assert!(Verdict::Allow.is_allow());
        assert!(!Verdict::Allow.is_trap());
        assert_eq!(Verdict::Errno(libc::ENOENT).errno(), Some(libc::ENOENT));
        assert_eq!(Verdict::Allow.errno(), None);
        assert!(Verdict::Trap(TrapKind::Crash).is_trap());
    }

    #[test]
    fn test_trap_kind_compares_cache_identity() {
        let a = Verdict::Trap(TrapKind::CachedOpen(&FILE_A));
        let b = Verdict::Trap(TrapKind::CachedOpen(&FILE_B));
        assert_eq!(a, Verdict::Trap(TrapKind::CachedOpen(&FILE_A)));
        assert_ne!(a, b);
        assert_ne!(a, Verdict::Trap(TrapKind::Crash));
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::Allow.to_string(), "allow");
        assert_eq!(Verdict::Errno(13).to_string(), "errno(13)");
        assert_eq!(Verdict::Trap(TrapKind::Crash).to_string(), "trap(crash)");
        assert_eq!(
            Verdict::Trap(TrapKind::CachedOpen(&FILE_A)).to_string(),
            "trap(cached-open)"
        );
    }
}

mod crash_tests {
    use super::*;
    use crate::crash::{FaultSink, store_fault_markers};
    use pretty_assertions::assert_eq;

    struct RecordingSink {
        stores: Vec<usize>,
    }

    impl FaultSink for RecordingSink {
        fn store(&mut self, addr: usize) {
            self.stores.push(addr);
        }
    }

    #[test]
    fn test_fault_addresses_encode_number_and_args() {
        let data = SyscallData::new(5, [0x12, 0x34, 0, 0, 0, 0]);
        let [specific, truncated] = fault_addresses(&data);
        assert_eq!(specific, 5 | (0x12 << 12) | (0x34 << 20));
        assert_eq!(truncated, 5);
    }

    #[test]
    fn test_truncated_address_keeps_low_bits_only() {
        let data = SyscallData::new(311, [0xff, 0xff, 0, 0, 0, 0]);
        let [specific, truncated] = fault_addresses(&data);
        assert_eq!(truncated, specific & 0xfff);
        assert_eq!(truncated, 311);
    }

    #[test]
    fn test_implausible_numbers_collapse_to_zero() {
        // Numbers outside 0..1024 cannot be real syscalls; only the
        // argument bytes survive.
        let junk = SyscallData::new(0x1_0000, [0x01, 0x02, 0, 0, 0, 0]);
        let [specific, truncated] = fault_addresses(&junk);
        assert_eq!(specific, (0x01 << 12) | (0x02 << 20));
        assert_eq!(truncated, 0);

        let negative = SyscallData::new(-1, [0, 0, 0, 0, 0, 0]);
        assert_eq!(fault_addresses(&negative), [0, 0]);
    }

    #[test]
    fn test_only_low_argument_bytes_contribute() {
        let data = SyscallData::new(7, [0xabcd_1112, 0xef34, 0, 0, 0, 0]);
        let [specific, _] = fault_addresses(&data);
        assert_eq!(specific, 7 | (0x12 << 12) | (0x34 << 20));
    }

    #[test]
    fn test_markers_stored_most_specific_first() {
        let mut sink = RecordingSink { stores: Vec::new() };
        let data = SyscallData::new(5, [0x12, 0x34, 0, 0, 0, 0]);
        store_fault_markers(&mut sink, &data);
        assert_eq!(sink.stores, vec![5 | (0x12 << 12) | (0x34 << 20), 5]);
    }
}

mod warmfile_tests {
    use super::*;
    use std::ffi::{CStr, CString};
    use std::io::{Read, Write};
    use std::os::fd::FromRawFd;
    use std::os::unix::ffi::OsStrExt;

    fn leak_path(path: &std::path::Path) -> &'static CStr {
        let cstring = CString::new(path.as_os_str().as_bytes()).unwrap();
        Box::leak(cstring.into_boxed_c_str())
    }

    fn read_fd_to_string(fd: libc::c_int) -> String {
        let mut file = unsafe { std::fs::File::from_raw_fd(fd) };
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        out
    }

    fn warmed_fixture(content: &str) -> (tempfile::NamedTempFile, &'static WarmedFile) {
        let mut temp = tempfile::NamedTempFile::new().unwrap();
        temp.write_all(content.as_bytes()).unwrap();
        let record = Box::leak(Box::new(WarmedFile::new(leak_path(temp.path()))));
        (temp, record)
    }

    #[test]
    fn test_warm_publishes_descriptor() {
        let (_temp, record) = warmed_fixture("driver-config\n");
        assert!(!record.is_warmed());
        record.warm().unwrap();
        assert!(record.is_warmed());
        let fd = record.serve_cached();
        assert!(fd >= 0);
        assert_eq!(read_fd_to_string(fd as libc::c_int), "driver-config\n");
    }

    #[test]
    fn test_warm_is_idempotent() {
        let (_temp, record) = warmed_fixture("once\n");
        record.warm().unwrap();
        record.warm().unwrap();
        let fd = record.serve_cached();
        assert!(fd >= 0);
        assert_eq!(read_fd_to_string(fd as libc::c_int), "once\n");
    }

    #[test]
    fn test_each_serve_starts_at_offset_zero() {
        let (_temp, record) = warmed_fixture("alpha beta\n");
        record.warm().unwrap();

        let first = record.serve_cached();
        assert!(first >= 0);
        assert_eq!(read_fd_to_string(first as libc::c_int), "alpha beta\n");

        // Draining the first duplicate must not shorten what a later
        // serve sees.
        let second = record.serve_cached();
        assert!(second >= 0);
        assert_eq!(read_fd_to_string(second as libc::c_int), "alpha beta\n");
    }

    #[test]
    fn test_unwarmed_record_serves_enoent() {
        static COLD: WarmedFile = WarmedFile::new(c"/tmp/portcullis-never-warmed");
        assert_eq!(COLD.serve_cached(), -(libc::ENOENT as isize));
    }

    #[test]
    fn test_failed_warm_is_latched() {
        let dir = tempfile::tempdir().unwrap();
        let missing = leak_path(&dir.path().join("missing"));
        let record = WarmedFile::new(missing);

        let err = record.warm().unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::ENOENT));
        assert!(!record.is_warmed());

        // The failure sticks: no retry, the trap path stays on ENOENT.
        assert!(record.warm().is_err());
        assert_eq!(record.serve_cached(), -(libc::ENOENT as isize));
    }

    #[test]
    fn test_cached_open_trap_serves_exact_request() {
        let (_temp, record) = warmed_fixture("cached contents\n");
        record.warm().unwrap();

        let path_arg = record.path().as_ptr() as usize as u64;
        let data = SyscallData::new(2, [path_arg, libc::O_RDONLY as u64, 0, 0, 0, 0]);
        let fd = cached_open_trap(record, &data);
        assert!(fd >= 0);
        assert_eq!(read_fd_to_string(fd as libc::c_int), "cached contents\n");
    }

    #[test]
    fn test_cached_open_trap_rejects_other_paths() {
        let (_temp, record) = warmed_fixture("irrelevant\n");
        record.warm().unwrap();

        let other = CString::new("/definitely/not/the/warmed/path").unwrap();
        let data = SyscallData::new(
            2,
            [other.as_ptr() as usize as u64, libc::O_RDONLY as u64, 0, 0, 0, 0],
        );
        assert_eq!(cached_open_trap(record, &data), -(libc::ENOENT as isize));
    }

    #[test]
    fn test_cached_open_trap_requires_read_only() {
        let (_temp, record) = warmed_fixture("irrelevant\n");
        record.warm().unwrap();
        let path_arg = record.path().as_ptr() as usize as u64;

        for flags in [
            libc::O_WRONLY,
            libc::O_RDWR,
            libc::O_RDONLY | libc::O_CLOEXEC,
            libc::O_RDONLY | libc::O_CREAT,
        ] {
            let data = SyscallData::new(2, [path_arg, flags as u64, 0, 0, 0, 0]);
            assert_eq!(
                cached_open_trap(record, &data),
                -(libc::ENOENT as isize),
                "flags {flags:#x} must not be served"
            );
        }
    }

    #[test]
    fn test_cached_open_trap_rejects_null_path() {
        let (_temp, record) = warmed_fixture("irrelevant\n");
        record.warm().unwrap();
        let data = SyscallData::new(2, [0, libc::O_RDONLY as u64, 0, 0, 0, 0]);
        assert_eq!(cached_open_trap(record, &data), -(libc::ENOENT as isize));
    }
}

#[cfg(target_arch = "x86_64")]
mod baseline_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn baseline() -> Policy {
        Policy::baseline(PolicyOptions::default())
    }

    #[test]
    fn test_everyday_syscalls_are_allowed() {
        for nr in [
            libc::SYS_read,
            libc::SYS_write,
            libc::SYS_close,
            libc::SYS_mmap,
            libc::SYS_futex,
            libc::SYS_clock_gettime,
            libc::SYS_exit_group,
            libc::SYS_epoll_wait,
            libc::SYS_rt_sigaction,
            libc::SYS_kill,
        ] {
            assert_eq!(baseline().evaluate(nr), Verdict::Allow, "nr {nr}");
        }
    }

    #[test]
    fn test_filesystem_reads_as_nonexistent() {
        for nr in [
            libc::SYS_open,
            libc::SYS_openat,
            libc::SYS_access,
            libc::SYS_stat,
            libc::SYS_execve,
            libc::SYS_chdir,
            libc::SYS_getcwd,
        ] {
            assert_eq!(
                baseline().evaluate(nr),
                Verdict::Errno(libc::ENOENT),
                "nr {nr}"
            );
        }
    }

    #[test]
    fn test_descriptor_mutation_is_refused() {
        for nr in [
            libc::SYS_umask,
            libc::SYS_fchmod,
            libc::SYS_ftruncate,
            libc::SYS_getdents,
        ] {
            assert_eq!(
                baseline().evaluate(nr),
                Verdict::Errno(libc::EPERM),
                "nr {nr}"
            );
        }
    }

    #[test]
    fn test_watched_syscalls_crash() {
        for nr in [
            libc::SYS_ptrace,
            libc::SYS_getsockopt,
            libc::SYS_eventfd2,
            libc::SYS_shmat,
            libc::SYS_times,
            libc::SYS_setuid,
            libc::SYS_mount,
            libc::SYS_init_module,
        ] {
            assert_eq!(
                baseline().evaluate(nr),
                Verdict::Trap(TrapKind::Crash),
                "nr {nr}"
            );
        }
    }

    #[test]
    fn test_unclassified_syscalls_crash() {
        // ioctl and socket carry process-type-specific handling; the
        // baseline itself watches them.
        assert_eq!(baseline().evaluate(libc::SYS_ioctl), Verdict::Trap(TrapKind::Crash));
        assert_eq!(baseline().evaluate(libc::SYS_socket), Verdict::Trap(TrapKind::Crash));
        // Numbering hole.
        assert_eq!(baseline().evaluate(400), Verdict::Trap(TrapKind::Crash));
    }

    #[test]
    fn test_class_aggregates_partition_the_taxonomy() {
        use crate::policy::{
            BASELINE_ALLOWED, BASELINE_HIDDEN_FILESYSTEM, BASELINE_REFUSED, BASELINE_WATCHED,
        };
        let aggregates = [
            BASELINE_ALLOWED,
            BASELINE_HIDDEN_FILESYSTEM,
            BASELINE_REFUSED,
            BASELINE_WATCHED,
        ];
        for (i, a) in aggregates.iter().enumerate() {
            for b in aggregates.iter().skip(i + 1) {
                assert!(a.intersection(*b).is_empty(), "{a:?} overlaps {b:?}");
            }
        }
        let covered = aggregates
            .iter()
            .fold(portcullis_syscalls::SyscallClass::empty(), |acc, a| acc | *a);
        assert_eq!(covered, portcullis_syscalls::SyscallClass::all());
    }
}

#[cfg(target_arch = "x86_64")]
mod gpu_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    static TEST_CACHE: WarmedFile = WarmedFile::new(c"/tmp/portcullis-gpu-test-cache");

    fn gpu() -> Policy {
        Policy::for_process(ProcessType::Gpu, PolicyOptions::default())
    }

    #[test]
    fn test_device_control_is_allowed() {
        assert_eq!(gpu().evaluate(libc::SYS_ioctl), Verdict::Allow);
    }

    #[test]
    fn test_socket_probe_fails_softly() {
        assert_eq!(gpu().evaluate(libc::SYS_socket), Verdict::Errno(libc::EACCES));
    }

    #[test]
    fn test_socket_probe_knob_reverts_to_crash() {
        let options = PolicyOptions {
            deny_gpu_socket_probe: false,
            ..PolicyOptions::default()
        };
        let policy = Policy::for_process(ProcessType::Gpu, options);
        assert_eq!(policy.evaluate(libc::SYS_socket), Verdict::Trap(TrapKind::Crash));
    }

    #[test]
    fn test_open_is_served_from_the_warmed_cache() {
        assert_eq!(
            gpu().evaluate(libc::SYS_open),
            Verdict::Trap(TrapKind::CachedOpen(&GPU_DRIVER_CONFIG))
        );
        // openat is not intercepted; it stays hidden like the rest of the
        // filesystem.
        assert_eq!(gpu().evaluate(libc::SYS_openat), Verdict::Errno(libc::ENOENT));
    }

    #[test]
    fn test_video_decode_knob_opens_for_real() {
        let options = PolicyOptions {
            accelerated_video_decode: true,
            ..PolicyOptions::default()
        };
        let policy = Policy::for_process(ProcessType::Gpu, options);
        assert_eq!(policy.evaluate(libc::SYS_open), Verdict::Allow);
    }

    #[test]
    fn test_custom_cache_record_is_carried_in_the_verdict() {
        let policy = Policy::gpu_with_cache(PolicyOptions::default(), &TEST_CACHE);
        assert_eq!(
            policy.evaluate(libc::SYS_open),
            Verdict::Trap(TrapKind::CachedOpen(&TEST_CACHE))
        );
    }

    #[test]
    fn test_eventfd_is_allowed() {
        assert_eq!(gpu().evaluate(libc::SYS_eventfd), Verdict::Allow);
        assert_eq!(gpu().evaluate(libc::SYS_eventfd2), Verdict::Allow);
    }

    #[test]
    fn test_everything_else_falls_to_baseline() {
        assert_eq!(gpu().evaluate(libc::SYS_read), Verdict::Allow);
        assert_eq!(gpu().evaluate(libc::SYS_access), Verdict::Errno(libc::ENOENT));
        assert_eq!(gpu().evaluate(libc::SYS_ptrace), Verdict::Trap(TrapKind::Crash));
    }
}

#[cfg(target_arch = "x86_64")]
mod plugin_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plugin() -> Policy {
        Policy::for_process(ProcessType::Plugin, PolicyOptions::default())
    }

    #[test]
    fn test_scheduling_surface_is_allowed() {
        for nr in [
            libc::SYS_sched_getaffinity,
            libc::SYS_sched_setscheduler,
            libc::SYS_times,
        ] {
            assert_eq!(plugin().evaluate(nr), Verdict::Allow, "nr {nr}");
        }
        // The rest of the scheduler class stays watched.
        assert_eq!(
            plugin().evaluate(libc::SYS_sched_setparam),
            Verdict::Trap(TrapKind::Crash)
        );
    }

    #[test]
    fn test_device_probes_fail_softly() {
        assert_eq!(plugin().evaluate(libc::SYS_ioctl), Verdict::Errno(libc::ENOTTY));
        assert_eq!(plugin().evaluate(libc::SYS_socket), Verdict::Errno(libc::EACCES));
    }

    #[test]
    fn test_shared_memory_attach_is_allowed() {
        for nr in [libc::SYS_shmat, libc::SYS_shmctl, libc::SYS_shmdt] {
            assert_eq!(plugin().evaluate(nr), Verdict::Allow, "nr {nr}");
        }
        // Segment creation is not part of the allowed surface.
        assert_eq!(plugin().evaluate(libc::SYS_shmget), Verdict::Trap(TrapKind::Crash));
    }

    #[test]
    fn test_shared_memory_knob_reverts_to_crash() {
        let options = PolicyOptions {
            allow_plugin_shared_memory: false,
            ..PolicyOptions::default()
        };
        let policy = Policy::for_process(ProcessType::Plugin, options);
        assert_eq!(policy.evaluate(libc::SYS_shmat), Verdict::Trap(TrapKind::Crash));
    }

    #[test]
    fn test_everything_else_falls_to_baseline() {
        assert_eq!(plugin().evaluate(libc::SYS_write), Verdict::Allow);
        assert_eq!(plugin().evaluate(libc::SYS_open), Verdict::Errno(libc::ENOENT));
        assert_eq!(plugin().evaluate(libc::SYS_umask), Verdict::Errno(libc::EPERM));
    }
}

#[cfg(target_arch = "x86_64")]
mod denylist_tests {
    use super::*;
    use portcullis_syscalls::MAX_SYSCALL;
    use pretty_assertions::assert_eq;

    fn denylist() -> Policy {
        Policy::for_process(ProcessType::Renderer, PolicyOptions::default())
    }

    #[test]
    fn test_cross_process_introspection_crashes() {
        for nr in [
            libc::SYS_ptrace,
            libc::SYS_process_vm_readv,
            libc::SYS_process_vm_writev,
            libc::SYS_migrate_pages,
            libc::SYS_move_pages,
        ] {
            assert_eq!(denylist().evaluate(nr), Verdict::Trap(TrapKind::Crash), "nr {nr}");
        }
    }

    #[test]
    fn test_everything_else_in_range_is_allowed() {
        for nr in [libc::SYS_open, libc::SYS_socket, libc::SYS_execve, 400] {
            assert_eq!(denylist().evaluate(nr), Verdict::Allow, "nr {nr}");
        }
    }

    #[test]
    fn test_out_of_range_is_enosys() {
        assert_eq!(denylist().evaluate(-1), Verdict::Errno(libc::ENOSYS));
        assert_eq!(
            denylist().evaluate(MAX_SYSCALL + 1),
            Verdict::Errno(libc::ENOSYS)
        );
    }

    #[test]
    fn test_allow_all_still_bounds_the_range() {
        let policy = Policy::allow_all();
        assert_eq!(policy.evaluate(libc::SYS_ptrace), Verdict::Allow);
        assert_eq!(policy.evaluate(MAX_SYSCALL + 1), Verdict::Errno(libc::ENOSYS));
    }
}

#[cfg(target_arch = "x86_64")]
mod dispatch_tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_process_types_map_to_their_policies() {
        let options = PolicyOptions::default();
        assert_matches!(
            Policy::for_process(ProcessType::Gpu, options).kind(),
            PolicyKind::Gpu { .. }
        );
        assert_matches!(
            Policy::for_process(ProcessType::Plugin, options).kind(),
            PolicyKind::Plugin
        );
        assert_matches!(
            Policy::for_process(ProcessType::Renderer, options).kind(),
            PolicyKind::DenylistPtrace
        );
        assert_matches!(
            Policy::for_process(ProcessType::Worker, options).kind(),
            PolicyKind::DenylistPtrace
        );
    }

    #[test]
    fn test_gpu_denylist_knob_downgrades_the_gpu_policy() {
        let options = PolicyOptions {
            gpu_denylist_only: true,
            ..PolicyOptions::default()
        };
        assert_matches!(
            Policy::for_process(ProcessType::Gpu, options).kind(),
            PolicyKind::DenylistPtrace
        );
    }

    #[test]
    fn test_policy_names() {
        let options = PolicyOptions::default();
        assert_eq!(Policy::for_process(ProcessType::Gpu, options).name(), "gpu");
        assert_eq!(Policy::baseline(options).name(), "baseline");
        assert_eq!(Policy::allow_all().name(), "allow-all");
        assert_eq!(
            Policy::for_process(ProcessType::Worker, options).to_string(),
            "denylist-ptrace"
        );
    }
}

#[cfg(not(target_arch = "x86_64"))]
mod fallback_dispatch_tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_every_process_type_degrades_to_the_denylist() {
        // Only the 64-bit refined tables are maintained.
        for process in [
            ProcessType::Gpu,
            ProcessType::Plugin,
            ProcessType::Renderer,
            ProcessType::Worker,
        ] {
            assert_matches!(
                Policy::for_process(process, PolicyOptions::default()).kind(),
                PolicyKind::DenylistPtrace
            );
        }
    }
}

mod options_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_the_shipped_configuration() {
        let options = PolicyOptions::default();
        assert!(!options.accelerated_video_decode);
        assert!(options.deny_gpu_socket_probe);
        assert!(options.allow_plugin_shared_memory);
        assert!(!options.gpu_denylist_only);
    }

    #[test]
    fn test_options_deserialize_kebab_case_with_defaults() {
        let options: PolicyOptions =
            serde_json::from_str(r#"{"accelerated-video-decode":true}"#).unwrap();
        assert!(options.accelerated_video_decode);
        // Unspecified fields keep their defaults.
        assert!(options.deny_gpu_socket_probe);
    }

    #[test]
    fn test_options_round_trip() {
        let options = PolicyOptions {
            gpu_denylist_only: true,
            ..PolicyOptions::default()
        };
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("gpu-denylist-only"));
        let back: PolicyOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn test_process_type_serde_and_display() {
        let gpu: ProcessType = serde_json::from_str(r#""gpu""#).unwrap();
        assert_eq!(gpu, ProcessType::Gpu);
        assert_eq!(serde_json::to_string(&ProcessType::Renderer).unwrap(), r#""renderer""#);
        assert_eq!(ProcessType::Plugin.to_string(), "plugin");
    }

    #[test]
    fn test_process_type_parse() {
        assert_eq!("gpu".parse::<ProcessType>().unwrap(), ProcessType::Gpu);
        assert_eq!("Renderer".parse::<ProcessType>().unwrap(), ProcessType::Renderer);
        assert_eq!("worker".parse::<ProcessType>().unwrap(), ProcessType::Worker);
        assert!("browser".parse::<ProcessType>().is_err());
    }
}

mod property_tests {
    use super::*;
    use portcullis_syscalls::MAX_SYSCALL;

    fn every_policy() -> Vec<Policy> {
        let options = PolicyOptions::default();
        vec![
            Policy::baseline(options),
            Policy::for_process(ProcessType::Gpu, options),
            Policy::for_process(ProcessType::Plugin, options),
            Policy::for_process(ProcessType::Renderer, options),
            Policy::allow_all(),
        ]
    }

    #[test]
    fn test_every_policy_is_total() {
        // Verdicts exist for every identifier, including negatives and
        // numbers past the end of the table.
        for policy in every_policy() {
            for nr in -64..=(MAX_SYSCALL + 64) {
                let _ = policy.evaluate(nr);
            }
        }
    }

    #[test]
    fn test_every_policy_is_deterministic() {
        for policy in every_policy() {
            for nr in -64..=(MAX_SYSCALL + 64) {
                assert_eq!(policy.evaluate(nr), policy.evaluate(nr), "{policy} nr {nr}");
            }
        }
    }

    #[test]
    fn test_out_of_range_is_never_allowed() {
        for policy in every_policy() {
            for nr in [-1, MAX_SYSCALL + 1, MAX_SYSCALL + 1000] {
                assert!(
                    !policy.evaluate(nr).is_allow(),
                    "{policy} allowed out-of-range nr {nr}"
                );
            }
        }
    }
}
