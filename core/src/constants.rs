//! constants.rs
//! Crate-wide defaults and engine sentinels.

/// Module identity reported to host runtimes.
pub const MODNAME: &str = "zstd-handle";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// First destination capacity tried by the growable output protocol.
/// Deliberately small: most streaming calls produce little output and the
/// protocol doubles on demand.
pub const INITIAL_OUTPUT_CAPACITY: usize = 100;

/// Largest block the engine emits or accepts (128 KiB).
pub const BLOCK_SIZE_MAX: usize = 1 << 17;

/// Level used when the caller does not pass one. The engine maps 0 to its
/// own default level.
pub const DEFAULT_LEVEL: i32 = 0;

/// Frame header sentinels returned by the content-size probe.
pub const CONTENTSIZE_UNKNOWN: u64 = u64::MAX;
pub const CONTENTSIZE_ERROR: u64 = u64::MAX - 1;

/// Pledged source size meaning "unknown".
pub const PLEDGED_SIZE_UNKNOWN: i64 = -1;
