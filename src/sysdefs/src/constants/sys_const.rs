//! Process and clock constants.

// ===== Process Exit Status =====
pub const EXIT_SUCCESS: i32 = 0;

// ===== Clock ids accepted by clock_gettime =====
// The guest passes the host numbering; only these two are supported.
pub const CLOCK_REALTIME: u32 = libc::CLOCK_REALTIME as u32;
pub const CLOCK_MONOTONIC: u32 = libc::CLOCK_MONOTONIC as u32;

// ===== Guest time struct layout =====
// Seconds at offset 0, sub-second part (usec or nsec) at offset 8. The words
// themselves are copied in host-native width and byte order.
pub const TIME_SECS_OFFSET: usize = 0;
pub const TIME_FRAC_OFFSET: usize = 8;
