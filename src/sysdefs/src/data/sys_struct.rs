//! Host time values in the shape they are written into guest memory.
//!
//! The guest expects two words, seconds at offset 0 and the sub-second part
//! at offset 8. Both words are copied byte-for-byte from the host's native
//! representation, so their width and byte order are those of the host
//! (8 bytes, little endian on x86_64 and aarch64 Linux). A 32-bit or
//! big-endian host produces a different guest layout.

/// Seconds and sub-second words of a host time value, in native encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostTimeWords {
    pub secs: Vec<u8>,
    pub frac: Vec<u8>,
}

impl From<libc::timeval> for HostTimeWords {
    fn from(tv: libc::timeval) -> Self {
        HostTimeWords {
            secs: tv.tv_sec.to_ne_bytes().to_vec(),
            frac: tv.tv_usec.to_ne_bytes().to_vec(),
        }
    }
}

impl From<libc::timespec> for HostTimeWords {
    fn from(ts: libc::timespec) -> Self {
        HostTimeWords {
            secs: ts.tv_sec.to_ne_bytes().to_vec(),
            frac: ts.tv_nsec.to_ne_bytes().to_vec(),
        }
    }
}
