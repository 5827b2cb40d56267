//! Transaction UID generation.
//!
//! OFX transaction UIDs are opaque 32-character identifiers. We draw them
//! from the OS CSPRNG through the fallible fill so an entropy failure
//! surfaces as an error instead of a panic — the prober treats it as fatal
//! for the whole run.

use std::fmt;
use std::fmt::Write as _;

use rand::rngs::OsRng;
use rand::RngCore;

/// A 32-character OFX transaction UID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uid(String);

/// The OS random generator refused to produce bytes.
#[derive(Debug, thiserror::Error)]
#[error("OS random generator failed: {0}")]
pub struct UidError(#[from] pub rand::Error);

impl Uid {
    /// Generate a fresh random UID (16 random bytes, hex-encoded).
    pub fn random() -> Result<Self, UidError> {
        let mut bytes = [0u8; 16];
        OsRng.try_fill_bytes(&mut bytes)?;

        let mut s = String::with_capacity(32);
        for b in bytes {
            // infallible for String
            let _ = write!(s, "{b:02x}");
        }
        Ok(Uid(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
