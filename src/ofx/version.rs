//! OFX spec-version handling.
//!
//! The eleven published wire versions. 1.x versions speak SGML, 2.x speak
//! XML; the request builder branches on that split.

use std::fmt;
use std::str::FromStr;

/// An OFX protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OfxVersion {
    V102,
    V103,
    V151,
    V160,
    V200,
    V201,
    V202,
    V203,
    V210,
    V211,
    V220,
}

impl OfxVersion {
    /// The numeric string sent in headers (e.g. "203").
    pub fn as_str(&self) -> &'static str {
        match self {
            OfxVersion::V102 => "102",
            OfxVersion::V103 => "103",
            OfxVersion::V151 => "151",
            OfxVersion::V160 => "160",
            OfxVersion::V200 => "200",
            OfxVersion::V201 => "201",
            OfxVersion::V202 => "202",
            OfxVersion::V203 => "203",
            OfxVersion::V210 => "210",
            OfxVersion::V211 => "211",
            OfxVersion::V220 => "220",
        }
    }

    /// 2.x versions are XML on the wire; 1.x are SGML.
    pub fn is_xml(&self) -> bool {
        !matches!(
            self,
            OfxVersion::V102 | OfxVersion::V103 | OfxVersion::V151 | OfxVersion::V160
        )
    }
}

impl fmt::Display for OfxVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A spec-version string the catalog carries that no published OFX
/// version matches.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unrecognized OFX version: {0:?}")]
pub struct VersionParseError(pub String);

impl FromStr for OfxVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "102" => Ok(OfxVersion::V102),
            "103" => Ok(OfxVersion::V103),
            "151" => Ok(OfxVersion::V151),
            "160" => Ok(OfxVersion::V160),
            "200" => Ok(OfxVersion::V200),
            "201" => Ok(OfxVersion::V201),
            "202" => Ok(OfxVersion::V202),
            "203" => Ok(OfxVersion::V203),
            "210" => Ok(OfxVersion::V210),
            "211" => Ok(OfxVersion::V211),
            "220" => Ok(OfxVersion::V220),
            other => Err(VersionParseError(other.to_string())),
        }
    }
}
