use std::fmt;

use thiserror::Error;

pub const MAGIC_PACKET_LEN: usize = 102;

#[derive(Error, Debug)]
pub enum WolError {
    /// MAC text did not decode to exactly 6 bytes.
    #[error("invalid MAC address format: {0}")]
    InvalidMac(String),
}

/// A 6-byte EUI-48 MAC address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// Parse a MAC address string. Colons and hyphens are stripped first,
    /// so "00:11:22:33:44:55", "00-11-22-33-44-55" and "001122334455" all
    /// decode to the same 6 bytes. Anything else is `InvalidMac`.
    pub fn parse(text: &str) -> Result<Self, WolError> {
        let invalid = || WolError::InvalidMac(text.to_string());

        let digits: Vec<u8> = text
            .bytes()
            .filter(|b| *b != b':' && *b != b'-')
            .collect();
        if digits.len() != 12 {
            return Err(invalid());
        }

        let mut bytes = [0u8; 6];
        for (i, pair) in digits.chunks_exact(2).enumerate() {
            let hi = (pair[0] as char).to_digit(16).ok_or_else(invalid)?;
            let lo = (pair[1] as char).to_digit(16).ok_or_else(invalid)?;
            bytes[i] = (hi as u8) << 4 | lo as u8;
        }
        Ok(MacAddress(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

/// Returns true if `value` has MAC address shape: six two-hex-digit groups
/// uniformly separated by ':' or '-'. A pure pattern check used to decide
/// whether a positional CLI argument is a MAC rather than a target name;
/// every string it accepts also parses via [`MacAddress::parse`].
pub fn looks_like_mac(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 17 {
        return false;
    }
    let sep = bytes[2];
    if sep != b':' && sep != b'-' {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| {
        if i % 3 == 2 {
            *b == sep
        } else {
            b.is_ascii_hexdigit()
        }
    })
}

/// The fixed 102-byte Wake-on-LAN payload: 6 bytes of 0xFF followed by the
/// target MAC repeated 16 times. Immutable once built.
pub struct MagicPacket([u8; MAGIC_PACKET_LEN]);

impl MagicPacket {
    pub fn new(mac: &MacAddress) -> Self {
        let mut packet = [0xFFu8; MAGIC_PACKET_LEN];
        for i in 0..16 {
            let offset = 6 + i * 6;
            packet[offset..offset + 6].copy_from_slice(mac.as_bytes());
        }
        MagicPacket(packet)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
