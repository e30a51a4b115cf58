//! DNS wire-format names.
//!
//! Names are passed to `resolve` as length-prefixed labels terminated by
//! the zero-length root label: `ducks.eth` becomes `\x05ducks\x03eth\x00`.

use super::errors::DnsError;
use shared_types::Bytes;

const MAX_LABEL: usize = 63;

/// Encodes a dotted name. The empty name and `.` both encode to the root.
pub fn dns_encode(name: &str) -> Result<Bytes, DnsError> {
    let trimmed = name.strip_suffix('.').unwrap_or(name);
    let mut out = Vec::with_capacity(trimmed.len() + 2);
    if !trimmed.is_empty() {
        for label in trimmed.split('.') {
            if label.is_empty() {
                return Err(DnsError::EmptyLabel(name.to_string()));
            }
            if label.len() > MAX_LABEL {
                return Err(DnsError::LabelTooLong(label.to_string()));
            }
            // Bounded by MAX_LABEL above.
            out.push(label.len() as u8);
            out.extend_from_slice(label.as_bytes());
        }
    }
    out.push(0);
    Ok(out)
}

/// Decodes wire-format bytes back into a dotted name.
pub fn dns_decode(wire: &[u8]) -> Result<String, DnsError> {
    let mut labels = Vec::new();
    let mut pos = 0;
    loop {
        let len = *wire.get(pos).ok_or(DnsError::Truncated)? as usize;
        pos += 1;
        if len == 0 {
            break;
        }
        let label = wire.get(pos..pos + len).ok_or(DnsError::Truncated)?;
        labels.push(std::str::from_utf8(label).map_err(|_| DnsError::InvalidUtf8)?);
        pos += len;
    }
    if pos != wire.len() {
        return Err(DnsError::TrailingBytes);
    }
    Ok(labels.join("."))
}
