use std::fmt::{self, Debug, Formatter};

/// Writes the contained string as-is when debug formatted, without the quotes and escapes that
/// [`str`]'s [`Debug`] implementation would add.
pub struct DebugRaw(pub String);

impl Debug for DebugRaw {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Renders a byte delimiter for debug output, escaping anything that isn't printable ASCII.
pub fn escape_bytes(bytes: &[u8]) -> DebugRaw {
    DebugRaw(format!("b\"{}\"", bytes.escape_ascii()))
}
