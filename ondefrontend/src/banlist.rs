//! SHOUTcast-family ban list files.
//!
//! The DNAS ban file format is one entry per record, each terminated by a
//! `;255;` marker and a newline. An empty list renders as an empty file.

use std::io;
use std::path::Path;

/// Record terminator used by SHOUTcast ban files.
pub const BAN_LIST_SEPARATOR: &str = ";255;\n";

/// Renders ban entries in the DNAS file format.
pub fn render_ban_list(entries: &[&str]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut out = entries.join(BAN_LIST_SEPARATOR);
    out.push_str(BAN_LIST_SEPARATOR);
    out
}

/// Writes the rendered ban list to `path`, replacing any previous file.
pub async fn write_ban_list(path: &Path, entries: &[&str]) -> io::Result<()> {
    tokio::fs::write(path, render_ban_list(entries)).await
}
