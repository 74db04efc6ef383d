//! Read and write YAML frontmatter blocks delimited by `---` lines.

use std::io::{BufRead, Read, Write};

use serde::Serialize;
use serde::de::DeserializeOwned;

pub const DELIMITER: &str = "---";

/// Bytes read while looking for a block; a block not closed within them
/// counts as absent
pub const MAX_BLOCK_LEN: u64 = 8 * 1024;

/// Extract the leading frontmatter block from a reader.
///
/// Only the first line decides whether a block is present: it must be the
/// opening delimiter. Returns `Ok(None)` when there is no opening delimiter,
/// no closing delimiter within [`MAX_BLOCK_LEN`] bytes, or the enclosed YAML
/// does not deserialize into `T`. I/O failures are the only errors.
pub fn read_frontmatter<T, R>(reader: R) -> std::io::Result<Option<T>>
where
    T: DeserializeOwned,
    R: BufRead,
{
    let mut reader = reader.take(MAX_BLOCK_LEN);
    let mut line = Vec::new();
    if reader.read_until(b'\n', &mut line)? == 0 || !is_delimiter(&line) {
        return Ok(None);
    }

    let mut block = String::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        if is_delimiter(&line) {
            return Ok(serde_yaml::from_str(&block).ok());
        }
        block.push_str(&String::from_utf8_lossy(&line));
    }
}

fn is_delimiter(line: &[u8]) -> bool {
    line.trim_ascii_end() == DELIMITER.as_bytes()
}

/// Write `value` as a frontmatter block followed by a blank line
pub fn write_frontmatter<T, W>(mut writer: W, value: &T) -> std::io::Result<()>
where
    T: Serialize,
    W: Write,
{
    let yaml = serde_yaml::to_string(value).map_err(std::io::Error::other)?;
    write!(writer, "{DELIMITER}\n{yaml}{DELIMITER}\n\n")
}
