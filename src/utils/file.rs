//! Property file reading utilities
//!
//! Device tree properties are plain files: binary words are stored
//! big-endian, string lists are NUL separated. Every reader here degrades to
//! an empty or zero value instead of failing, so a missing property looks
//! the same as an empty one.

use crate::error::{OfwscanError, Result};
use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Width of a device tree "long" word.
///
/// The width used to encode the tree depends on the firmware, not on the
/// reading host, so callers pass it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordSize {
    Four,
    Eight,
}

impl WordSize {
    /// Width of the host C `unsigned long`
    pub fn native() -> Self {
        if std::mem::size_of::<libc::c_ulong>() == 8 {
            WordSize::Eight
        } else {
            WordSize::Four
        }
    }

    pub fn from_bytes(bytes: usize) -> Result<Self> {
        match bytes {
            4 => Ok(WordSize::Four),
            8 => Ok(WordSize::Eight),
            other => Err(OfwscanError::Config(format!(
                "unsupported word size {} (expected 4 or 8)",
                other
            ))),
        }
    }

    pub fn bytes(self) -> usize {
        match self {
            WordSize::Four => 4,
            WordSize::Eight => 8,
        }
    }
}

impl Default for WordSize {
    fn default() -> Self {
        WordSize::native()
    }
}

/// Read a whole property file
pub fn read_file_safe<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    fs::read(path).map_err(OfwscanError::from)
}

/// Check if a property or node exists
pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}

/// Read one big-endian word; 0 when the file is missing or too short
pub fn read_integer<P: AsRef<Path>>(path: P, word: WordSize) -> u64 {
    let path = path.as_ref();
    let mut stream = PropertyStream::open(path);
    match stream.next_word(word) {
        Some(value) => value,
        None => {
            log::trace!("no {}-byte word in {}", word.bytes(), path.display());
            0
        }
    }
}

/// Read a text property with surrounding whitespace and NUL padding removed.
/// Interior NUL bytes are kept.
pub fn read_string<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    match read_file_safe(path) {
        Ok(bytes) => strip(&String::from_utf8_lossy(&bytes)).to_string(),
        Err(err) => {
            log::trace!("{}: {}", path.display(), err);
            String::new()
        }
    }
}

/// Like [`read_string`], but `default` when the property does not exist
pub fn read_string_or<P: AsRef<Path>>(path: P, default: &str) -> String {
    if file_exists(&path) {
        read_string(path)
    } else {
        default.to_string()
    }
}

/// Split a NUL separated string list, starting `offset` bytes into the file.
/// Stops at the first empty entry.
pub fn read_string_list<P: AsRef<Path>>(path: P, offset: usize) -> Vec<String> {
    let path = path.as_ref();
    let bytes = match read_file_safe(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::trace!("{}: {}", path.display(), err);
            return Vec::new();
        }
    };

    bytes
        .get(offset..)
        .unwrap_or(&[])
        .split(|b| *b == 0)
        .take_while(|s| !s.is_empty())
        .map(|s| String::from_utf8_lossy(s).into_owned())
        .collect()
}

/// Names of the sub-directories (child nodes) of `path`, sorted
pub fn list_subdirs<P: AsRef<Path>>(path: P) -> Vec<String> {
    let mut names: Vec<String> = match fs::read_dir(path.as_ref()) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().to_str().map(String::from))
            .collect(),
        Err(err) => {
            log::trace!("{}: {}", path.as_ref().display(), err);
            Vec::new()
        }
    };
    names.sort();
    names
}

/// Trim whitespace and NUL padding from both ends
pub fn strip(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\0')
}

/// Sequential reader over a binary property such as `reg` or `dimm-info`.
///
/// A property that cannot be opened behaves like an empty file. The handle
/// is closed when the stream is dropped.
pub struct PropertyStream {
    file: Option<File>,
}

impl PropertyStream {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let file = match File::open(path.as_ref()) {
            Ok(file) => Some(file),
            Err(err) => {
                log::trace!("{}: {}", path.as_ref().display(), err);
                None
            }
        };
        PropertyStream { file }
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Fill as much of `buf` as the property allows, returning the byte count
    pub fn read_into(&mut self, buf: &mut [u8]) -> usize {
        let file = match self.file.as_mut() {
            Some(file) => file,
            None => return 0,
        };

        let mut filled = 0;
        while filled < buf.len() {
            match file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
        filled
    }

    /// Next big-endian word of the given width
    pub fn next_word(&mut self, word: WordSize) -> Option<u64> {
        match word {
            WordSize::Four => {
                let mut buf = [0u8; 4];
                if self.read_into(&mut buf) == buf.len() {
                    Some(u32::from_be_bytes(buf) as u64)
                } else {
                    None
                }
            }
            WordSize::Eight => self.next_u64(),
        }
    }

    /// Next big-endian 64-bit value
    pub fn next_u64(&mut self) -> Option<u64> {
        let mut buf = [0u8; 8];
        if self.read_into(&mut buf) == buf.len() {
            Some(u64::from_be_bytes(buf))
        } else {
            None
        }
    }
}
