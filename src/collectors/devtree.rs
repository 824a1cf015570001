//! Handle on a device tree pseudo-filesystem

use crate::config::ScanConfig;
use crate::utils::file::{self, PropertyStream, WordSize};
use std::path::{Path, PathBuf};

/// A device tree rooted at a directory, with the word width its binary
/// properties were encoded with. All paths are relative to the root.
#[derive(Debug, Clone)]
pub struct DeviceTree {
    root: PathBuf,
    word: WordSize,
}

impl DeviceTree {
    pub fn new<P: Into<PathBuf>>(root: P, word: WordSize) -> Self {
        DeviceTree {
            root: root.into(),
            word,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        DeviceTree::new(config.root.clone(), config.word_size)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn word(&self) -> WordSize {
        self.word
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    pub fn is_present(&self) -> bool {
        self.root.is_dir()
    }

    pub fn exists(&self, rel: &str) -> bool {
        file::file_exists(self.path(rel))
    }

    pub fn long(&self, rel: &str) -> u64 {
        file::read_integer(self.path(rel), self.word)
    }

    pub fn string(&self, rel: &str) -> String {
        file::read_string(self.path(rel))
    }

    pub fn string_or(&self, rel: &str, default: &str) -> String {
        file::read_string_or(self.path(rel), default)
    }

    pub fn strings(&self, rel: &str, offset: usize) -> Vec<String> {
        file::read_string_list(self.path(rel), offset)
    }

    pub fn subdirs(&self, rel: &str) -> Vec<String> {
        file::list_subdirs(self.path(rel))
    }

    pub fn stream(&self, rel: &str) -> PropertyStream {
        PropertyStream::open(self.path(rel))
    }
}

/// Join node and property names into a tree-relative path
pub(crate) fn join(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", base, name)
    }
}
