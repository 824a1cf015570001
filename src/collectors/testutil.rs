//! Synthetic device trees for unit tests

use crate::collectors::devtree::DeviceTree;
use crate::utils::file::WordSize;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub(crate) struct TreeBuilder {
    dir: TempDir,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        TreeBuilder {
            dir: TempDir::new().unwrap(),
        }
    }

    pub(crate) fn root(&self) -> &Path {
        self.dir.path()
    }

    pub(crate) fn dir(&self, rel: &str) -> &Self {
        fs::create_dir_all(self.root().join(rel)).unwrap();
        self
    }

    pub(crate) fn bytes(&self, rel: &str, data: &[u8]) -> &Self {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, data).unwrap();
        self
    }

    /// NUL terminated string property
    pub(crate) fn string(&self, rel: &str, value: &str) -> &Self {
        let mut data = value.as_bytes().to_vec();
        data.push(0);
        self.bytes(rel, &data)
    }

    pub(crate) fn strings(&self, rel: &str, values: &[&str]) -> &Self {
        let mut data = Vec::new();
        for value in values {
            data.extend_from_slice(value.as_bytes());
            data.push(0);
        }
        self.bytes(rel, &data)
    }

    pub(crate) fn word32(&self, rel: &str, value: u32) -> &Self {
        self.bytes(rel, &value.to_be_bytes())
    }

    /// Empty marker property
    pub(crate) fn flag(&self, rel: &str) -> &Self {
        self.bytes(rel, &[])
    }

    pub(crate) fn device_tree(&self) -> DeviceTree {
        self.device_tree_with(WordSize::Four)
    }

    pub(crate) fn device_tree_with(&self, word: WordSize) -> DeviceTree {
        DeviceTree::new(self.root(), word)
    }
}
