use ofwscan::{ScanConfig, WordSize};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A device tree laid out in a temporary directory
pub struct FakeDeviceTree {
    dir: TempDir,
}

impl FakeDeviceTree {
    pub fn new() -> Self {
        FakeDeviceTree {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn bytes(&self, rel: &str, data: &[u8]) -> &Self {
        let path = self.root().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, data).unwrap();
        self
    }

    pub fn string(&self, rel: &str, value: &str) -> &Self {
        let mut data = value.as_bytes().to_vec();
        data.push(0);
        self.bytes(rel, &data)
    }

    pub fn word32(&self, rel: &str, value: u32) -> &Self {
        self.bytes(rel, &value.to_be_bytes())
    }

    pub fn config(&self) -> ScanConfig {
        self.config_with(WordSize::Four)
    }

    pub fn config_with(&self, word: WordSize) -> ScanConfig {
        ScanConfig::new(self.root()).with_word_size(word)
    }
}
