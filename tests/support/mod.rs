//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Rebate export covering every product bucket for two accounts, plus one
/// account whose rebates net to zero.
pub const EXPORT_CSV: &str = "\
account_id,product_type,rebate_asset,rebate_amount,rebate_value_usdt
1002,spot,BNB,0.05,30
1001,usdt-futures,USDT,10,10
1001,usdt-futures,USDT,26,26
1001,coin-futures,BTC,0.0002,12
1001,margin,ETH,0.004,8
1001,spot,BNB,0.01,4
1003,spot,BNB,0,0
";

/// Scratch directory holding the batch artifacts of one test.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `contents` to `name` and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.file(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    /// Write `contents` prefixed with a UTF-8 byte-order mark.
    pub fn write_with_bom(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.file(name);
        let mut bytes = b"\xEF\xBB\xBF".to_vec();
        bytes.extend_from_slice(contents.as_bytes());
        fs::write(&path, bytes).expect("write fixture");
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.file(name)).expect("read artifact")
    }
}
