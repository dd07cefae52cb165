use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::generator::error::Feature;

/// 结果输出
pub trait Outlet {
    async fn save<T: Serialize + Sync>(&self, feature: Feature, value: &T) -> Result<PathBuf>;
}

/// 以缩进JSON写入输出目录，文件名为特性标识
pub struct DiskOutlet {
    output_dir: PathBuf,
}

impl DiskOutlet {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn file_path(&self, feature: Feature) -> PathBuf {
        self.output_dir.join(format!("{}.json", feature))
    }
}

impl Outlet for DiskOutlet {
    async fn save<T: Serialize + Sync>(&self, feature: Feature, value: &T) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| format!("failed to create {}", self.output_dir.display()))?;

        let output_file_path = self.file_path(feature);
        let content = serde_json::to_string_pretty(value)?;
        tokio::fs::write(&output_file_path, content)
            .await
            .with_context(|| format!("failed to write {}", output_file_path.display()))?;

        println!("🖊️ 已保存结果: {}", output_file_path.display());
        Ok(output_file_path)
    }
}
