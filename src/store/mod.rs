//! 本地持久化存储：一个 JSON 对象文件，键和值都是字符串

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub mod library;

pub use library::{SavedAnalyses, SavedAnalysis, SavedBusinessPlans};

/// 文件后端的键值存储。每次写入都会整体重写文件
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl LocalStore {
    /// 打开存储文件，不存在时视为空存储；内容无法解析时从空存储开始
    pub fn open(path: &Path) -> Result<Self> {
        let items = if path.exists() {
            let content = std::fs::read_to_string(path)
                .context(format!("Failed to read store file: {:?}", path))?;
            match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(path = ?path, error = %e, "store file unreadable, starting empty");
                    eprintln!("⚠️ 本地存储文件已损坏，将重新创建: {:?}", path);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            items,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn set_item(&mut self, key: &str, value: String) -> Result<()> {
        self.items.insert(key.to_string(), value);
        self.persist()
    }

    pub fn remove_item(&mut self, key: &str) -> Result<()> {
        if self.items.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create store directory: {:?}", parent))?;
        }
        let content = serde_json::to_string_pretty(&self.items)?;
        std::fs::write(&self.path, content)
            .context(format!("Failed to write store file: {:?}", self.path))
    }
}
