//! 已保存的分析与商业计划

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::marker::PhantomData;

use super::LocalStore;
use crate::types::analysis::{AnalysisResult, AnalysisType};
use crate::types::business::BusinessPlan;
use crate::types::marketing::MarketingStrategy;

pub const SAVED_ANALYSES_KEY: &str = "savedAnalyses";
pub const SAVED_BUSINESS_PLANS_KEY: &str = "savedBusinessPlans";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAnalysis {
    pub id: String,
    pub project_name: String,
    pub saved_at: DateTime<Utc>,
    pub result: AnalysisResult,
    pub user_input: String,
    pub analysis_type: AnalysisType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing_strategy: Option<MarketingStrategy>,
}

/// 存放在单个键下的 JSON 数组
struct Collection<'a, T> {
    store: &'a mut LocalStore,
    key: &'static str,
    _item: PhantomData<T>,
}

impl<'a, T> Collection<'a, T>
where
    T: Serialize + DeserializeOwned,
{
    fn new(store: &'a mut LocalStore, key: &'static str) -> Self {
        Self {
            store,
            key,
            _item: PhantomData,
        }
    }

    /// 读取数组；数据损坏时记录警告、删除该键并返回空列表
    fn load(&mut self) -> Result<Vec<T>> {
        let Some(raw) = self.store.get_item(self.key) else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<T>>(raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::warn!(key = self.key, error = %e, "stored collection corrupted, resetting");
                self.store.remove_item(self.key)?;
                Ok(Vec::new())
            }
        }
    }

    fn write(&mut self, items: &[T]) -> Result<()> {
        let raw = serde_json::to_string(items)?;
        self.store.set_item(self.key, raw)
    }
}

/// 已保存的市场分析，新条目排在最前
pub struct SavedAnalyses<'a> {
    inner: Collection<'a, SavedAnalysis>,
}

impl<'a> SavedAnalyses<'a> {
    pub fn new(store: &'a mut LocalStore) -> Self {
        Self {
            inner: Collection::new(store, SAVED_ANALYSES_KEY),
        }
    }

    pub fn list(&mut self) -> Result<Vec<SavedAnalysis>> {
        self.inner.load()
    }

    pub fn find(&mut self, id: &str) -> Result<Option<SavedAnalysis>> {
        Ok(self.list()?.into_iter().find(|a| a.id == id))
    }

    /// 相同输入、相同分析文本、相同营销策略（或都没有）即视为已保存
    pub fn is_saved(
        &mut self,
        user_input: &str,
        result: &AnalysisResult,
        strategy: Option<&MarketingStrategy>,
    ) -> Result<bool> {
        let strategy_json = strategy.map(serde_json::to_string).transpose()?;
        for saved in self.list()? {
            if saved.user_input != user_input
                || saved.result.analysis_text != result.analysis_text
            {
                continue;
            }
            let saved_json = saved
                .marketing_strategy
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?;
            if saved_json == strategy_json {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn save(
        &mut self,
        project_name: &str,
        result: AnalysisResult,
        user_input: &str,
        analysis_type: AnalysisType,
        marketing_strategy: Option<MarketingStrategy>,
    ) -> Result<SavedAnalysis> {
        let project_name = project_name.trim();
        if project_name.is_empty() {
            bail!("A project name is required to save an analysis");
        }

        let entry = SavedAnalysis {
            id: format!("analysis-{}", uuid::Uuid::new_v4()),
            project_name: project_name.to_string(),
            saved_at: Utc::now(),
            result,
            user_input: user_input.to_string(),
            analysis_type,
            marketing_strategy,
        };

        let mut items = self.list()?;
        items.insert(0, entry.clone());
        self.inner.write(&items)?;
        Ok(entry)
    }

    /// 删除指定id，返回是否确实删除了条目
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let mut items = self.list()?;
        let before = items.len();
        items.retain(|a| a.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.inner.write(&items)?;
        Ok(true)
    }
}

/// 已保存的商业计划，新条目追加在末尾
pub struct SavedBusinessPlans<'a> {
    inner: Collection<'a, BusinessPlan>,
}

impl<'a> SavedBusinessPlans<'a> {
    pub fn new(store: &'a mut LocalStore) -> Self {
        Self {
            inner: Collection::new(store, SAVED_BUSINESS_PLANS_KEY),
        }
    }

    pub fn list(&mut self) -> Result<Vec<BusinessPlan>> {
        self.inner.load()
    }

    pub fn find(&mut self, id: &str) -> Result<Option<BusinessPlan>> {
        Ok(self.list()?.into_iter().find(|p| p.id == id))
    }

    /// 保存计划；已存在相同id时不做任何事并返回 false
    pub fn save(&mut self, plan: BusinessPlan) -> Result<bool> {
        if plan.id.trim().is_empty() {
            bail!("Business plan has no id");
        }
        let mut items = self.list()?;
        if items.iter().any(|p| p.id == plan.id) {
            return Ok(false);
        }
        items.push(plan);
        self.inner.write(&items)?;
        Ok(true)
    }

    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let mut items = self.list()?;
        let before = items.len();
        items.retain(|p| p.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.inner.write(&items)?;
        Ok(true)
    }
}
