use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};

use crate::extractor::Expect;

pub mod analysis;
pub mod business;
pub mod chat;
pub mod marketing;

/// 校验失败时指出缺失或为空的字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField {
    pub field: String,
}

impl MissingField {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field)
    }
}

/// 由模型生成的结构化结果
///
/// 解码（serde）负责字段存在性与类型，`validate` 负责非空与数量约束，
/// 两者合起来就是一次完整的结构校验。
pub trait StructuredResponse:
    Serialize + DeserializeOwned + JsonSchema + Send + Sync + 'static
{
    /// 载荷的外层括号类型
    const EXPECT: Expect = Expect::Object;

    fn validate(&self) -> Result<(), MissingField>;
}

pub(crate) fn require_text(value: &str, field: &str) -> Result<(), MissingField> {
    if value.trim().is_empty() {
        return Err(MissingField::new(field));
    }
    Ok(())
}

pub(crate) fn require_items<T>(items: &[T], field: &str) -> Result<(), MissingField> {
    require_at_least(items, 1, field)
}

pub(crate) fn require_at_least<T>(
    items: &[T],
    minimum: usize,
    field: &str,
) -> Result<(), MissingField> {
    if items.len() < minimum {
        return Err(MissingField::new(field));
    }
    Ok(())
}

/// 容忍数字或数字字符串（模型经常把年龄写成 "28"）
pub(crate) fn deserialize_lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    use serde::de::Error;

    let value = serde_json::Value::deserialize(deserializer)?;
    let parsed = match &value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64)),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    parsed
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| D::Error::custom(format!("expected a non-negative integer, got {}", value)))
}

#[cfg(test)]
mod tests;
