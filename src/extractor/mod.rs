//! 容错的结构化响应提取器
//!
//! 模型被要求"只返回JSON"，但实际输出常常夹带说明文字、Markdown代码围栏，
//! 或在右括号前多出一个逗号。这里按固定顺序尝试恢复出合法的JSON载荷：
//!
//! 1. 代码围栏提取（```` ``` ```` 或 ```` ```json ````，非贪婪匹配到下一个围栏）
//! 2. 括号区间兜底（第一个期望的左括号到最后一个对应的右括号）
//! 3. 清理尾随逗号
//! 4. 严格解析，失败即 [`ExtractError::MalformedPayload`]
//!
//! 不做括号补全、键名补引号或截断修复，这些情况一律视为不可恢复。

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?(.*?)```").expect("fenced block pattern is valid")
});

// 一串仅由空白分隔的逗号，后面紧跟右括号
static TRAILING_COMMAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r",(?:\s*,)*(\s*[}\]])").expect("trailing comma pattern is valid")
});

/// 期望的载荷形态，仅用于括号区间兜底
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    Object,
    Array,
}

impl Expect {
    fn brackets(self) -> (char, char) {
        match self {
            Expect::Object => ('{', '}'),
            Expect::Array => ('[', ']'),
        }
    }
}

impl std::fmt::Display for Expect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expect::Object => write!(f, "object"),
            Expect::Array => write!(f, "array"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    /// 经过全部恢复步骤后仍无法解析为JSON
    #[error("response is not valid JSON after recovery ({source}); payload starts with: {excerpt:?}")]
    MalformedPayload {
        #[source]
        source: serde_json::Error,
        excerpt: String,
    },
}

const EXCERPT_CHARS: usize = 120;

/// 定位载荷：先找代码围栏，找不到再按括号区间截取。都失败时返回修剪后的原文。
pub fn locate_payload(raw: &str, expect: Expect) -> &str {
    let text = raw.trim();

    if let Some(interior) = FENCED_BLOCK
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|interior| !interior.is_empty())
    {
        return interior;
    }

    let (open, close) = expect.brackets();
    match (text.find(open), text.rfind(close)) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

/// 删除右括号前的尾随逗号。
///
/// 纯文本替换，不识别字符串字面量：字符串内部形如 `",]"` 的内容同样会被改写。
pub fn strip_trailing_commas(payload: &str) -> Cow<'_, str> {
    TRAILING_COMMAS.replace_all(payload, "$1")
}

/// 从模型原始输出中恢复出JSON值
pub fn extract_value(raw: &str, expect: Expect) -> Result<Value, ExtractError> {
    let payload = locate_payload(raw, expect);
    let sanitized = strip_trailing_commas(payload);

    serde_json::from_str(&sanitized).map_err(|source| ExtractError::MalformedPayload {
        source,
        excerpt: sanitized.chars().take(EXCERPT_CHARS).collect(),
    })
}

/// 恢复JSON并直接解码为目标类型。
///
/// 解码失败（缺字段、类型不符）同样报告为 `MalformedPayload`；
/// 需要区分"格式错误"和"内容不完整"的调用方应先用 [`extract_value`]。
pub fn extract_structured<T>(raw: &str, expect: Expect) -> Result<T, ExtractError>
where
    T: DeserializeOwned,
{
    let payload = locate_payload(raw, expect);
    let sanitized = strip_trailing_commas(payload);

    serde_json::from_str(&sanitized).map_err(|source| ExtractError::MalformedPayload {
        source,
        excerpt: sanitized.chars().take(EXCERPT_CHARS).collect(),
    })
}

#[cfg(test)]
mod tests;
