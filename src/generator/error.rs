use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::extractor::ExtractError;
use crate::i18n::TargetLanguage;

/// 生成能力标识，同时用作缓存分类目录名与输出文件名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    MarketAnalysis,
    BusinessPlans,
    SimpleBusinessPlan,
    MarketEntry,
    ValueProposition,
    AnalysisSummary,
    ChatSummary,
    MarketingContent,
    BuyerPersona,
    MarketingStrategy,
    BrandIdentity,
    ProductNames,
}

impl Feature {
    pub const ALL: [Feature; 12] = [
        Feature::MarketAnalysis,
        Feature::BusinessPlans,
        Feature::SimpleBusinessPlan,
        Feature::MarketEntry,
        Feature::ValueProposition,
        Feature::AnalysisSummary,
        Feature::ChatSummary,
        Feature::MarketingContent,
        Feature::BuyerPersona,
        Feature::MarketingStrategy,
        Feature::BrandIdentity,
        Feature::ProductNames,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::MarketAnalysis => "market_analysis",
            Feature::BusinessPlans => "business_plans",
            Feature::SimpleBusinessPlan => "simple_business_plan",
            Feature::MarketEntry => "market_entry",
            Feature::ValueProposition => "value_proposition",
            Feature::AnalysisSummary => "analysis_summary",
            Feature::ChatSummary => "chat_summary",
            Feature::MarketingContent => "marketing_content",
            Feature::BuyerPersona => "buyer_persona",
            Feature::MarketingStrategy => "marketing_strategy",
            Feature::BrandIdentity => "brand_identity",
            Feature::ProductNames => "product_names",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 单个特性生成失败的原因
#[derive(Debug, Error)]
pub enum GenerationError {
    /// 响应中没有可解析的 JSON
    #[error("[{feature}] response is not valid JSON: {source}")]
    MalformedPayload {
        feature: Feature,
        #[source]
        source: ExtractError,
    },

    /// JSON 可解析，但缺少必需字段或字段为空
    #[error("[{feature}] incomplete result, missing or empty field `{field}`")]
    IncompleteResult { feature: Feature, field: String },

    /// 调用生成服务失败（已经过传输层重试）
    #[error("[{feature}] generation service failed: {source}")]
    Service {
        feature: Feature,
        #[source]
        source: anyhow::Error,
    },

    #[error("[{feature}] invalid input: {reason}")]
    InvalidInput { feature: Feature, reason: String },

    #[error("[{feature}] a generation is already in flight")]
    AlreadyInFlight { feature: Feature },
}

impl GenerationError {
    pub fn feature(&self) -> Feature {
        match self {
            GenerationError::MalformedPayload { feature, .. }
            | GenerationError::IncompleteResult { feature, .. }
            | GenerationError::Service { feature, .. }
            | GenerationError::InvalidInput { feature, .. }
            | GenerationError::AlreadyInFlight { feature } => *feature,
        }
    }

    /// 用户再次发起同一请求是否有意义
    pub fn is_retryable_by_user(&self) -> bool {
        matches!(
            self,
            GenerationError::MalformedPayload { .. }
                | GenerationError::IncompleteResult { .. }
                | GenerationError::Service { .. }
        )
    }

    /// 面向用户的提示
    pub fn user_message(&self, language: &TargetLanguage) -> String {
        match self {
            GenerationError::MalformedPayload { .. } | GenerationError::IncompleteResult { .. } => {
                language.retry_notice().to_string()
            }
            other => other.to_string(),
        }
    }

    pub(crate) fn invalid_input(feature: Feature, reason: impl Into<String>) -> Self {
        GenerationError::InvalidInput {
            feature,
            reason: reason.into(),
        }
    }
}

static MISSING_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"missing field `([^`]+)`").expect("valid missing-field pattern"));

/// 从 serde 的解码错误中取出字段名；取不到时返回错误描述本身
pub(crate) fn offending_field(error: &serde_json::Error) -> String {
    let message = error.to_string();
    MISSING_FIELD_RE
        .captures(&message)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or(message)
}
