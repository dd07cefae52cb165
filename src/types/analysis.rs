use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::types::{
    MissingField, StructuredResponse, deserialize_lenient_u32, require_items, require_text,
};

/// 分析的输入类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    #[default]
    Product,
    Topic,
    Website,
}

impl std::fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisType::Product => write!(f, "product"),
            AnalysisType::Topic => write!(f, "topic"),
            AnalysisType::Website => write!(f, "website"),
        }
    }
}

impl std::str::FromStr for AnalysisType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "product" | "termek" => Ok(AnalysisType::Product),
            "topic" | "keywords" => Ok(AnalysisType::Topic),
            "website" | "url" => Ok(AnalysisType::Website),
            _ => Err(format!("Unknown analysis type: {}", s)),
        }
    }
}

/// 信息来源
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PointCategory {
    Price,
    Quality,
    Marketing,
    CustomerService,
    Innovation,
    BrandReputation,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CompetitorPoint {
    pub text: String,
    pub category: PointCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// 价格定位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingTier {
    Affordable,
    MidRange,
    Premium,
    #[serde(other)]
    NotAvailable,
}

/// 竞争对手画像
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub name: String,
    pub strengths: Vec<CompetitorPoint>,
    pub weaknesses: Vec<CompetitorPoint>,
    pub sentiment: Sentiment,
    pub pricing_summary: PricingTier,
    /// 是否为最主要的两个竞争对手之一
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_main_competitor: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImpactLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwotPoint {
    pub text: String,
    pub impact: ImpactLevel,
    /// 与该条目直接相关的竞争对手名称，必须与competitors列表中的名称一致
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_competitor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SwotAnalysis {
    pub strengths: Vec<SwotPoint>,
    pub weaknesses: Vec<SwotPoint>,
    pub opportunities: Vec<SwotPoint>,
    pub threats: Vec<SwotPoint>,
}

/// 买家画像
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuyerPersona {
    pub name: String,
    #[serde(deserialize_with = "deserialize_lenient_u32")]
    pub age: u32,
    pub occupation: String,
    pub bio: String,
    pub motivations: Vec<String>,
    pub frustrations: Vec<String>,
    pub communication_channels: Vec<String>,
    pub quote: String,
}

impl StructuredResponse for BuyerPersona {
    fn validate(&self) -> Result<(), MissingField> {
        require_text(&self.name, "name")?;
        if self.age == 0 {
            return Err(MissingField::new("age"));
        }
        require_text(&self.bio, "bio")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrendDataPoint {
    pub month: String,
    /// 0-100的搜索热度
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketTrend {
    pub name: String,
    pub data_points: Vec<TrendDataPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RegionData {
    pub name: String,
    /// 0-100的市场关注强度
    pub intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketOverview {
    pub market_size: String,
    pub growth_rate: String,
    pub sentiment: Sentiment,
}

/// 市场分析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Markdown风格的分析正文
    pub analysis_text: String,
    pub competitors: Vec<Competitor>,
    pub swot_analysis: SwotAnalysis,
    #[serde(default)]
    pub sources: Vec<Source>,
    pub market_overview: MarketOverview,
    #[serde(default)]
    pub trends: Vec<MarketTrend>,
    pub personas: Vec<BuyerPersona>,
    #[serde(default)]
    pub regions: Vec<RegionData>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub content_suggestions: Vec<String>,
}

impl AnalysisResult {
    /// 按uri去重，丢弃uri或title为空的来源，保留首次出现的顺序
    pub fn dedupe_sources(&mut self) {
        let mut seen = HashSet::new();
        self.sources.retain(|source| {
            !source.uri.trim().is_empty()
                && !source.title.trim().is_empty()
                && seen.insert(source.uri.clone())
        });
    }

    /// 被标记为主要竞争对手的条目
    pub fn main_competitors(&self) -> impl Iterator<Item = &Competitor> {
        self.competitors
            .iter()
            .filter(|c| c.is_main_competitor.unwrap_or(false))
    }
}

impl StructuredResponse for AnalysisResult {
    fn validate(&self) -> Result<(), MissingField> {
        require_text(&self.analysis_text, "analysisText")?;
        require_items(&self.personas, "personas")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CompetitorToWatch {
    pub name: String,
    pub reason: String,
}

/// 面向管理层的极简摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub main_takeaway: String,
    pub top_competitor_to_watch: CompetitorToWatch,
    pub biggest_opportunity: String,
}

impl StructuredResponse for AnalysisSummary {
    fn validate(&self) -> Result<(), MissingField> {
        require_text(&self.main_takeaway, "mainTakeaway")?;
        require_text(&self.top_competitor_to_watch.name, "topCompetitorToWatch.name")?;
        require_text(&self.biggest_opportunity, "biggestOpportunity")
    }
}
