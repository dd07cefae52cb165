//! 每个生成特性对应一个Agent

pub mod analysis_summarizer;
pub mod brand_designer;
pub mod business_planner;
pub mod chat_summarizer;
pub mod content_writer;
pub mod market_analyst;
pub mod market_entry_planner;
pub mod name_generator;
pub mod persona_builder;
pub mod simple_plan_writer;
pub mod strategy_planner;
pub mod value_proposition_writer;

pub use analysis_summarizer::AnalysisSummarizer;
pub use brand_designer::BrandDesigner;
pub use business_planner::BusinessPlanner;
pub use chat_summarizer::ChatSummarizer;
pub use content_writer::ContentWriter;
pub use market_analyst::{AnalysisRequest, MarketAnalyst};
pub use market_entry_planner::MarketEntryPlanner;
pub use name_generator::NameGenerator;
pub use persona_builder::PersonaBuilder;
pub use simple_plan_writer::SimplePlanWriter;
pub use strategy_planner::{StrategyBrief, StrategyPlanner};
pub use value_proposition_writer::ValuePropositionWriter;

use crate::generator::error::{Feature, GenerationError};
use crate::generator::feature_agent::{require_input, section};
use crate::types::analysis::AnalysisType;

/// 下游特性描述的对象：具体产品，或一个主题
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    Product(String),
    Topic(String),
}

impl Subject {
    /// 网站分析按主题处理
    pub fn from_input(analysis_type: AnalysisType, user_input: &str) -> Self {
        match analysis_type {
            AnalysisType::Product => Subject::Product(user_input.to_string()),
            AnalysisType::Topic | AnalysisType::Website => Subject::Topic(user_input.to_string()),
        }
    }

    pub fn is_product(&self) -> bool {
        matches!(self, Subject::Product(_))
    }

    pub(crate) fn render(&self, feature: Feature) -> Result<String, GenerationError> {
        Ok(match self {
            Subject::Product(description) => section(
                "Product / service",
                &format!("\"{}\"", require_input(feature, description, "product description")?),
            ),
            Subject::Topic(keywords) => section(
                "Topic / keywords",
                &format!("\"{}\"", require_input(feature, keywords, "topic keywords")?),
            ),
        })
    }
}

/// 当前时间的毫秒时间戳，用于生成条目id
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
