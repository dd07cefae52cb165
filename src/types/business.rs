use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::extractor::Expect;
use crate::types::{MissingField, StructuredResponse, require_items, require_text};

/// 商业计划的策略模板
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessPlanTemplate {
    #[default]
    Default,
    LeanStartup,
    Growth,
    Premium,
}

impl std::fmt::Display for BusinessPlanTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusinessPlanTemplate::Default => write!(f, "default"),
            BusinessPlanTemplate::LeanStartup => write!(f, "lean-startup"),
            BusinessPlanTemplate::Growth => write!(f, "growth"),
            BusinessPlanTemplate::Premium => write!(f, "premium"),
        }
    }
}

impl std::str::FromStr for BusinessPlanTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "default" => Ok(BusinessPlanTemplate::Default),
            "lean-startup" | "lean" => Ok(BusinessPlanTemplate::LeanStartup),
            "growth" => Ok(BusinessPlanTemplate::Growth),
            "premium" => Ok(BusinessPlanTemplate::Premium),
            _ => Err(format!("Unknown business plan template: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FinancialPoint {
    pub item: String,
    /// 估算金额，保留模型给出的原始写法（如 "250.000 HUF"）
    pub cost: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialPlan {
    pub initial_investment: Vec<FinancialPoint>,
    pub monthly_operational_costs: Vec<FinancialPoint>,
    pub revenue_projections: Vec<FinancialPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FundingOption {
    #[serde(rename = "type")]
    pub kind: String,
    pub advantages: Vec<String>,
    pub disadvantages: Vec<String>,
}

/// 商业计划
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessPlan {
    /// 由引擎在解码后分配，模型给出的值会被覆盖
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub strategy_focus: String,
    #[serde(default)]
    pub executive_summary: String,
    pub marketing_strategy: Vec<String>,
    pub financial_plan: FinancialPlan,
    pub risk_assessment: Vec<String>,
    #[serde(default)]
    pub funding_options: Vec<FundingOption>,
}

impl StructuredResponse for BusinessPlan {
    fn validate(&self) -> Result<(), MissingField> {
        require_text(&self.title, "title")
    }
}

/// 一次生成的多份商业计划（JSON数组）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct BusinessPlanSet(pub Vec<BusinessPlan>);

impl BusinessPlanSet {
    pub fn into_inner(self) -> Vec<BusinessPlan> {
        self.0
    }
}

impl StructuredResponse for BusinessPlanSet {
    const EXPECT: Expect = Expect::Array;

    fn validate(&self) -> Result<(), MissingField> {
        require_items(&self.0, "businessPlans")?;
        for (index, plan) in self.0.iter().enumerate() {
            plan.validate()
                .map_err(|missing| MissingField::new(format!("[{}].{}", index, missing.field)))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketEntryPhase {
    pub phase_title: String,
    pub description: String,
    pub key_actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub considerations: Option<Vec<String>>,
}

/// 分阶段的市场进入流程
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketEntryProcess {
    #[serde(default)]
    pub strategic_overview: String,
    pub phases: Vec<MarketEntryPhase>,
}

impl StructuredResponse for MarketEntryProcess {
    fn validate(&self) -> Result<(), MissingField> {
        require_items(&self.phases, "phases")
    }
}

/// 独特价值主张 (UVP)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValueProposition {
    pub headline: String,
    pub subheadline: String,
    pub keywords: Vec<String>,
}

impl StructuredResponse for ValueProposition {
    fn validate(&self) -> Result<(), MissingField> {
        require_text(&self.headline, "headline")?;
        require_text(&self.subheadline, "subheadline")
    }
}
