use crate::generator::agents::Subject;
use crate::generator::context::GeneratorContext;
use crate::generator::error::{Feature, GenerationError};
use crate::generator::feature_agent::{FeatureAgent, PromptTemplate, json_section};
use crate::types::analysis::AnalysisResult;
use crate::types::business::{BusinessPlan, MarketEntryProcess};

/// 市场进入策略师：4-5个阶段的落地流程
pub struct MarketEntryPlanner {
    subject: Subject,
    analysis: AnalysisResult,
    business_plans: Option<Vec<BusinessPlan>>,
}

impl MarketEntryPlanner {
    pub fn new(
        subject: Subject,
        analysis: AnalysisResult,
        business_plans: Option<Vec<BusinessPlan>>,
    ) -> Self {
        Self {
            subject,
            analysis,
            business_plans,
        }
    }
}

impl FeatureAgent for MarketEntryPlanner {
    type Output = MarketEntryProcess;

    fn feature(&self) -> Feature {
        Feature::MarketEntry
    }

    fn prompt_template(&self) -> PromptTemplate {
        let task = if self.subject.is_product() {
            "Prepare a detailed, step-by-step market entry process for the product or service below and its market research analysis."
        } else {
            "Prepare a general, step-by-step market entry process for a new business in the topic below, based on its market research analysis."
        };

        PromptTemplate {
            system_prompt: "You are an experienced market entry strategist. Your plans are practical and take every piece of provided context into account, including the market research and any business plans.".to_string(),
            opening_instruction: task.to_string(),
            closing_instruction: r#"## Task
- 'strategicOverview': a short, 2-3 sentence high-level summary of the proposed entry strategy. Mention which business plan direction it follows most closely, if plans were provided.
- 'phases': 4-5 phases. Each phase has a 'phaseTitle' (e.g. 'Phase 1: Planning and Preparation'), a 1-2 sentence 'description', 3-5 concrete 'keyActions' and 1-3 'considerations' or potential pitfalls."#
                .to_string(),
        }
    }

    fn provide_prompt_content(
        &self,
        _context: &GeneratorContext,
    ) -> Result<String, GenerationError> {
        let mut content = self.subject.render(self.feature())?;
        content.push_str(&json_section("Market research analysis (context)", &self.analysis));
        if let Some(plans) = self.business_plans.as_ref().filter(|p| !p.is_empty()) {
            content.push_str(&json_section("Business plan proposals (context)", plans));
        }
        Ok(content)
    }
}
