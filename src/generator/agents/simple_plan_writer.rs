use crate::generator::agents::now_millis;
use crate::generator::context::GeneratorContext;
use crate::generator::error::{Feature, GenerationError};
use crate::generator::feature_agent::{
    FeatureAgent, PromptTemplate, json_section, require_input, section,
};
use crate::types::analysis::AnalysisResult;
use crate::types::business::BusinessPlan;

/// 单份精简商业计划
pub struct SimplePlanWriter {
    analysis: AnalysisResult,
    user_input: String,
}

impl SimplePlanWriter {
    pub fn new(analysis: AnalysisResult, user_input: &str) -> Self {
        Self {
            analysis,
            user_input: user_input.to_string(),
        }
    }
}

impl FeatureAgent for SimplePlanWriter {
    type Output = BusinessPlan;

    fn feature(&self) -> Feature {
        Feature::SimpleBusinessPlan
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: "You are an experienced business consultant. You write short, practical business plan outlines tied directly to the key findings of a market analysis.".to_string(),
            opening_instruction: "Based on the market research analysis and the user input below, prepare a short business plan outline with three main parts: strategy, finances and risks.".to_string(),
            closing_instruction: r#"## Task
Generate a single business plan.
- 'title': e.g. '<user input> - Business Plan Outline'.
- 'marketingStrategy': 3-4 concrete suggestions that respond to the target market and the competitors.
- 'financialPlan': the key initial investment item, the most important monthly cost and one realistic revenue projection, each with an estimated amount.
- 'riskAssessment': the 2-3 most important risks derived from the analysis, especially from the SWOT threats.
- 'fundingOptions': an empty array.
Leave 'id' empty; it is assigned afterwards."#
                .to_string(),
        }
    }

    fn provide_prompt_content(
        &self,
        _context: &GeneratorContext,
    ) -> Result<String, GenerationError> {
        let user_input = require_input(self.feature(), &self.user_input, "user input")?;
        let mut content = section("User input (context)", &format!("\"{}\"", user_input));
        content.push_str(&json_section("Market research analysis (data source)", &self.analysis));
        Ok(content)
    }

    fn post_process(&self, output: &mut BusinessPlan) {
        output.id = format!("simple-plan-{}", now_millis());
    }
}
