use crate::generator::agents::now_millis;
use crate::generator::context::GeneratorContext;
use crate::generator::error::{Feature, GenerationError};
use crate::generator::feature_agent::{
    FeatureAgent, PromptTemplate, json_section, require_input, section,
};
use crate::types::analysis::{AnalysisResult, AnalysisType};
use crate::types::business::{BusinessPlanSet, BusinessPlanTemplate};

/// 商业顾问：基于分析生成三份策略不同的商业计划
pub struct BusinessPlanner {
    user_input: String,
    analysis_type: AnalysisType,
    analysis: AnalysisResult,
    template: BusinessPlanTemplate,
}

impl BusinessPlanner {
    pub fn new(
        user_input: &str,
        analysis_type: AnalysisType,
        analysis: AnalysisResult,
        template: BusinessPlanTemplate,
    ) -> Self {
        Self {
            user_input: user_input.to_string(),
            analysis_type,
            analysis,
            template,
        }
    }

    fn template_instruction(&self) -> &'static str {
        match self.template {
            BusinessPlanTemplate::Default => {
                "Generate a JSON array with exactly 3 business plans. The three plans must be strategically different: one 'Lean start-up' / cost-efficient, one 'Growth-oriented' / aggressive and one 'Premium / quality-focused' / balanced."
            }
            BusinessPlanTemplate::LeanStartup => {
                "Generate a JSON array with exactly 3 different business plan variations, all built on the 'Lean Startup' / cost-efficient approach. Focus on the minimum viable product, fast iteration and validated learning."
            }
            BusinessPlanTemplate::Growth => {
                "Generate a JSON array with exactly 3 different business plan variations, all built on the aggressive 'Growth-oriented' strategy. Focus on capturing market share quickly, scalability and attracting investors."
            }
            BusinessPlanTemplate::Premium => {
                "Generate a JSON array with exactly 3 different business plan variations, all built on the 'Premium / quality-focused' strategy. Emphasise outstanding quality, exclusivity and strong brand building."
            }
        }
    }
}

impl FeatureAgent for BusinessPlanner {
    type Output = BusinessPlanSet;

    fn feature(&self) -> Feature {
        Feature::BusinessPlans
    }

    fn prompt_template(&self) -> PromptTemplate {
        let task = match self.analysis_type {
            AnalysisType::Product => {
                "Prepare three different, detailed business plan proposals for the product or service below and its market research analysis."
            }
            AnalysisType::Topic | AnalysisType::Website => {
                "Prepare three different, detailed business ideas with an outline business plan each, based on the topic or website and its market research analysis. Each idea must be a concrete product or service related to the topic."
            }
        };

        PromptTemplate {
            system_prompt: "You are an experienced business consultant who turns market research into actionable business plans with realistic financial estimates.".to_string(),
            opening_instruction: task.to_string(),
            closing_instruction: format!(
                r#"## Task
{} Every plan must be based on the market research analysis: use the SWOT for the risks and the personas for marketing.
- 'marketingStrategy': at least 3 concrete suggestions tailored to the target market and the strategy.
- 'financialPlan': initial investment items, monthly operational costs and revenue projections, each with an estimated cost (e.g. '250.000 HUF', '80.000 HUF/hó').
- 'riskAssessment': at least 2 risks typical of the strategy, each with a mitigation idea.
- 'fundingOptions': 1-2 funding options matching the strategy (e.g. bootstrapping for a lean plan, investors for a growth plan), each with advantages and disadvantages.
Leave 'id' empty; it is assigned afterwards."#,
                self.template_instruction()
            ),
        }
    }

    fn provide_prompt_content(
        &self,
        _context: &GeneratorContext,
    ) -> Result<String, GenerationError> {
        let user_input = require_input(self.feature(), &self.user_input, "user input")?;
        let mut content = section("Basic information (user input)", &format!("\"{}\"", user_input));
        content.push_str(&json_section("Market research analysis (context)", &self.analysis));
        Ok(content)
    }

    fn post_process(&self, output: &mut BusinessPlanSet) {
        let millis = now_millis();
        for (index, plan) in output.0.iter_mut().enumerate() {
            plan.id = format!("plan-{}-{}", millis, index);
        }
    }
}
