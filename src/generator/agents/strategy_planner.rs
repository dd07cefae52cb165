use crate::generator::context::GeneratorContext;
use crate::generator::error::{Feature, GenerationError};
use crate::generator::feature_agent::{
    FeatureAgent, PromptTemplate, json_section, require_input, section,
};
use crate::types::analysis::AnalysisResult;
use crate::types::marketing::MarketingStrategy;

/// 不依赖分析、由用户直接填写的策略简报
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyBrief {
    pub product: String,
    pub audience: String,
    pub goal: String,
    pub budget: String,
}

enum StrategySource {
    Brief(StrategyBrief),
    Analysis {
        analysis: AnalysisResult,
        user_input: String,
    },
}

/// 数字营销策略师
pub struct StrategyPlanner {
    source: StrategySource,
}

impl StrategyPlanner {
    pub fn from_brief(brief: StrategyBrief) -> Self {
        Self {
            source: StrategySource::Brief(brief),
        }
    }

    pub fn from_analysis(analysis: AnalysisResult, user_input: &str) -> Self {
        Self {
            source: StrategySource::Analysis {
                analysis,
                user_input: user_input.to_string(),
            },
        }
    }
}

const STRATEGY_RULES: &str = r#"- 'strategicOverview': a short, 2-3 sentence high-level summary of the strategy.
- 'suggestedChannels': at least 3 channels, each with a 'description' of why it is relevant and concrete 'platforms'.
- 'coreMessaging': the 'mainMessage' that speaks to the audience and highlights the value, plus 2-3 catchy 'taglines'.
- 'campaignIdeas': at least 2 creative campaign ideas with a 1-2 sentence description.
- 'keyPerformanceIndicators': 3-5 concrete, measurable KPIs (e.g. '20% monthly organic traffic growth').
- 'marketingCalendar': a realistic weekly schedule with 5-7 entries ('day', 'time', 'activity', 'platform', 'notes'). Posting times must suit the target audience."#;

impl FeatureAgent for StrategyPlanner {
    type Output = MarketingStrategy;

    fn feature(&self) -> Feature {
        Feature::MarketingStrategy
    }

    fn prompt_template(&self) -> PromptTemplate {
        let (opening, extra) = match &self.source {
            StrategySource::Brief(_) => (
                "Create a comprehensive digital marketing strategy from the details below.",
                "The strategy must be practical, relevant and achievable within the given budget.",
            ),
            StrategySource::Analysis { .. } => (
                "Create a comprehensive digital marketing strategy based on the market research analysis below.",
                "Use the 'personas' and 'analysisText' to define the audience and the messages. The channels must match the personas' communication channels.",
            ),
        };

        PromptTemplate {
            system_prompt: "You are an experienced marketing strategist who designs practical digital marketing strategies.".to_string(),
            opening_instruction: opening.to_string(),
            closing_instruction: format!("## Task\n{}\n{}", extra, STRATEGY_RULES),
        }
    }

    fn provide_prompt_content(
        &self,
        _context: &GeneratorContext,
    ) -> Result<String, GenerationError> {
        let feature = self.feature();
        match &self.source {
            StrategySource::Brief(brief) => {
                let body = format!(
                    "- Product / service: \"{}\"\n- Target audience: \"{}\"\n- Main marketing goal: \"{}\"\n- Approximate budget: \"{}\"",
                    require_input(feature, &brief.product, "product")?,
                    require_input(feature, &brief.audience, "audience")?,
                    require_input(feature, &brief.goal, "goal")?,
                    require_input(feature, &brief.budget, "budget")?,
                );
                Ok(section("User details", &body))
            }
            StrategySource::Analysis {
                analysis,
                user_input,
            } => {
                let user_input = require_input(feature, user_input, "user input")?;
                let mut content = section("User input (context)", &format!("\"{}\"", user_input));
                content.push_str(&json_section("Market research analysis (data source)", analysis));
                Ok(content)
            }
        }
    }
}
