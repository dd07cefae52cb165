use crate::generator::context::GeneratorContext;
use crate::generator::error::{Feature, GenerationError};
use crate::generator::feature_agent::{
    FeatureAgent, PromptTemplate, json_section, require_input, section,
};
use crate::types::analysis::{AnalysisResult, AnalysisSummary};

/// 高管摘要：15秒内读完的核心结论
pub struct AnalysisSummarizer {
    analysis: AnalysisResult,
    user_input: String,
}

impl AnalysisSummarizer {
    pub fn new(analysis: AnalysisResult, user_input: &str) -> Self {
        Self {
            analysis,
            user_input: user_input.to_string(),
        }
    }
}

impl FeatureAgent for AnalysisSummarizer {
    type Output = AnalysisSummary;

    fn feature(&self) -> Feature {
        Feature::AnalysisSummary
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: "You are an experienced business analyst who writes extremely concise executive summaries. The reader must grasp the key takeaways in 15 seconds.".to_string(),
            opening_instruction: "Summarize the market research analysis below for an executive, taking the original user request into account.".to_string(),
            closing_instruction: r#"## Task
- 'mainTakeaway': one powerful sentence that sums up the market situation or the most important lesson.
- 'topCompetitorToWatch': the 'name' of the most important competitor (if there is none, say there is no prominent competitor) and a 10-15 word 'reason' why it must be watched.
- 'biggestOpportunity': the most significant opportunity from the SWOT or the market gaps, in one short sentence."#
                .to_string(),
        }
    }

    fn provide_prompt_content(
        &self,
        _context: &GeneratorContext,
    ) -> Result<String, GenerationError> {
        let user_input = require_input(self.feature(), &self.user_input, "user input")?;
        let mut content = section("Original user request (context)", &format!("\"{}\"", user_input));
        content.push_str(&json_section("Detailed market research analysis (data source)", &self.analysis));
        Ok(content)
    }
}
