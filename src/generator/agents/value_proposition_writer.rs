use crate::generator::agents::Subject;
use crate::generator::context::GeneratorContext;
use crate::generator::error::{Feature, GenerationError};
use crate::generator::feature_agent::{FeatureAgent, PromptTemplate, json_section};
use crate::types::analysis::AnalysisResult;
use crate::types::business::ValueProposition;

pub struct ValuePropositionWriter {
    analysis: AnalysisResult,
    subject: Subject,
}

impl ValuePropositionWriter {
    pub fn new(analysis: AnalysisResult, subject: Subject) -> Self {
        Self { analysis, subject }
    }
}

impl FeatureAgent for ValuePropositionWriter {
    type Output = ValueProposition;

    fn feature(&self) -> Feature {
        Feature::ValueProposition
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: "You are an excellent marketing strategist. You write unique value propositions that are concise, convincing and relevant to the target audience.".to_string(),
            opening_instruction: "Based on the market research analysis below, write a unique value proposition (UVP).".to_string(),
            closing_instruction: r#"## Task
- 'headline': an eye-catching headline of 5-10 words that highlights the most important benefit.
- 'subheadline': 2-3 sentences explaining what is offered, who it is for and how it differs from the competitors.
- 'keywords': 3-5 keywords or short phrases that capture the essence of the proposition."#
                .to_string(),
        }
    }

    fn provide_prompt_content(
        &self,
        _context: &GeneratorContext,
    ) -> Result<String, GenerationError> {
        let mut content = self.subject.render(self.feature())?;
        content.push_str(&json_section("Market research analysis", &self.analysis));
        Ok(content)
    }
}
