use crate::generator::context::GeneratorContext;
use crate::generator::error::{Feature, GenerationError};
use crate::generator::feature_agent::{
    FeatureAgent, PromptTemplate, json_section, require_input, section,
};
use crate::types::analysis::{AnalysisResult, BuyerPersona};

pub struct PersonaBuilder {
    analysis: AnalysisResult,
    user_input: String,
}

impl PersonaBuilder {
    pub fn new(analysis: AnalysisResult, user_input: &str) -> Self {
        Self {
            analysis,
            user_input: user_input.to_string(),
        }
    }
}

impl FeatureAgent for PersonaBuilder {
    type Output = BuyerPersona;

    fn feature(&self) -> Feature {
        Feature::BuyerPersona
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: "You are an experienced market researcher and UX expert. Your buyer personas are realistic and tangible, and they help marketers understand the target audience.".to_string(),
            opening_instruction: "Based on the market research analysis below, create one detailed buyer persona. Focus on the target market section of the analysis.".to_string(),
            closing_instruction: r#"## Task
- 'name': a characteristic, alliterative name that fits the market (e.g. 'Fenntartható Fanni').
- 'age': a realistic age as a number.
- 'occupation': the persona's occupation.
- 'bio': 3-4 sentences about the persona's life, background and daily routine.
- 'motivations': 3-4 points that motivate the persona in daily life or when buying.
- 'frustrations': 3-4 problems the product could solve.
- 'communicationChannels': 3-4 channels where the persona prefers to get information.
- 'quote': a one-sentence quote that captures the persona's mindset."#
                .to_string(),
        }
    }

    fn provide_prompt_content(
        &self,
        _context: &GeneratorContext,
    ) -> Result<String, GenerationError> {
        let user_input = require_input(self.feature(), &self.user_input, "user input")?;
        let mut content = section("Original idea / product", &format!("\"{}\"", user_input));
        content.push_str(&json_section("Detailed analysis", &self.analysis));
        Ok(content)
    }
}
