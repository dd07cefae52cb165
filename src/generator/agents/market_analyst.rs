use crate::generator::context::GeneratorContext;
use crate::generator::error::{Feature, GenerationError};
use crate::generator::feature_agent::{FeatureAgent, PromptTemplate, require_input, section};
use crate::types::analysis::{AnalysisResult, AnalysisType};

/// 市场分析的输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    Product {
        description: String,
        industry: Option<String>,
    },
    Topic {
        keywords: String,
    },
    Website {
        url: String,
    },
}

impl AnalysisRequest {
    pub fn analysis_type(&self) -> AnalysisType {
        match self {
            AnalysisRequest::Product { .. } => AnalysisType::Product,
            AnalysisRequest::Topic { .. } => AnalysisType::Topic,
            AnalysisRequest::Website { .. } => AnalysisType::Website,
        }
    }

    /// 保存分析时记录的用户输入
    pub fn user_input(&self) -> &str {
        match self {
            AnalysisRequest::Product { description, .. } => description,
            AnalysisRequest::Topic { keywords } => keywords,
            AnalysisRequest::Website { url } => url,
        }
    }
}

/// 市场分析师：竞争对手、SWOT、人群画像、趋势与区域
pub struct MarketAnalyst {
    request: AnalysisRequest,
    geographical_focus: Option<String>,
}

impl MarketAnalyst {
    pub fn new(request: AnalysisRequest, geographical_focus: Option<String>) -> Self {
        Self {
            request,
            geographical_focus,
        }
    }

    fn analysis_outline(&self) -> &'static str {
        match self.request {
            AnalysisRequest::Product { .. } => {
                r#"The 'analysisText' field must contain these Markdown-style sections:
### Target Market
- Demographic, psychographic and geographic traits, buying habits.
### Market Trends and Outlook
- Current trends, technological innovation and the outlook of the industry.
### Competitor Summary
- A short summary of the main competitors.
### Positioning Recommendations
- Suggested unique value proposition, key messages and marketing channels.

The 'swotAnalysis' must describe THE PRODUCT OR SERVICE itself."#
            }
            AnalysisRequest::Topic { .. } => {
                r#"The 'analysisText' field must contain these Markdown-style sections:
### Target Market and Demographics
- Main consumer segments, demographic data, online behaviour.
### Market Trends and Outlook
- Key current trends, emerging technologies, expected developments.
### Key Players and Competitors
- A short summary of the main market players.
### Market Opportunities
- Untapped niches or needs, suggested entry points.

The 'swotAnalysis' must describe THE TOPIC OR MARKET, not a specific product."#
            }
            AnalysisRequest::Website { .. } => {
                r#"The 'analysisText' field must contain these Markdown-style sections:
### Audience and Communication
- Who are the main target groups based on the website content? What is its tone of voice?
### SEO and Content Analysis
- The most important keywords and the types of content on the site.
### Market Position and Value Proposition
- The main product or service and its unique value proposition.
### User Experience and Improvement Ideas
- The overall user experience and suggestions to improve it.

The 'swotAnalysis' must describe THE WEBSITE AND THE BUSINESS behind it."#
            }
        }
    }
}

impl FeatureAgent for MarketAnalyst {
    type Output = AnalysisResult;

    fn feature(&self) -> Feature {
        Feature::MarketAnalysis
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: "You are a senior market research analyst. You produce detailed, data-driven market analyses with realistic competitors, SWOT points, buyer personas, market trends and regional interest, and you always answer with structured JSON.".to_string(),
            opening_instruction: "Prepare a detailed market research analysis based on the input below.".to_string(),
            closing_instruction: format!(
                r#"## Content rules
- 'competitors': 2-3 competitors. Mark the 2 most important ones with "isMainCompetitor": true. Each strength and weakness has a 'text' and a 'category' (PRICE, QUALITY, MARKETING, CUSTOMER_SERVICE, INNOVATION, BRAND_REPUTATION, OTHER). 'sentiment' is POSITIVE, NEGATIVE or NEUTRAL; 'pricingSummary' is AFFORDABLE, MID_RANGE, PREMIUM or NOT_AVAILABLE.
- 'swotAnalysis': every point has an 'impact' (HIGH, MEDIUM, LOW). Add 'relatedCompetitor' with the EXACT competitor name when a point refers to one of the listed competitors, especially for opportunities and threats.
- 'marketOverview': estimated market size (e.g. '1.5 Mrd HUF'), annual growth rate (e.g. '8.2% CAGR') and overall sentiment.
- 'trends': EXACTLY 1 trend describing the main market trend, with 6-8 monthly data points whose 'value' is an interest index between 0 and 100.
- 'personas': EXACTLY 2 detailed and realistic buyer personas.
- 'regions': 3-5 regions within the geographical focus, each with an 'intensity' between 0 and 100.
- 'keywords': 5-7 relevant keywords.
- 'contentSuggestions': 3-5 short content ideas of one or two words.
- 'sources': the web pages you relied on, if any, each with 'uri' and 'title'.

{}"#,
                self.analysis_outline()
            ),
        }
    }

    fn provide_prompt_content(
        &self,
        context: &GeneratorContext,
    ) -> Result<String, GenerationError> {
        let feature = self.feature();
        let mut content = String::new();

        match &self.request {
            AnalysisRequest::Product {
                description,
                industry,
            } => {
                let description = require_input(feature, description, "product description")?;
                content.push_str(&section("Product / service", &format!("\"{}\"", description)));
                if let Some(industry) = industry.as_deref().filter(|i| !i.trim().is_empty()) {
                    content.push_str(&section("Industry focus", &format!("\"{}\"", industry.trim())));
                }
            }
            AnalysisRequest::Topic { keywords } => {
                let keywords = require_input(feature, keywords, "topic keywords")?;
                content.push_str(&section("Topic / keywords", &format!("\"{}\"", keywords)));
            }
            AnalysisRequest::Website { url } => {
                let url = require_input(feature, url, "website url")?;
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(GenerationError::invalid_input(
                        feature,
                        format!("website url must start with http:// or https://, got {}", url),
                    ));
                }
                content.push_str(&section("Website", &format!("\"{}\"", url)));
            }
        }

        let geo = context
            .config
            .geographical_focus_or_default(self.geographical_focus.as_deref());
        content.push_str(&section("Geographical focus", &format!("\"{}\"", geo)));

        Ok(content)
    }

    fn post_process(&self, output: &mut AnalysisResult) {
        output.dedupe_sources();
    }
}
