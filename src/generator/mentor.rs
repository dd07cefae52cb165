//! 创意导师：多轮对话，并可把对话内容转成一次市场分析

use anyhow::{Context, Result, bail};

use crate::generator::agents::{AnalysisRequest, ChatSummarizer, MarketAnalyst};
use crate::generator::context::GeneratorContext;
use crate::generator::error::{Feature, GenerationError};
use crate::generator::feature_agent::FeatureAgent;
use crate::types::analysis::AnalysisResult;
use crate::types::chat::ChatMessage;

/// 发给导师的分析结果消息以此开头
pub const MARKET_RESEARCH_MARKER: &str = "[MARKET RESEARCH RESULT]:";

/// 会话开始时代替用户发送的第一条消息
pub const OPENING_MESSAGE: &str = "Hi Mentor! I'd like to enter the market with a new, sustainable product. What first steps would you suggest?";

const MENTOR_SYSTEM_PROMPT: &str = r#"You are a supportive and encouraging business mentor. The user will come to you with an idea. Your job is to help them develop and refine it.
- Do not give direct advice or verdicts (e.g. "this is a good idea" or "this will not work").
- Instead ask open, thought-provoking questions that help the user find the answers themselves.
- Focus on problem solving, target audience, unique value proposition (UVP), revenue model, competitors and next steps.
- Be friendly, patient and encouraging. Use short, easy to understand sentences.
- Open the conversation with a greeting in which you introduce yourself as the Idea Mentor and ask what the user is thinking about.

SPECIAL INSTRUCTION:
A message starting with "[MARKET RESEARCH RESULT]:" contains a JSON object with the results of an automatic market research.
Interpret the data and summarise the key takeaways for the user in a friendly, accessible and encouraging message that covers:
1. Summary: a short, positive 1-2 sentence summary of the results.
2. Target market: the most important facts about the target market.
3. Competitors: 1-2 main competitors and their key strength or weakness that could be an opportunity for the user.
4. Opportunity: one key opportunity from the SWOT analysis.
5. Next step: close with a thought-provoking question that makes the user rethink the idea in the light of the new information."#;

/// 导师会话
///
/// `transcript` 是展示给用户的对话，`history` 是模型实际看到的对话，
/// 其中包含带有分析结果的隐藏消息。
pub struct MentorSession {
    context: GeneratorContext,
    system_prompt: String,
    transcript: Vec<ChatMessage>,
    history: Vec<ChatMessage>,
}

impl MentorSession {
    pub fn new(context: GeneratorContext) -> Self {
        let system_prompt = format!(
            "{}\n\n{}",
            MENTOR_SYSTEM_PROMPT,
            context.config.target_language.prompt_instruction()
        );
        Self {
            context,
            system_prompt,
            transcript: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// 用预设的第一条消息开启对话
    pub async fn start(&mut self) -> Result<String> {
        self.send(OPENING_MESSAGE).await
    }

    /// 发送一条用户消息并返回导师的回复。失败时对话保持不变
    pub async fn send(&mut self, message: &str) -> Result<String> {
        let message = message.trim();
        if message.is_empty() {
            bail!("message must not be empty");
        }

        let reply = self
            .context
            .generator
            .chat(&self.system_prompt, &self.history, message)
            .await
            .context("mentor reply failed")?;

        let user = ChatMessage::user(message);
        let model = ChatMessage::model(reply.clone());
        self.transcript.push(user.clone());
        self.transcript.push(model.clone());
        self.history.push(user);
        self.history.push(model);
        Ok(reply)
    }

    /// 总结对话、执行市场分析，并让导师解读分析结果
    ///
    /// 分析期间对话末尾是一条占位消息；成功时替换为导师的解读，失败时替换为错误提示。
    pub async fn analyze(&mut self) -> Result<AnalysisResult, GenerationError> {
        if self.transcript.len() < 2 {
            return Err(GenerationError::invalid_input(
                Feature::ChatSummary,
                "the conversation is too short to analyse",
            ));
        }

        let language = self.context.config.target_language.clone();
        let conversation = self.transcript.clone();
        self.transcript
            .push(ChatMessage::model(language.analysis_placeholder()));
        println!("🧭 导师正在根据对话生成市场分析...");

        match self.run_analysis(conversation).await {
            Ok((analysis, reply)) => {
                self.replace_placeholder(reply);
                Ok(analysis)
            }
            Err(e) => {
                tracing::warn!(feature = %e.feature(), error = %e, "mentor analysis failed");
                self.replace_placeholder(language.analysis_failed_notice().to_string());
                Err(e)
            }
        }
    }

    async fn run_analysis(
        &mut self,
        conversation: Vec<ChatMessage>,
    ) -> Result<(AnalysisResult, String), GenerationError> {
        let brief = ChatSummarizer::new(conversation)
            .execute(&self.context)
            .await?;

        let request = AnalysisRequest::Product {
            description: brief.product_description,
            industry: Some(brief.industry),
        };
        let analysis = MarketAnalyst::new(request, Some(brief.geographical_focus))
            .execute(&self.context)
            .await?;

        let payload = serde_json::to_string(&analysis).unwrap_or_default();
        let message = format!("{} {}", MARKET_RESEARCH_MARKER, payload);
        let reply = self
            .context
            .generator
            .chat(&self.system_prompt, &self.history, &message)
            .await
            .map_err(|source| GenerationError::Service {
                feature: Feature::MarketAnalysis,
                source,
            })?;

        self.history.push(ChatMessage::user(message));
        self.history.push(ChatMessage::model(reply.clone()));
        Ok((analysis, reply))
    }

    fn replace_placeholder(&mut self, text: String) {
        self.transcript.pop();
        self.transcript.push(ChatMessage::model(text));
    }
}

#[cfg(test)]
mod tests;
