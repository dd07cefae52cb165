use async_trait::async_trait;
use serde::Serialize;

use crate::cache::CacheManager;
use crate::extractor::{Expect, extract_value};
use crate::generator::context::GeneratorContext;
use crate::generator::error::{Feature, GenerationError, offending_field};
use crate::types::StructuredResponse;

/// Prompt模板配置
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// 系统提示词
    pub system_prompt: String,
    /// 开头的说明性指令
    pub opening_instruction: String,
    /// 结尾的强调性指令
    pub closing_instruction: String,
}

/// 把模型的原始文本解析为经过校验的结构化结果
///
/// 格式错误与内容不完整是两类不同的失败，分别记录日志。
pub fn decode_response<T: StructuredResponse>(
    feature: Feature,
    raw: &str,
) -> Result<T, GenerationError> {
    let value = extract_value(raw, T::EXPECT).map_err(|source| {
        tracing::warn!(
            feature = %feature,
            failure = "malformed_payload",
            error = %source,
            "model response could not be parsed"
        );
        GenerationError::MalformedPayload { feature, source }
    })?;

    let output: T = serde_json::from_value(value).map_err(|e| {
        let field = offending_field(&e);
        tracing::warn!(
            feature = %feature,
            failure = "incomplete_result",
            field = %field,
            "model response failed to decode"
        );
        GenerationError::IncompleteResult { feature, field }
    })?;

    output.validate().map_err(|missing| {
        tracing::warn!(
            feature = %feature,
            failure = "incomplete_result",
            field = %missing.field,
            "model response failed validation"
        );
        GenerationError::IncompleteResult {
            feature,
            field: missing.field,
        }
    })?;

    Ok(output)
}

/// 必填文本输入，返回修剪后的值
pub fn require_input<'a>(
    feature: Feature,
    value: &'a str,
    name: &str,
) -> Result<&'a str, GenerationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GenerationError::invalid_input(
            feature,
            format!("{} must not be empty", name),
        ));
    }
    Ok(trimmed)
}

/// 一个带标题的提示词段落
pub fn section(title: &str, body: &str) -> String {
    format!("## {}\n{}\n\n", title, body.trim_end())
}

/// 以缩进JSON的形式嵌入上游结果
pub fn json_section<T: Serialize>(title: &str, value: &T) -> String {
    section(
        title,
        &serde_json::to_string_pretty(value).unwrap_or_default(),
    )
}

/// 输出契约：输出类型的JSON Schema加上"只返回JSON"的规则
pub fn output_contract<T: StructuredResponse>() -> String {
    let schema = schemars::schema_for!(T);
    let kind = match T::EXPECT {
        Expect::Object => "a single JSON object",
        Expect::Array => "a single JSON array",
    };
    format!(
        "## Output format\nReturn ONLY {} that conforms to the JSON Schema below. \
Do not add any text before or after it and do not use Markdown formatting. \
Use valid JSON syntax: no trailing commas, no comments.\n```json\n{}\n```\n\n",
        kind,
        serde_json::to_string_pretty(&schema).unwrap_or_default()
    )
}

/// 单一特性的生成Agent
#[async_trait]
pub trait FeatureAgent: Send + Sync {
    /// Agent的输出类型
    type Output: StructuredResponse;

    /// 特性标识
    fn feature(&self) -> Feature;

    /// Prompt模板配置
    fn prompt_template(&self) -> PromptTemplate;

    /// 输入材料。输入不合法时返回 `InvalidInput`，此时不会调用模型
    fn provide_prompt_content(&self, context: &GeneratorContext)
    -> Result<String, GenerationError>;

    /// 可选的后处理钩子
    fn post_process(&self, _output: &mut Self::Output) {}

    /// 构建系统提示词和用户提示词
    fn build_prompts(
        &self,
        context: &GeneratorContext,
    ) -> Result<(String, String), GenerationError> {
        let content = self.provide_prompt_content(context)?;
        let template = self.prompt_template();

        // 根据配置的目标语言添加语言指令
        let language_instruction = context.config.target_language.prompt_instruction();
        let system_prompt = format!("{}\n\n{}", template.system_prompt, language_instruction);

        let mut user_prompt = String::new();
        user_prompt.push_str(&template.opening_instruction);
        user_prompt.push_str("\n\n");
        user_prompt.push_str(&content);
        user_prompt.push_str(&output_contract::<Self::Output>());
        user_prompt.push_str(&template.closing_instruction);

        Ok((system_prompt, user_prompt))
    }

    /// 默认实现的execute方法：构建prompt、查缓存、调用模型、解析校验、写缓存、后处理
    async fn execute(&self, context: &GeneratorContext) -> Result<Self::Output, GenerationError> {
        let feature = self.feature();
        let (system_prompt, user_prompt) = self.build_prompts(context)?;

        let category = feature.to_string();
        let cache_key = CacheManager::prompt_key(&system_prompt, &user_prompt);

        if !context.config.force_regenerate {
            if let Ok(Some(raw)) = context
                .cache_manager
                .get::<String>(&category, &cache_key)
                .await
            {
                match decode_response::<Self::Output>(feature, &raw) {
                    Ok(mut output) => {
                        println!("   💾 使用缓存结果 [{}]", feature);
                        self.post_process(&mut output);
                        return Ok(output);
                    }
                    Err(e) => tracing::debug!(feature = %feature, error = %e, "cached response rejected"),
                }
            }
        }

        println!("🤖 正在生成 [{}] ...", feature);
        tracing::debug!(
            feature = %feature,
            model = %context.generator.model_name(),
            prompt_chars = system_prompt.len() + user_prompt.len(),
            "generation call"
        );

        let raw = context
            .generator
            .generate(&system_prompt, &user_prompt)
            .await
            .map_err(|source| GenerationError::Service { feature, source })?;

        let mut output = decode_response::<Self::Output>(feature, &raw)?;

        if let Err(e) = context
            .cache_manager
            .set(
                &category,
                &cache_key,
                &raw,
                Some(context.generator.model_name()),
            )
            .await
        {
            tracing::warn!(feature = %feature, error = %e, "failed to write cache entry");
        }

        self.post_process(&mut output);
        println!("✅ [{}] 生成完成", feature);
        Ok(output)
    }
}

#[cfg(test)]
mod tests;
