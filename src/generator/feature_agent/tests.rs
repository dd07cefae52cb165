use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use super::*;
use crate::generator::agents::{Subject, ValuePropositionWriter};
use crate::testing::{ScriptedGenerator, sample_analysis, test_context};
use crate::types::business::ValueProposition;

const UVP_JSON: &str = r#"{"headline": "Tiszta bőr, tiszta lelkiismeret", "subheadline": "Kézműves vegán szappanok.", "keywords": ["vegán"]}"#;

fn uvp_writer() -> ValuePropositionWriter {
    ValuePropositionWriter::new(sample_analysis(), Subject::Product("vegán szappan".into()))
}

#[tokio::test]
async fn test_execute_decodes_fenced_response() {
    let temp_dir = TempDir::new().unwrap();
    let generator = Arc::new(ScriptedGenerator::new([format!(
        "Íme az ajánlat:\n```json\n{}\n```",
        UVP_JSON
    )]));
    let context = test_context(&temp_dir, generator.clone());

    let uvp = uvp_writer().execute(&context).await.unwrap();
    assert_eq!(uvp.headline, "Tiszta bőr, tiszta lelkiismeret");
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn test_prompts_carry_language_instruction_and_schema() {
    let temp_dir = TempDir::new().unwrap();
    let generator = Arc::new(ScriptedGenerator::new([UVP_JSON]));
    let context = test_context(&temp_dir, generator.clone());

    uvp_writer().execute(&context).await.unwrap();

    let (system_prompt, user_prompt) = generator.prompts().remove(0);
    assert!(system_prompt.ends_with(context.config.target_language.prompt_instruction()));
    assert!(user_prompt.contains("\"vegán szappan\""));
    assert!(user_prompt.contains("subheadline"));
    assert!(user_prompt.contains("Return ONLY a single JSON object"));
    assert!(user_prompt.contains("analysisText"));
}

#[tokio::test]
async fn test_second_execution_is_served_from_cache() {
    let temp_dir = TempDir::new().unwrap();
    let generator = Arc::new(ScriptedGenerator::new([UVP_JSON]));
    let context = test_context(&temp_dir, generator.clone());

    let first = uvp_writer().execute(&context).await.unwrap();
    let second = uvp_writer().execute(&context).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(generator.calls(), 1);
    assert_eq!(context.cache_manager.report().hits, 1);
}

#[tokio::test]
async fn test_force_regenerate_bypasses_cache() {
    let temp_dir = TempDir::new().unwrap();
    let generator = Arc::new(ScriptedGenerator::new([UVP_JSON, UVP_JSON]));
    let mut context = test_context(&temp_dir, generator.clone());

    uvp_writer().execute(&context).await.unwrap();
    context.config.force_regenerate = true;
    uvp_writer().execute(&context).await.unwrap();
    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn test_malformed_response_is_not_cached() {
    let temp_dir = TempDir::new().unwrap();
    let generator = Arc::new(ScriptedGenerator::new(["Sajnos most nem megy.", UVP_JSON]));
    let context = test_context(&temp_dir, generator.clone());

    let err = uvp_writer().execute(&context).await.unwrap_err();
    assert!(matches!(
        err,
        GenerationError::MalformedPayload {
            feature: Feature::ValueProposition,
            ..
        }
    ));
    assert!(err.is_retryable_by_user());
    assert_eq!(context.cache_manager.report().writes, 0);

    // 用户重试时重新调用模型
    assert!(uvp_writer().execute(&context).await.is_ok());
    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn test_blank_field_is_incomplete_result() {
    let temp_dir = TempDir::new().unwrap();
    let body = json!({ "headline": "", "subheadline": "x", "keywords": [] }).to_string();
    let generator = Arc::new(ScriptedGenerator::new([body]));
    let context = test_context(&temp_dir, generator);

    match uvp_writer().execute(&context).await {
        Err(GenerationError::IncompleteResult { feature, field }) => {
            assert_eq!(feature, Feature::ValueProposition);
            assert_eq!(field, "headline");
        }
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_missing_key_is_incomplete_result_naming_field() {
    let temp_dir = TempDir::new().unwrap();
    let generator = Arc::new(ScriptedGenerator::new([r#"{"headline": "Cím", "keywords": []}"#]));
    let context = test_context(&temp_dir, generator);

    match uvp_writer().execute(&context).await {
        Err(GenerationError::IncompleteResult { field, .. }) => assert_eq!(field, "subheadline"),
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_service_failure_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let generator = Arc::new(ScriptedGenerator::default());
    generator.push_failure("connection reset");
    let context = test_context(&temp_dir, generator);

    let err = uvp_writer().execute(&context).await.unwrap_err();
    assert!(matches!(err, GenerationError::Service { .. }));
    assert!(err.to_string().contains("connection reset"));
}

#[tokio::test]
async fn test_invalid_input_skips_generation() {
    let temp_dir = TempDir::new().unwrap();
    let generator = Arc::new(ScriptedGenerator::new([UVP_JSON]));
    let context = test_context(&temp_dir, generator.clone());

    let writer = ValuePropositionWriter::new(sample_analysis(), Subject::Topic("   ".into()));
    let err = writer.execute(&context).await.unwrap_err();
    assert!(matches!(err, GenerationError::InvalidInput { .. }));
    assert!(!err.is_retryable_by_user());
    assert_eq!(generator.calls(), 0);
}

#[test]
fn test_decode_response_trailing_commas_recovered() {
    let raw = r#"{"headline": "A", "subheadline": "B", "keywords": ["x",],}"#;
    let uvp: ValueProposition = decode_response(Feature::ValueProposition, raw).unwrap();
    assert_eq!(uvp.keywords, vec!["x".to_string()]);
}

#[test]
fn test_user_message_for_format_errors_is_retry_notice() {
    let err = decode_response::<ValueProposition>(Feature::ValueProposition, "nope").unwrap_err();
    let language = crate::i18n::TargetLanguage::English;
    assert_eq!(err.user_message(&language), language.retry_notice());
}
