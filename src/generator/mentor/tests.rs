use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use super::*;
use crate::testing::{ScriptedGenerator, sample_analysis_json, test_context};
use crate::types::chat::ChatRole;

fn brief_json() -> String {
    json!({
        "productDescription": "Kézműves vegán szappan",
        "industry": "Kozmetika",
        "geographicalFocus": "Budapest"
    })
    .to_string()
}

#[tokio::test]
async fn test_start_and_send_build_transcript() {
    let temp_dir = TempDir::new().unwrap();
    let generator = Arc::new(ScriptedGenerator::new([
        "Szia! Én az Ötlet Mentor vagyok.",
        "Kik lennének a vásárlóid?",
    ]));
    let mut session = MentorSession::new(test_context(&temp_dir, generator.clone()));

    session.start().await.unwrap();
    let reply = session.send("  Vegán szappant árulnék.  ").await.unwrap();
    assert_eq!(reply, "Kik lennének a vásárlóid?");

    let transcript = session.transcript();
    assert_eq!(transcript.len(), 4);
    assert_eq!(transcript[0].text, OPENING_MESSAGE);
    assert_eq!(transcript[2].text, "Vegán szappant árulnék.");
    assert_eq!(transcript[3].role, ChatRole::Model);

    let (system_prompt, _) = generator.prompts().remove(0);
    assert!(system_prompt.contains(MARKET_RESEARCH_MARKER));
}

#[tokio::test]
async fn test_failed_send_leaves_transcript_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let generator = Arc::new(ScriptedGenerator::default());
    generator.push_failure("network down");
    let mut session = MentorSession::new(test_context(&temp_dir, generator));

    assert!(session.send("Szia").await.is_err());
    assert!(session.transcript().is_empty());
    assert!(session.send("   ").await.is_err());
}

#[tokio::test]
async fn test_analyze_sends_marked_result_to_mentor() {
    let temp_dir = TempDir::new().unwrap();
    let generator = Arc::new(ScriptedGenerator::new([
        "Szia! Miben segíthetek?".to_string(),
        brief_json(),
        sample_analysis_json().to_string(),
        "Remek hírek: növekvő a piac!".to_string(),
    ]));
    let mut session = MentorSession::new(test_context(&temp_dir, generator.clone()));
    session.start().await.unwrap();

    let analysis = session.analyze().await.unwrap();
    assert_eq!(analysis.competitors.len(), 2);

    let transcript = session.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[2].text, "Remek hírek: növekvő a piac!");

    let prompts = generator.prompts();
    assert!(prompts[1].1.contains("User: "));
    assert!(prompts[2].1.contains("\"Budapest\""));
    assert!(prompts[3].1.starts_with(MARKET_RESEARCH_MARKER));
}

#[tokio::test]
async fn test_analyze_failure_replaces_placeholder() {
    let temp_dir = TempDir::new().unwrap();
    let generator = Arc::new(ScriptedGenerator::new([
        "Szia! Miben segíthetek?",
        "Sajnos nem tudom összefoglalni.",
    ]));
    let context = test_context(&temp_dir, generator);
    let notice = context.config.target_language.analysis_failed_notice();
    let mut session = MentorSession::new(context);
    session.start().await.unwrap();

    let err = session.analyze().await.unwrap_err();
    assert!(matches!(err, GenerationError::MalformedPayload { .. }));

    let last = session.transcript().last().unwrap();
    assert_eq!(last.text, notice);
    assert_eq!(session.transcript().len(), 3);
}

#[tokio::test]
async fn test_analyze_requires_conversation() {
    let temp_dir = TempDir::new().unwrap();
    let generator = Arc::new(ScriptedGenerator::default());
    let mut session = MentorSession::new(test_context(&temp_dir, generator.clone()));

    let err = session.analyze().await.unwrap_err();
    assert!(matches!(err, GenerationError::InvalidInput { .. }));
    assert_eq!(generator.calls(), 0);
}
