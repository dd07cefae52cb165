#[cfg(test)]
mod tests {
    use crate::cli::{AnalysisSource, Args, Command, PlansAction, SavedAction};
    use crate::config::LLMProvider;
    use crate::i18n::TargetLanguage;
    use crate::types::analysis::AnalysisType;
    use crate::types::business::BusinessPlanTemplate;
    use clap::Parser;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_analyze_requires_exactly_one_input() {
        assert!(Args::try_parse_from(["market-insight", "analyze"]).is_err());
        assert!(
            Args::try_parse_from([
                "market-insight",
                "analyze",
                "--product",
                "Szappan",
                "--topic",
                "öko"
            ])
            .is_err()
        );

        let args = Args::try_parse_from([
            "market-insight",
            "analyze",
            "--product",
            "Kézműves vegán szappan",
            "--industry",
            "Kozmetika",
            "--save",
            "Szappan projekt",
        ])
        .unwrap();
        match args.command {
            Command::Analyze(analyze) => {
                assert_eq!(analyze.product.as_deref(), Some("Kézműves vegán szappan"));
                assert_eq!(analyze.industry.as_deref(), Some("Kozmetika"));
                assert_eq!(analyze.save.as_deref(), Some("Szappan projekt"));
                assert!(analyze.geo.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = Args::try_parse_from([
            "market-insight",
            "uvp",
            "--analysis",
            "analysis-1",
            "--target-language",
            "en",
            "--no-cache",
            "-v",
        ])
        .unwrap();
        assert!(args.no_cache);
        assert!(args.verbose);
        assert_eq!(args.target_language.as_deref(), Some("en"));
        match args.command {
            Command::Uvp { source } => {
                assert_eq!(source.analysis.as_deref(), Some("analysis-1"));
                assert_eq!(source.analysis_type, AnalysisType::Product);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_analysis_sources_conflict() {
        let result = Args::try_parse_from([
            "market-insight",
            "summary",
            "--analysis",
            "analysis-1",
            "--analysis-file",
            "analysis.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_business_plan_template_parsing() {
        let args = Args::try_parse_from([
            "market-insight",
            "business-plans",
            "--analysis-file",
            "analysis.json",
            "--input",
            "öko háztartás",
            "--analysis-type",
            "topic",
            "--template",
            "lean-startup",
            "--save",
        ])
        .unwrap();
        match args.command {
            Command::BusinessPlans {
                source,
                template,
                save,
            } => {
                assert_eq!(template, BusinessPlanTemplate::LeanStartup);
                assert!(save);
                assert_eq!(source.analysis_file, Some(PathBuf::from("analysis.json")));
                assert_eq!(source.analysis_type, AnalysisType::Topic);
                assert!(source.is_given());
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(
            Args::try_parse_from(["market-insight", "business-plans", "--template", "huge"])
                .is_err()
        );
    }

    #[test]
    fn test_library_subcommands() {
        let args = Args::try_parse_from(["market-insight", "saved", "delete", "analysis-7"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Saved { action: SavedAction::Delete { ref id } } if id == "analysis-7"
        ));

        let args = Args::try_parse_from(["market-insight", "plans", "save", "plan.json"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Plans { action: PlansAction::Save { .. } }
        ));
    }

    #[test]
    fn test_strategy_brief_options() {
        let args = Args::try_parse_from([
            "market-insight",
            "strategy",
            "--product",
            "Szappan",
            "--audience",
            "Fiatalok",
            "--goal",
            "Ismertség",
            "--budget",
            "100.000 HUF",
        ])
        .unwrap();
        match args.command {
            Command::Strategy { source, brief } => {
                assert!(!source.is_given());
                assert_eq!(brief.budget.as_deref(), Some("100.000 HUF"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_into_config_applies_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("custom.toml");
        std::fs::write(
            &config_path,
            "target_language = \"de\"\n[llm]\nmodel_efficient = \"from-file\"\nmax_parallels = 5\n",
        )
        .unwrap();

        let args = Args::try_parse_from([
            "market-insight",
            "--config",
            config_path.to_str().unwrap(),
            "--internal-path",
            "/tmp/mi-internal",
            "--llm-provider",
            "anthropic",
            "--model-powerful",
            "big-model",
            "--target-language",
            "klingon",
            "--force-regenerate",
            "mentor",
        ])
        .unwrap();
        let (config, command) = args.into_config().unwrap();

        assert!(matches!(command, Command::Mentor));
        assert_eq!(config.llm.provider, LLMProvider::Anthropic);
        assert_eq!(config.llm.model_efficient, "from-file");
        assert_eq!(config.llm.model_powerful, "big-model");
        assert_eq!(config.llm.max_parallels, 5);
        // 未知语言保留配置文件中的设置
        assert_eq!(config.target_language, TargetLanguage::German);
        assert_eq!(config.internal_path, PathBuf::from("/tmp/mi-internal"));
        assert_eq!(config.cache.cache_dir, PathBuf::from("/tmp/mi-internal/cache"));
        assert!(config.force_regenerate);
    }

    #[test]
    fn test_into_config_missing_file_is_error() {
        let args = Args::try_parse_from([
            "market-insight",
            "--config",
            "/definitely/not/here.toml",
            "mentor",
        ])
        .unwrap();
        assert!(args.into_config().is_err());
    }

    #[test]
    fn test_analysis_source_default_is_empty() {
        assert!(!AnalysisSource::default().is_given());
    }
}
