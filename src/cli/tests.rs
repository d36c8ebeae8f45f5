#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use crate::config::LLMProvider;
    use clap::Parser;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_args_requires_topic() {
        assert!(Args::try_parse_from(&["deepresearch-rs"]).is_err());
    }

    #[test]
    fn test_args_default_values() {
        let args = Args::try_parse_from(&["deepresearch-rs", "Rust async runtimes"]).unwrap();

        assert_eq!(args.topic, "Rust async runtimes");
        assert!(args.output_path.is_none());
        assert!(args.config.is_none());
        assert!(!args.verbose);
        assert!(!args.render_html);
        assert!(!args.no_raw_content);
    }

    #[test]
    fn test_args_short_options() {
        let args = Args::try_parse_from(&[
            "deepresearch-rs",
            "topic",
            "-o", "/test/report.md",
            "-m", "gpt-4o-mini",
            "-v"
        ]).unwrap();

        assert_eq!(args.output_path, Some(PathBuf::from("/test/report.md")));
        assert_eq!(args.model, Some("gpt-4o-mini".to_string()));
        assert!(args.verbose);
    }

    #[test]
    fn test_args_llm_options() {
        let args = Args::try_parse_from(&[
            "deepresearch-rs",
            "topic",
            "--llm-provider", "openai",
            "--llm-api-key", "test-key",
            "--llm-api-base-url", "https://api.openai.com",
            "--max-tokens", "2048",
            "--temperature", "0.7",
            "--max-parallels", "5"
        ]).unwrap();

        assert_eq!(args.llm_provider, Some("openai".to_string()));
        assert_eq!(args.llm_api_key, Some("test-key".to_string()));
        assert_eq!(args.llm_api_base_url, Some("https://api.openai.com".to_string()));
        assert_eq!(args.max_tokens, Some(2048));
        assert_eq!(args.temperature, Some(0.7));
        assert_eq!(args.max_parallels, Some(5));
    }

    #[test]
    fn test_into_config_with_overrides() {
        let args = Args::try_parse_from(&[
            "deepresearch-rs",
            "topic",
            "-o", "/test/report.md",
            "--llm-provider", "deepseek",
            "--model", "deepseek-chat",
            "--number-of-queries", "3",
            "--max-results-per-query", "2",
            "--max-source-tokens", "1000",
            "--no-raw-content",
            "--render-html",
            "--verbose"
        ]).unwrap();

        let config = args.into_config().unwrap();

        assert_eq!(config.output_path, PathBuf::from("/test/report.md"));
        assert_eq!(config.llm.provider, LLMProvider::DeepSeek);
        assert_eq!(config.llm.model, "deepseek-chat");
        assert_eq!(config.report.number_of_queries, 3);
        assert_eq!(config.report.max_results_per_query, 2);
        assert_eq!(config.report.max_source_tokens, 1000);
        assert!(!config.report.include_raw_content);
        assert!(config.render_html);
        assert!(config.verbose);
    }

    #[test]
    fn test_into_config_unknown_provider_is_error() {
        let args = Args::try_parse_from(&[
            "deepresearch-rs",
            "topic",
            "--llm-provider", "bogus",
            "--llm-api-base-url", "http://127.0.0.1:9"
        ]).unwrap();

        let err = args.into_config().unwrap_err();
        assert!(err.to_string().contains("Unknown provider: bogus"));
    }

    #[test]
    fn test_into_config_provider_is_case_insensitive() {
        let args = Args::try_parse_from(&[
            "deepresearch-rs",
            "topic",
            "--llm-provider", "Anthropic"
        ]).unwrap();

        let config = args.into_config().unwrap();
        assert_eq!(config.llm.provider, LLMProvider::Anthropic);
    }

    #[test]
    fn test_into_config_from_file_then_cli_wins() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("custom.toml");
        std::fs::write(
            &config_path,
            "[llm]\nmodel = \"from-file\"\nmax_parallels = 2\n",
        )
        .unwrap();

        let args = Args::try_parse_from(&[
            "deepresearch-rs",
            "topic",
            "-c", config_path.to_str().unwrap(),
            "--model", "from-cli"
        ]).unwrap();

        let config = args.into_config().unwrap();
        assert_eq!(config.llm.model, "from-cli");
        assert_eq!(config.llm.max_parallels, 2);
    }

    #[test]
    fn test_into_config_missing_explicit_file() {
        let args = Args::try_parse_from(&[
            "deepresearch-rs",
            "topic",
            "-c", "/nonexistent/custom.toml"
        ]).unwrap();

        assert!(args.into_config().is_err());
    }
}
