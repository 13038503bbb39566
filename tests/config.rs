use dietcoke::cli::Cli;
use dietcoke::config::Config;
use figment::Jail;
use std::io::Write;
use tempfile::NamedTempFile;

/// Runs `test` with every environment variable cleared and restored afterwards,
/// so an exported `DIETCOKE_*` variable never leaks into a test.
fn isolated_env(test: impl FnOnce(&mut Jail)) {
    Jail::expect_with(|jail| {
        jail.clear_env();
        test(jail);
        Ok(())
    });
}

fn cli_with_file(toml_content: &str) -> (Cli, NamedTempFile) {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", toml_content).unwrap();
    let cli = Cli {
        config: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    (cli, file)
}

#[test]
fn test_load_full_valid_config() {
    isolated_env(|_| {
        let toml_content = r#"
            log_level = "debug"
            [dispatch]
            timeout_ms = 3000
            use_ntfy = true
            use_ifttt = false
            [ntfy]
            base_url = "https://ntfy.example.com"
            topic = "fridge"
            title = "Thirsty"
            message = "bring two"
            priority = 3
            tags = ["bell", "cup_with_straw"]
            [ifttt]
            base_url = "https://hooks.example.com"
            key = "abc123"
            event = "soda"
            value1 = "Diet Coke"
        "#;
        let (cli, _file) = cli_with_file(toml_content);

        let config = Config::load(&cli).unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.dispatch.timeout_ms, 3000);
        assert!(config.dispatch.use_ntfy);
        assert!(!config.dispatch.use_ifttt);
        assert_eq!(config.ntfy.base_url, "https://ntfy.example.com");
        assert_eq!(config.ntfy.topic.as_deref(), Some("fridge"));
        assert_eq!(config.ntfy.title, "Thirsty");
        assert_eq!(config.ntfy.message.as_deref(), Some("bring two"));
        assert_eq!(config.ntfy.priority, 3);
        assert_eq!(config.ntfy.tags, vec!["bell", "cup_with_straw"]);
        assert_eq!(config.ifttt.base_url, "https://hooks.example.com");
        assert_eq!(config.ifttt.key.as_deref(), Some("abc123"));
        assert_eq!(config.ifttt.event, "soda");
        assert_eq!(config.ifttt.value1.as_deref(), Some("Diet Coke"));
        assert_eq!(config.ifttt.value2, None);
    });
}

#[test]
fn test_load_default_values() {
    isolated_env(|_| {
        let (cli, _file) = cli_with_file("");

        let config = Config::load(&cli).unwrap();

        assert_eq!(config, Config::default());
    });
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    isolated_env(|_| {
        let (cli, _file) = cli_with_file(
            r#"
            [ntfy]
            topic = "fridge"
        "#,
        );

        let config = Config::load(&cli).unwrap();

        assert_eq!(config.ntfy.topic.as_deref(), Some("fridge"));
        assert_eq!(config.ntfy.priority, 5);
        assert_eq!(config.ntfy.base_url, "https://ntfy.sh");
        assert_eq!(config.ifttt.event, "diet_coke");
    });
}

#[test]
fn test_cli_overrides_file() {
    isolated_env(|_| {
        let (mut cli, _file) = cli_with_file(
            r#"
            [ntfy]
            topic = "from-file"
            [ifttt]
            key = "file-key"
        "#,
        );
        cli.topic = Some("from-cli".to_string());
        cli.tags = vec!["bell".to_string()];
        cli.no_ifttt = true;
        cli.timeout_ms = Some(1500);

        let config = Config::load(&cli).unwrap();

        assert_eq!(config.ntfy.topic.as_deref(), Some("from-cli"));
        assert_eq!(config.ntfy.tags, vec!["bell"]);
        assert_eq!(config.ifttt.key.as_deref(), Some("file-key"));
        assert!(!config.dispatch.use_ifttt);
        assert!(config.dispatch.use_ntfy);
        assert_eq!(config.dispatch.timeout_ms, 1500);
    });
}

#[test]
fn test_invalid_value_type() {
    isolated_env(|_| {
        let (cli, _file) = cli_with_file(
            r#"
            [dispatch]
            timeout_ms = "eight seconds"
        "#,
        );

        assert!(Config::load(&cli).is_err());
    });
}

#[test]
fn test_priority_out_of_range_is_rejected() {
    isolated_env(|_| {
        let (cli, _file) = cli_with_file(
            r#"
            [ntfy]
            priority = 7
        "#,
        );

        assert!(Config::load(&cli).is_err());
    });
}

#[test]
fn test_zero_timeout_is_rejected() {
    isolated_env(|_| {
        let cli = Cli {
            timeout_ms: Some(0),
            ..Default::default()
        };

        assert!(Config::load(&cli).is_err());
    });
}

#[test]
fn test_env_overrides_file_and_cli_overrides_env() {
    isolated_env(|jail| {
        let (mut cli, _file) = cli_with_file(
            r#"
            [dispatch]
            timeout_ms = 3000
            [ntfy]
            topic = "from-file"
            [ifttt]
            key = "file-key"
            event = "soda"
        "#,
        );
        jail.set_env("DIETCOKE_IFTTT__KEY", "env-key");
        jail.set_env("DIETCOKE_DISPATCH__TIMEOUT_MS", "2500");
        jail.set_env("DIETCOKE_NTFY__TOPIC", "102508");
        jail.set_env("DIETCOKE_IFTTT__EVENT", "007");

        let config = Config::load(&cli).unwrap();

        assert_eq!(config.ifttt.key.as_deref(), Some("env-key"));
        assert_eq!(config.dispatch.timeout_ms, 2500);
        assert_eq!(config.ntfy.topic.as_deref(), Some("102508"));
        assert_eq!(config.ifttt.event, "007");

        cli.key = Some("cli-key".to_string());
        cli.timeout_ms = Some(1200);
        cli.topic = Some("from-cli".to_string());

        let config = Config::load(&cli).unwrap();

        assert_eq!(config.ifttt.key.as_deref(), Some("cli-key"));
        assert_eq!(config.dispatch.timeout_ms, 1200);
        assert_eq!(config.ntfy.topic.as_deref(), Some("from-cli"));
        assert_eq!(config.ifttt.event, "007");
    });
}

#[test]
fn test_numeric_looking_env_values_stay_text() {
    isolated_env(|jail| {
        jail.set_env("DIETCOKE_IFTTT__KEY", "0042");
        jail.set_env("DIETCOKE_NTFY__TITLE", "true");
        jail.set_env("DIETCOKE_IFTTT__VALUE1", "1.50");

        let config = Config::load(&Cli::default()).unwrap();

        assert_eq!(config.ifttt.key.as_deref(), Some("0042"));
        assert_eq!(config.ntfy.title, "true");
        assert_eq!(config.ifttt.value1.as_deref(), Some("1.50"));
    });
}
