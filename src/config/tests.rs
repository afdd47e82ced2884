use clap::Parser;

use super::*;

#[test]
fn defaults_resolve_to_local_file_source() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.server.addr.port(), DEFAULT_PORT);
    assert_eq!(
        settings.server.graceful_shutdown,
        Duration::from_secs(DEFAULT_GRACEFUL_SHUTDOWN_SECS)
    );
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert_eq!(settings.content.path, PathBuf::from(DEFAULT_CONTENT_PATH));
    assert_eq!(settings.content.kind, SourceKind::File);
    assert!(settings.content.tag_groups_path.is_none());
    assert!(settings.cache.enabled);
    assert!(!settings.cache.debug);
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.logging.level = Some("info".to_string());
    raw.content.kind = Some("file".to_string());

    let overrides = ServeOverrides {
        server_port: Some(4321),
        log_level: Some("debug".to_string()),
        content: ContentOverrides {
            content_kind: Some("directory".to_string()),
            content_path: Some(PathBuf::from("posts")),
            ..Default::default()
        },
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    assert_eq!(settings.content.kind, SourceKind::Directory);
    assert_eq!(settings.content.path, PathBuf::from("posts"));
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn cache_flags_can_be_overridden() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        cache_enabled: Some(false),
        cache_debug: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(!settings.cache.enabled);
    assert!(settings.cache.debug);
}

#[test]
fn zero_port_is_rejected() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(0);

    let error = Settings::from_raw(raw).expect_err("invalid port");
    assert!(matches!(
        error,
        LoadError::Invalid {
            key: "server.port",
            ..
        }
    ));
}

#[test]
fn zero_grace_period_is_rejected() {
    let mut raw = RawSettings::default();
    raw.server.graceful_shutdown_seconds = Some(0);

    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn unknown_source_kind_is_rejected() {
    let mut raw = RawSettings::default();
    raw.content.kind = Some("database".to_string());

    let error = Settings::from_raw(raw).expect_err("invalid kind");
    assert!(matches!(
        error,
        LoadError::Invalid {
            key: "content.kind",
            ..
        }
    ));
}

#[test]
fn bad_log_level_is_rejected() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("loud".to_string());

    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn empty_tag_groups_path_means_unset() {
    let mut raw = RawSettings::default();
    raw.content.tag_groups_path = Some(PathBuf::new());

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(settings.content.tag_groups_path.is_none());
}

#[test]
fn source_kind_parses_case_insensitively() {
    assert_eq!("File".parse::<SourceKind>(), Ok(SourceKind::File));
    assert_eq!(" DIRECTORY ".parse::<SourceKind>(), Ok(SourceKind::Directory));
    assert!("sqlite".parse::<SourceKind>().is_err());
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["weekly-digest"]);
    let command = args
        .command
        .unwrap_or(Command::Serve(Box::<ServeArgs>::default()));
    assert!(matches!(command, Command::Serve(_)));
}

#[test]
fn parse_serve_arguments() {
    let args = CliArgs::parse_from([
        "weekly-digest",
        "serve",
        "--server-port",
        "8080",
        "--cache-debug",
        "true",
        "--content-tag-groups-path",
        "data/tagGroup.json",
    ]);

    match args.command.expect("serve command") {
        Command::Serve(serve) => {
            assert_eq!(serve.overrides.server_port, Some(8080));
            assert_eq!(serve.overrides.cache_debug, Some(true));
            assert_eq!(
                serve.overrides.content.tag_groups_path.as_deref(),
                Some(std::path::Path::new("data/tagGroup.json"))
            );
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn parse_content_arguments() {
    let args = CliArgs::parse_from([
        "weekly-digest",
        "content",
        "--content-kind",
        "directory",
        "--content-path",
        "/srv/posts",
        "issue-42",
    ]);

    match args.command.expect("content command") {
        Command::Content(content) => {
            assert_eq!(content.content_id, "issue-42");
            assert_eq!(content.content.content_kind.as_deref(), Some("directory"));
            assert_eq!(
                content.content.content_path.as_deref(),
                Some(std::path::Path::new("/srv/posts"))
            );
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn invalid_content_kind_fails_parsing() {
    let result = CliArgs::try_parse_from(["weekly-digest", "tags", "--content-kind", "sqlite"]);
    assert!(result.is_err());
}
