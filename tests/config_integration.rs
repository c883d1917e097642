use std::path::PathBuf;

use inkpad::config::{ConfigFlags, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".inkpadrc");
    let content = r"
# comment
--autosave

--filename notes.txt

--log-file=inkpad.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.autosave);
    assert_eq!(flags.filename.as_deref(), Some("notes.txt"));
    assert_eq!(flags.log_file, Some(PathBuf::from("inkpad.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".inkpadrc");
    let content = "--autosave\n--filename file.txt\n--export-dir exports\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "inkpad".to_string(),
        "--filename".to_string(),
        "cli.txt".to_string(),
        "--restore".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.autosave, "file flags should remain enabled");
    assert!(effective.restore, "cli flags should be applied");
    assert_eq!(
        effective.filename.as_deref(),
        Some("cli.txt"),
        "cli should override filename"
    );
    assert_eq!(
        effective.export_dir,
        Some(PathBuf::from("exports")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "inkpad".to_string(),
        "--storage-dir=/tmp/inkpad".to_string(),
        "--autosave-interval-ms=750".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.storage_dir, Some(PathBuf::from("/tmp/inkpad")));
    assert_eq!(flags.autosave_interval_ms, Some(750));
}

#[test]
fn test_global_local_and_cli_layering() {
    let global = ConfigFlags {
        autosave: true,
        autosave_interval_ms: Some(5000),
        ..ConfigFlags::default()
    };
    let local = ConfigFlags {
        autosave_interval_ms: Some(2000),
        ..ConfigFlags::default()
    };
    let cli = ConfigFlags {
        restore: true,
        ..ConfigFlags::default()
    };
    let merged = global.union(&local).union(&cli);
    assert!(merged.autosave);
    assert!(merged.restore);
    assert_eq!(merged.autosave_interval_ms, Some(2000));
}
