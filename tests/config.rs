//! Configuration system tests
//!
//! Tests for config paths, the YAML config file and how it seeds editor state.

mod common;

use common::*;
use cutscript::config::EditorConfig;
use cutscript::config_paths;
use cutscript::export::SubtitleFormat;
use cutscript::messages::EditMsg;
use cutscript::model::EditorState;
use cutscript::update::update;
use tempfile::TempDir;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_returns_some() {
    assert!(config_paths::config_dir().is_some());
}

#[test]
fn test_config_dir_ends_with_app_name() {
    let dir = config_paths::config_dir().unwrap();
    assert!(dir.ends_with("cutscript"), "got {}", dir.display());
}

#[test]
fn test_config_file_ends_with_yaml() {
    let path = config_paths::config_file().unwrap();
    assert!(path.to_string_lossy().ends_with("config.yaml"));
}

#[test]
fn test_logs_dir_is_inside_config_dir() {
    let logs = config_paths::logs_dir().unwrap();
    let config = config_paths::config_dir().unwrap();
    assert!(logs.starts_with(&config));
    assert!(logs.ends_with("logs"));
}

// ========================================================================
// Config File Tests
// ========================================================================

#[test]
fn test_yaml_field_names() {
    let yaml = serde_yaml::to_string(&EditorConfig::default()).unwrap();
    assert!(yaml.contains("history_limit:"));
    assert!(yaml.contains("display_speaker_names: false"));
    assert!(yaml.contains("subtitle_line_limit:"));
}

#[test]
fn test_hand_written_config_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "history_limit: 3\ndisplay_speaker_names: true\nsubtitle_line_limit: 32\n",
    )
    .unwrap();

    let config = EditorConfig::load_from(&path);
    assert_eq!(
        config,
        EditorConfig {
            history_limit: 3,
            display_speaker_names: true,
            subtitle_line_limit: Some(32),
        }
    );
}

#[test]
fn test_empty_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "{}\n").unwrap();
    assert_eq!(EditorConfig::load_from(&path), EditorConfig::default());
}

// ========================================================================
// Config Wiring Tests
// ========================================================================

#[test]
fn test_history_limit_bounds_undo_steps() {
    let config = EditorConfig {
        history_limit: 1,
        ..EditorConfig::default()
    };
    let mut editor = EditorState::with_history(document(one_para_three_words()), config.history());
    for index in [1, 2, 3] {
        update(
            &mut editor,
            EditMsg::SetText {
                index,
                text: "x".to_string(),
            }
            .into(),
        )
        .unwrap();
    }
    assert_eq!(editor.history.undo_count(), 1);
}

#[test]
fn test_subtitle_options_from_config() {
    let config = EditorConfig {
        display_speaker_names: true,
        subtitle_line_limit: Some(40),
        ..EditorConfig::default()
    };
    let options = config.subtitle_options();
    assert!(options.speaker_names);
    assert_eq!(options.line_limit, Some(40));
    assert_eq!(options.format, SubtitleFormat::Vtt);
    assert!(!options.word_timings);
}
