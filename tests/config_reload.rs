//! Configuration files driving a live logger, and code generation from them.

use std::fs;
use std::time::Duration;

use enhanced_logger::codegen::{self, Templates};
use enhanced_logger::config::watcher::ConfigWatcher;
use enhanced_logger::config::{load_config, ConfigError};
use enhanced_logger::{Channel, Logger, MemorySink, Outcome, SinkLevel, Theme};

mod common;
use common::Harness;

const INITIAL: &str = r##"
theme = "dark"

[observability]
metrics_enabled = false

[[channels]]
name = "Rendering"
color = "#008000"

[[channels]]
name = "Physics"
enabled = false
color = "yellow"
"##;

const EDITED: &str = r##"
theme = "light"

[[channels]]
name = "Rendering"
enabled = false

[[channels]]
name = "Physics"
color = "#FFFF00"

[[channels]]
name = "Networking"
id = 13
color = "teal"
"##;

#[test]
fn test_file_config_then_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logger.toml");
    fs::write(&path, INITIAL).unwrap();

    let sink = MemorySink::new();
    let logger = Logger::from_config(&load_config(&path).unwrap(), sink.clone());

    assert_eq!(logger.info(Channel::Rendering, "draw"), Outcome::Emitted);
    assert_eq!(logger.info(Channel::Physics, "step"), Outcome::Suppressed);
    assert_eq!(logger.info(Channel::AI, "think"), Outcome::Suppressed);

    fs::write(&path, EDITED).unwrap();
    logger.apply_config(&load_config(&path).unwrap());

    assert!(!logger.is_active(Channel::Rendering));
    assert_eq!(logger.info(Channel::Physics, "step"), Outcome::Emitted);
    assert_eq!(
        sink.at(SinkLevel::Info),
        vec![
            "<b><color=#008000>[Rendering] </color></b> <color=white>draw</color>".to_string(),
            "<b><color=#FFFF00>[Physics] </color></b> <color=black>step</color>".to_string(),
        ]
    );
}

#[test]
fn test_invalid_file_keeps_running_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logger.toml");
    fs::write(&path, INITIAL).unwrap();

    let h = Harness::new();
    h.logger.apply_config(&load_config(&path).unwrap());

    fs::write(&path, "[[channels]]\nname = \"Rendering\"\n[[channels]]\nname = \"Rendering\"\n").unwrap();
    match load_config(&path) {
        Err(ConfigError::Validation(errors)) => assert!(!errors.is_empty()),
        other => panic!("expected validation failure, got {:?}", other.map(|_| ())),
    }

    // Nothing was applied.
    assert!(h.logger.is_active(Channel::Rendering));
    assert!(!h.logger.is_active(Channel::Physics));
}

#[test]
fn test_generate_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logger.toml");
    fs::write(&path, EDITED).unwrap();

    let config = load_config(&path).unwrap();
    let sources = codegen::generate(&config.channels, &Templates::builtin()).unwrap();
    let out_dir = dir.path().join("generated");
    let written = codegen::write_sources(&out_dir, &sources).unwrap();
    assert_eq!(written.len(), 2);

    let channel_src = fs::read_to_string(out_dir.join("channel.rs")).unwrap();
    assert!(channel_src.contains("    Rendering = 1,\n    Physics = 2,\n    Networking = 13,\n"));

    let colors_src = fs::read_to_string(out_dir.join("channel_colors.rs")).unwrap();
    assert!(colors_src.contains("(Channel::Rendering, \"#000000\"),"));
    assert!(colors_src.contains("(Channel::Networking, \"#008080\"),"));
}

#[tokio::test]
async fn test_watcher_drives_logger() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logger.toml");
    fs::write(&path, INITIAL).unwrap();

    let h = Harness::new();
    h.logger.apply_config(&load_config(&path).unwrap());

    let (watcher, mut updates) = ConfigWatcher::new(&path);
    let _guard = watcher.run().unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    fs::write(&path, EDITED).unwrap();

    let applied = tokio::time::timeout(Duration::from_secs(10), async {
        while let Some(config) = updates.recv().await {
            h.logger.apply_config(&config);
            if config.theme == Theme::Light && config.channels.len() == 3 {
                return true;
            }
        }
        false
    })
    .await
    .expect("no reload within timeout");

    assert!(applied);
    assert!(!h.logger.is_active(Channel::Rendering));
    assert!(h.logger.is_active(Channel::Physics));
}
