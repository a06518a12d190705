use anyhow::Result;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config_and_store() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Created .zettldeckrc.json"), "stdout: {}", stdout);
    assert!(stdout.contains("Created decks.json"));

    let config: Value = serde_json::from_str(&test.read_file(".zettldeckrc.json")?)?;
    assert!(config.get("notesRoot").is_some());
    assert!(config.get("outputRoot").is_some());
    assert!(config.get("storeFile").is_some());
    assert!(config.get("ignores").is_some());

    let store: Value = serde_json::from_str(&test.read_file("decks.json")?)?;
    assert_eq!(store["decks"], Value::Array(vec![]));

    Ok(())
}

#[test]
fn test_init_fails_if_config_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".zettldeckrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(".zettldeckrc.json already exists"),
        "stderr: {}",
        stderr
    );

    Ok(())
}

#[test]
fn test_init_fails_if_store_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("decks.json", "{\n  \"decks\": []\n}\n")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("decks.json already exists"), "stderr: {}", stderr);

    Ok(())
}

#[test]
fn test_init_setup_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    let init = test.command().arg("init").output()?;
    assert!(init.status.success());

    test.write_file(
        "notes/todo.md",
        "#anki=Inbox\nWhat is spaced repetition?\n\nReviewing at growing intervals.\n",
    )?;

    // The unknown deck prompt accepts on EOF
    let output = test.build_command().output()?;
    assert!(
        output.status.success(),
        "build should work after init. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(test.root().join("cards/Inbox.apkg").exists());

    Ok(())
}
