use std::fs;

use anyhow::Result;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_build_extracts_and_marks_cards() -> Result<()> {
    let test = CliTest::new()?;
    let store_json = r#"{
  "decks": [
    { "name": "Math::Algebra", "id": 1500000000 }
  ]
}
"#;
    test.write_file("decks.json", store_json)?;
    test.write_file(
        "notes/algebra.md",
        "#anki=Math::Algebra\nWhat is $2+2$?\n\n4\n",
    )?;

    let output = test.build_command().output()?;
    assert!(
        output.status.success(),
        "build should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Added 1 card(s) to Math::Algebra"),
        "stdout: {}",
        stdout
    );
    assert!(stdout.contains("Marked 1 document(s) as processed"));
    assert!(stdout.contains("Checked 1 document(s), wrote 1 package(s) to cards"));

    // The card block is re-marked so the next run skips it
    let note = test.read_file("notes/algebra.md")?;
    assert!(note.contains("#_anki=Math::Algebra"));
    assert!(!note.contains("#anki="));

    // One package per deck, :: flattened to _
    let package = test.root().join("cards/Math_Algebra.apkg");
    assert!(package.exists());
    assert!(fs::metadata(&package)?.len() > 0);

    // No new decks were registered, so the store file is untouched
    assert_eq!(test.read_file("decks.json")?, store_json);

    Ok(())
}

#[test]
fn test_build_missing_deck_is_warning() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("decks.json", "{\n  \"decks\": []\n}\n")?;
    let note = "Some context.\n\n#anki\nWhat is a ring?\n\nAn abelian group with multiplication.\n";
    test.write_file("notes/rings.md", note)?;

    let output = test.build_command().output()?;
    // Warnings alone do not fail the run
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("warning:"), "stdout: {}", stdout);
    assert!(stdout.contains("card provides no deck name"));
    assert!(stdout.contains("missing-deck"));
    assert!(stdout.contains("rings.md:3:1"));
    assert!(stdout.contains("didn't find any new cards"));

    // The skipped block keeps its #anki marker so it can be fixed in place
    assert_eq!(test.read_file("notes/rings.md")?, note);

    Ok(())
}

#[test]
fn test_build_debug_leaves_everything_untouched() -> Result<()> {
    let test = CliTest::new()?;
    let store_json = "{\n  \"decks\": [\n    { \"name\": \"Math\", \"id\": 1400000000 }\n  ]\n}\n";
    test.write_file("decks.json", store_json)?;
    let note = "#anki=Math\nWhat is a set?\n\nA collection of elements.\n";
    test.write_file("notes/sets.md", note)?;

    let output = test.build_command().arg("--debug").output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Would add 1 card(s) to Math"), "stdout: {}", stdout);
    assert!(stdout.contains("Run without --debug"));

    // Debug mode writes nothing at all
    assert_eq!(test.read_file("notes/sets.md")?, note);
    assert_eq!(test.read_file("decks.json")?, store_json);
    assert!(!test.root().join("cards").exists());

    Ok(())
}

#[test]
fn test_build_registers_new_deck_on_prompt_accept() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("decks.json", "{\n  \"decks\": []\n}\n")?;
    test.write_file(
        "notes/physics.md",
        "#anki=Physics\nWhat is inertia?\n\nResistance to change in motion.\n",
    )?;

    let output = test.build_command().output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    // stdin is closed, so the prompt accepts the proposed name
    assert!(stdout.contains("Physics is not in the list of existing decks"));
    assert!(stdout.contains("Added 1 card(s) to Physics"));
    assert!(stdout.contains("Added 1 new deck(s) to decks.json"));

    let store: Value = serde_json::from_str(&test.read_file("decks.json")?)?;
    let decks = store["decks"].as_array().unwrap();
    assert_eq!(decks.len(), 1);
    assert_eq!(decks[0]["name"], "Physics");
    let id = decks[0]["id"].as_i64().unwrap();
    assert!(
        (1_i64 << 30..1_i64 << 31).contains(&id),
        "deck id out of range: {}",
        id
    );

    Ok(())
}

#[test]
fn test_build_without_store_fails() -> Result<()> {
    let test = CliTest::with_file("notes/note.md", "# Just a note\n")?;

    let output = test.build_command().output()?;
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "stderr: {}", stderr);
    assert!(stderr.contains("decks.json"));

    Ok(())
}

#[test]
fn test_build_second_run_finds_nothing() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "decks.json",
        "{\n  \"decks\": [\n    { \"name\": \"Math\", \"id\": 1400000000 }\n  ]\n}\n",
    )?;
    test.write_file(
        "notes/sets.md",
        "#anki=Math\nWhat is a set?\n\nA collection of elements.\n",
    )?;

    let first = test.build_command().output()?;
    assert!(first.status.success());

    let second = test.build_command().output()?;
    assert!(second.status.success());
    let stdout = String::from_utf8_lossy(&second.stdout);
    assert!(stdout.contains("didn't find any new cards"), "stdout: {}", stdout);

    Ok(())
}

#[test]
fn test_build_respects_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".zettldeckrc.json",
        r#"{
  "notesRoot": "zettel",
  "outputRoot": "packages",
  "storeFile": "registry/decks.json"
}"#,
    )?;
    test.write_file(
        "registry/decks.json",
        "{\n  \"decks\": [\n    { \"name\": \"Chem\", \"id\": 1200000000 }\n  ]\n}\n",
    )?;
    test.write_file(
        "zettel/chem.md",
        "#anki=Chem\nWhat is a mole?\n\nAvogadro's number of things.\n",
    )?;

    let output = test.build_command().output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert!(test.root().join("packages/Chem.apkg").exists());
    assert!(test.read_file("zettel/chem.md")?.contains("#_anki=Chem"));

    Ok(())
}

#[test]
fn test_build_flag_overrides() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "state/decks.json",
        "{\n  \"decks\": [\n    { \"name\": \"Bio\", \"id\": 1300000000 }\n  ]\n}\n",
    )?;
    test.write_file(
        "inbox/bio.md",
        "#anki=Bio\nWhat is a cell?\n\nThe basic unit of life.\n",
    )?;

    let store_path = test.root().join("state/decks.json");
    let output = test
        .build_command()
        .arg("--notes")
        .arg("inbox")
        .arg("--out")
        .arg("export")
        .arg("--store")
        .arg(&store_path)
        .output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert!(test.root().join("export/Bio.apkg").exists());
    assert!(test.read_file("inbox/bio.md")?.contains("#_anki=Bio"));

    Ok(())
}

#[test]
fn test_build_file_default_deck_and_override() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "decks.json",
        r#"{
  "decks": [
    { "name": "Default::Deck", "id": 1100000000 },
    { "name": "Other", "id": 1150000000 }
  ]
}
"#,
    )?;
    test.write_file(
        "notes/mixed.md",
        "- _anki=Default::Deck\n\n#anki\nFirst question?\n\nFirst answer.\n\n#anki=Other\nSecond question?\n\nSecond answer.\n",
    )?;

    let output = test.build_command().output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added 1 card(s) to Default::Deck"));
    assert!(stdout.contains("Added 1 card(s) to Other"));
    assert!(test.root().join("cards/Default_Deck.apkg").exists());
    assert!(test.root().join("cards/Other.apkg").exists());

    let note = test.read_file("notes/mixed.md")?;
    assert_eq!(note.matches("#_anki").count(), 2);
    // The file-wide default line stays as-is
    assert!(note.contains("- _anki=Default::Deck"));

    Ok(())
}

#[test]
fn test_build_unreadable_document_is_isolated() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "decks.json",
        "{\n  \"decks\": [\n    { \"name\": \"Good\", \"id\": 1250000000 }\n  ]\n}\n",
    )?;
    test.write_bytes("notes/broken.md", b"#anki=Good\nQ\n\n\xff\xfe\n")?;
    test.write_file(
        "notes/good.md",
        "#anki=Good\nWhat is light?\n\nElectromagnetic radiation.\n",
    )?;

    let output = test.build_command().output()?;
    // document-error is error severity, so the run exits 1
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("document-error"), "stdout: {}", stdout);
    assert!(stdout.contains("broken.md"));
    // The readable document is still processed
    assert!(stdout.contains("Added 1 card(s) to Good"));
    assert!(test.root().join("cards/Good.apkg").exists());
    assert!(test.read_file("notes/good.md")?.contains("#_anki=Good"));

    Ok(())
}

#[test]
fn test_build_rejects_missing_notes_dir() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("decks.json", "{\n  \"decks\": []\n}\n")?;

    let output = test.build_command().arg("--notes").arg("nope").output()?;
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("is not a directory"));

    Ok(())
}

#[test]
fn test_build_verbose_prints_card_progress() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "decks.json",
        "{\n  \"decks\": [\n    { \"name\": \"Math\", \"id\": 1400000000 }\n  ]\n}\n",
    )?;
    test.write_file(
        "notes/sets.md",
        "#anki=Math\nWhat is a set?\n\nA collection of elements.\n",
    )?;

    let output = test.build_command().arg("-v").output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Adding card from"), "stdout: {}", stdout);
    assert!(stdout.contains("(Math)"));
    assert!(stdout.contains("What is a set?"));

    Ok(())
}
