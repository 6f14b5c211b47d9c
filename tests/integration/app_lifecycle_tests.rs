/*!
 * Integration tests for application lifecycle
 */

use std::fs;
use anyhow::Result;
use screenwright::app_config::{Config, MeasurementMode};
use screenwright::app_controller::Controller;
use screenwright::formatting::{ElementType, ScriptElement};
use screenwright::script_document::Screenplay;
use crate::common;

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert!(controller.is_initialized());
    Ok(())
}

/// Test that a controller built from a broken config reports uninitialized
#[test]
fn test_controller_withBrokenConfig_shouldReportUninitialized() -> Result<()> {
    let mut config = Config::default();
    config.page_format.lines_per_page = 0;

    let controller = Controller::with_config(config)?;
    assert!(!controller.is_initialized());
    Ok(())
}

/// Test that running on a plain text script writes both output files
#[test]
fn test_run_withPlainTextScript_shouldWriteBothOutputs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let script = common::create_test_script(&root, "pilot.txt")?;

    let controller = Controller::new_for_test()?;
    controller.run(script, root.clone(), false)?;

    let text_output = root.join("pilot.formatted.txt");
    let document_output = root.join("pilot.formatted.json");
    assert!(text_output.exists());
    assert!(document_output.exists());

    // The rendered text carries canonical forms at their margins
    let rendered = fs::read_to_string(&text_output)?;
    assert!(rendered.contains(&format!("{}INT. KITCHEN - DAY", " ".repeat(15))));
    assert!(rendered.contains(&format!("{}JOHN", " ".repeat(37))));

    // The saved document reloads with its typed elements intact
    let document = Screenplay::from_json_str(&fs::read_to_string(&document_output)?)?;
    assert_eq!(document.elements.len(), 10);
    assert_eq!(document.scene_count(), 2);
    assert!(document.metadata.source_file.is_some());
    Ok(())
}

/// Test that existing outputs are skipped without force and rewritten with it
#[test]
fn test_run_withExistingOutputs_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let script = common::create_test_script(&root, "pilot.txt")?;

    let controller = Controller::new_for_test()?;
    controller.run(script.clone(), root.clone(), false)?;

    // Grow the input after the first run
    let mut content = fs::read_to_string(&script)?;
    content.push_str("\nint. garage - later\n\nA single bulb hums overhead.\n");
    fs::write(&script, &content)?;

    // Without force the stale outputs stay as they are
    controller.run(script.clone(), root.clone(), false)?;
    let stale = fs::read_to_string(root.join("pilot.formatted.txt"))?;
    assert!(!stale.contains("INT. GARAGE - LATER"));

    // With force the outputs pick up the new scene
    controller.run(script, root.clone(), true)?;
    let rewritten = fs::read_to_string(root.join("pilot.formatted.txt"))?;
    assert!(rewritten.contains("INT. GARAGE - LATER"));
    Ok(())
}

/// Test that disabling suffixes and repair leaves a timeless heading verbatim
#[test]
fn test_run_withSuffixesAndRepairDisabled_shouldKeepHeadingVerbatim() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let script = common::create_test_file(
        &root,
        "night.txt",
        "int. warehouse\n\nCrates line the walls.\n",
    )?;

    let mut config = Config::default();
    config.formatting.apply_suffixes = false;
    config.formatting.auto_repair = false;

    let controller = Controller::with_config(config)?;
    controller.run(script, root.clone(), false)?;

    let rendered = fs::read_to_string(root.join("night.formatted.txt"))?;
    assert!(rendered.contains("INT. WAREHOUSE"));
    assert!(!rendered.contains("INT. WAREHOUSE - DAY"));
    Ok(())
}

/// Test that the configured measurement drives the rendered indentation
#[test]
fn test_run_withMeasurementConfig_shouldDriveIndentation() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let script = common::create_test_script(&root, "pilot.txt")?;

    // Twelve columns per inch pushes the 1.5 inch heading margin to 18
    let mut config = Config::default();
    config.measurement.chars_per_inch = 12;
    let controller = Controller::with_config(config.clone())?;
    controller.run(script.clone(), root.clone(), false)?;
    let rendered = fs::read_to_string(root.join("pilot.formatted.txt"))?;
    let heading = rendered.lines().find(|l| l.contains("INT. KITCHEN")).unwrap_or("");
    assert_eq!(heading, format!("{}INT. KITCHEN - DAY", " ".repeat(18)));

    // Units mode has no column width, so text output falls back to the
    // standard ten column pitch
    config.measurement.mode = MeasurementMode::Units;
    let controller = Controller::with_config(config)?;
    controller.run(script, root.clone(), true)?;
    let rendered = fs::read_to_string(root.join("pilot.formatted.txt"))?;
    let heading = rendered.lines().find(|l| l.contains("INT. KITCHEN")).unwrap_or("");
    assert_eq!(heading, format!("{}INT. KITCHEN - DAY", " ".repeat(15)));
    Ok(())
}

/// Test that a saved JSON document renders without reclassification
#[test]
fn test_run_withSavedDocument_shouldRenderFromJson() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();

    let mut screenplay = Screenplay::from_elements(
        "Saved Draft",
        vec![
            ScriptElement::new(ElementType::SceneHeading, "EXT. ROOFTOP - NIGHT"),
            ScriptElement::new(ElementType::Character, "SARAH"),
            ScriptElement::new(ElementType::Dialogue, "It's a long way down."),
        ],
    );
    let document_path =
        common::create_test_file(&root, "saved.json", &screenplay.to_json_string()?)?;

    let controller = Controller::new_for_test()?;
    controller.run(document_path, root.clone(), false)?;

    let rendered = fs::read_to_string(root.join("saved.formatted.txt"))?;
    assert!(rendered.contains("EXT. ROOFTOP - NIGHT"));
    assert!(rendered.contains(&format!("{}SARAH", " ".repeat(37))));
    Ok(())
}

/// Test that running on a missing input fails
#[test]
fn test_run_withMissingInput_shouldError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();

    let controller = Controller::new_for_test()?;
    assert!(controller.run(root.join("ghost.txt"), root, false).is_err());
    Ok(())
}

/// Test folder mode: scripts are processed recursively, own outputs are left alone
#[test]
fn test_runFolder_withMixedFiles_shouldProcessScriptsOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let nested = root.join("act_two");
    fs::create_dir(&nested)?;

    common::create_test_script(&root, "pilot.txt")?;
    common::create_test_script(&nested, "finale.fountain")?;
    common::create_test_file(&root, "notes.md", "just some notes")?;
    // A leftover output from an earlier run must not be treated as input
    common::create_test_file(&root, "old.formatted.txt", "int. somewhere - day")?;

    let controller = Controller::new_for_test()?;
    controller.run_folder(root.clone(), false)?;

    assert!(root.join("pilot.formatted.txt").exists());
    assert!(root.join("pilot.formatted.json").exists());
    assert!(nested.join("finale.formatted.txt").exists());
    assert!(!root.join("notes.formatted.txt").exists());
    assert!(!root.join("old.formatted.formatted.txt").exists());

    // The folder summary lands in the issues log
    let log = fs::read_to_string(root.join("screenwright.issues.log"))?;
    assert!(log.contains("Folder processing completed"));

    // A second pass skips everything and still succeeds
    controller.run_folder(root, false)?;
    Ok(())
}

/// Test that folder mode errors when there is nothing to process
#[test]
fn test_runFolder_withNoScripts_shouldError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    common::create_test_file(&root, "notes.md", "just some notes")?;

    let controller = Controller::new_for_test()?;
    assert!(controller.run_folder(root, false).is_err());
    Ok(())
}

/// Test that statistics run on both plain scripts and saved documents
#[test]
fn test_stats_withScriptAndDocument_shouldSucceed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let script = common::create_test_script(&root, "pilot.txt")?;

    let controller = Controller::new_for_test()?;
    controller.stats(script)?;

    let mut screenplay = Screenplay::from_elements(
        "Saved Draft",
        vec![ScriptElement::new(ElementType::SceneHeading, "INT. LAB - DAY")],
    );
    let document_path =
        common::create_test_file(&root, "saved.json", &screenplay.to_json_string()?)?;
    controller.stats(document_path)?;

    assert!(controller.stats(root.join("ghost.txt")).is_err());
    Ok(())
}
