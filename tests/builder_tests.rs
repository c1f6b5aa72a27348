//! Builder Session Tests
//!
//! Drink builder sessions driven the way the builder page drives them,
//! including file-backed catalogs and configs and a shared session.

use std::fs;
use std::thread;

use approx::assert_relative_eq;
use tempfile::TempDir;

use drommekopp::animation::{RecordingRenderer, Transition};
use drommekopp::builder::{CupTheme, DrinkBuilder, SharedBuilder};
use drommekopp::catalog::{IngredientCatalog, JsonCatalog};
use drommekopp::config::CupConfig;
use drommekopp::cup::{CupEvent, IngredientId};

const CATALOG: &str = r##"[
    { "ingredientId": 1, "name": "Espresso", "color": "#6f4e37", "fillLevel": 25, "unitPrice": 15, "categoryName": "Kaffe" },
    { "ingredientId": 2, "name": "Havremelk", "color": "#f3e5ab", "fillLevel": 50, "unitPrice": 8, "categoryName": "Melk" },
    { "ingredientId": 3, "name": "Karamell", "color": "#c68e17", "fillLevel": 12, "unitPrice": 5.5, "categoryName": "Sirup" },
    { "ingredientId": 4, "name": "Ødelagt", "color": null, "fillLevel": 10 }
]"##;

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_session_from_catalog_file() {
    let dir = TempDir::new().unwrap();
    let catalog = JsonCatalog::from_path(&write_file(&dir, "ingredients.json", CATALOG)).unwrap();

    let recorder = RecordingRenderer::new();
    let mut builder = DrinkBuilder::new(CupConfig::default())
        .unwrap()
        .with_renderer(recorder.clone());

    builder.add(catalog.require(IngredientId(1)).unwrap()).unwrap();
    builder.add(catalog.require(IngredientId(2)).unwrap()).unwrap();
    builder.add(catalog.require(IngredientId(3)).unwrap()).unwrap();

    // 12% truncates to two slots
    assert_eq!(builder.store().occupied(), 5 + 10 + 2);
    assert_relative_eq!(builder.fill_level(), 87.0);
    assert_relative_eq!(builder.total_price(), 28.5);

    let first = &recorder.timelines()[0];
    let enters = first
        .iter()
        .filter(|t| matches!(t, Transition::Enter { .. }))
        .count();
    assert_eq!(enters, 5);
}

#[test]
fn test_incomplete_catalog_entry_is_rejected() {
    let catalog = JsonCatalog::from_json_str(CATALOG).unwrap();
    let mut builder = DrinkBuilder::new(CupConfig::default()).unwrap();

    let broken = catalog.require(IngredientId(4)).unwrap();
    let err = builder.add(broken).unwrap_err();

    assert_eq!(err.error_code(), "INVALID_INGREDIENT");
    assert!(builder.selected().is_empty());
    assert!(builder.store().is_empty());
}

#[test]
fn test_remove_by_list_position() {
    let catalog = JsonCatalog::from_json_str(CATALOG).unwrap();
    let mut builder = DrinkBuilder::new(CupConfig::default()).unwrap();

    builder.add(catalog.require(IngredientId(1)).unwrap()).unwrap();
    builder.add(catalog.require(IngredientId(2)).unwrap()).unwrap();

    let (removed, event) = builder.remove(0).unwrap();
    assert_eq!(removed.name, "Espresso");
    match event {
        CupEvent::Drained(outcome) => {
            assert_eq!(outcome.cleared.len(), 5);
            assert_eq!(outcome.moved.len(), 10);
        }
        other => panic!("expected a drain, got {other:?}"),
    }
    assert_eq!(builder.selected().len(), 1);
    assert_eq!(builder.store().layers_of(IngredientId(2)), (10..20).collect::<Vec<_>>());
    assert_relative_eq!(builder.fill_level(), 50.0);
}

#[test]
fn test_clear_all_fades_only_visible_layers() {
    let recorder = RecordingRenderer::new();
    let mut builder = DrinkBuilder::new(CupConfig::default())
        .unwrap()
        .with_renderer(recorder.clone());

    let catalog = JsonCatalog::from_json_str(CATALOG).unwrap();
    builder.add(catalog.require(IngredientId(3)).unwrap()).unwrap();
    builder.clear_all();
    builder.clear_all();

    let timelines = recorder.timelines();
    assert_eq!(timelines[1].len(), 2);
    assert!(timelines[2].is_empty());
    assert_eq!(builder.fill_level(), 0.0);
}

#[test]
fn test_config_file_changes_capacity_and_timings() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "cup.json",
        r#"{ "capacity": 10, "animation": { "fall_duration_secs": 0.8 } }"#,
    );

    let config = CupConfig::from_file(&path).unwrap();
    config.validate().unwrap();
    let recorder = RecordingRenderer::new();
    let mut builder = DrinkBuilder::new(config).unwrap().with_renderer(recorder.clone());

    let catalog = JsonCatalog::from_json_str(CATALOG).unwrap();
    builder.add(catalog.require(IngredientId(1)).unwrap()).unwrap(); // 2 slots
    builder.add(catalog.require(IngredientId(2)).unwrap()).unwrap(); // 5 slots
    builder.remove(0).unwrap();

    assert_eq!(builder.store().capacity(), 10);
    assert_eq!(builder.store().layers_of(IngredientId(2)), (5..10).collect::<Vec<_>>());

    let fall = recorder.last().unwrap();
    assert_eq!(fall.len(), 5);
    assert_relative_eq!(fall.total_duration_secs(), 0.8);
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    let err = CupConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
    assert_eq!(err.error_code(), "FILE_READ_ERROR");
}

#[test]
fn test_draft_carries_theme() {
    let catalog = JsonCatalog::from_json_str(CATALOG).unwrap();
    let mut builder = DrinkBuilder::new(CupConfig::default()).unwrap();
    builder.set_theme(CupTheme::named("Berry").unwrap());
    builder.add(catalog.require(IngredientId(1)).unwrap()).unwrap();

    let draft = builder.finish(Some("Bærkaffe"));
    assert_eq!(draft.name, "Bærkaffe");
    assert_eq!(draft.theme.name, "Berry");

    let json = serde_json::to_value(&draft).unwrap();
    assert_eq!(json["ingredientIds"], serde_json::json!([1]));
    assert!(builder.store().is_empty());
}

#[test]
fn test_shared_session_across_threads() {
    let shared = SharedBuilder::new(DrinkBuilder::new(CupConfig::default()).unwrap());
    let catalog = JsonCatalog::from_json_str(CATALOG).unwrap();
    let espresso = catalog.require(IngredientId(1)).unwrap();
    let caramel = catalog.require(IngredientId(3)).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let shared = shared.clone();
            let ingredient = if n % 2 == 0 {
                espresso.clone()
            } else {
                caramel.clone()
            };
            thread::spawn(move || shared.add(ingredient).unwrap())
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // Two espresso (5 slots each) and two caramel (2 slots each)
    let snapshot = shared.snapshot();
    assert_eq!(snapshot.iter().flatten().count(), 14);
    assert!(snapshot[..6].iter().all(Option::is_none));
    assert_eq!(shared.with(|b| b.selected().len()), 4);

    shared.clear_all();
    assert!(shared.snapshot().iter().all(Option::is_none));
}
