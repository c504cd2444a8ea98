mod common;

use chrono::{TimeZone, Utc};
use common::item;
use news_ingest::sink::{to_json, write_document};
use news_ingest::{EventType, LayoffSignal, OutputDocument, Result};
use serde_json::Value;

fn document(ids: &[&str]) -> OutputDocument {
    OutputDocument {
        generated_at: Utc.with_ymd_and_hms(2025, 3, 5, 1, 2, 3).unwrap(),
        items: ids
            .iter()
            .map(|id| item(id, &format!("https://x.example/{}", id), None))
            .collect(),
    }
}

#[test]
fn test_document_shape() -> Result<()> {
    let mut doc = document(&["dyn--one"]);
    doc.items[0].date = None;
    doc.items[0].tags = vec!["採用".to_string()];

    let json: Value = serde_json::from_str(&to_json(&doc)?).unwrap();
    assert_eq!(json["generatedAt"], "2025-03-05T01:02:03.000Z");
    assert_eq!(json["lastUpdated"], "2025-03-05T01:02:03.000Z");

    let first = &json["items"][0];
    for key in [
        "id",
        "title",
        "category",
        "categoryClass",
        "date",
        "attribution",
        "author",
        "tags",
        "bodyHtml",
        "fullContent",
        "source",
        "organization",
        "period",
        "sourceUrl",
    ] {
        assert!(first.get(key).is_some(), "missing {}", key);
    }
    // Unparsed dates are written as an empty string, not null.
    assert_eq!(first["date"], "");
    assert_eq!(first["period"], "");
    assert_eq!(first["category"], "市場動向");
    assert_eq!(first["categoryClass"], "market");
    assert_eq!(first["readTimeMin"], 3);
    assert_eq!(first["tags"], serde_json::json!(["採用"]));
    Ok(())
}

#[test]
fn test_creates_missing_directories() -> Result<()> {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("nested").join("data").join("news.json");

    write_document(&target, &document(&["dyn--a", "dyn--b"]))?;

    let json: Value = serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
    Ok(())
}

#[test]
fn test_replaces_previous_artifact_wholesale() -> Result<()> {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("news.json");

    write_document(&target, &document(&["dyn--a", "dyn--b", "dyn--c"]))?;
    write_document(&target, &document(&["dyn--z"]))?;

    let json: Value = serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "dyn--z");

    let leftovers: Vec<_> = std::fs::read_dir(tmp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
    Ok(())
}

#[test]
fn test_failed_write_leaves_no_partial_artifact() {
    let tmp = tempfile::tempdir().unwrap();
    // A directory squatting on the target name makes the final rename fail.
    let target = tmp.path().join("news.json");
    std::fs::create_dir(&target).unwrap();

    let result = write_document(&target, &document(&["dyn--a"]));
    assert!(result.is_err());
    assert!(target.is_dir());
    assert!(!tmp.path().join(".news.json.tmp").exists());
}

#[test]
fn test_unwritable_parent_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("data");
    std::fs::write(&blocker, "not a directory").unwrap();

    let result = write_document(&blocker.join("news.json"), &document(&["dyn--a"]));
    assert!(result.is_err());
    assert_eq!(std::fs::read_to_string(&blocker).unwrap(), "not a directory");
}

#[test]
fn test_failed_write_keeps_previous_artifact() -> Result<()> {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("news.json");

    write_document(&target, &document(&["dyn--kept"]))?;
    let before = std::fs::read(&target).unwrap();

    // A directory where the temp file goes makes the next write fail before the rename.
    let temp = tmp.path().join(".news.json.tmp");
    std::fs::create_dir(&temp).unwrap();

    let result = write_document(&target, &document(&["dyn--new-1", "dyn--new-2"]));
    assert!(result.is_err());
    assert_eq!(std::fs::read(&target).unwrap(), before);
    Ok(())
}

#[test]
fn test_layoff_details_are_written_only_when_present() -> Result<()> {
    let mut doc = document(&["dyn--plain", "dyn--cut"]);
    doc.items[1].layoff = Some(LayoffSignal {
        event_type: EventType::VoluntaryRetirement,
        headcount: None,
        headcount_confidence: 0.5,
        company: "example.co.jp".to_string(),
        listed: false,
    });

    let json: Value = serde_json::from_str(&to_json(&doc)?).unwrap();
    assert!(json["items"][0].get("layoff").is_none());

    let layoff = &json["items"][1]["layoff"];
    assert_eq!(layoff["eventType"], "voluntary_retirement");
    assert_eq!(layoff["headcountAffected"], 0);
    assert_eq!(layoff["headcountConfidence"], 0.5);
    assert_eq!(layoff["company"], "example.co.jp");
    assert_eq!(layoff["listedFlag"], false);
    Ok(())
}
