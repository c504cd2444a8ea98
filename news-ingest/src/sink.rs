use crate::types::{IngestError, LayoffSignal, NormalizedItem, OutputDocument, Result};
use chrono::SecondsFormat;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const READ_TIME_MIN: u32 = 3;
const RELIABILITY: &str = "中程度";
const UPDATE_FREQUENCY: &str = "随時";

/// On-disk shape of the document. `lastUpdated` and `fullContent` mirror
/// `generatedAt` and `bodyHtml` under the names the site's news page reads.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireDocument<'a> {
    generated_at: &'a str,
    last_updated: &'a str,
    items: Vec<WireItem<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireItem<'a> {
    id: &'a str,
    title: &'a str,
    category: &'static str,
    category_class: &'static str,
    date: &'a str,
    attribution: &'a str,
    author: &'a str,
    read_time_min: u32,
    tags: &'a [String],
    body_html: &'a str,
    full_content: &'a str,
    source: &'a str,
    organization: &'a str,
    period: &'a str,
    sample_size: &'static str,
    reliability: &'static str,
    update_frequency: &'static str,
    source_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    layoff: Option<WireLayoff<'a>>,
}

/// Headcount is written as 0 when the story gives no number.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireLayoff<'a> {
    event_type: &'static str,
    company: &'a str,
    headcount_affected: u32,
    headcount_confidence: f32,
    listed_flag: bool,
}

impl<'a> From<&'a LayoffSignal> for WireLayoff<'a> {
    fn from(signal: &'a LayoffSignal) -> Self {
        Self {
            event_type: signal.event_type.as_str(),
            company: &signal.company,
            headcount_affected: signal.headcount.unwrap_or(0),
            headcount_confidence: signal.headcount_confidence,
            listed_flag: signal.listed,
        }
    }
}

impl<'a> From<&'a NormalizedItem> for WireItem<'a> {
    fn from(item: &'a NormalizedItem) -> Self {
        let date = item.date.as_deref().unwrap_or("");
        Self {
            id: &item.id,
            title: &item.title,
            category: item.category.label(),
            category_class: item.category.class(),
            date,
            attribution: &item.attribution,
            author: &item.attribution,
            read_time_min: READ_TIME_MIN,
            tags: &item.tags,
            body_html: &item.body_html,
            full_content: &item.body_html,
            source: &item.attribution,
            organization: &item.attribution,
            period: date,
            sample_size: "",
            reliability: RELIABILITY,
            update_frequency: UPDATE_FREQUENCY,
            source_url: &item.source_url,
            layoff: item.layoff.as_ref().map(WireLayoff::from),
        }
    }
}

pub fn to_json(doc: &OutputDocument) -> Result<String> {
    let generated_at = doc.generated_at.to_rfc3339_opts(SecondsFormat::Millis, true);
    let wire = WireDocument {
        generated_at: &generated_at,
        last_updated: &generated_at,
        items: doc.items.iter().map(WireItem::from).collect(),
    };
    Ok(serde_json::to_string_pretty(&wire)?)
}

/// Replace the artifact at `path` with `doc`.
///
/// The JSON goes to a hidden temp file beside the target and is renamed into
/// place, so readers see either the old document or the complete new one.
pub fn write_document(path: &Path, doc: &OutputDocument) -> Result<()> {
    let json = to_json(doc)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| IngestError::io(&dir, e))?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| IngestError::General(format!("Output path has no file name: {}", path.display())))?;
    let temp = dir.join(format!(".{file_name}.tmp"));

    if let Err(e) = write_synced(&temp, json.as_bytes()).and_then(|_| {
        fs::rename(&temp, path).map_err(|e| IngestError::io(path, e))
    }) {
        if temp.exists() {
            if let Err(cleanup) = fs::remove_file(&temp) {
                warn!("Could not remove temp file {}: {}", temp.display(), cleanup);
            }
        }
        return Err(e);
    }

    debug!(file = %path.display(), size = json.len(), "wrote artifact");
    info!("Wrote {} with {} items", path.display(), doc.items.len());
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| IngestError::io(path, e))?;
    file.write_all(bytes).map_err(|e| IngestError::io(path, e))?;
    file.sync_all().map_err(|e| IngestError::io(path, e))?;
    Ok(())
}
