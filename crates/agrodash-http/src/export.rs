//! Spreadsheet export downloads.
//!
//! The backend streams each report as an `.xlsx` body with an optional
//! `Content-Disposition` filename. [`ExportClient::download`] saves it
//! under a target directory and resolves only once the file is closed.
//! Every call ends in exactly one outcome: the saved file, or a single
//! [`AgroError::Export`] with a human-readable message.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use agrodash_core::error::{AgroError, AgroResult};
use regex::Regex;
use reqwest::header::{ACCEPT, CONTENT_DISPOSITION, HeaderMap, HeaderValue};
use tokio::io::AsyncWriteExt;
use tracing::{error, info};

use crate::connection::{ApiClient, RequestFailure};
use crate::error::HttpError;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

static FILENAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"filename[^;=\n]*=\s*(?:"([^"]*)"|'([^']*)'|([^;\n]*))"#)
        .expect("static filename pattern")
});

/// Reports the backend can export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportReport {
    FarmOverview,
    AllIrrigations,
    IrrigationsByFarm(i64),
    AllFertilizations,
    FertilizationsByFarm(i64),
    ParcelActivity(i64),
    CropManagement,
    CompleteFarm(i64),
    ParcelWeather(i64),
}

impl ExportReport {
    pub fn path(&self) -> String {
        match self {
            ExportReport::FarmOverview => "/export/farms".into(),
            ExportReport::AllIrrigations => "/export/irrigations".into(),
            ExportReport::IrrigationsByFarm(id) => format!("/export/irrigations/farm/{id}"),
            ExportReport::AllFertilizations => "/export/fertilizations".into(),
            ExportReport::FertilizationsByFarm(id) => format!("/export/fertilizations/farm/{id}"),
            ExportReport::ParcelActivity(id) => format!("/export/parcel/{id}"),
            ExportReport::CropManagement => "/export/crops".into(),
            ExportReport::CompleteFarm(id) => format!("/export/farm/{id}"),
            ExportReport::ParcelWeather(id) => format!("/export/parcel/{id}/weather"),
        }
    }

    pub fn default_filename(&self) -> String {
        match self {
            ExportReport::FarmOverview => "farm-overview-report.xlsx".into(),
            ExportReport::AllIrrigations => "irrigations-all.xlsx".into(),
            ExportReport::IrrigationsByFarm(id) => format!("irrigations-farm-{id}.xlsx"),
            ExportReport::AllFertilizations => "fertilizations-all.xlsx".into(),
            ExportReport::FertilizationsByFarm(id) => format!("fertilizations-farm-{id}.xlsx"),
            ExportReport::ParcelActivity(id) => format!("parcel-{id}-activity.xlsx"),
            ExportReport::CropManagement => "crop-management-report.xlsx".into(),
            ExportReport::CompleteFarm(id) => format!("farm-{id}-complete.xlsx"),
            ExportReport::ParcelWeather(id) => format!("parcel-{id}-weather.xlsx"),
        }
    }

    fn entity_id(&self) -> Option<i64> {
        match self {
            ExportReport::IrrigationsByFarm(id)
            | ExportReport::FertilizationsByFarm(id)
            | ExportReport::ParcelActivity(id)
            | ExportReport::CompleteFarm(id)
            | ExportReport::ParcelWeather(id) => Some(*id),
            _ => None,
        }
    }
}

/// A report saved to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub path: PathBuf,
    pub filename: String,
    pub size: u64,
}

/// Pull the filename out of a `Content-Disposition` header value.
///
/// Accepts a quoted or bare token after `filename=`, or an extended
/// `filename*=charset'lang'value` whose value is percent-decoded. The
/// result is reduced to its final path component so a hostile header
/// cannot escape the target directory.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let caps = FILENAME_RE.captures(header)?;
    let raw = (1..=3).find_map(|i| caps.get(i))?.as_str().trim();
    let decoded = match extended_value(raw) {
        Some(value) => urlencoding::decode(value)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| value.to_string()),
        None => raw.to_string(),
    };
    let cleaned = decoded.replace(['"', '\''], "");
    let name = cleaned.rsplit(['/', '\\']).next()?.trim();

    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_string())
    }
}

/// The value part of `charset'lang'value`, for any charset token.
fn extended_value(raw: &str) -> Option<&str> {
    let (charset, rest) = raw.split_once('\'')?;
    let is_token = !charset.is_empty()
        && charset
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !is_token {
        return None;
    }
    let (_lang, value) = rest.split_once('\'')?;
    Some(value)
}

/// Normalize a failed export's body into one message.
///
/// The body is read as text and parsed as JSON (`message`, then `error`);
/// failing that the raw text is used, and failing that a generic message.
pub fn export_error_message(status: u16, body: &[u8]) -> String {
    let generic = format!("Export failed (Status {status})");
    let text = String::from_utf8_lossy(body);
    let text = text.trim();

    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => ["message", "error"]
            .iter()
            .filter_map(|key| value.get(key).and_then(|v| v.as_str()))
            .find(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or(generic),
        Err(_) if !text.is_empty() => text.to_string(),
        Err(_) => generic,
    }
}

#[derive(Clone)]
pub struct ExportClient {
    client: ApiClient,
}

impl ExportClient {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Download `report` into `dir`, returning once the file is closed.
    pub async fn download(&self, report: ExportReport, dir: &Path) -> AgroResult<ExportedFile> {
        let path = report.path();
        info!(path = %path, "Requesting export");

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(XLSX_CONTENT_TYPE));

        let mut request = self.client.get("export", path).headers(headers);
        if let Some(id) = report.entity_id() {
            request = request.entity(id);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(RequestFailure::Network(e)) => {
                error!(error = %e, "Export request failed");
                return Err(AgroError::Export {
                    status: None,
                    message: e.to_string(),
                });
            }
            Err(RequestFailure::Status(failure)) => {
                // Still routed through the hook so a 401 ends the session.
                let _ = self.client.interceptor().intercept(&failure);
                let message = export_error_message(failure.status, &failure.body);
                error!(status = failure.status, message = %message, "Export failed");
                return Err(AgroError::Export {
                    status: Some(failure.status),
                    message,
                });
            }
        };

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| report.default_filename());

        let bytes = response.bytes().await.map_err(|e| AgroError::Export {
            status: None,
            message: e.to_string(),
        })?;
        if bytes.is_empty() {
            return Err(AgroError::Export {
                status: None,
                message: "No file content received".into(),
            });
        }

        let target = dir.join(&filename);
        save_file(&target, &bytes).await.map_err(AgroError::from)?;

        info!(path = %target.display(), size = bytes.len(), "Export saved");
        Ok(ExportedFile {
            path: target,
            filename,
            size: bytes.len() as u64,
        })
    }
}

/// Write through a temporary sibling, sync, close, then rename into place.
async fn save_file(target: &Path, bytes: &[u8]) -> Result<(), HttpError> {
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let partial = target.with_file_name(format!(".{file_name}.part"));

    let written: std::io::Result<()> = async {
        let mut file = tokio::fs::File::create(&partial).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&partial, target).await
    }
    .await;

    if let Err(e) = written {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(e.into());
    }
    Ok(())
}
