use crate::models::{ApiError, CsvAttachment, DownloadRequest};
use chrono::Utc;
use rocket::post;
use rocket::serde::json::Json;

/// Hands previously generated CSV text back as a file attachment. The
/// server keeps no session state, so the CSV travels through the caller.
#[post("/download-csv", data = "<request>")]
pub async fn download_csv(request: Json<DownloadRequest>) -> Result<CsvAttachment, ApiError> {
    let request = request.into_inner();

    let csv_content = match request.csv_content {
        Some(content) if !content.is_empty() => content,
        _ => return Err(ApiError::bad_request("No CSV content provided")),
    };

    let video_id = request.video_id.unwrap_or_else(|| "comments".to_string());
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("youtube_comments_{video_id}_{timestamp}.csv");

    Ok(CsvAttachment {
        filename,
        content: csv_content,
    })
}
