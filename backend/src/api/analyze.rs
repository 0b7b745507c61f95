use crate::models::{AnalyzeRequest, AnalyzeResponse, ApiError};
use crate::services::csv_export::comments_to_csv;
use crate::utils::extract_video_id;
use crate::AppState;
use log::info;
use rocket::serde::json::Json;
use rocket::{post, State};

#[post("/analyze", data = "<request>")]
pub async fn analyze_video(
    request: Json<AnalyzeRequest>,
    state: &State<AppState>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let video_url = match request.video_url.as_deref() {
        Some(url) if !url.is_empty() => url,
        _ => return Err(ApiError::bad_request("No video URL provided")),
    };

    let video_id = extract_video_id(video_url)
        .ok_or_else(|| ApiError::bad_request("Could not extract a valid video ID from the URL"))?;

    let video_details = state
        .youtube
        .fetch_video_details(&video_id)
        .await
        .ok_or_else(|| ApiError::not_found("Could not retrieve video details"))?;

    let comments = state.youtube.fetch_all_comments(&video_id).await;

    let csv_content = comments_to_csv(&comments)
        .map_err(|e| ApiError::internal(format!("An error occurred: {e}")))?;

    let analysis = state.analysis.analyze(&comments, &video_details).await;
    let sentiment_data = analysis.sentiment_data();

    info!(
        "Analyzed video {video_id}: {} comments collected",
        comments.len()
    );

    Ok(Json(AnalyzeResponse {
        success: true,
        video_details,
        comments,
        analysis: analysis.into_value(),
        sentiment_data,
        csv_content,
    }))
}
