use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::Responder;
use rocket::serde::{Deserialize, Serialize};
use rocket::{response, Response};
use std::io::Cursor;

/// A single top-level comment thread as returned by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: String,
    pub author: String,
    pub text: String,
    pub likes: i64,
    pub published_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoDetails {
    pub title: String,
    pub channel: String,
    pub published_at: String,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub thumbnail: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub video_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub video_details: VideoDetails,
    pub comments: Vec<Comment>,
    pub analysis: serde_json::Value,
    pub sentiment_data: Vec<SentimentDatum>,
    pub csv_content: String,
}

/// One slice of the sentiment chart: `{name: "Positive", value: 62}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentDatum {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    pub csv_content: Option<String>,
    pub video_id: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: Status,
    pub error: String,
}

impl ApiError {
    pub fn bad_request(message: &str) -> Self {
        ApiError {
            status: Status::BadRequest,
            error: message.to_string(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        ApiError {
            status: Status::NotFound,
            error: message.to_string(),
        }
    }

    pub fn internal(message: String) -> Self {
        ApiError {
            status: Status::InternalServerError,
            error: message,
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let json = serde_json::json!({ "error": self.error }).to_string();
        Response::build()
            .status(self.status)
            .header(ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}

/// CSV text served as a file download.
pub struct CsvAttachment {
    pub filename: String,
    pub content: String,
}

impl<'r> Responder<'r, 'static> for CsvAttachment {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        Response::build()
            .header(ContentType::CSV)
            .raw_header(
                "Content-Disposition",
                format!("attachment; filename={}", self.filename),
            )
            .sized_body(self.content.len(), Cursor::new(self.content))
            .ok()
    }
}
