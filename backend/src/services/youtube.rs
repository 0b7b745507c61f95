use crate::models::{Comment, VideoDetails};
use anyhow::Result;
use log::{error, info};
use reqwest::Client;
use serde_json::Value;

const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Client for the YouTube Data API v3.
pub struct YoutubeClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl YoutubeClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, YOUTUBE_API_BASE.to_string())
    }

    /// Points the client at a different API root, used by tests to run
    /// against a local fake server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        YoutubeClient {
            http: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Fetches title, channel and statistics for a single video. Returns
    /// `None` when the API reports no matching item or the request fails.
    pub async fn fetch_video_details(&self, video_id: &str) -> Option<VideoDetails> {
        match self.request_video_details(video_id).await {
            Ok(details) => details,
            Err(e) => {
                error!("Failed to fetch video details for {video_id}: {e:?}");
                None
            }
        }
    }

    async fn request_video_details(&self, video_id: &str) -> Result<Option<VideoDetails>> {
        // Documentation: https://developers.google.com/youtube/v3/docs/videos
        let url = format!(
            "{}/videos?id={}&key={}&part=snippet,statistics,contentDetails",
            self.base_url, video_id, self.api_key
        );

        let response = self.http.get(&url).send().await?.json::<Value>().await?;

        let item = match response["items"].as_array().and_then(|items| items.first()) {
            Some(item) => item,
            None => return Ok(None),
        };

        Ok(Some(VideoDetails {
            title: item["snippet"]["title"].as_str().unwrap_or("").to_string(),
            channel: item["snippet"]["channelTitle"]
                .as_str()
                .unwrap_or("")
                .to_string(),
            published_at: item["snippet"]["publishedAt"]
                .as_str()
                .unwrap_or("")
                .to_string(),
            view_count: count_stat(&item["statistics"]["viewCount"]),
            like_count: count_stat(&item["statistics"]["likeCount"]),
            comment_count: count_stat(&item["statistics"]["commentCount"]),
            thumbnail: pick_thumbnail(&item["snippet"]["thumbnails"]),
        }))
    }

    /// Collects every top-level comment thread of a video, following the
    /// API's page tokens. An error mid-pagination stops the walk and returns
    /// whatever was accumulated so far.
    pub async fn fetch_all_comments(&self, video_id: &str) -> Vec<Comment> {
        let mut comments = Vec::new();
        let mut next_page_token: Option<String> = None;

        loop {
            // https://developers.google.com/youtube/v3/docs/commentThreads
            let mut url = format!(
                "{}/commentThreads?videoId={}&key={}&part=snippet&maxResults=100",
                self.base_url, video_id, self.api_key
            );

            if let Some(token) = &next_page_token {
                url.push_str(&format!("&pageToken={token}"));
            }

            let response = match self.fetch_comment_page(&url).await {
                Ok(page) => page,
                Err(e) => {
                    error!("Failed to fetch comments for {video_id}: {e:?}");
                    break;
                }
            };

            if let Some(items) = response["items"].as_array() {
                for item in items {
                    comments.push(comment_from_item(item));
                }
            }

            match response["nextPageToken"].as_str() {
                Some(token) => next_page_token = Some(token.to_string()),
                None => break,
            }
        }

        info!("Fetched {} comments for video {video_id}", comments.len());
        comments
    }

    async fn fetch_comment_page(&self, url: &str) -> Result<Value> {
        Ok(self.http.get(url).send().await?.json::<Value>().await?)
    }
}

// The statistics part reports counts as strings; missing values become 0.
fn count_stat(value: &Value) -> i64 {
    value.as_str().unwrap_or("0").parse().unwrap_or(0)
}

/// Picks the best available thumbnail, preferring maxres over high over
/// medium over default.
fn pick_thumbnail(thumbnails: &Value) -> String {
    ["maxres", "high", "medium", "default"]
        .iter()
        .find_map(|size| thumbnails[*size]["url"].as_str())
        .unwrap_or("")
        .to_string()
}

fn comment_from_item(item: &Value) -> Comment {
    let snippet = &item["snippet"]["topLevelComment"]["snippet"];

    Comment {
        comment_id: item["id"].as_str().unwrap_or("").to_string(),
        author: snippet["authorDisplayName"]
            .as_str()
            .unwrap_or("")
            .to_string(),
        text: snippet["textDisplay"].as_str().unwrap_or("").to_string(),
        likes: snippet["likeCount"].as_i64().unwrap_or(0),
        published_at: snippet["publishedAt"].as_str().unwrap_or("").to_string(),
    }
}
