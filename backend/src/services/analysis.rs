use crate::models::{Comment, SentimentDatum, VideoDetails};
use anyhow::Result;
use log::error;
use reqwest::Client;
use serde_json::{json, Value};

/// Upper bound on comments fed to the model, keeping the prompt inside the
/// completion endpoint's token budget. The CSV export is not truncated.
pub const ANALYSIS_COMMENT_LIMIT: usize = 100;

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 2000;

/// Client for an OpenAI-compatible chat-completion endpoint.
pub struct AnalysisClient {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl AnalysisClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        AnalysisClient {
            http: Client::new(),
            api_key,
            base_url,
            model,
        }
    }

    /// Runs the comment analysis, degrading to the fallback structure when
    /// the endpoint is unreachable or replies with something that is not
    /// JSON. The caller never observes an error.
    pub async fn analyze(&self, comments: &[Comment], details: &VideoDetails) -> CommentAnalysis {
        let prompt = build_analysis_prompt(comments, details);

        let raw = match self.chat_completion(&prompt).await {
            Ok(text) => Some(text),
            Err(e) => {
                error!("Failed to get AI response: {e:?}");
                None
            }
        };

        CommentAnalysis::from_raw(raw)
    }

    async fn chat_completion(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let request = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .json::<Value>()
            .await?;

        response["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("completion response carried no message content"))
    }
}

/// Builds the single-turn prompt from the video details and the first
/// [`ANALYSIS_COMMENT_LIMIT`] comments.
pub fn build_analysis_prompt(comments: &[Comment], details: &VideoDetails) -> String {
    let comments = &comments[..comments.len().min(ANALYSIS_COMMENT_LIMIT)];

    let comment_block = comments
        .iter()
        .map(|c| format!("Author: {}\nComment: {}\nLikes: {}", c.author, c.text, c.likes))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"Analyze the following YouTube comments for the video "{title}" by {channel}.

VIDEO DETAILS:
Title: {title}
Channel: {channel}
Views: {views}
Comments: {comment_count}

COMMENTS:
{comment_block}

Please provide a structured JSON with the following sections:
1. sentiment: Object with keys "positive", "neutral", "negative" and integer percentage values that sum to 100
2. themes: Array of strings with common topics or themes mentioned in the comments
3. positiveFeedback: Array of strings summarizing the positive aspects mentioned
4. negativeFeedback: Object containing:
- "summary": A paragraph summarizing all negative feedback in detail
- "points": Array of detailed explanations of each criticism with supporting comment evidence
- "impact": Analysis of how these criticisms might impact viewer perception
5. questions: Array of strings with common questions viewers are asking
6. suggestions: Object containing:
- "summary": A paragraph overview of all viewer suggestions
- "details": Array of comprehensive explanations for each suggestion
- "implementation": Practical advice on how to implement these suggestions
- "priority": Suggested priority order based on comment frequency and engagement

Format your response as a JSON object without markdown or any additional text."#,
        title = details.title,
        channel = details.channel,
        views = details.view_count,
        comment_count = details.comment_count,
        comment_block = comment_block,
    )
}

/// Outcome of the model call. A parsed reply is passed through untouched;
/// anything else is rendered as a fixed placeholder structure so consumers
/// always see the full schema.
#[derive(Debug, Clone)]
pub enum CommentAnalysis {
    Parsed(Value),
    Fallback { raw_analysis: Option<String> },
}

impl CommentAnalysis {
    pub fn from_raw(raw: Option<String>) -> Self {
        if let Some(text) = &raw {
            if let Ok(value) = serde_json::from_str::<Value>(text) {
                return CommentAnalysis::Parsed(value);
            }
        }
        CommentAnalysis::Fallback { raw_analysis: raw }
    }

    /// The JSON object exposed under `analysis` in the API response.
    pub fn into_value(self) -> Value {
        match self {
            CommentAnalysis::Parsed(value) => value,
            CommentAnalysis::Fallback { raw_analysis } => json!({
                "raw_analysis": raw_analysis,
                "sentiment": { "positive": 50, "neutral": 30, "negative": 20 },
                "themes": ["Content", "Production", "Information"],
                "positiveFeedback": ["Good content"],
                "negativeFeedback": {
                    "summary": "Some criticism",
                    "points": ["Detail 1"],
                    "impact": "Impact analysis"
                },
                "questions": ["Questions from viewers"],
                "suggestions": {
                    "summary": "Viewer suggestions",
                    "details": ["Suggestion 1"],
                    "implementation": "Implementation advice",
                    "priority": ["Priority 1"]
                }
            }),
        }
    }

    /// Chart rows derived from the sentiment percentages. The percentages
    /// are taken as reported, without clamping or checking they sum to 100.
    pub fn sentiment_data(&self) -> Vec<SentimentDatum> {
        let sentiment = match self {
            CommentAnalysis::Parsed(value) => value["sentiment"].clone(),
            CommentAnalysis::Fallback { .. } => {
                json!({ "positive": 50, "neutral": 30, "negative": 20 })
            }
        };

        [
            ("Positive", "positive"),
            ("Neutral", "neutral"),
            ("Negative", "negative"),
        ]
        .iter()
        .map(|(name, key)| SentimentDatum {
            name: name.to_string(),
            value: sentiment[*key].as_i64().unwrap_or(0),
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn comment(id: usize) -> Comment {
        Comment {
            comment_id: format!("c{id}"),
            author: format!("author-{id}"),
            text: format!("comment number {id}"),
            likes: id as i64,
            published_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    fn details() -> VideoDetails {
        VideoDetails {
            title: "Test Video".to_string(),
            channel: "Test Channel".to_string(),
            view_count: 1234,
            comment_count: 56,
            ..VideoDetails::default()
        }
    }

    #[test]
    fn fallback_carries_every_schema_field_and_the_raw_text() {
        let analysis = CommentAnalysis::from_raw(Some("not json".to_string()));
        assert!(matches!(analysis, CommentAnalysis::Fallback { .. }));

        let value = analysis.into_value();
        assert_eq!(value["raw_analysis"], "not json");
        for field in [
            "sentiment",
            "themes",
            "positiveFeedback",
            "negativeFeedback",
            "questions",
            "suggestions",
        ] {
            assert!(!value[field].is_null(), "missing fallback field {field}");
        }
        assert_eq!(value["sentiment"]["positive"], 50);
        assert_eq!(value["sentiment"]["neutral"], 30);
        assert_eq!(value["sentiment"]["negative"], 20);
    }

    #[test]
    fn fallback_without_any_reply_has_null_raw_text() {
        let value = CommentAnalysis::from_raw(None).into_value();
        assert!(value["raw_analysis"].is_null());
        assert_eq!(value["themes"][0], "Content");
    }

    #[test]
    fn valid_json_passes_through_untouched() {
        let reply = r#"{"sentiment":{"positive":70,"neutral":20,"negative":10},"themes":["music"]}"#;
        let analysis = CommentAnalysis::from_raw(Some(reply.to_string()));
        assert!(matches!(analysis, CommentAnalysis::Parsed(_)));

        let data = analysis.sentiment_data();
        assert_eq!(data[0].name, "Positive");
        assert_eq!(data[0].value, 70);
        assert_eq!(data[1].value, 20);
        assert_eq!(data[2].value, 10);

        let value = analysis.into_value();
        assert_eq!(value["themes"][0], "music");
        assert!(value.get("raw_analysis").is_none());
    }

    #[test]
    fn parsed_reply_off_schema_yields_zero_sentiment() {
        let analysis = CommentAnalysis::from_raw(Some("[1, 2, 3]".to_string()));
        let data = analysis.sentiment_data();
        assert!(data.iter().all(|d| d.value == 0));
    }

    #[test]
    fn prompt_contains_video_details_and_comments() {
        let comments = vec![comment(1), comment(2)];
        let prompt = build_analysis_prompt(&comments, &details());

        assert!(prompt.contains("Test Video"));
        assert!(prompt.contains("Test Channel"));
        assert!(prompt.contains("Views: 1234"));
        assert!(prompt.contains("Author: author-1"));
        assert!(prompt.contains("Comment: comment number 2"));
    }

    #[test]
    fn prompt_truncates_to_the_first_hundred_comments() {
        let comments: Vec<Comment> = (1..=150).map(comment).collect();
        let prompt = build_analysis_prompt(&comments, &details());

        assert!(prompt.contains("comment number 100"));
        assert!(!prompt.contains("comment number 101"));
    }

    #[rocket::async_test]
    async fn analyze_parses_a_json_reply_from_the_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "aiagent",
                "temperature": 0.7,
                "max_tokens": 2000
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": "{\"sentiment\":{\"positive\":80,\"neutral\":15,\"negative\":5}}"
                    }
                }]
            })))
            .mount(&server)
            .await;

        let client = AnalysisClient::new(
            "test-key".to_string(),
            server.uri(),
            "aiagent".to_string(),
        );
        let analysis = client.analyze(&[comment(1)], &details()).await;

        assert!(matches!(analysis, CommentAnalysis::Parsed(_)));
        assert_eq!(analysis.sentiment_data()[0].value, 80);
    }

    #[rocket::async_test]
    async fn analyze_falls_back_when_the_endpoint_is_unreachable() {
        // Nothing listens on this port.
        let client = AnalysisClient::new(
            "test-key".to_string(),
            "http://127.0.0.1:9".to_string(),
            "aiagent".to_string(),
        );
        let analysis = client.analyze(&[comment(1)], &details()).await;

        match analysis {
            CommentAnalysis::Fallback { raw_analysis } => assert!(raw_analysis.is_none()),
            CommentAnalysis::Parsed(_) => panic!("expected fallback"),
        }
    }
}
