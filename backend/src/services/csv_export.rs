use crate::models::Comment;
use crate::utils::strip_html_tags;
use anyhow::Result;
use csv::Writer;

const CSV_HEADER: [&str; 5] = ["comment_id", "author", "text", "likes", "published_at"];

/// Renders the full comment list as CSV text in memory, one row per comment
/// in input order. Comment text is cleaned of HTML tags first.
pub fn comments_to_csv(comments: &[Comment]) -> Result<String> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for comment in comments {
        writer.write_record([
            comment.comment_id.as_str(),
            comment.author.as_str(),
            strip_html_tags(&comment.text).as_str(),
            comment.likes.to_string().as_str(),
            comment.published_at.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {e}"))?;
    Ok(String::from_utf8(bytes)?)
}
