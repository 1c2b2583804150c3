use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::errors::AppError;
use crate::domain::books::{GENRES, NewBook};

pub const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "openrouter/free";
const USER_AGENT: &str = "Liburutegia/1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

fn suggestion_prompt() -> String {
    format!(
        r#"You help fill in a personal reading list. For the book described below, return a JSON object with these fields (only include fields you can identify with confidence):
- "genre": the single best-matching genre, chosen from: {}
- "total_pages": the page count of the most common edition
- "year": the year the book was first published
- "summary": a two-sentence summary without spoilers

Return ONLY the JSON object, no other text."#,
        GENRES.join(", ")
    )
}

// --- Public types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
}

impl SuggestionRequest {
    fn describe(&self) -> String {
        match self.author.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
            Some(author) => format!("\"{}\" by {author}", self.title.trim()),
            None => format!("\"{}\"", self.title.trim()),
        }
    }
}

/// Metadata guessed for a book. Models answer in either key style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookSuggestion {
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default, alias = "totalPages")]
    pub total_pages: Option<i32>,
    #[serde(default, alias = "publicationYear", alias = "publication_year")]
    pub year: Option<i32>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl BookSuggestion {
    /// Fill a draft with whatever was suggested. Existing notes are kept.
    pub fn apply_to(&self, book: &mut NewBook) {
        if let Some(genre) = self.genre.as_deref().map(str::trim).filter(|g| !g.is_empty()) {
            book.genre = Some(genre.to_string());
        }
        if let Some(pages) = self.total_pages.filter(|&p| p > 0) {
            book.total_pages = pages;
        }
        if let Some(year) = self.year.filter(|&y| y != 0) {
            book.year = Some(year);
        }
        let has_notes = book.notes.as_deref().is_some_and(|n| !n.trim().is_empty());
        if !has_notes
            && let Some(summary) = self.summary.as_deref().map(str::trim).filter(|s| !s.is_empty())
        {
            book.notes = Some(summary.to_string());
        }
    }
}

// --- Public functions ---

pub async fn suggest_book(
    client: &reqwest::Client,
    url: &str,
    api_key: &str,
    model: &str,
    request: &SuggestionRequest,
) -> Result<BookSuggestion, AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::validation("title is required"));
    }

    let content = call_openrouter(
        client,
        url,
        api_key,
        model,
        &suggestion_prompt(),
        &request.describe(),
    )
    .await?;
    let json = extract_json(&content);

    serde_json::from_str(json).map_err(|e| {
        AppError::unexpected(format!("Failed to parse AI response as book data: {e}"))
    })
}

// --- Internal helpers ---

async fn call_openrouter(
    client: &reqwest::Client,
    url: &str,
    api_key: &str,
    model: &str,
    system_prompt: &str,
    prompt: &str,
) -> Result<String, AppError> {
    let request_body = ChatRequest {
        model: model.to_string(),
        messages: vec![Message {
            role: "user".to_string(),
            content: vec![
                ContentPart::Text {
                    text: system_prompt.to_string(),
                },
                ContentPart::Text {
                    text: prompt.to_string(),
                },
            ],
        }],
    };

    let response = client
        .post(url)
        .header("User-Agent", USER_AGENT)
        .header("Authorization", format!("Bearer {api_key}"))
        .timeout(REQUEST_TIMEOUT)
        .json(&request_body)
        .send()
        .await
        .map_err(|e| AppError::unexpected(format!("OpenRouter request failed: {e}")))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "(unreadable body)".to_string());
        return Err(AppError::unexpected(format!(
            "OpenRouter returned status {status}: {body}"
        )));
    }

    let chat_response: ChatResponse = response
        .json()
        .await
        .map_err(|e| AppError::unexpected(format!("Failed to parse OpenRouter response: {e}")))?;

    let content = chat_response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .unwrap_or_default();

    if content.trim().is_empty() {
        return Err(AppError::unexpected(
            "OpenRouter returned an empty response".to_string(),
        ));
    }

    Ok(content)
}

/// Pull the JSON object out of a reply that may be fenced or wrapped in prose.
fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();

    if let Some(after) = trimmed.strip_prefix("```json")
        && let Some(inner) = after.strip_suffix("```")
    {
        return inner.trim();
    }
    if let Some(after) = trimmed.strip_prefix("```")
        && let Some(inner) = after.strip_suffix("```")
    {
        return inner.trim();
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}'))
        && start < end
    {
        return &trimmed[start..=end];
    }

    trimmed
}

// --- OpenRouter API types ---

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}
