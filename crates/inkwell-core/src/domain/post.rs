use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Longest accepted `url`, in bytes.
pub const MAX_URL_LEN: usize = 200;
/// Longest accepted title, in characters.
pub const MAX_TITLE_LEN: usize = 200;
/// Longest accepted author name, in characters.
pub const MAX_AUTHOR_LEN: usize = 100;

/// Post entity - a blog article, looked up externally by its `url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post from an editor draft.
    pub fn new(draft: PostDraft) -> Self {
        let now = now();
        Self {
            id: Uuid::new_v4(),
            url: draft.url,
            title: draft.title,
            description: draft.description,
            content: draft.content,
            author: draft.author,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every editable field with the draft's.
    ///
    /// The identity and creation time are kept; `updated_at` moves forward.
    pub fn replace_with(&mut self, draft: PostDraft) {
        self.url = draft.url;
        self.title = draft.title;
        self.description = draft.description;
        self.content = draft.content;
        self.author = draft.author;
        self.updated_at = now();
    }
}

/// The editable shape of a post as submitted by the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDraft {
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub author: Option<String>,
}

impl PostDraft {
    /// Check the draft against the post model rules.
    ///
    /// Every violation is reported, joined into a single message.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut problems = Vec::new();

        if self.url.is_empty() {
            problems.push("url must not be empty".to_string());
        } else if self.url.len() > MAX_URL_LEN {
            problems.push(format!("url must be at most {MAX_URL_LEN} bytes"));
        } else if !self.url.chars().all(is_url_char) {
            problems.push(
                "url may only contain ASCII letters, digits, '-' and '_'".to_string(),
            );
        }

        if self.title.trim().is_empty() {
            problems.push("title must not be empty".to_string());
        } else if self.title.chars().count() > MAX_TITLE_LEN {
            problems.push(format!("title must be at most {MAX_TITLE_LEN} characters"));
        }

        if self
            .author
            .as_deref()
            .is_some_and(|author| author.chars().count() > MAX_AUTHOR_LEN)
        {
            problems.push(format!("author must be at most {MAX_AUTHOR_LEN} characters"));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(problems.join("; ")))
        }
    }
}

/// Current time at the microsecond precision the post table keeps.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn is_url_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}
