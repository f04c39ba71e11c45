//! Feedly API access.

use super::*;

/// Base url of the Feedly cloud API.
pub const FEEDLY_BASE_URL: &str = "https://cloud.feedly.com/v3";

/// Stream identifier suffix selecting every category at once.
pub const ALL_CATEGORIES: &str = "global.all";

/// The two remote operations the tool needs. Kept behind a trait so the
/// command flow can run against an in-memory service in tests.
#[async_trait]
pub trait FeedService {
    /// Fetch unread entries for a category (`None` means all categories).
    async fn fetch_unread(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<Entry>>;

    /// Mark the given entry ids as read.
    async fn mark_as_read(&self, ids: &[String]) -> Result<()>;
}

/// `FeedService` backed by the Feedly cloud API.
pub struct FeedlyClient {
    client: reqwest::Client,
    base_url: String,
    user_id: String,
    auth_token: String,
}

impl FeedlyClient {
    /// Create a client against the Feedly cloud API.
    pub fn new(
        user_id: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Self {
        Self::with_base_url(FEEDLY_BASE_URL, user_id, auth_token)
    }

    /// Create a client against a different base url.
    pub fn with_base_url(
        base_url: impl Into<String>,
        user_id: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_id: user_id.into(),
            auth_token: auth_token.into(),
        }
    }

    /// Stream identifier for a category. An empty or absent category maps
    /// to the all-categories sentinel.
    pub(crate) fn stream_id(&self, category: Option<&str>) -> String {
        let category = match category {
            Some(name) if !name.is_empty() => name,
            _ => ALL_CATEGORIES,
        };
        format!("user/{}/category/{}", self.user_id, category)
    }

    fn auth_header(&self) -> String {
        format!("OAuth {}", self.auth_token)
    }
}

#[async_trait]
impl FeedService for FeedlyClient {
    async fn fetch_unread(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<Entry>> {
        let url = format!("{}/streams/contents", self.base_url);
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .query(&[
                ("streamId", self.stream_id(category).as_str()),
                ("count", "1000"),
                ("unreadOnly", "true"),
            ])
            .send()
            .await
            .context("unread entries request failed")?;
        let status = response.status();
        if !status.is_success() {
            // A failed fetch degrades to "nothing to do".
            tracing::warn!("Stream contents request returned {status}");
            return Ok(Vec::new());
        }
        let stream: StreamContents = response
            .json()
            .await
            .context("failed to parse stream contents")?;
        tracing::debug!("Fetched stream {}", stream.id);
        Ok(stream.items.unwrap_or_default())
    }

    async fn mark_as_read(&self, ids: &[String]) -> Result<()> {
        let url = format!("{}/markers", self.base_url);
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .json(&MarkerRequest {
                kind: "entries",
                entry_ids: ids,
                action: "markAsRead",
            })
            .send()
            .await
            .context("mark-as-read request failed")?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Marker request returned {status}");
        }
        Ok(())
    }
}

/// Body of the `markers` write call.
#[derive(Debug, Serialize)]
pub(crate) struct MarkerRequest<'a> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    #[serde(rename = "entryIds")]
    pub entry_ids: &'a [String],
    pub action: &'a str,
}
