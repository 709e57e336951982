//! Jira Agile REST client using reqwest

use boardgraph_core::{Board, Config, Credentials, FieldConfig, Secrets};
use reqwest::StatusCode;
use tracing::{debug, info};

use crate::wire::RawBoard;
use crate::{Error, Result};

/// Jira API client for board operations
pub struct JiraClient {
    http: reqwest::Client,
    host: String,
    credentials: Credentials,
    fields: FieldConfig,
}

impl JiraClient {
    /// Create a client for the Jira instance at `host`
    pub fn new(host: &str, credentials: Credentials, fields: FieldConfig) -> Result<Self> {
        let host = host.trim().trim_end_matches('/').to_string();
        url::Url::parse(&host)
            .map_err(|e| Error::Config(format!("Invalid Jira host {}: {}", host, e)))?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("boardgraph/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!(host = %host, username = %credentials.username, "Created Jira client");

        Ok(Self {
            http,
            host,
            credentials,
            fields,
        })
    }

    /// Create a client from configuration and stored secrets
    ///
    /// Credentials are loaded from (in priority order):
    /// 1. JIRA_USERNAME / JIRA_PASSWORD environment variables
    /// 2. ~/.config/boardgraph/secrets.toml
    pub fn from_config(config: &Config) -> Result<Self> {
        let secrets = Secrets::load().map_err(|e| Error::Auth(e.to_string()))?;

        let credentials = secrets.jira_credentials().ok_or_else(|| {
            Error::Auth(
                "Jira credentials not found. Set JIRA_USERNAME and JIRA_PASSWORD \
                 or run `boardgraph secrets init` and edit ~/.config/boardgraph/secrets.toml"
                    .to_string(),
            )
        })?;

        Self::new(config.host(), credentials, config.fields.clone())
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// `{host}/rest/agile/latest/board/{board_id}/issue`
    pub fn board_url(&self, board_id: u64) -> String {
        format!("{}/rest/agile/latest/board/{}/issue", self.host, board_id)
    }

    /// Fetch a board's issues with a single request
    pub async fn get_board(&self, board_id: u64) -> Result<Board> {
        debug!(board_id, "Fetching board");

        let raw = self.fetch_page(board_id, None).await?;
        let board = raw.into_board(&self.fields);

        info!(board_id, count = board.len(), "Fetched board");
        Ok(board)
    }

    /// Fetch every issue on a board, following `startAt` paging
    pub async fn get_board_all(&self, board_id: u64) -> Result<Board> {
        debug!(board_id, "Fetching board with pagination");

        let mut issues = Vec::new();
        let mut start_at = 0u64;

        loop {
            let page = self.fetch_page(board_id, Some(start_at)).await?;
            let received = page.issues.len() as u64;
            let total = page.total;
            let is_last = page.is_last.unwrap_or(false);

            issues.extend(page.into_board(&self.fields).issues);
            start_at += received;

            debug!(board_id, received, start_at, total = ?total, "Fetched board page");

            if received == 0 || is_last || total.is_some_and(|t| start_at >= t) {
                break;
            }
        }

        info!(board_id, count = issues.len(), "Fetched all board issues");
        Ok(Board::new(issues))
    }

    async fn fetch_page(&self, board_id: u64, start_at: Option<u64>) -> Result<RawBoard> {
        let mut request = self
            .http
            .get(self.board_url(board_id))
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .header("Accept", "application/json");

        if let Some(start_at) = start_at {
            request = request.query(&[("startAt", start_at)]);
        }

        let response = request.send().await?;
        let status = response.status();

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(Error::Auth(format!(
                    "Jira rejected credentials for {} ({})",
                    self.credentials.username, status
                )));
            }
            StatusCode::NOT_FOUND => return Err(Error::BoardNotFound(board_id)),
            s if !s.is_success() => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unable to read response".to_string());
                return Err(Error::Status {
                    status: s.as_u16(),
                    body,
                });
            }
            _ => {}
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("Failed to parse board response: {}", e)))
    }
}

impl std::fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraClient")
            .field("host", &self.host)
            .field("username", &self.credentials.username)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            username: "alice".to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn test_board_url() {
        let client =
            JiraClient::new("https://jira.example.com/", credentials(), FieldConfig::default())
                .unwrap();
        assert_eq!(
            client.board_url(42),
            "https://jira.example.com/rest/agile/latest/board/42/issue"
        );
    }

    #[test]
    fn test_invalid_host() {
        assert!(JiraClient::new("jira.example.com", credentials(), FieldConfig::default()).is_err());
    }

    #[test]
    fn test_debug_hides_password() {
        let client =
            JiraClient::new("https://jira.example.com", credentials(), FieldConfig::default())
                .unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("secret"));
    }
}
