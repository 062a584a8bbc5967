//! User directory shim over the external identity provider.
//!
//! [`UserPager`] produces provider pages one at a time until exhausted;
//! [`list_users`] flattens them into the internal [`User`] shape. A
//! provider error aborts the walk and yields whatever was collected so
//! far (logged, not raised), so callers cannot distinguish an empty
//! tenant from a listing that died after page two without checking the
//! logs.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::models::User;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("identity provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("identity provider rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// One page of provider accounts.
#[derive(Debug, Default, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub users: Vec<ProviderUser>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderUser {
    #[serde(rename = "localId")]
    pub local_id: String,
    pub email: Option<String>,
}

/// Restartable page producer; `None` token requests the first page.
#[async_trait]
pub trait UserPager: Send + Sync {
    async fn fetch_page(&self, page_token: Option<&str>) -> Result<UserPage, DirectoryError>;
}

/// Walk every provider page and flatten into internal users.
pub async fn list_users(pager: &dyn UserPager) -> Vec<User> {
    let mut users = Vec::new();
    let mut token: Option<String> = None;

    loop {
        match pager.fetch_page(token.as_deref()).await {
            Ok(page) => {
                users.extend(page.users.into_iter().map(|u| User {
                    id: u.local_id,
                    email: u.email,
                }));
                match page.next_page_token {
                    Some(next) if !next.is_empty() => token = Some(next),
                    _ => break,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, collected = users.len(),
                    "user listing aborted, returning partial results");
                break;
            }
        }
    }

    users
}

/// Firebase Auth account listing (`accounts:batchGet`).
pub struct FirebaseDirectory {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    auth_token: Option<String>,
}

pub const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com";

const PAGE_SIZE: u32 = 500;

impl FirebaseDirectory {
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        project_id: String,
        auth_token: Option<String>,
    ) -> Self {
        Self {
            http,
            base_url,
            project_id,
            auth_token,
        }
    }
}

#[async_trait]
impl UserPager for FirebaseDirectory {
    async fn fetch_page(&self, page_token: Option<&str>) -> Result<UserPage, DirectoryError> {
        let url = format!(
            "{}/v1/projects/{}/accounts:batchGet",
            self.base_url, self.project_id
        );

        let mut query = vec![("maxResults", PAGE_SIZE.to_string())];
        if let Some(token) = page_token {
            query.push(("nextPageToken", token.to_string()));
        }

        let mut request = self.http.get(&url).query(&query);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serves scripted pages; an entry of `Err(())` fails that fetch.
    struct FakePager {
        pages: Mutex<Vec<Result<UserPage, ()>>>,
    }

    impl FakePager {
        fn new(pages: Vec<Result<UserPage, ()>>) -> Self {
            Self {
                pages: Mutex::new(pages),
            }
        }
    }

    fn page(ids: &[&str], next: Option<&str>) -> UserPage {
        UserPage {
            users: ids
                .iter()
                .map(|id| ProviderUser {
                    local_id: id.to_string(),
                    email: Some(format!("{id}@example.com")),
                })
                .collect(),
            next_page_token: next.map(String::from),
        }
    }

    #[async_trait]
    impl UserPager for FakePager {
        async fn fetch_page(&self, _token: Option<&str>) -> Result<UserPage, DirectoryError> {
            let mut pages = self.pages.lock().unwrap();
            if pages.is_empty() {
                return Ok(UserPage::default());
            }
            pages.remove(0).map_err(|()| DirectoryError::Rejected {
                status: 503,
                body: "provider down".into(),
            })
        }
    }

    #[tokio::test]
    async fn flattens_all_pages_in_order() {
        let pager = FakePager::new(vec![
            Ok(page(&["a", "b"], Some("t1"))),
            Ok(page(&["c"], None)),
        ]);

        let users = list_users(&pager).await;
        let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(users[0].email.as_deref(), Some("a@example.com"));
    }

    #[tokio::test]
    async fn provider_error_yields_partial_results() {
        let pager = FakePager::new(vec![Ok(page(&["a"], Some("t1"))), Err(())]);

        let users = list_users(&pager).await;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "a");
    }

    #[tokio::test]
    async fn empty_first_page_is_empty_listing() {
        let pager = FakePager::new(vec![Ok(page(&[], None))]);
        assert!(list_users(&pager).await.is_empty());
    }

    #[tokio::test]
    async fn empty_next_token_stops_the_walk() {
        let pager = FakePager::new(vec![
            Ok(page(&["a"], Some(""))),
            Ok(page(&["never"], None)),
        ]);

        let users = list_users(&pager).await;
        assert_eq!(users.len(), 1);
    }
}
