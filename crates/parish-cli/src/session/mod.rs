//! CLI session: who is acting, and against which store.

pub mod storage;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use parish_core::repo::Document;
use parish_core::traits::Store;
use parish_core::types::{Collection, RecordId, RecordPath, StoreKind, StoreUrl};
use parish_core::User;
use parish_file::FileStore;
use parish_rest::RestStore;

use crate::cli::StoreArgs;

/// Store backend chosen by the URL scheme.
#[derive(Debug, Clone)]
pub enum CliStore {
    File(FileStore),
    Rest(RestStore),
}

impl CliStore {
    pub fn open(url: &StoreUrl, token: Option<String>) -> Result<Self> {
        match url.kind() {
            StoreKind::Directory(_) => {
                let store = FileStore::from_url(url).context("Failed to open file store")?;
                Ok(CliStore::File(store))
            }
            StoreKind::Hosted => {
                let store =
                    RestStore::new(url.clone(), token).context("Failed to create REST client")?;
                Ok(CliStore::Rest(store))
            }
        }
    }
}

#[async_trait]
impl Store for CliStore {
    fn generate_key(&self) -> RecordId {
        match self {
            CliStore::File(store) => store.generate_key(),
            CliStore::Rest(store) => store.generate_key(),
        }
    }

    async fn set(&self, path: &RecordPath, document: &Document) -> parish_core::Result<()> {
        match self {
            CliStore::File(store) => store.set(path, document).await,
            CliStore::Rest(store) => store.set(path, document).await,
        }
    }

    async fn update(&self, path: &RecordPath, changes: &Document) -> parish_core::Result<()> {
        match self {
            CliStore::File(store) => store.update(path, changes).await,
            CliStore::Rest(store) => store.update(path, changes).await,
        }
    }

    async fn remove(&self, path: &RecordPath) -> parish_core::Result<()> {
        match self {
            CliStore::File(store) => store.remove(path).await,
            CliStore::Rest(store) => store.remove(path).await,
        }
    }

    async fn get(&self, path: &RecordPath) -> parish_core::Result<Option<Value>> {
        match self {
            CliStore::File(store) => store.get(path).await,
            CliStore::Rest(store) => store.get(path).await,
        }
    }

    async fn list(&self, collection: Collection) -> parish_core::Result<Vec<(RecordId, Value)>> {
        match self {
            CliStore::File(store) => store.list(collection).await,
            CliStore::Rest(store) => store.list(collection).await,
        }
    }
}

/// The signed-in user together with an open store.
#[derive(Debug, Clone)]
pub struct CliSession {
    user: User,
    url: StoreUrl,
    token: Option<String>,
    store: CliStore,
}

impl CliSession {
    pub fn new(user: User, url: StoreUrl, token: Option<String>) -> Result<Self> {
        let store = CliStore::open(&url, token.clone())?;
        Ok(Self {
            user,
            url,
            token,
            store,
        })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn url(&self) -> &StoreUrl {
        &self.url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn store(&self) -> &CliStore {
        &self.store
    }
}

/// Load the saved session, letting `--store` and `--token` override it.
pub async fn require(args: &StoreArgs) -> Result<CliSession> {
    let Some(saved) = storage::load_session()
        .await
        .context("Failed to load session")?
    else {
        bail!("No active session. Run 'parish login' first.");
    };

    let (url, token) = resolve_target(args, saved.url(), saved.token())?;

    debug!(user = %saved.user().id, store = %url, "Loaded session");
    CliSession::new(saved.user().clone(), url, token)
}

/// Store URL and token for this invocation. The saved token only goes to
/// the store it was saved for.
fn resolve_target(
    args: &StoreArgs,
    saved_url: &StoreUrl,
    saved_token: Option<&str>,
) -> Result<(StoreUrl, Option<String>)> {
    let url = match &args.store {
        Some(url) => StoreUrl::new(url).context("Invalid store URL")?,
        None => saved_url.clone(),
    };
    let token = match &args.token {
        Some(token) => Some(token.clone()),
        None if &url == saved_url => saved_token.map(str::to_string),
        None => None,
    };
    Ok((url, token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(store: Option<&str>, token: Option<&str>) -> StoreArgs {
        StoreArgs {
            store: store.map(str::to_string),
            token: token.map(str::to_string),
        }
    }

    fn saved_url() -> StoreUrl {
        StoreUrl::new("https://parish-default-rtdb.firebaseio.com").unwrap()
    }

    #[test]
    fn saved_store_keeps_saved_token() {
        let (url, token) = resolve_target(&args(None, None), &saved_url(), Some("saved")).unwrap();
        assert_eq!(url, saved_url());
        assert_eq!(token.as_deref(), Some("saved"));

        let same = args(Some("https://parish-default-rtdb.firebaseio.com"), None);
        let (_, token) = resolve_target(&same, &saved_url(), Some("saved")).unwrap();
        assert_eq!(token.as_deref(), Some("saved"));
    }

    #[test]
    fn other_store_does_not_get_saved_token() {
        let other = args(Some("https://elsewhere.firebaseio.com"), None);
        let (url, token) = resolve_target(&other, &saved_url(), Some("saved")).unwrap();
        assert_eq!(url.as_str(), "https://elsewhere.firebaseio.com/");
        assert_eq!(token, None);
    }

    #[test]
    fn explicit_token_always_wins() {
        let other = args(Some("https://elsewhere.firebaseio.com"), Some("given"));
        let (_, token) = resolve_target(&other, &saved_url(), Some("saved")).unwrap();
        assert_eq!(token.as_deref(), Some("given"));

        let (_, token) = resolve_target(&args(None, Some("given")), &saved_url(), Some("saved")).unwrap();
        assert_eq!(token.as_deref(), Some("given"));
    }
}
