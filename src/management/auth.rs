use std::path::PathBuf;

use async_trait::async_trait;

use crate::{config::Config, engine::FilterError, spotify, types::Token, utils};

/// Source of the user's Spotify credentials.
///
/// The engine never talks to this directly; callers turn it into an access
/// token with [`access_token`] before any work begins.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns the stored token, if any.
    async fn get(&self) -> Option<Token>;

    /// Exchanges an expired token for a fresh one and stores it.
    async fn refresh(&self, token: &Token) -> Result<Token, String>;
}

/// Returns a usable access token, refreshing it first when it has expired.
///
/// # Errors
///
/// [`FilterError::Unauthenticated`] when no token is stored or the refresh
/// is rejected.
pub async fn access_token<P>(provider: &P) -> Result<String, FilterError>
where
    P: CredentialProvider + ?Sized,
{
    let token = provider.get().await.ok_or_else(|| {
        FilterError::Unauthenticated("no stored token, please log in".to_string())
    })?;

    if !token.is_expired(utils::now_timestamp()) {
        return Ok(token.access_token);
    }

    provider
        .refresh(&token)
        .await
        .map(|fresh| fresh.access_token)
        .map_err(|e| FilterError::Unauthenticated(format!("token refresh failed: {}", e)))
}

/// Token cache stored as JSON in the local data directory.
pub struct TokenManager {
    config: Config,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            path: Self::token_path(),
        }
    }

    /// Uses a custom cache location instead of the data directory.
    pub fn with_path(config: Config, path: PathBuf) -> Self {
        Self { config, path }
    }

    pub async fn load(&self) -> Result<Token, String> {
        let content = async_fs::read_to_string(&self.path)
            .await
            .map_err(|e| e.to_string())?;
        serde_json::from_str(&content).map_err(|e| e.to_string())
    }

    pub async fn persist(&self, token: &Token) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(token).map_err(|e| e.to_string())?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Forgets the stored token. Succeeds when there was nothing to forget.
    pub async fn clear(&self) -> Result<(), String> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.to_string()),
        }
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("spotfilter/cache/token.json");
        path
    }
}

#[async_trait]
impl CredentialProvider for TokenManager {
    async fn get(&self) -> Option<Token> {
        self.load().await.ok()
    }

    async fn refresh(&self, token: &Token) -> Result<Token, String> {
        let fresh = spotify::auth::refresh_token(&self.config, &token.refresh_token).await?;
        self.persist(&fresh).await?;
        Ok(fresh)
    }
}
