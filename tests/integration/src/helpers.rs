//! Test helpers for integration tests
//!
//! Spawns the full Axum application over the in-memory storage backend
//! and provides HTTP request utilities plus direct handles to the
//! repositories for seeding and inspection.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use clipvote_api::{create_app, AppState};
use clipvote_common::{AppConfig, JwtService};
use clipvote_core::entities::Clip;
use clipvote_core::traits::{ClipRepository, SettingsProvider};
use clipvote_core::Handle;
use clipvote_db::{
    MemClipRepository, MemRateLimitRepository, MemVoteStore, MemVoterProfileRepository,
    StaticSettingsProvider,
};
use clipvote_service::ServiceContext;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    clip_repo: Arc<MemClipRepository>,
    profile_repo: Arc<MemVoterProfileRepository>,
    jwt: Arc<JwtService>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a test server with the default configuration
    pub async fn start() -> Result<Self> {
        Self::start_with(crate::fixtures::test_app_config(), None).await
    }

    /// Start a test server with a custom configuration
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        Self::start_with(config, None).await
    }

    /// Start a test server with a custom settings provider
    pub async fn start_with_settings(
        config: AppConfig,
        settings: Arc<dyn SettingsProvider>,
    ) -> Result<Self> {
        Self::start_with(config, Some(settings)).await
    }

    async fn start_with(
        config: AppConfig,
        settings: Option<Arc<dyn SettingsProvider>>,
    ) -> Result<Self> {
        let clip_repo = Arc::new(MemClipRepository::new());
        let vote_store = Arc::new(MemVoteStore::new());
        let profile_repo = Arc::new(MemVoterProfileRepository::new());
        let rate_limit_repo = Arc::new(MemRateLimitRepository::new());
        let settings_provider =
            settings.unwrap_or_else(|| Arc::new(StaticSettingsProvider::enabled()));
        let jwt = Arc::new(JwtService::new(&config.jwt.secret, config.jwt.token_expiry));

        let service_context = ServiceContext::new(
            clip_repo.clone(),
            vote_store,
            profile_repo.clone(),
            rate_limit_repo,
            settings_provider,
            jwt.clone(),
            config.vote_limits,
            config.heuristic,
            config.settings_cache,
        );

        let app = create_app(AppState::new(service_context, config));

        // Bind port 0 and read back the assigned address
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            clip_repo,
            profile_repo,
            jwt,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Direct handle to the clip repository for seeding
    pub fn clip_repo(&self) -> &MemClipRepository {
        &self.clip_repo
    }

    /// Direct handle to the voter profile repository for inspection
    pub fn profile_repo(&self) -> &MemVoterProfileRepository {
        &self.profile_repo
    }

    /// Seed a clip into the given channel
    pub async fn seed_clip(&self, channel: &str, clip_id: &str, seq: i64) -> Result<Handle> {
        let channel = Handle::parse(channel)?;
        let clip = Clip::new(
            channel.clone(),
            clip_id.to_string(),
            seq,
            format!("clip {seq}"),
        );
        self.clip_repo.create(&clip).await?;
        Ok(channel)
    }

    /// Mint a viewer token
    pub fn voter_token(&self, voter: &str) -> Result<String> {
        let voter = Handle::parse(voter)?;
        Ok(self.jwt.issue_token(&voter, false)?)
    }

    /// Mint an admin token
    pub fn admin_token(&self, admin: &str) -> Result<String> {
        let admin = Handle::parse(admin)?;
        Ok(self.jwt.issue_token(&admin, true)?)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?)
    }

    /// Make a POST request with auth token and JSON body
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", token))
            .json(body)
            .send()
            .await?)
    }

    /// Make a bodyless POST request with auth token
    pub async fn post_auth_empty(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?)
    }

    /// Submit a vote for a clip by sequence number
    pub async fn vote(
        &self,
        token: &str,
        channel: &str,
        clip: &str,
        vote: &str,
    ) -> Result<Response> {
        self.post_auth(
            &format!("/api/v1/channels/{channel}/clips/{clip}/vote"),
            token,
            &serde_json::json!({ "vote": vote }),
        )
        .await
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
