//! Minimal embedding example for ghlogin-core
//!
//! Wires the login manager and the connection registry against in-process
//! fakes: a host client that raises a two-factor challenge (answered after
//! one resend) and a non-interactive challenge handler. A real embedder
//! would substitute an HTTP client and a prompt that asks the user.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use ghlogin_core::{
    ConnectionEvent, ConnectionManager, CredentialStore, Credentials, HostAddress, LoginConfig,
    LoginManager, MemoryConnectionCache, MemoryLoginCache,
    connection::ConnectionDetails,
    traits::{
        Authorization, ChallengeResponse, HostClient, NewAuthorization, TwoFactorChallenge,
        TwoFactorChallengeHandler, TwoFactorType, UserIdentity,
    },
};
use tokio_stream::StreamExt;

/// The one-time code the demo host expects
const DEMO_OTP: &str = "123456";

/// A host client that requires a one-time code for every authorization
struct DemoHostClient {
    credentials: CredentialStore,
    challenges_raised: AtomicUsize,
}

impl DemoHostClient {
    fn new(credentials: CredentialStore) -> Self {
        Self {
            credentials,
            challenges_raised: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl HostClient for DemoHostClient {
    async fn create_authorization(
        &self,
        _client_id: &str,
        _client_secret: &str,
        _request: &NewAuthorization,
        otp_code: Option<&str>,
    ) -> Result<Authorization, ghlogin_core::Error> {
        match otp_code {
            Some(DEMO_OTP) => Ok(Authorization::new("demo-token-123abc")),
            Some(_) => Err(ghlogin_core::Error::authentication("one-time code rejected")),
            None => {
                let raised = self.challenges_raised.fetch_add(1, Ordering::SeqCst) + 1;
                println!("[Host] one-time code required (challenge #{raised})");
                Err(ghlogin_core::Error::TwoFactorRequired(TwoFactorChallenge::new(
                    TwoFactorType::AuthenticatorApp,
                )))
            }
        }
    }

    async fn current_user(&self) -> Result<UserIdentity, ghlogin_core::Error> {
        match self.credentials.get_credentials().await {
            Credentials::Basic { user_name, .. } => Ok(UserIdentity::new(user_name)),
            Credentials::Anonymous => Err(ghlogin_core::Error::authentication(
                "no credentials cached for this host",
            )),
        }
    }
}

/// A handler that asks for one resend, then supplies the code
struct DemoChallengeHandler {
    challenges_seen: AtomicUsize,
}

impl DemoChallengeHandler {
    fn new() -> Self {
        Self {
            challenges_seen: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl TwoFactorChallengeHandler for DemoChallengeHandler {
    async fn handle_challenge(
        &self,
        _client: &dyn HostClient,
        challenge: &TwoFactorChallenge,
    ) -> Result<Option<ChallengeResponse>, ghlogin_core::Error> {
        let seen = self.challenges_seen.fetch_add(1, Ordering::SeqCst);
        if seen == 0 {
            println!("[Handler] {:?} challenge, asking for a resend", challenge.kind);
            Ok(Some(ChallengeResponse::ResendRequested))
        } else {
            println!("[Handler] supplying code {DEMO_OTP}");
            Ok(Some(ChallengeResponse::AuthenticationCode(DEMO_OTP.into())))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== Embedded ghlogin-core Example ===\n");

    let login_cache = Arc::new(MemoryLoginCache::new());
    let connection_cache = Arc::new(MemoryConnectionCache::with_connections(vec![
        ConnectionDetails::new(HostAddress::create("ghe.io"), "bar"),
    ]));

    let connection_manager = Arc::new(ConnectionManager::new(connection_cache));

    // Print registry notifications as they arrive.
    let mut events = connection_manager.event_stream();
    let printer = tokio::spawn(async move {
        while let Some(Ok(event)) = events.next().await {
            match event {
                ConnectionEvent::Added(batch) => {
                    for c in batch {
                        println!("[Registry] added {} ({})", c.host_address.web_uri(), c.user_name);
                    }
                }
                ConnectionEvent::Removed(batch) => {
                    for c in batch {
                        println!("[Registry] removed {}", c.host_address.web_uri());
                    }
                }
            }
        }
    });

    connection_manager.initialize().await;

    let login_manager = LoginManager::new(
        login_cache.clone(),
        Arc::new(DemoChallengeHandler::new()),
        LoginConfig::new("demo-client-id", "demo-client-secret").with_note("embedded_login demo"),
    )?;

    let host = HostAddress::github_com();
    let client = DemoHostClient::new(CredentialStore::new(host.clone(), login_cache.clone()));

    let identity = login_manager
        .login(&host, &client, "foo", "hunter2")
        .await?;
    println!("[Login] authenticated as {}", identity.login);

    connection_manager.add(host.clone(), &identity.login).await?;

    // A later session: the cached token is enough.
    let identity = login_manager.login_from_cache(&host, &client).await?;
    println!("[Login] restored session for {}", identity.login);

    // Log out again and drop the registration.
    login_manager.logout(&host).await?;
    connection_manager.remove(&host).await?;

    // Give the printer a moment to drain before exiting.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    printer.abort();

    Ok(())
}
