//! Test doubles and common utilities for contract tests
//!
//! Minimal doubles that record calls and replay scripted responses, so
//! tests can assert on exactly which collaborator operations a component
//! performed and in which order.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use ghlogin_core::connection::ConnectionDetails;
use ghlogin_core::error::Error;
use ghlogin_core::host::HostAddress;
use ghlogin_core::traits::{
    Authorization, CachedLogin, ChallengeResponse, ConnectionCache, HostClient, LoginCache,
    NewAuthorization, TwoFactorChallenge, TwoFactorChallengeHandler, UserIdentity,
};

/// A connection cache with a fixed load result that records every save
pub struct MockConnectionCache {
    preset: Vec<ConnectionDetails>,
    fail_load: bool,
    fail_save: bool,
    save_call_count: AtomicUsize,
    saved: Mutex<Vec<Vec<ConnectionDetails>>>,
}

impl MockConnectionCache {
    pub fn new() -> Self {
        Self::with_preset(Vec::new())
    }

    /// Cache whose `load` returns the given connections
    pub fn with_preset(preset: Vec<ConnectionDetails>) -> Self {
        Self {
            preset,
            fail_load: false,
            fail_save: false,
            save_call_count: AtomicUsize::new(0),
            saved: Mutex::new(Vec::new()),
        }
    }

    /// Cache whose `load` always fails
    pub fn failing_load() -> Self {
        Self {
            fail_load: true,
            ..Self::new()
        }
    }

    /// Make every `save` fail
    pub fn with_failing_save(mut self) -> Self {
        self.fail_save = true;
        self
    }

    pub fn save_call_count(&self) -> usize {
        self.save_call_count.load(Ordering::SeqCst)
    }

    /// The connections passed to the most recent `save`
    pub fn last_saved(&self) -> Option<Vec<ConnectionDetails>> {
        self.saved.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ConnectionCache for MockConnectionCache {
    async fn load(&self) -> Result<Vec<ConnectionDetails>, Error> {
        if self.fail_load {
            return Err(Error::connection_cache("cache unavailable"));
        }
        Ok(self.preset.clone())
    }

    async fn save(&self, connections: &[ConnectionDetails]) -> Result<(), Error> {
        self.save_call_count.fetch_add(1, Ordering::SeqCst);
        self.saved.lock().unwrap().push(connections.to_vec());
        if self.fail_save {
            return Err(Error::connection_cache("disk full"));
        }
        Ok(())
    }
}

/// A login cache that stores logins in memory and records every write
pub struct MockLoginCache {
    state: Mutex<HashMap<String, CachedLogin>>,
    saved_logins: Mutex<Vec<(String, String, String)>>,
    erased_keys: Mutex<Vec<String>>,
}

impl MockLoginCache {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HashMap::new()),
            saved_logins: Mutex::new(Vec::new()),
            erased_keys: Mutex::new(Vec::new()),
        }
    }

    /// Every `(user_name, secret, credential_cache_key)` saved, in order
    pub fn saved_logins(&self) -> Vec<(String, String, String)> {
        self.saved_logins.lock().unwrap().clone()
    }

    /// Every credential-cache key erased, in order
    pub fn erased_keys(&self) -> Vec<String> {
        self.erased_keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl LoginCache for MockLoginCache {
    async fn get_login(&self, host: &HostAddress) -> Result<Option<CachedLogin>, Error> {
        let state = self.state.lock().unwrap();
        Ok(state.get(&host.credential_cache_key()).cloned())
    }

    async fn save_login(
        &self,
        user_name: &str,
        secret: &str,
        host: &HostAddress,
    ) -> Result<(), Error> {
        let key = host.credential_cache_key();
        self.saved_logins.lock().unwrap().push((
            user_name.to_string(),
            secret.to_string(),
            key.clone(),
        ));
        self.state
            .lock()
            .unwrap()
            .insert(key, CachedLogin::new(user_name, secret));
        Ok(())
    }

    async fn erase_login(&self, host: &HostAddress) -> Result<(), Error> {
        let key = host.credential_cache_key();
        self.erased_keys.lock().unwrap().push(key.clone());
        self.state.lock().unwrap().remove(&key);
        Ok(())
    }
}

/// A host client replaying scripted authorization responses
///
/// Requests without a one-time code pop from the `plain` queue, requests
/// with one pop from the `coded` queue; an exhausted queue is a test
/// scripting error.
pub struct ScriptedHostClient {
    plain: Mutex<VecDeque<Result<Authorization, Error>>>,
    coded: Mutex<VecDeque<Result<Authorization, Error>>>,
    plain_call_count: AtomicUsize,
    coded_call_count: AtomicUsize,
    requests: Mutex<Vec<NewAuthorization>>,
    codes: Mutex<Vec<String>>,
    identity: UserIdentity,
    current_user_call_count: AtomicUsize,
}

impl ScriptedHostClient {
    pub fn new(identity: UserIdentity) -> Self {
        Self {
            plain: Mutex::new(VecDeque::new()),
            coded: Mutex::new(VecDeque::new()),
            plain_call_count: AtomicUsize::new(0),
            coded_call_count: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            codes: Mutex::new(Vec::new()),
            identity,
            current_user_call_count: AtomicUsize::new(0),
        }
    }

    /// Script the next response to a request without a code
    pub fn push_plain(&self, response: Result<Authorization, Error>) {
        self.plain.lock().unwrap().push_back(response);
    }

    /// Script the next response to a request carrying a code
    pub fn push_coded(&self, response: Result<Authorization, Error>) {
        self.coded.lock().unwrap().push_back(response);
    }

    pub fn plain_call_count(&self) -> usize {
        self.plain_call_count.load(Ordering::SeqCst)
    }

    pub fn coded_call_count(&self) -> usize {
        self.coded_call_count.load(Ordering::SeqCst)
    }

    pub fn current_user_call_count(&self) -> usize {
        self.current_user_call_count.load(Ordering::SeqCst)
    }

    /// Every authorization request received, in order
    pub fn requests(&self) -> Vec<NewAuthorization> {
        self.requests.lock().unwrap().clone()
    }

    /// Every one-time code received, in order
    pub fn codes(&self) -> Vec<String> {
        self.codes.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostClient for ScriptedHostClient {
    async fn create_authorization(
        &self,
        _client_id: &str,
        _client_secret: &str,
        request: &NewAuthorization,
        otp_code: Option<&str>,
    ) -> Result<Authorization, Error> {
        self.requests.lock().unwrap().push(request.clone());

        match otp_code {
            Some(code) => {
                self.coded_call_count.fetch_add(1, Ordering::SeqCst);
                self.codes.lock().unwrap().push(code.to_string());
                self.coded
                    .lock()
                    .unwrap()
                    .pop_front()
                    .unwrap_or_else(|| panic!("unscripted coded authorization request"))
            }
            None => {
                self.plain_call_count.fetch_add(1, Ordering::SeqCst);
                self.plain
                    .lock()
                    .unwrap()
                    .pop_front()
                    .unwrap_or_else(|| panic!("unscripted authorization request"))
            }
        }
    }

    async fn current_user(&self) -> Result<UserIdentity, Error> {
        self.current_user_call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.identity.clone())
    }
}

/// A challenge handler replaying scripted responses
pub struct MockChallengeHandler {
    responses: Mutex<VecDeque<Option<ChallengeResponse>>>,
    call_count: AtomicUsize,
}

impl MockChallengeHandler {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Script the next challenge response (`None` models a handler that
    /// produced no outcome)
    pub fn push_response(&self, response: Option<ChallengeResponse>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TwoFactorChallengeHandler for MockChallengeHandler {
    async fn handle_challenge(
        &self,
        _client: &dyn HostClient,
        _challenge: &TwoFactorChallenge,
    ) -> Result<Option<ChallengeResponse>, Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let response = self.responses.lock().unwrap().pop_front();
        Ok(response.unwrap_or_else(|| panic!("unscripted two-factor challenge")))
    }
}
