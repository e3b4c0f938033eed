// # File caches
//
// File-based implementations of ConnectionCache and LoginCache.
//
// Both write atomically (temp file + rename) so a crash mid-write never
// leaves a half-written cache behind. Reads degrade: a missing or
// unparseable file is logged and treated as empty rather than failing the
// caller.
//
// ## Connection cache format
//
// ```json
// {
//   "connections": [
//     { "hostUrl": "https://github.com/", "userName": "foo" }
//   ]
// }
// ```
//
// ## Login cache format
//
// ```json
// {
//   "logins": {
//     "github.com/": { "userName": "foo", "secret": "..." }
//   }
// }
// ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use crate::Error;
use crate::connection::ConnectionDetails;
use crate::host::HostAddress;
use crate::traits::connection_cache::ConnectionCache;
use crate::traits::login_cache::{CachedLogin, LoginCache};

/// Write `contents` to `path` via a temp file and an atomic rename
async fn write_atomic(path: &Path, contents: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut temp = path.to_path_buf();
    temp.set_extension("tmp");

    {
        let mut file = fs::File::create(&temp).await?;
        file.write_all(contents.as_bytes()).await?;
        file.flush().await?;
    }

    fs::rename(&temp, path).await?;
    Ok(())
}

/// On-disk shape of the connection cache
#[derive(Debug, Serialize, Deserialize)]
struct ConnectionCacheFile {
    connections: Vec<ConnectionCacheEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectionCacheEntry {
    host_url: String,
    user_name: String,
}

impl ConnectionCacheEntry {
    fn from_connection(connection: &ConnectionDetails) -> Self {
        Self {
            host_url: connection.host_address.web_uri().to_string(),
            user_name: connection.user_name.clone(),
        }
    }

    fn into_connection(self) -> ConnectionDetails {
        ConnectionDetails::new(HostAddress::create(&self.host_url), self.user_name)
    }
}

/// JSON-file connection cache
///
/// Load failures are logged and yield an empty list; save failures are
/// logged and swallowed, so registry mutations never fail on a bad disk.
/// Entry order is preserved, and an unchanged load/save cycle reproduces
/// the file byte for byte.
#[derive(Debug, Clone)]
pub struct JsonConnectionCache {
    path: PathBuf,
}

impl JsonConnectionCache {
    /// Create a cache backed by the given file; no I/O happens until the
    /// first load or save
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ConnectionCache for JsonConnectionCache {
    async fn load(&self) -> Result<Vec<ConnectionDetails>, Error> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "connection cache file does not exist");
            return Ok(Vec::new());
        }

        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "failed to read connection cache");
                return Ok(Vec::new());
            }
        };

        match serde_json::from_str::<ConnectionCacheFile>(&contents) {
            Ok(data) => Ok(data
                .connections
                .into_iter()
                .map(ConnectionCacheEntry::into_connection)
                .collect()),
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "failed to parse connection cache");
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, connections: &[ConnectionDetails]) -> Result<(), Error> {
        let data = ConnectionCacheFile {
            connections: connections
                .iter()
                .map(ConnectionCacheEntry::from_connection)
                .collect(),
        };

        let json = match serde_json::to_string_pretty(&data) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "failed to serialize connection cache");
                return Ok(());
            }
        };

        if let Err(e) = write_atomic(&self.path, &json).await {
            error!(path = %self.path.display(), error = %e, "failed to write connection cache");
        }

        Ok(())
    }
}

/// On-disk shape of the login cache
#[derive(Debug, Default, Serialize, Deserialize)]
struct LoginCacheFile {
    logins: HashMap<String, LoginCacheEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginCacheEntry {
    user_name: String,
    secret: String,
}

/// JSON-file login cache
///
/// A plain-file secret store keyed by credential-cache key. Secrets are
/// stored unencrypted; embedders needing OS-native secret storage supply
/// their own [`LoginCache`] implementation instead.
#[derive(Debug)]
pub struct FileLoginCache {
    path: PathBuf,
    state: RwLock<HashMap<String, LoginCacheEntry>>,
}

impl FileLoginCache {
    /// Open (or create) a login cache backed by the given file
    ///
    /// An unparseable file is logged and treated as empty; only directory
    /// creation or unreadable-file I/O errors fail the open.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        let logins = if path.exists() {
            let contents = fs::read_to_string(&path).await?;
            match serde_json::from_str::<LoginCacheFile>(&contents) {
                Ok(data) => data.logins,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "login cache unparseable, starting empty");
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            state: RwLock::new(logins),
        })
    }

    async fn write_state(&self) -> Result<(), Error> {
        let data = LoginCacheFile {
            logins: self.state.read().await.clone(),
        };
        let json = serde_json::to_string_pretty(&data)?;
        write_atomic(&self.path, &json).await
    }
}

#[async_trait]
impl LoginCache for FileLoginCache {
    async fn get_login(&self, host: &HostAddress) -> Result<Option<CachedLogin>, Error> {
        let guard = self.state.read().await;
        Ok(guard
            .get(&host.credential_cache_key())
            .map(|entry| CachedLogin::new(entry.user_name.clone(), entry.secret.clone())))
    }

    async fn save_login(
        &self,
        user_name: &str,
        secret: &str,
        host: &HostAddress,
    ) -> Result<(), Error> {
        {
            let mut guard = self.state.write().await;
            guard.insert(
                host.credential_cache_key(),
                LoginCacheEntry {
                    user_name: user_name.to_string(),
                    secret: secret.to_string(),
                },
            );
        }
        self.write_state().await
    }

    async fn erase_login(&self, host: &HostAddress) -> Result<(), Error> {
        {
            let mut guard = self.state.write().await;
            guard.remove(&host.credential_cache_key());
        }
        self.write_state().await
    }
}
