use crate::error::SourceError;
use crate::sources::traits::HotelSource;
use crate::sources::types::SessionPayload;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Key the search session is stored under
pub const SESSION_KEY: &str = "hotelSearchResults";

/// Session storage kept as a JSON object of key to value on disk.
///
/// Values may be stored either as JSON or as a JSON-encoded string, the
/// way browser session storage keeps them.
pub struct SessionFileSource {
    path: PathBuf,
}

impl SessionFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `payload` under the session key, keeping other keys intact
    pub async fn save(&self, payload: &SessionPayload) -> Result<()> {
        let mut storage = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => serde_json::from_str::<Map<String, Value>>(&text)
                .map_err(|e| SourceError::InvalidSession(e.to_string()))
                .with_context(|| {
                    format!("Refusing to overwrite unreadable session {}", self.path.display())
                })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                return Err(SourceError::Io(e))
                    .with_context(|| format!("Failed to read session {}", self.path.display()))
            }
        };
        storage.insert(SESSION_KEY.to_string(), serde_json::to_value(payload)?);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create session directory")?;
        }
        let json = serde_json::to_string_pretty(&storage)?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write session to {}", self.path.display()))?;
        debug!("Saved session with {} hotels", payload.hotels.len());
        Ok(())
    }
}

/// Extract the session payload from the storage document
pub fn parse_session(storage: &str) -> Result<SessionPayload, SourceError> {
    let storage: Map<String, Value> = serde_json::from_str(storage)
        .map_err(|e| SourceError::InvalidSession(e.to_string()))?;

    let value = storage
        .get(SESSION_KEY)
        .ok_or_else(|| SourceError::MissingSession(SESSION_KEY.to_string()))?;

    let payload: Result<SessionPayload, _> = match value {
        Value::String(encoded) => serde_json::from_str(encoded),
        other => serde_json::from_value(other.clone()),
    };
    payload.map_err(|e| SourceError::InvalidSession(e.to_string()))
}

#[async_trait]
impl HotelSource for SessionFileSource {
    async fn load(&self) -> Result<SessionPayload> {
        debug!("Reading session from {}", self.path.display());

        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::MissingSession(self.path.display().to_string()).into())
            }
            Err(e) => return Err(SourceError::Io(e).into()),
        };

        let payload = parse_session(&text)
            .with_context(|| format!("Failed to load session from {}", self.path.display()))?;

        info!(
            "Loaded session for {} with {} raw hotels",
            payload.search.location,
            payload.hotels.len()
        );
        Ok(payload)
    }

    fn source_name(&self) -> &'static str {
        "session-file"
    }
}
