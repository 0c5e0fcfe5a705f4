//! JSON flat-file implementation of the `ScoreStore` trait.
//!
//! The file holds a single JSON object mapping house name to points. Writes
//! go to a sibling `*.tmp` file which is flushed and then renamed over the
//! target, so readers only ever see a complete old or new mapping.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use house_points_core::error::DomainError;
use house_points_core::house::{House, HouseRegistry};
use house_points_core::store::{HouseScore, ScoreStore, Standings};

use crate::{checked_total, missing_counter};

type ScoreMap = BTreeMap<String, i64>;

/// File-backed score store.
///
/// The cached map always equals the last mapping successfully written to
/// disk. The async mutex serializes every read-modify-write.
#[derive(Debug)]
pub struct JsonFileScoreStore {
    path: PathBuf,
    registry: HouseRegistry,
    scores: Mutex<ScoreMap>,
}

impl JsonFileScoreStore {
    /// Creates a store persisting to `path`. Nothing is read until
    /// [`ScoreStore::initialize`] runs.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, registry: HouseRegistry) -> Self {
        Self {
            path: path.into(),
            registry,
            scores: Mutex::new(ScoreMap::new()),
        }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Option<ScoreMap>, DomainError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("read", &self.path, &e)),
        };

        let raw: ScoreMap = serde_json::from_slice(&bytes).map_err(|e| {
            DomainError::Persistence(format!("{} is not a score file: {e}", self.path.display()))
        })?;

        let mut scores = ScoreMap::new();
        for (key, points) in raw {
            let key = key.to_lowercase();
            if scores.insert(key.clone(), points).is_some() {
                warn!(house = %key, "score file lists a house twice; keeping the last value");
            }
        }
        Ok(Some(scores))
    }

    async fn write_atomic(&self, scores: &ScoreMap) -> Result<(), DomainError> {
        let body = serde_json::to_vec_pretty(scores)
            .map_err(|e| DomainError::Persistence(format!("score serialization failed: {e}")))?;
        let tmp = temp_path(&self.path);

        let result = write_and_rename(&tmp, &self.path, &body).await;
        if result.is_err() {
            // Best effort; the target file is untouched either way.
            let _ = tokio::fs::remove_file(&tmp).await;
        }
        result
    }
}

async fn write_and_rename(tmp: &Path, target: &Path, body: &[u8]) -> Result<(), DomainError> {
    let mut file = tokio::fs::File::create(tmp)
        .await
        .map_err(|e| io_error("create", tmp, &e))?;
    file.write_all(body)
        .await
        .map_err(|e| io_error("write", tmp, &e))?;
    file.sync_all()
        .await
        .map_err(|e| io_error("sync", tmp, &e))?;
    drop(file);

    tokio::fs::rename(tmp, target)
        .await
        .map_err(|e| io_error("replace", target, &e))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_else(|| "scores.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}

fn io_error(action: &str, path: &Path, err: &std::io::Error) -> DomainError {
    DomainError::Persistence(format!("failed to {action} {}: {err}", path.display()))
}

#[async_trait]
impl ScoreStore for JsonFileScoreStore {
    async fn initialize(&self) -> Result<(), DomainError> {
        let mut cached = self.scores.lock().await;

        let loaded = self.load().await?;
        let existed = loaded.is_some();
        let mut scores = loaded.unwrap_or_default();

        let mut added = Vec::new();
        for house in &self.registry {
            if !scores.contains_key(house.as_str()) {
                scores.insert(house.as_str().to_owned(), 0);
                added.push(house.as_str());
            }
        }

        let orphaned = scores
            .keys()
            .filter(|k| self.registry.resolve(k).is_none())
            .count();
        if orphaned > 0 {
            warn!(orphaned, "score file holds houses outside the registry; they are kept but ignored");
        }

        if !existed || !added.is_empty() {
            self.write_atomic(&scores).await?;
        }

        info!(path = %self.path.display(), created = !existed, added = ?added, "score file ready");
        *cached = scores;
        Ok(())
    }

    async fn get_all(&self) -> Result<Standings, DomainError> {
        let scores = self.scores.lock().await;
        self.registry
            .iter()
            .map(|house| {
                scores
                    .get(house.as_str())
                    .map(|&points| HouseScore {
                        house: house.clone(),
                        points,
                    })
                    .ok_or_else(|| missing_counter(house))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Standings)
    }

    async fn apply_delta(&self, house: &House, delta: i64) -> Result<i64, DomainError> {
        if !self.registry.contains(house) {
            return Err(DomainError::UnknownHouse(house.as_str().to_owned()));
        }

        let mut cached = self.scores.lock().await;
        let current = *cached.get(house.as_str()).ok_or_else(|| missing_counter(house))?;
        let updated = checked_total(house, current, delta)?;

        let mut next = cached.clone();
        next.insert(house.as_str().to_owned(), updated);
        self.write_atomic(&next).await?;
        *cached = next;

        debug!(house = %house, delta, total = updated, "score persisted");
        Ok(updated)
    }
}
