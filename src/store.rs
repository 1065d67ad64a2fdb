// src/store.rs

//! Flat-file persistence: one pretty-printed JSON array per resource.
//!
//! Every file is owned by a [`JsonFile`] handle holding an async mutex, and
//! each read-modify-write runs under that mutex, so concurrent requests in
//! this process cannot lose each other's updates. New contents are written to
//! a sibling `.tmp` file and renamed into place.
//!
//! A missing or blank file reads as an empty list. A file that exists but
//! does not parse is reported as [`StoreError::Malformed`] instead of being
//! silently treated as empty, so a later write cannot clobber it.

use std::{
    io::ErrorKind,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tokio::{fs, sync::Mutex};

use crate::models::{
    attendance::AttendanceRecord,
    notification::Notification,
    quiz::Quiz,
    score::Score,
    user::{Role, UserCredential},
    vote::{Candidate, Vote, VoteSession},
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Handle to a single JSON array file.
#[derive(Debug)]
pub struct JsonFile<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole array.
    pub async fn load(&self) -> Result<Vec<T>, StoreError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    pub async fn append(&self, item: T) -> Result<(), StoreError> {
        self.update(|items| {
            items.push(item);
            Ok::<_, StoreError>(())
        })
        .await
    }

    /// Replaces the whole array.
    pub async fn replace(&self, items: Vec<T>) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        self.write(&items).await
    }

    /// Loads the array, hands it to `f`, and writes it back if `f` succeeds.
    ///
    /// When `f` returns an error the file is left untouched.
    pub async fn update<R, E, F>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, E>,
        E: From<StoreError>,
    {
        let _guard = self.lock.lock().await;
        let mut items = self.read().await?;
        let out = f(&mut items)?;
        self.write(&items).await?;
        Ok(out)
    }

    async fn read(&self) -> Result<Vec<T>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|source| {
            tracing::error!("Refusing to read {}: {}", self.path.display(), source);
            StoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })
    }

    async fn write(&self, items: &[T]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(items).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        fs::write(&tmp, json).await.map_err(io_err)?;
        fs::rename(&tmp, &self.path).await.map_err(io_err)
    }
}

/// All resource files of the application.
#[derive(Debug)]
pub struct Stores {
    pub attendance: JsonFile<AttendanceRecord>,
    pub quizzes: JsonFile<Quiz>,
    pub scores: JsonFile<Score>,
    pub notifications: JsonFile<Notification>,
    pub students: JsonFile<UserCredential>,
    pub teachers: JsonFile<UserCredential>,
    pub sessions: JsonFile<VoteSession>,
    pub candidates: JsonFile<Candidate>,
    pub votes: JsonFile<Vote>,
}

impl Stores {
    /// Opens the resource files under `data_dir`. Files are created lazily on
    /// first write.
    pub fn open(data_dir: &Path) -> Self {
        Self {
            attendance: JsonFile::new(data_dir.join("attendance.json")),
            quizzes: JsonFile::new(data_dir.join("quizzes.json")),
            scores: JsonFile::new(data_dir.join("scores.json")),
            notifications: JsonFile::new(data_dir.join("notifications.json")),
            students: JsonFile::new(data_dir.join("studentlogin.json")),
            teachers: JsonFile::new(data_dir.join("teacherlogin.json")),
            sessions: JsonFile::new(data_dir.join("votingSessions.json")),
            candidates: JsonFile::new(data_dir.join("candidates.json")),
            votes: JsonFile::new(data_dir.join("votes.json")),
        }
    }

    /// Credential file for the given role.
    pub fn users(&self, role: Role) -> &JsonFile<UserCredential> {
        match role {
            Role::Student => &self.students,
            Role::Teacher => &self.teachers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: u32,
    }

    async fn temp_file() -> (PathBuf, JsonFile<Item>) {
        let dir = std::env::temp_dir().join(format!("edutrack-store-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("items.json");
        (dir, JsonFile::new(path))
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let (_dir, file) = temp_file().await;
        assert!(file.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_then_load() {
        let (_dir, file) = temp_file().await;
        file.append(Item { id: 1 }).await.unwrap();
        file.append(Item { id: 2 }).await.unwrap();
        assert_eq!(file.load().await.unwrap(), vec![Item { id: 1 }, Item { id: 2 }]);
    }

    #[tokio::test]
    async fn malformed_file_fails_loud_and_is_preserved() {
        let (_dir, file) = temp_file().await;
        fs::write(file.path(), b"{ not json").await.unwrap();

        assert!(matches!(file.load().await, Err(StoreError::Malformed { .. })));
        assert!(file.append(Item { id: 1 }).await.is_err());

        let raw = fs::read(file.path()).await.unwrap();
        assert_eq!(raw, b"{ not json");
    }

    #[tokio::test]
    async fn failed_update_leaves_file_untouched() {
        let (_dir, file) = temp_file().await;
        file.append(Item { id: 1 }).await.unwrap();

        let result: Result<(), StoreError> = file
            .update(|items| {
                items.clear();
                Err(StoreError::Io {
                    path: PathBuf::from("x"),
                    source: std::io::Error::other("abort"),
                })
            })
            .await;

        assert!(result.is_err());
        assert_eq!(file.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_appends_are_not_lost() {
        let (_dir, file) = temp_file().await;
        let file = Arc::new(file);

        let tasks: Vec<_> = (0..25)
            .map(|id| {
                let file = file.clone();
                tokio::spawn(async move { file.append(Item { id }).await })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(file.load().await.unwrap().len(), 25);
    }
}
