//! Avatar image files.
//!
//! Contacts reference their avatar by path only. The bytes live in a private
//! directory under collision-free generated names, accessed through a
//! capability handle so that nothing outside that directory can be touched.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use thiserror::Error;
use uuid::Uuid;

use crate::contact::{domain::Contact, ports::ContactStore, services::ContactRepository};
use crate::error::RepositoryError;

/// Errors raised by [`AvatarStore`].
#[derive(Debug, Error)]
pub enum AvatarError {
    /// Filesystem access failed.
    #[error("avatar i/o failed for {path}: {source}")]
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The file extension is empty or not alphanumeric.
    #[error("invalid avatar file extension: {0:?}")]
    InvalidExtension(String),

    /// The path does not name a file inside the avatar directory.
    #[error("path is not managed by the avatar store: {0}")]
    Foreign(Utf8PathBuf),
}

/// Errors raised while attaching a new avatar to a contact.
#[derive(Debug, Error)]
pub enum AssignAvatarError {
    /// The image could not be written.
    #[error(transparent)]
    Avatar(#[from] AvatarError),

    /// The contact could not be updated; the new image has been discarded.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Directory of avatar images owned by the application.
#[derive(Debug)]
pub struct AvatarStore {
    root: Utf8PathBuf,
    dir: Dir,
}

impl AvatarStore {
    /// Opens the avatar directory at `root`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarError::Io`] if the directory cannot be created or
    /// opened.
    pub fn open(path: impl Into<Utf8PathBuf>) -> Result<Self, AvatarError> {
        let root = path.into();
        let io_err = |source| AvatarError::Io {
            path: root.clone(),
            source,
        };
        Dir::create_ambient_dir_all(&root, ambient_authority()).map_err(io_err)?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority()).map_err(io_err)?;
        Ok(Self { root, dir })
    }

    /// Returns the directory holding the avatars.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Writes image bytes under a fresh name and returns the full path to
    /// store on the contact.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarError::InvalidExtension`] for an unusable extension or
    /// [`AvatarError::Io`] if the write fails.
    pub fn save(&self, bytes: &[u8], extension: &str) -> Result<Utf8PathBuf, AvatarError> {
        let ext = extension.trim_start_matches('.');
        if ext.is_empty() || !ext.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            return Err(AvatarError::InvalidExtension(extension.to_owned()));
        }

        let file_name = format!("{}.{}", Uuid::new_v4(), ext.to_ascii_lowercase());
        let path = self.root.join(&file_name);
        self.dir
            .write(&file_name, bytes)
            .map_err(|source| AvatarError::Io {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(%path, size = bytes.len(), "avatar saved");
        Ok(path)
    }

    /// Reads back an avatar previously returned by [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns [`AvatarError::Foreign`] for paths outside the avatar
    /// directory or [`AvatarError::Io`] if the read fails.
    pub fn read(&self, path: &Utf8Path) -> Result<Vec<u8>, AvatarError> {
        let file_name = self.file_name_of(path)?;
        self.dir.read(file_name).map_err(|source| AvatarError::Io {
            path: path.to_owned(),
            source,
        })
    }

    /// Deletes an avatar. Returns `false` if it was already gone.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarError::Foreign`] for paths outside the avatar
    /// directory or [`AvatarError::Io`] if the removal fails.
    pub fn remove(&self, path: &Utf8Path) -> Result<bool, AvatarError> {
        let file_name = self.file_name_of(path)?;
        match self.dir.remove_file(file_name) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(AvatarError::Io {
                path: path.to_owned(),
                source,
            }),
        }
    }

    /// Removes an avatar whose contact no longer refers to it.
    ///
    /// The owning write has already happened, so failures are logged rather
    /// than returned.
    pub fn release(&self, path: &Utf8Path) {
        match self.remove(path) {
            Ok(true) => tracing::debug!(%path, "avatar removed"),
            Ok(false) => tracing::debug!(%path, "avatar already gone"),
            Err(error) => tracing::warn!(%error, %path, "avatar file left in place"),
        }
    }

    /// Saves `bytes` as the avatar of `contact` and updates the contact row.
    ///
    /// The previous avatar file is released once the row points at the new
    /// one. If the update fails, the new file is released instead and the
    /// contact keeps its old avatar.
    ///
    /// # Errors
    ///
    /// Returns [`AssignAvatarError::Avatar`] if the image cannot be saved or
    /// [`AssignAvatarError::Repository`] if the contact update fails.
    pub async fn assign<S>(
        &self,
        contacts: &ContactRepository<S>,
        contact: &Contact,
        bytes: &[u8],
        extension: &str,
    ) -> Result<Contact, AssignAvatarError>
    where
        S: ContactStore + 'static,
    {
        let saved = self.save(bytes, extension)?;
        let details = contact.details().clone().with_avatar_path(saved.as_str());
        let updated = contact.clone().with_details(details);

        if let Err(error) = contacts.update(&updated).await {
            self.release(&saved);
            return Err(error.into());
        }
        if let Some(previous) = contact.avatar_path() {
            self.release(Utf8Path::new(previous));
        }
        Ok(updated)
    }

    fn file_name_of<'a>(&self, path: &'a Utf8Path) -> Result<&'a str, AvatarError> {
        match (path.parent(), path.file_name()) {
            (Some(parent), Some(file_name)) if parent == self.root => Ok(file_name),
            _ => Err(AvatarError::Foreign(path.to_owned())),
        }
    }
}
