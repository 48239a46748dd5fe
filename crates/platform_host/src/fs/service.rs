//! Remote file-store service contracts.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use super::types::{FsError, RemoteEntry, RemoteEntryKind, RemoteListing};

/// Object-safe boxed future used by [`RemoteFsService`] async methods.
pub type RemoteFsFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for the remote hierarchical file store.
///
/// Mutating operations are fire-and-forget from the shell's point of view: the visible tree only
/// changes once the push channel confirms the mutation or an explicit refresh runs. The contract
/// therefore only reports success or a typed failure and never returns updated tree state.
pub trait RemoteFsService {
    /// Lists the direct children of a directory.
    fn list_dir<'a>(&'a self, path: &'a str) -> RemoteFsFuture<'a, Result<RemoteListing, FsError>>;

    /// Creates a text file at `path`.
    fn create_file<'a>(
        &'a self,
        path: &'a str,
        content: &'a str,
    ) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>>;

    /// Creates a directory at `path`.
    fn create_dir<'a>(&'a self, path: &'a str) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>>;

    /// Renames the entry at `path` to `new_name` within its parent directory.
    fn rename<'a>(
        &'a self,
        path: &'a str,
        new_name: &'a str,
    ) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>>;

    /// Moves the entry at `path` into `dest_dir`.
    fn move_entry<'a>(
        &'a self,
        path: &'a str,
        dest_dir: &'a str,
    ) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>>;

    /// Moves the entry at `path` to the trash.
    fn trash<'a>(&'a self, path: &'a str) -> RemoteFsFuture<'a, Result<(), FsError>>;

    /// Permanently removes everything in the trash.
    fn empty_trash<'a>(&'a self) -> RemoteFsFuture<'a, Result<(), FsError>>;

    /// Retrieves metadata for a single path.
    fn stat<'a>(&'a self, path: &'a str) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>>;

    /// Uploads a file into `dir` under `file_name`.
    fn upload<'a>(
        &'a self,
        dir: &'a str,
        file_name: &'a str,
        bytes: &'a [u8],
    ) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op file-store adapter for unsupported targets and baseline tests.
pub struct NoopRemoteFsService;

impl NoopRemoteFsService {
    fn unavailable(op: &str) -> FsError {
        FsError::Network(format!("file store unavailable: {op}"))
    }
}

impl RemoteFsService for NoopRemoteFsService {
    fn list_dir<'a>(&'a self, _path: &'a str) -> RemoteFsFuture<'a, Result<RemoteListing, FsError>> {
        Box::pin(async { Err(Self::unavailable("list_dir")) })
    }

    fn create_file<'a>(
        &'a self,
        _path: &'a str,
        _content: &'a str,
    ) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>> {
        Box::pin(async { Err(Self::unavailable("create_file")) })
    }

    fn create_dir<'a>(&'a self, _path: &'a str) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>> {
        Box::pin(async { Err(Self::unavailable("create_dir")) })
    }

    fn rename<'a>(
        &'a self,
        _path: &'a str,
        _new_name: &'a str,
    ) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>> {
        Box::pin(async { Err(Self::unavailable("rename")) })
    }

    fn move_entry<'a>(
        &'a self,
        _path: &'a str,
        _dest_dir: &'a str,
    ) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>> {
        Box::pin(async { Err(Self::unavailable("move_entry")) })
    }

    fn trash<'a>(&'a self, _path: &'a str) -> RemoteFsFuture<'a, Result<(), FsError>> {
        Box::pin(async { Err(Self::unavailable("trash")) })
    }

    fn empty_trash<'a>(&'a self) -> RemoteFsFuture<'a, Result<(), FsError>> {
        Box::pin(async { Err(Self::unavailable("empty_trash")) })
    }

    fn stat<'a>(&'a self, _path: &'a str) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>> {
        Box::pin(async { Err(Self::unavailable("stat")) })
    }

    fn upload<'a>(
        &'a self,
        _dir: &'a str,
        _file_name: &'a str,
        _bytes: &'a [u8],
    ) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>> {
        Box::pin(async { Err(Self::unavailable("upload")) })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One call issued against a [`RecordingFsService`].
pub enum RecordedFsCall {
    /// `list_dir(path)`.
    ListDir(String),
    /// `create_file(path)` (content omitted).
    CreateFile(String),
    /// `create_dir(path)`.
    CreateDir(String),
    /// `rename(path, new_name)`.
    Rename(String, String),
    /// `move_entry(path, dest_dir)`.
    Move(String, String),
    /// `trash(path)`.
    Trash(String),
    /// `empty_trash()`.
    EmptyTrash,
    /// `stat(path)`.
    Stat(String),
    /// `upload(dir, file_name)`.
    Upload(String, String),
}

#[derive(Debug, Clone, Default)]
/// Scripted file-store double that records every issued call.
///
/// Mutations succeed with a synthetic entry unless a failure has been scripted with
/// [`RecordingFsService::fail_next`]. Tests use the recorded call log to assert that a gesture
/// did (or did not) reach the network boundary.
pub struct RecordingFsService {
    calls: Rc<RefCell<Vec<RecordedFsCall>>>,
    next_error: Rc<RefCell<Option<FsError>>>,
}

impl RecordingFsService {
    /// Returns a snapshot of the calls issued so far.
    pub fn calls(&self) -> Vec<RecordedFsCall> {
        self.calls.borrow().clone()
    }

    /// Scripts the next operation to fail with `error`.
    pub fn fail_next(&self, error: FsError) {
        *self.next_error.borrow_mut() = Some(error);
    }

    fn record(&self, call: RecordedFsCall) -> Result<(), FsError> {
        self.calls.borrow_mut().push(call);
        match self.next_error.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn synthetic_entry(path: &str, kind: RemoteEntryKind) -> RemoteEntry {
        RemoteEntry {
            name: super::path::basename(path).to_string(),
            path: path.to_string(),
            kind,
            size: None,
            modified_at_unix_ms: None,
            child_count: None,
        }
    }
}

impl RemoteFsService for RecordingFsService {
    fn list_dir<'a>(&'a self, path: &'a str) -> RemoteFsFuture<'a, Result<RemoteListing, FsError>> {
        Box::pin(async move {
            self.record(RecordedFsCall::ListDir(path.to_string()))?;
            Ok(RemoteListing {
                path: path.to_string(),
                entries: Vec::new(),
            })
        })
    }

    fn create_file<'a>(
        &'a self,
        path: &'a str,
        _content: &'a str,
    ) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>> {
        Box::pin(async move {
            self.record(RecordedFsCall::CreateFile(path.to_string()))?;
            Ok(Self::synthetic_entry(path, RemoteEntryKind::File))
        })
    }

    fn create_dir<'a>(&'a self, path: &'a str) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>> {
        Box::pin(async move {
            self.record(RecordedFsCall::CreateDir(path.to_string()))?;
            Ok(Self::synthetic_entry(path, RemoteEntryKind::Directory))
        })
    }

    fn rename<'a>(
        &'a self,
        path: &'a str,
        new_name: &'a str,
    ) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>> {
        Box::pin(async move {
            self.record(RecordedFsCall::Rename(
                path.to_string(),
                new_name.to_string(),
            ))?;
            let renamed = match super::path::parent_path(path) {
                Some(parent) => super::path::join_path(&parent, new_name),
                None => new_name.to_string(),
            };
            Ok(Self::synthetic_entry(&renamed, RemoteEntryKind::File))
        })
    }

    fn move_entry<'a>(
        &'a self,
        path: &'a str,
        dest_dir: &'a str,
    ) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>> {
        Box::pin(async move {
            self.record(RecordedFsCall::Move(path.to_string(), dest_dir.to_string()))?;
            let moved = super::path::join_path(dest_dir, super::path::basename(path));
            Ok(Self::synthetic_entry(&moved, RemoteEntryKind::File))
        })
    }

    fn trash<'a>(&'a self, path: &'a str) -> RemoteFsFuture<'a, Result<(), FsError>> {
        Box::pin(async move { self.record(RecordedFsCall::Trash(path.to_string())) })
    }

    fn empty_trash<'a>(&'a self) -> RemoteFsFuture<'a, Result<(), FsError>> {
        Box::pin(async move { self.record(RecordedFsCall::EmptyTrash) })
    }

    fn stat<'a>(&'a self, path: &'a str) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>> {
        Box::pin(async move {
            self.record(RecordedFsCall::Stat(path.to_string()))?;
            Ok(Self::synthetic_entry(path, RemoteEntryKind::Directory))
        })
    }

    fn upload<'a>(
        &'a self,
        dir: &'a str,
        file_name: &'a str,
        _bytes: &'a [u8],
    ) -> RemoteFsFuture<'a, Result<RemoteEntry, FsError>> {
        Box::pin(async move {
            self.record(RecordedFsCall::Upload(
                dir.to_string(),
                file_name.to_string(),
            ))?;
            let path = super::path::join_path(dir, file_name);
            Ok(Self::synthetic_entry(&path, RemoteEntryKind::File))
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn noop_remote_fs_service_fails_every_operation() {
        let fs = NoopRemoteFsService;
        let fs_obj: &dyn RemoteFsService = &fs;

        let err = block_on(fs_obj.list_dir("Desktop")).expect_err("list should fail");
        assert!(err.to_string().contains("list_dir"));
        let err = block_on(fs_obj.empty_trash()).expect_err("empty trash should fail");
        assert!(matches!(err, FsError::Network(_)));
    }

    #[test]
    fn recording_service_logs_calls_and_replays_scripted_failure() {
        let fs = RecordingFsService::default();

        block_on(fs.create_dir("work/Notes")).expect("create dir");
        fs.fail_next(FsError::Conflict {
            name: "Notes".to_string(),
        });
        let err = block_on(fs.move_entry("Notes", "work")).expect_err("scripted failure");
        assert!(matches!(err, FsError::Conflict { .. }));

        assert_eq!(
            fs.calls(),
            vec![
                RecordedFsCall::CreateDir("work/Notes".to_string()),
                RecordedFsCall::Move("Notes".to_string(), "work".to_string()),
            ]
        );
    }

    #[test]
    fn recording_move_reports_destination_entry_path() {
        let fs = RecordingFsService::default();
        let entry = block_on(fs.move_entry("Desktop/a/x.md", "Desktop/b")).expect("move");
        assert_eq!(entry.path, "Desktop/b/x.md");
    }
}
