//! Response body resolution and response-file lookup.
//!
//! # Responsibilities
//! - Return the literal `X-Erised-Data` value untouched
//! - Locate `X-Erised-Response-File` under the search root (first match wins)
//! - Translate the lookup outcome into the status the response must carry
//!
//! # Design Decisions
//! - Traversal is depth-first, lexical by file name, so the first match is deterministic
//! - Only base names are compared; a name containing separators never matches
//! - The walk runs on the blocking pool so it only occupies its own request
//! - The lookup outcome replaces any caller status directive

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Bytes;
use axum::http::StatusCode;
use walkdir::WalkDir;

/// Directory searched for response files.
///
/// Fixed at startup and shared read-only between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRoot(Arc<PathBuf>);

impl SearchRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(Arc::new(path.into()))
    }

    /// Build the search root from a configured path.
    ///
    /// An empty path disables file lookup. Relative paths are anchored at `base`.
    pub fn from_config(path: &str, base: &Path) -> Option<Self> {
        if path.is_empty() {
            return None;
        }
        let path = Path::new(path);
        if path.is_absolute() {
            Some(Self::new(path))
        } else {
            Some(Self::new(base.join(path)))
        }
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Walk the root and read the first non-directory entry named `name`.
    ///
    /// Blocks the calling thread for the duration of the walk.
    pub fn search(&self, name: &str) -> SearchOutcome {
        let wanted = OsStr::new(name);

        for entry in WalkDir::new(self.path()).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::error!(
                        path = ?e.path().unwrap_or(self.path()),
                        error = %e,
                        "Invalid path"
                    );
                    return SearchOutcome::InvalidPath;
                }
            };

            if entry.file_type().is_dir() || entry.file_name() != wanted {
                tracing::trace!(file = %name, path = ?entry.path(), "Not a match");
                continue;
            }

            return match std::fs::read(entry.path()) {
                Ok(content) => {
                    tracing::info!(path = ?entry.path(), "Reading file");
                    SearchOutcome::Found(Bytes::from(content))
                }
                Err(e) => {
                    tracing::error!(path = ?entry.path(), error = %e, "Unable to open the file");
                    SearchOutcome::AccessError
                }
            };
        }

        tracing::debug!(file = %name, root = ?self.path(), "Response file not found");
        SearchOutcome::NotFound
    }

    /// Run [`search`](Self::search) on the blocking pool.
    pub async fn locate(&self, name: &str) -> SearchOutcome {
        let root = self.clone();
        let name = name.to_string();
        match tokio::task::spawn_blocking(move || root.search(&name)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Response file search aborted");
                SearchOutcome::AccessError
            }
        }
    }
}

/// Result of a single response-file lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// First match was read successfully.
    Found(Bytes),
    /// The walk finished without a match.
    NotFound,
    /// The walk hit a path it could not read.
    InvalidPath,
    /// A match was found but could not be read.
    AccessError,
}

impl SearchOutcome {
    pub fn status(&self) -> StatusCode {
        match self {
            SearchOutcome::Found(_) => StatusCode::OK,
            SearchOutcome::NotFound => StatusCode::NOT_FOUND,
            SearchOutcome::InvalidPath => StatusCode::BAD_REQUEST,
            SearchOutcome::AccessError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The body this outcome produces. Only `Found` has one.
    pub fn into_body(self) -> Bytes {
        match self {
            SearchOutcome::Found(content) => content,
            _ => Bytes::new(),
        }
    }
}

/// Where the response body comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodySource {
    /// `X-Erised-Data`, verbatim.
    Literal(Bytes),
    /// `X-Erised-Response-File` looked up under a configured root.
    File { root: SearchRoot, name: String },
}

impl BodySource {
    /// Pick the body source for a request.
    ///
    /// The file directive wins over literal data whenever it is non-empty and
    /// a root is configured.
    pub fn select(data: Bytes, response_file: &str, root: Option<&SearchRoot>) -> Self {
        match root {
            Some(root) if !response_file.is_empty() => BodySource::File {
                root: root.clone(),
                name: response_file.to_string(),
            },
            _ => BodySource::Literal(data),
        }
    }
}

/// Body bytes plus the status override produced by a file lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBody {
    pub status_override: Option<StatusCode>,
    pub content: Bytes,
}

/// Resolve the body for a request.
pub async fn resolve_body(source: &BodySource) -> ResolvedBody {
    match source {
        BodySource::Literal(data) => ResolvedBody {
            status_override: None,
            content: data.clone(),
        },
        BodySource::File { root, name } => {
            let outcome = root.locate(name).await;
            ResolvedBody {
                status_override: Some(outcome.status()),
                content: outcome.into_body(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/nested")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("a/nested/reply.json"), br#"{"from":"a"}"#).unwrap();
        fs::write(dir.path().join("b/reply.json"), br#"{"from":"b"}"#).unwrap();
        fs::write(dir.path().join("top.txt"), b"top").unwrap();
        dir
    }

    #[test]
    fn test_found_returns_raw_bytes() {
        let dir = tree();
        let root = SearchRoot::new(dir.path());
        let outcome = root.search("top.txt");
        assert_eq!(outcome, SearchOutcome::Found(Bytes::from_static(b"top")));
        assert_eq!(outcome.status(), StatusCode::OK);
    }

    #[test]
    fn test_first_match_in_lexical_order() {
        let dir = tree();
        let root = SearchRoot::new(dir.path());
        assert_eq!(
            root.search("reply.json").into_body(),
            Bytes::from_static(br#"{"from":"a"}"#)
        );
    }

    #[test]
    fn test_directories_never_match() {
        let dir = tree();
        let root = SearchRoot::new(dir.path());
        assert_eq!(root.search("nested"), SearchOutcome::NotFound);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tree();
        let outcome = SearchRoot::new(dir.path()).search("missing.json");
        assert_eq!(outcome, SearchOutcome::NotFound);
        assert_eq!(outcome.status(), StatusCode::NOT_FOUND);
        assert!(outcome.into_body().is_empty());
    }

    #[test]
    fn test_names_with_separators_never_match() {
        let dir = tree();
        let root = SearchRoot::new(dir.path());
        assert_eq!(root.search("b/reply.json"), SearchOutcome::NotFound);
        assert_eq!(root.search("../top.txt"), SearchOutcome::NotFound);
    }

    #[test]
    fn test_unreadable_root_is_invalid_path() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = SearchRoot::new(dir.path().join("does-not-exist")).search("x");
        assert_eq!(outcome, SearchOutcome::InvalidPath);
        assert_eq!(outcome.status(), StatusCode::BAD_REQUEST);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_invalid_path() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("a-locked");
        fs::create_dir_all(&locked).unwrap();
        fs::create_dir_all(dir.path().join("z")).unwrap();
        fs::write(dir.path().join("z/reply.json"), b"{}").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users read through the mode bits
        let readable = fs::read_dir(&locked).is_ok();
        let outcome = SearchRoot::new(dir.path()).search("reply.json");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if readable {
            return;
        }

        assert_eq!(outcome, SearchOutcome::InvalidPath);
        assert_eq!(outcome.status(), StatusCode::BAD_REQUEST);
        assert!(outcome.into_body().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_match_is_access_error() {
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("dangling.json")).unwrap();
        let outcome = SearchRoot::new(dir.path()).search("dangling.json");
        assert_eq!(outcome, SearchOutcome::AccessError);
        assert_eq!(outcome.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_config() {
        let base = Path::new("/srv/erised");
        assert_eq!(SearchRoot::from_config("", base), None);
        assert_eq!(
            SearchRoot::from_config("fixtures", base).unwrap().path(),
            Path::new("/srv/erised/fixtures")
        );
        assert_eq!(
            SearchRoot::from_config("/data", base).unwrap().path(),
            Path::new("/data")
        );
    }

    #[test]
    fn test_select_prefers_file_only_with_root() {
        let data = Bytes::from_static(b"literal");
        let root = SearchRoot::new("/tmp");

        assert_eq!(
            BodySource::select(data.clone(), "f.json", None),
            BodySource::Literal(data.clone())
        );
        assert_eq!(
            BodySource::select(data.clone(), "", Some(&root)),
            BodySource::Literal(data.clone())
        );
        assert!(matches!(
            BodySource::select(data, "f.json", Some(&root)),
            BodySource::File { ref name, .. } if name == "f.json"
        ));
    }

    #[tokio::test]
    async fn test_resolve_body_literal_keeps_status() {
        let resolved = resolve_body(&BodySource::Literal(Bytes::from_static(b"hi"))).await;
        assert_eq!(resolved.status_override, None);
        assert_eq!(resolved.content, Bytes::from_static(b"hi"));
    }

    #[tokio::test]
    async fn test_resolve_body_file_overrides_status() {
        let dir = tree();
        let root = SearchRoot::new(dir.path());

        let found = resolve_body(&BodySource::File { root: root.clone(), name: "top.txt".into() }).await;
        assert_eq!(found.status_override, Some(StatusCode::OK));
        assert_eq!(found.content, Bytes::from_static(b"top"));

        let missing = resolve_body(&BodySource::File { root, name: "nope".into() }).await;
        assert_eq!(missing.status_override, Some(StatusCode::NOT_FOUND));
        assert!(missing.content.is_empty());
    }
}
