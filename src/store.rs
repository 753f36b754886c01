//! Markup persistence and the transient render location.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Document shown when nothing has been opened yet.
const BOOTSTRAP_MARKUP: &str = r"<!DOCTYPE html>
<html>
<head>
    <meta charset='UTF-8'>
    <title>HTML Editor</title>
    <style>
        body { font-family: Arial, sans-serif; padding: 10px; }
        #editor {
            border: 1px solid #ddd;
            min-height: 300px;
            padding: 10px;
            background-color: #ddd;
        }
    </style>
</head>
<body>
    <div id='editor' contenteditable='true'>
    </div>
</body>
</html>
";

/// File name of the render document inside the render directory.
const RENDER_FILE_NAME: &str = "editor.html";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to prepare display copy at {}: {source}", path.display())]
    Materialize {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{} is the editor's display copy, choose another file", path.display())]
    Reserved { path: PathBuf },
    #[error("render location {} already exists and was not created by htmlpad", path.display())]
    Occupied { path: PathBuf },
}

/// Reads and writes markup documents.
///
/// The render location belongs to this process. It is never a load or save
/// target, an existing file there is never replaced, and on drop the store
/// removes only the file and directories it created itself.
#[derive(Debug)]
pub struct MarkupStore {
    render_location: PathBuf,
    /// A leftover file at the render location may be replaced.
    reclaim_stale: bool,
    materialized: bool,
    /// Directories created for the render file, innermost first.
    created_dirs: Vec<PathBuf>,
}

impl MarkupStore {
    /// Create a store that materializes documents at `render_location`.
    ///
    /// Nothing is written until [`materialize_for_display`]; if a file
    /// already exists there at that point, materializing fails with
    /// [`StoreError::Occupied`].
    ///
    /// [`materialize_for_display`]: Self::materialize_for_display
    pub const fn new(render_location: PathBuf) -> Self {
        Self {
            render_location,
            reclaim_stale: false,
            materialized: false,
            created_dirs: Vec::new(),
        }
    }

    /// Create a store rendering into a per-process directory under the
    /// system temp dir.
    pub fn in_temp_dir() -> Self {
        let dir = std::env::temp_dir().join(format!("htmlpad-{}", std::process::id()));
        let mut store = Self::new(dir.join(RENDER_FILE_NAME));
        store.reclaim_stale = true;
        store
    }

    pub fn bootstrap_markup() -> &'static str {
        BOOTSTRAP_MARKUP
    }

    pub fn render_location(&self) -> &Path {
        &self.render_location
    }

    /// Whether `path` names the render location, after resolving `.`, `..`
    /// and symlinks.
    pub fn is_render_location(&self, path: &Path) -> bool {
        resolve(path) == resolve(&self.render_location)
    }

    /// Read a whole document.
    ///
    /// # Errors
    /// Fails if the file is missing, unreadable or not valid UTF-8, or if
    /// `path` is the render location.
    pub fn load_from_path(&self, path: &Path) -> Result<String, StoreError> {
        self.refuse_render_location(path)?;
        fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replace the contents of `path` with `markup`.
    ///
    /// The write is not atomic: a failure part-way leaves whatever the
    /// platform managed to write.
    ///
    /// # Errors
    /// Fails if the file cannot be created or written, or if `path` is the
    /// render location.
    pub fn save_to_path(&self, path: &Path, markup: &str) -> Result<(), StoreError> {
        self.refuse_render_location(path)?;
        fs::write(path, markup).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write `markup` to the render location so the surface can display it.
    ///
    /// # Errors
    /// Fails if the render directory or file cannot be written, or with
    /// [`StoreError::Occupied`] if the first write would replace a file this
    /// store did not create.
    pub fn materialize_for_display(&mut self, markup: &str) -> Result<&Path, StoreError> {
        let path = self.render_location.as_path();
        let materialize_err = |source| StoreError::Materialize {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            let missing: Vec<PathBuf> = parent
                .ancestors()
                .take_while(|dir| !dir.as_os_str().is_empty() && !dir.exists())
                .map(Path::to_path_buf)
                .collect();
            fs::create_dir_all(parent).map_err(materialize_err)?;
            self.created_dirs.extend(missing);
        }

        if self.materialized || self.reclaim_stale {
            fs::write(path, markup).map_err(materialize_err)?;
        } else {
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(path)
                .map_err(|source| match source.kind() {
                    ErrorKind::AlreadyExists => StoreError::Occupied {
                        path: path.to_path_buf(),
                    },
                    _ => materialize_err(source),
                })?;
            file.write_all(markup.as_bytes()).map_err(materialize_err)?;
        }
        self.materialized = true;
        tracing::debug!(path = %path.display(), bytes = markup.len(), "materialized markup");
        Ok(path)
    }

    fn refuse_render_location(&self, path: &Path) -> Result<(), StoreError> {
        if self.is_render_location(path) {
            tracing::warn!(path = %path.display(), "refusing to use the render location as a document");
            return Err(StoreError::Reserved {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }
}

/// Canonical form of `path`. A file that does not exist yet resolves
/// through its parent directory.
fn resolve(path: &Path) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }
    let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
        return path.to_path_buf();
    };
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    fs::canonicalize(parent).map_or_else(|_| path.to_path_buf(), |dir| dir.join(name))
}

impl Drop for MarkupStore {
    fn drop(&mut self) {
        if self.materialized
            && let Err(err) = fs::remove_file(&self.render_location)
            && err.kind() != ErrorKind::NotFound
        {
            tracing::warn!(
                "failed to remove render file {}: {err}",
                self.render_location.display()
            );
        }
        for dir in &self.created_dirs {
            // Stops at the first directory someone else put files in
            if let Err(err) = fs::remove_dir(dir) {
                tracing::debug!("leaving render directory {}: {err}", dir.display());
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::tempdir;

    #[test]
    fn test_bootstrap_has_single_editable_region() {
        let markup = MarkupStore::bootstrap_markup();
        assert!(markup.starts_with("<!DOCTYPE html>"));
        assert_eq!(markup.matches("id='editor'").count(), 1);
        assert!(markup.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_load_missing_file_fails_with_read_error() {
        let dir = tempdir().unwrap();
        let store = MarkupStore::new(dir.path().join("render.html"));
        let err = store.load_from_path(&dir.path().join("nope.html")).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[test]
    fn test_save_replaces_longer_existing_content() {
        let dir = tempdir().unwrap();
        let store = MarkupStore::new(dir.path().join("render.html"));
        let path = dir.path().join("doc.html");
        std::fs::write(&path, "a much longer previous document body").unwrap();

        store.save_to_path(&path, "<p>short</p>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>short</p>");
    }

    #[test]
    fn test_save_into_missing_directory_fails_with_write_error() {
        let dir = tempdir().unwrap();
        let store = MarkupStore::new(dir.path().join("render.html"));
        let path = dir.path().join("missing").join("doc.html");
        let err = store.save_to_path(&path, "x").unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }

    #[test]
    fn test_materialize_overwrites_render_location_and_creates_parent() {
        let dir = tempdir().unwrap();
        let render = dir.path().join("nested").join("render.html");
        let mut store = MarkupStore::new(render.clone());

        let first = store.materialize_for_display("<p>one</p>").unwrap().to_path_buf();
        let second = store.materialize_for_display("<p>two</p>").unwrap().to_path_buf();

        assert_eq!(first, render);
        assert_eq!(second, render);
        assert_eq!(std::fs::read_to_string(&render).unwrap(), "<p>two</p>");
    }

    #[test]
    fn test_drop_removes_render_file_and_created_directories() {
        let dir = tempdir().unwrap();
        let outer = dir.path().join("htmlpad-render");
        let render = outer.join("inner").join("render.html");
        {
            let mut store = MarkupStore::new(render.clone());
            store.materialize_for_display("<p/>").unwrap();
            assert!(render.exists());
        }
        assert!(!render.exists());
        assert!(!outer.exists());
        assert!(dir.path().exists());
    }

    #[test]
    fn test_drop_keeps_directory_that_gained_other_files() {
        let dir = tempdir().unwrap();
        let render_dir = dir.path().join("render");
        let render = render_dir.join("render.html");
        {
            let mut store = MarkupStore::new(render.clone());
            store.materialize_for_display("<p/>").unwrap();
            std::fs::write(render_dir.join("notes.txt"), "mine").unwrap();
        }
        assert!(!render.exists());
        assert!(render_dir.join("notes.txt").exists());
    }

    #[test]
    fn test_drop_without_materializing_touches_nothing() {
        let dir = tempdir().unwrap();
        let render = dir.path().join("render.html");
        std::fs::write(&render, "precious").unwrap();
        drop(MarkupStore::new(render.clone()));
        assert_eq!(std::fs::read_to_string(&render).unwrap(), "precious");
    }

    #[test]
    fn test_existing_file_at_render_location_is_never_replaced() {
        let dir = tempdir().unwrap();
        let user = dir.path().join("page.html");
        std::fs::write(&user, "precious").unwrap();
        {
            let mut store = MarkupStore::new(user.clone());
            let err = store.materialize_for_display("<p/>").unwrap_err();
            assert!(matches!(err, StoreError::Occupied { .. }));
        }
        assert_eq!(std::fs::read_to_string(&user).unwrap(), "precious");
    }

    #[test]
    fn test_render_location_is_refused_as_document() {
        let dir = tempdir().unwrap();
        let render = dir.path().join("render").join("editor.html");
        let mut store = MarkupStore::new(render.clone());
        store.materialize_for_display("<p>shown</p>").unwrap();

        let err = store.save_to_path(&render, "<p>saved</p>").unwrap_err();
        assert!(matches!(err, StoreError::Reserved { .. }));
        let err = store.load_from_path(&render).unwrap_err();
        assert!(matches!(err, StoreError::Reserved { .. }));
        assert_eq!(std::fs::read_to_string(&render).unwrap(), "<p>shown</p>");
    }

    #[test]
    fn test_render_location_match_resolves_dot_segments() {
        let dir = tempdir().unwrap();
        let render = dir.path().join("render").join("editor.html");
        let mut store = MarkupStore::new(render);
        store.materialize_for_display("<p/>").unwrap();

        let roundabout = dir.path().join("render").join("..").join("render").join("editor.html");
        assert!(store.is_render_location(&roundabout));
        assert!(!store.is_render_location(&dir.path().join("render").join("other.html")));
        assert!(!store.is_render_location(&dir.path().join("editor.html")));
    }

    proptest! {
        #[test]
        fn prop_save_then_load_round_trips(markup in any::<String>()) {
            let dir = tempdir().unwrap();
            let store = MarkupStore::new(dir.path().join("render.html"));
            let path = dir.path().join("doc.html");
            store.save_to_path(&path, &markup).unwrap();
            prop_assert_eq!(store.load_from_path(&path).unwrap(), markup);
        }
    }
}
