//! Directory scanner — discovers what a distribution actually contains
//!
//! Independent of the descriptor model. Produces one [`Directory`] per
//! directory reachable from the root (the root itself is `.`), each holding
//! the names of the non-directory entries it directly contains.
//!
//! Exploration is breadth first over an explicit work queue so deep trees
//! never grow the stack. Every directory is listed once; a directory reached
//! again by another path (a symlink back up the tree, or to a sibling) is
//! skipped with a warning instead of being scanned twice. Symlinked
//! directories wait in a second queue until the real tree is exhausted.

use crate::{DiscloseError, DiscloseResult};
use std::cmp::Ordering;
use std::collections::{BTreeSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Name given to the scan root
pub const ROOT_NAME: &str = ".";

// ─── Directory ─────────────────────────────────────────────────────

/// A directory found on disk: its name relative to the scan root and the
/// names of the files directly inside it. Identity is the name.
#[derive(Debug, Clone)]
pub struct Directory {
    name: String,
    contents: BTreeSet<String>,
}

impl Directory {
    pub fn new<I, S>(name: impl Into<String>, contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            contents: contents.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contents(&self) -> &BTreeSet<String> {
        &self.contents
    }
}

impl PartialEq for Directory {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Directory {}

impl PartialOrd for Directory {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Directory {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

// ─── Work Units ────────────────────────────────────────────────────

/// One directory waiting to be listed
#[derive(Debug, Clone)]
struct Work {
    path: PathBuf,
    name: String,
}

impl Work {
    fn child(&self, path: PathBuf, child: &str) -> Self {
        let name = if self.name == ROOT_NAME {
            child.to_string()
        } else {
            format!("{}/{}", self.name, child)
        };
        Self { path, name }
    }
}

/// Subdirectories found while listing one directory. Entries that are
/// symlinks to directories are kept apart from real ones.
#[derive(Debug, Default)]
struct Children {
    real: Vec<Work>,
    linked: Vec<Work>,
}

// ─── Scanner ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    root: PathBuf,
    ignore: BTreeSet<String>,
}

impl DirectoryScanner {
    /// Fails when `root` does not exist or is not a directory.
    pub fn new(root: impl Into<PathBuf>) -> DiscloseResult<Self> {
        let root = root.into();
        if !root.exists() {
            return Err(DiscloseError::ScanRootMissing(root));
        }
        if !root.is_dir() {
            return Err(DiscloseError::ScanRootNotDirectory(root));
        }
        Ok(Self {
            root,
            ignore: BTreeSet::new(),
        })
    }

    /// Entry names (files or directories) to leave out of the scan entirely
    pub fn with_ignored<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan the whole tree. Any directory that cannot be listed fails the
    /// scan; partial results are never returned.
    ///
    /// Symlinked directories are only followed once no real directory is
    /// left to list, so a directory is always reported under its real name
    /// when it has one.
    pub fn scan(&self) -> DiscloseResult<BTreeSet<Directory>> {
        let root = resolve(&self.root)?;

        let mut queue = VecDeque::new();
        queue.push_back(Work {
            path: root,
            name: ROOT_NAME.to_string(),
        });
        let mut linked = VecDeque::new();

        // Canonical paths already listed. A path has one name per scan, so
        // this is also the (path, name) done set.
        let mut done: BTreeSet<PathBuf> = BTreeSet::new();
        let mut directories = BTreeSet::new();

        while let Some(work) = queue.pop_front().or_else(|| linked.pop_front()) {
            if done.contains(&work.path) {
                tracing::warn!(
                    "{} revisits already scanned directory {}, skipping",
                    work.name,
                    work.path.display()
                );
                continue;
            }

            let (directory, children) = self.list(&work)?;
            tracing::debug!(
                "Scanned {}: {} files, {} subdirectories, {} linked",
                directory.name(),
                directory.contents().len(),
                children.real.len(),
                children.linked.len()
            );
            directories.insert(directory);
            queue.extend(children.real);
            linked.extend(children.linked);
            done.insert(work.path);
        }

        tracing::info!(
            "Scanned {} directories under {}",
            directories.len(),
            self.root.display()
        );
        Ok(directories)
    }

    /// List one directory's immediate entries
    fn list(&self, work: &Work) -> DiscloseResult<(Directory, Children)> {
        let mut contents = BTreeSet::new();
        let mut children = Children::default();

        for entry in WalkDir::new(&work.path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| DiscloseError::Unlistable {
                path: work.path.clone(),
                reason: e.to_string(),
            })?;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if self.ignore.contains(&file_name) {
                continue;
            }

            if is_directory(&entry) {
                let child = work.child(resolve(entry.path())?, &file_name);
                if entry.path_is_symlink() {
                    children.linked.push(child);
                } else {
                    children.real.push(child);
                }
            } else {
                contents.insert(file_name);
            }
        }

        Ok((
            Directory {
                name: work.name.clone(),
                contents,
            },
            children,
        ))
    }
}

/// Directories and symlinks that lead to one. A dangling symlink is a file.
fn is_directory(entry: &DirEntry) -> bool {
    if entry.file_type().is_dir() {
        return true;
    }
    entry.path_is_symlink()
        && fs::metadata(entry.path())
            .map(|m| m.is_dir())
            .unwrap_or(false)
}

fn resolve(path: &Path) -> DiscloseResult<PathBuf> {
    fs::canonicalize(path).map_err(|e| DiscloseError::Unlistable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(directories: &BTreeSet<Directory>) -> Vec<&str> {
        directories.iter().map(|d| d.name()).collect()
    }

    fn find<'a>(directories: &'a BTreeSet<Directory>, name: &str) -> &'a Directory {
        directories.iter().find(|d| d.name() == name).unwrap()
    }

    #[test]
    fn test_scan_lists_immediate_files_per_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("LICENSE"), "x").unwrap();
        fs::create_dir_all(dir.path().join("lib/nested")).unwrap();
        fs::write(dir.path().join("lib/a.jar"), "x").unwrap();
        fs::write(dir.path().join("lib/nested/b.jar"), "x").unwrap();

        let found = DirectoryScanner::new(dir.path()).unwrap().scan().unwrap();
        assert_eq!(names(&found), vec![".", "lib", "lib/nested"]);
        assert_eq!(
            find(&found, ".").contents().iter().collect::<Vec<_>>(),
            vec!["LICENSE"]
        );
        assert_eq!(
            find(&found, "lib").contents().iter().collect::<Vec<_>>(),
            vec!["a.jar"]
        );
        assert!(find(&found, "lib/nested").contents().contains("b.jar"));
    }

    #[test]
    fn test_empty_directories_are_reported() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        let found = DirectoryScanner::new(dir.path()).unwrap().scan().unwrap();
        assert!(find(&found, "empty").contents().is_empty());
    }

    #[test]
    fn test_ignored_names_are_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git/HEAD"), "x").unwrap();
        fs::write(dir.path().join(".DS_Store"), "x").unwrap();
        fs::write(dir.path().join("README"), "x").unwrap();

        let found = DirectoryScanner::new(dir.path())
            .unwrap()
            .with_ignored([".git", ".DS_Store"])
            .scan()
            .unwrap();
        assert_eq!(names(&found), vec!["."]);
        assert_eq!(find(&found, ".").contents().len(), 1);
    }

    #[test]
    fn test_missing_root_fails() {
        let dir = TempDir::new().unwrap();
        let err = DirectoryScanner::new(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, DiscloseError::ScanRootMissing(_)));
    }

    #[test]
    fn test_file_root_fails() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        let err = DirectoryScanner::new(&file).unwrap_err();
        assert!(matches!(err, DiscloseError::ScanRootNotDirectory(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_terminates() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("a/file"), "x").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("a/up")).unwrap();

        let found = DirectoryScanner::new(dir.path()).unwrap().scan().unwrap();
        assert_eq!(names(&found), vec![".", "a"]);
        assert!(!find(&found, "a").contents().contains("up"));
    }

    #[cfg(unix)]
    #[test]
    fn test_real_directory_wins_over_shallower_symlink() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("deep/x")).unwrap();
        fs::write(dir.path().join("deep/x/file.jar"), "x").unwrap();
        std::os::unix::fs::symlink(dir.path().join("deep/x"), dir.path().join("alias")).unwrap();

        let found = DirectoryScanner::new(dir.path()).unwrap().scan().unwrap();
        assert_eq!(names(&found), vec![".", "deep", "deep/x"]);
        assert!(find(&found, "deep/x").contents().contains("file.jar"));
        assert!(!find(&found, ".").contents().contains("alias"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_outside_root_is_followed() {
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("vendored.jar"), "x").unwrap();
        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("third-party")).unwrap();

        let found = DirectoryScanner::new(dir.path()).unwrap().scan().unwrap();
        assert_eq!(names(&found), vec![".", "third-party"]);
        assert!(find(&found, "third-party").contents().contains("vendored.jar"));
    }

    #[cfg(unix)]
    #[test]
    fn test_unlistable_directory_fails_scan() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("hidden.jar"), "x").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not stop root
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = DirectoryScanner::new(dir.path()).unwrap().scan();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        match result {
            Err(DiscloseError::Unlistable { path, .. }) => {
                assert!(path.ends_with("locked"));
            }
            other => panic!("expected Unlistable, got {:?}", other),
        }
    }

    #[test]
    fn test_work_names_compose_from_root() {
        let root = Work {
            path: PathBuf::from("/r"),
            name: ROOT_NAME.to_string(),
        };
        let lib = root.child(PathBuf::from("/r/lib"), "lib");
        assert_eq!(lib.name, "lib");
        assert_eq!(lib.child(PathBuf::from("/r/lib/x"), "x").name, "lib/x");
    }
}
