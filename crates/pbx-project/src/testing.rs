use std::collections::HashSet;
use std::path::{Path, PathBuf};

use pbx_store::FileSystem;

/// In-memory [`FileSystem`] that knows a fixed set of regular files.
#[derive(Debug, Default)]
pub struct FakeFileSystem {
    files: HashSet<PathBuf>,
}

impl FakeFileSystem {
    pub fn with_files(paths: &[&str]) -> Self {
        Self::with_paths(paths.iter().map(Path::new))
    }

    pub fn with_paths<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Self {
        Self {
            files: paths.into_iter().map(Path::to_path_buf).collect(),
        }
    }
}

impl FileSystem for FakeFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }
}
