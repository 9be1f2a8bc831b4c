use super::run_git;
use crate::error::Result;
use crate::util::{clean_path, display_name};
use std::path::{Path, PathBuf};

const LOG_ARGS: [&str; 7] = [
    "log",
    "--branches",
    "--remotes",
    "--tags",
    "--pretty=format:%an|%ad|%s",
    "--numstat",
    "--date=iso",
];

pub struct GitRepo {
    path: PathBuf,
    name: String,
}

impl GitRepo {
    /// Resolve `path` against the current directory and fold `.`/`..` lexically.
    /// The path is not required to exist; an empty path means the current directory.
    pub fn resolve<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let absolute = if path.as_os_str().is_empty() {
            std::env::current_dir()?
        } else {
            std::path::absolute(path)?
        };
        let path = clean_path(&absolute);
        let name = display_name(&path);
        Ok(Self { path, name })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name used for the `Repo` element and the deduplication key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw `git log --numstat` text across every branch, remote and tag.
    pub fn log(&self, program: &str) -> Result<String> {
        Ok(run_git(program, &self.path, &LOG_ARGS)?.stdout)
    }
}
