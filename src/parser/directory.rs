use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

use crate::parser::filter::is_seed_file;
use crate::parser::SeedFile;

/// Find seed files in a directory. If recursive is true, use walkdir; otherwise list files.
///
/// Paths come back sorted so collections are always seeded in the same order.
/// Symbolic links are not followed.
pub fn find_seed_files(
    dir: &Path,
    prefix: &str,
    recursive: bool,
) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut seed_files = Vec::new();

    if recursive {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(entry) => entry,
                // only an unreadable root fails the whole discovery
                Err(e) if e.depth() > 0 => {
                    warn!(path = ?e.path(), error = %e, "skipping unreadable entry");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let path = entry.path();
            if is_seed_file(path, prefix) {
                seed_files.push(path.to_path_buf());
            }
        }
    } else {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if is_seed_file(&path, prefix) {
                seed_files.push(path);
            }
        }
    }

    seed_files.sort();
    Ok(seed_files)
}

/// Like [`find_seed_files`], paired with collection names.
///
/// Files whose name leaves an empty collection name are skipped.
pub fn discover(
    dir: &Path,
    prefix: &str,
    recursive: bool,
) -> Result<Vec<SeedFile>, std::io::Error> {
    Ok(find_seed_files(dir, prefix, recursive)?
        .into_iter()
        .filter_map(|path| SeedFile::from_path(path, prefix))
        .collect())
}
