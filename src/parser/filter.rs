use std::path::Path;

/// Extension every seed file carries
pub const SEED_EXTENSION: &str = ".json";

/// Return true if the path is an existing file named `<prefix>*.json`
pub fn is_seed_file(path: &Path, prefix: &str) -> bool {
    path.is_file() && has_seed_name(path, prefix)
}

/// Name check only, no filesystem access
pub fn has_seed_name(path: &Path, prefix: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(prefix) && name.ends_with(SEED_EXTENSION))
}

/// Collection a seed file loads into.
///
/// The first occurrence of `prefix` and then the first occurrence of `.json`
/// are removed from the file name: `golazodb.players.json` gives `players`.
pub fn collection_name(path: &Path, prefix: &str) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let name = name.replacen(prefix, "", 1).replacen(SEED_EXTENSION, "", 1);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
