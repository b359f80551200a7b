use std::path::Path;

/// Checks whether a candidate file passes the extension filter.
///
/// The filter is a plain file-name suffix test: ".txt" matches `notes.txt`
/// and `archive.txt`, "rs" matches `main.rs` but also `headers`. An empty
/// filter selects every file. The comparison is case-sensitive; callers
/// that want ".TXT" to match pass it explicitly.
pub fn matches_extension(path: &Path, extension: &str) -> bool {
    if extension.is_empty() {
        return true;
    }
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.ends_with(extension),
        None => false,
    }
}
