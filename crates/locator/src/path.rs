/// Normalizes a path string by converting backslash separators to forward
/// slashes and stripping trailing separators.
///
/// The function is total and idempotent; the empty string normalizes to
/// itself.
pub fn normalize(path: &str) -> String {
    path.replace('\\', "/").trim_end_matches('/').to_string()
}
