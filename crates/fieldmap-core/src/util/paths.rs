//! Root path helpers.
//!
//! Root paths are absolute, `/`-separated, and folders end with `/`.

/// The last segment of a root path, without the trailing slash of folders.
///
/// ```
/// use fieldmap_core::util::paths::resource_name;
///
/// assert_eq!(resource_name("/sites/default/index.html"), "index.html");
/// assert_eq!(resource_name("/sites/default/"), "default");
/// assert_eq!(resource_name("/"), "");
/// ```
pub fn resource_name(root_path: &str) -> &str {
    let trimmed = root_path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(pos) => &trimmed[pos + 1..],
        None => trimmed,
    }
}

/// The parent folder of a root path, with trailing slash.
///
/// Returns `None` for the root folder itself.
pub fn parent_folder(root_path: &str) -> Option<&str> {
    let trimmed = root_path.trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    trimmed.rfind('/').map(|pos| &trimmed[..=pos])
}

/// Every ancestor folder of a root path, outermost first.
///
/// ```
/// use fieldmap_core::util::paths::parent_folders;
///
/// assert_eq!(
///     parent_folders("/sites/default/a.html"),
///     vec!["/", "/sites/", "/sites/default/"]
/// );
/// ```
pub fn parent_folders(root_path: &str) -> Vec<String> {
    let mut folders = Vec::new();
    let mut current = root_path;
    while let Some(parent) = parent_folder(current) {
        folders.push(parent.to_string());
        current = parent;
    }
    folders.reverse();
    folders
}
