use std::path::{Component, Path, PathBuf};

/// Returns the shortest path equivalent to `path` by lexical processing.
///
/// `.` components are dropped, `..` consumes the preceding normal component,
/// `..` directly under the root is dropped, and leading `..` of a relative
/// path are kept. An empty result becomes `.`. The filesystem is not consulted,
/// so symlinks are not resolved.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
