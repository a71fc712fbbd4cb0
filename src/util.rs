use std::path::{Component, Path};

/// Render a relative path with `/` separators regardless of host platform.
pub fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

pub fn display_path(path: &Path, base: Option<&Path>) -> String {
    if let Some(base) = base {
        if let Ok(relative) = path.strip_prefix(base) {
            return relative.display().to_string();
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_path_drops_curdir_and_joins_with_slash() {
        let path = Path::new("content").join(".").join("d_0000001").join("a.jp2");
        assert_eq!(slash_path(&path), "content/d_0000001/a.jp2");
    }

    #[test]
    fn display_path_strips_base_when_possible() {
        let base = Path::new("/sip");
        assert_eq!(
            display_path(Path::new("/sip/metadata/premis.xml"), Some(base)),
            "metadata/premis.xml"
        );
        assert_eq!(display_path(Path::new("/other/x"), Some(base)), "/other/x");
    }
}
