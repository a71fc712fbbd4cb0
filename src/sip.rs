//! Typed paths into a SIP layout.
//!
//! `from_root` checks that the root is an existing directory; every other
//! path is derived from it without touching the filesystem.
use crate::config::StageConfig;
use crate::error::{StageError, StageResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const XSD_DIR_REL: &str = "header/xsd";

/// A submission information package rooted at `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sip {
    root: PathBuf,
    name: String,
    content_path: PathBuf,
    manifest_path: PathBuf,
    xsd_path: PathBuf,
}

impl Sip {
    /// Derive the layout of the SIP at `root` using `config` for the
    /// content and manifest locations.
    pub fn from_root(root: &Path, config: &StageConfig) -> StageResult<Self> {
        let meta = fs::metadata(root).map_err(|error| sip_error(root, error))?;
        if !meta.is_dir() {
            return Err(sip_error(
                root,
                io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            ));
        }
        let name = match root.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => resolve_root_name(root)?,
        };
        Ok(Self {
            root: root.to_path_buf(),
            name,
            content_path: root.join(&config.content_dir),
            manifest_path: root.join(&config.manifest_path),
            xsd_path: root.join(XSD_DIR_REL),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Final component of the root, used as the package name in object paths.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_path(&self) -> &Path {
        &self.content_path
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Schema area under the header; never walked.
    pub fn xsd_path(&self) -> &Path {
        &self.xsd_path
    }

    /// Directories the content walk must not descend into.
    pub fn excluded_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = vec![self.xsd_path.clone()];
        if let Some(header) = self.manifest_path.parent() {
            if header != self.root {
                dirs.push(header.to_path_buf());
            }
        }
        dirs
    }
}

fn sip_error(root: &Path, error: io::Error) -> StageError {
    StageError::Sip {
        path: root.to_path_buf(),
        error,
    }
}

fn resolve_root_name(root: &Path) -> StageResult<String> {
    let resolved = root
        .canonicalize()
        .map_err(|error| sip_error(root, error))?;
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            sip_error(
                root,
                io::Error::new(io::ErrorKind::InvalidInput, "SIP root has no directory name"),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;

    fn sip_root(name: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join(name);
        fs::create_dir_all(&root).expect("create root");
        (dir, root)
    }

    #[test]
    fn default_layout_follows_digitized_sip() {
        let (_dir, root) = sip_root("digitized_SIP");
        let sip = Sip::from_root(&root, &default_config()).expect("layout");
        assert_eq!(sip.name(), "digitized_SIP");
        assert_eq!(sip.content_path(), root.join("content"));
        assert_eq!(sip.manifest_path(), root.join("header/metadata.xml"));
        assert_eq!(sip.xsd_path(), root.join("header/xsd"));
        assert_eq!(
            sip.excluded_dirs(),
            vec![root.join("header/xsd"), root.join("header")]
        );
    }

    #[test]
    fn configured_layout_overrides_defaults() {
        let (_dir, root) = sip_root("sip");
        let mut config = default_config();
        config.content_dir = "payload".to_string();
        config.manifest_path = "meta/manifest.xml".to_string();
        let sip = Sip::from_root(&root, &config).expect("layout");
        assert_eq!(sip.content_path(), root.join("payload"));
        assert_eq!(sip.manifest_path(), root.join("meta/manifest.xml"));
    }

    #[test]
    fn parent_relative_root_resolves_directory_name() {
        let (_dir, root) = sip_root("SIP_20240101");
        fs::create_dir_all(root.join("content")).expect("create content");
        let sip = Sip::from_root(&root.join("content").join(".."), &default_config())
            .expect("layout");
        assert_eq!(sip.name(), "SIP_20240101");
    }

    #[test]
    fn missing_root_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("nope");
        let native = fs::metadata(&root).expect_err("absent").to_string();

        let err = Sip::from_root(&root, &default_config()).expect_err("missing root");
        assert_eq!(
            err.to_string(),
            format!("resolve SIP root {}: {native}", root.display())
        );
    }

    #[test]
    fn file_root_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("sip.zip");
        fs::write(&root, b"PK").expect("write file");

        let err = Sip::from_root(&root, &default_config()).expect_err("file root");
        assert!(matches!(err, StageError::Sip { ref path, .. } if path == &root));
        assert_eq!(
            err.to_string(),
            format!("resolve SIP root {}: not a directory", root.display())
        );
    }
}
