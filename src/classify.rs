//! Logical placement of discovered files inside the transfer package.
//!
//! Content files keep their SIP-relative path under `data/objects/<sip>/`.
//! Recognized package-level metadata files are relocated to
//! `data/metadata/<name>` no matter how deep they sit in the content tree.
use crate::sip::Sip;
use crate::util::slash_path;
use crate::walk::DiscoveredFile;
use std::collections::BTreeSet;
use std::path::Path;

pub const OBJECTS_PREFIX: &str = "data/objects";
pub const METADATA_PREFIX: &str = "data/metadata";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Object,
    PackageMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFile {
    pub file: DiscoveredFile,
    pub category: Category,
    pub original_name: String,
}

#[derive(Debug, Clone)]
pub struct PathClassifier {
    metadata_names: BTreeSet<String>,
}

impl PathClassifier {
    pub fn new<I, S>(metadata_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            metadata_names: metadata_names.into_iter().map(Into::into).collect(),
        }
    }

    /// Category of a file judged by its base name alone.
    pub fn category(&self, base_name: &str) -> Category {
        if self.metadata_names.contains(base_name) {
            Category::PackageMetadata
        } else {
            Category::Object
        }
    }

    pub fn classify(&self, sip: &Sip, file: DiscoveredFile) -> ClassifiedFile {
        let base_name = file.base_name();
        let category = self.category(&base_name);
        let original_name = match category {
            Category::PackageMetadata => format!("{METADATA_PREFIX}/{base_name}"),
            Category::Object => {
                let rel = sip_relative(sip, &file);
                format!("{OBJECTS_PREFIX}/{}/{}", sip.name(), slash_path(&rel))
            }
        };
        ClassifiedFile {
            file,
            category,
            original_name,
        }
    }
}

/// Objects first, then package metadata; walk order is kept within each group.
pub fn inventory_order(files: Vec<ClassifiedFile>) -> Vec<ClassifiedFile> {
    let (mut ordered, metadata): (Vec<_>, Vec<_>) = files
        .into_iter()
        .partition(|file| file.category == Category::Object);
    ordered.extend(metadata);
    ordered
}

fn sip_relative(sip: &Sip, file: &DiscoveredFile) -> std::path::PathBuf {
    match file.path.strip_prefix(sip.root()) {
        Ok(rel) => rel.to_path_buf(),
        Err(_) => {
            let content_rel = sip
                .content_path()
                .strip_prefix(sip.root())
                .unwrap_or_else(|_| Path::new(""));
            content_rel.join(&file.content_rel)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_config, DEFAULT_PACKAGE_METADATA_NAMES};
    use std::path::PathBuf;

    struct Fixture {
        _dir: tempfile::TempDir,
        sip: Sip,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().expect("tempdir");
            let root = dir.path().join("digitized_Vecteur_SIP");
            std::fs::create_dir_all(&root).expect("create root");
            let sip = Sip::from_root(&root, &default_config()).expect("sip");
            Self { _dir: dir, sip }
        }

        fn discovered(&self, rel: &str) -> DiscoveredFile {
            DiscoveredFile {
                path: self.sip.content_path().join(rel),
                content_rel: PathBuf::from(rel),
            }
        }
    }

    #[test]
    fn content_files_keep_sip_relative_path() {
        let fx = Fixture::new();
        let classifier = PathClassifier::new(DEFAULT_PACKAGE_METADATA_NAMES.iter().copied());
        let classified = classifier.classify(&fx.sip, fx.discovered("d_0000001/00000001.jp2"));
        assert_eq!(classified.category, Category::Object);
        assert_eq!(
            classified.original_name,
            "data/objects/digitized_Vecteur_SIP/content/d_0000001/00000001.jp2"
        );
    }

    #[test]
    fn per_file_premis_sidecars_stay_objects() {
        let classifier = PathClassifier::new(DEFAULT_PACKAGE_METADATA_NAMES.iter().copied());
        assert_eq!(classifier.category("00000001_PREMIS.xml"), Category::Object);
    }

    #[test]
    fn process_documentation_is_relocated_at_any_depth() {
        let fx = Fixture::new();
        let classifier = PathClassifier::new(DEFAULT_PACKAGE_METADATA_NAMES.iter().copied());
        for rel in [
            "Prozess_Digitalisierung_PREMIS.xml",
            "d_0000001/Prozess_Digitalisierung_PREMIS.xml",
            "d_0000001/deep/er/Prozess_Digitalisierung_PREMIS.xml",
        ] {
            let classified = classifier.classify(&fx.sip, fx.discovered(rel));
            assert_eq!(classified.category, Category::PackageMetadata);
            assert_eq!(
                classified.original_name,
                "data/metadata/Prozess_Digitalisierung_PREMIS.xml"
            );
        }
    }

    #[test]
    fn matching_is_exact_on_base_name() {
        let classifier = PathClassifier::new(["Process_PREMIS.xml"]);
        assert_eq!(classifier.category("Process_PREMIS.xml"), Category::PackageMetadata);
        assert_eq!(classifier.category("process_premis.xml"), Category::Object);
        assert_eq!(classifier.category("Process_PREMIS.xml.bak"), Category::Object);
    }

    #[test]
    fn inventory_order_moves_metadata_after_objects() {
        let fx = Fixture::new();
        let classifier = PathClassifier::new(["Process_PREMIS.xml"]);
        let files: Vec<_> = [
            "d1/Process_PREMIS.xml",
            "d1/a.jp2",
            "d1/b.jp2",
            "d2/Process_PREMIS.xml",
        ]
        .into_iter()
        .map(|rel| classifier.classify(&fx.sip, fx.discovered(rel)))
        .collect();
        let ordered: Vec<_> = inventory_order(files)
            .into_iter()
            .map(|file| file.file.content_rel)
            .collect();
        assert_eq!(
            ordered,
            vec![
                PathBuf::from("d1/a.jp2"),
                PathBuf::from("d1/b.jp2"),
                PathBuf::from("d1/Process_PREMIS.xml"),
                PathBuf::from("d2/Process_PREMIS.xml"),
            ]
        );
    }

    #[test]
    fn falls_back_to_content_relative_path_outside_root() {
        let fx = Fixture::new();
        let classifier = PathClassifier::new(Vec::<String>::new());
        let file = DiscoveredFile {
            path: PathBuf::from("/elsewhere/a.jp2"),
            content_rel: PathBuf::from("d1/a.jp2"),
        };
        let classified = classifier.classify(&fx.sip, file);
        assert_eq!(
            classified.original_name,
            "data/objects/digitized_Vecteur_SIP/content/d1/a.jp2"
        );
    }
}
