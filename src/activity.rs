//! The add-premis-objects stage.
//!
//! Gate on the manifest, walk the content tree, classify, stamp identifiers,
//! then publish the inventory. Objects are listed in walk order, followed by
//! the relocated package metadata files in walk order. Nothing is written
//! unless every earlier step succeeded.
use crate::classify::{inventory_order, Category, PathClassifier};
use crate::config::StageConfig;
use crate::error::{StageError, StageResult};
use crate::identifier::IdentifierSource;
use crate::manifest::ensure_manifest;
use crate::premis::{build_records, InventoryDocument};
use crate::sip::Sip;
use crate::walk::walk_content;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Name the workflow engine registers this stage under.
pub const ADD_PREMIS_OBJECTS_NAME: &str = "add-premis-objects";

/// Relative location of the inventory inside a SIP when none is given.
pub const DEFAULT_PREMIS_FILE_REL: &str = "metadata/premis.xml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddPremisObjectsParams {
    pub sip: PathBuf,
    pub premis_file_path: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddPremisObjectsResult {}

/// One stage instance owns one identifier source; do not share it across
/// concurrent runs.
#[derive(Debug)]
pub struct AddPremisObjects<R> {
    ids: IdentifierSource<R>,
    config: StageConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl<R: RngCore> AddPremisObjects<R> {
    pub fn new(rng: R) -> Self {
        Self {
            ids: IdentifierSource::new(rng),
            config: StageConfig::default(),
            cancel: None,
        }
    }

    pub fn with_config(mut self, config: StageConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn execute(
        &mut self,
        params: &AddPremisObjectsParams,
    ) -> StageResult<AddPremisObjectsResult> {
        let sip = Sip::from_root(&params.sip, &self.config)?;
        tracing::info!(
            sip = %sip.root().display(),
            out = %params.premis_file_path.display(),
            "adding PREMIS objects"
        );

        ensure_manifest(sip.manifest_path())?;

        let cancel = self.cancel.as_deref();
        let discovered = walk_content(sip.content_path(), &sip.excluded_dirs(), cancel)?;

        let classifier = PathClassifier::new(self.config.package_metadata_names.iter().cloned());
        let classified: Vec<_> = discovered
            .into_iter()
            .map(|file| classifier.classify(&sip, file))
            .inspect(|file| {
                tracing::debug!(
                    path = %file.file.content_rel.display(),
                    original_name = %file.original_name,
                    "classified"
                )
            })
            .collect();
        let classified = inventory_order(classified);

        let records = build_records(&classified, &mut self.ids);
        let document = InventoryDocument::new(records);

        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Err(StageError::Cancelled);
        }
        document.write_to(&params.premis_file_path)?;

        let metadata = classified
            .iter()
            .filter(|file| file.category == Category::PackageMetadata)
            .count();
        tracing::info!(
            objects = classified.len() - metadata,
            package_metadata = metadata,
            "wrote PREMIS objects"
        );
        Ok(AddPremisObjectsResult {})
    }
}
