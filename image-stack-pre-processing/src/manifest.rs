/// Conversion manifest written next to a finished point cloud.
use crate::converter::ConversionSummary;
use crate::error::{ConversionError, Result};
use crate::settings::ConversionSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything needed to reproduce or audit a conversion.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversionManifest {
    pub generator: String,
    pub version: String,
    /// Parameters the point cloud was generated with.
    pub settings: ConversionSettings,
    /// Counts, axis mapping and timing of the run.
    pub summary: ConversionSummary,
    /// Slice file names in depth order.
    pub images: Vec<String>,
}

/// Writes conversion manifests as pretty printed JSON.
pub struct ManifestGenerator {
    manifest_path: PathBuf,
}

impl ManifestGenerator {
    pub fn new(manifest_path: &Path) -> Self {
        Self {
            manifest_path: manifest_path.to_path_buf(),
        }
    }

    pub fn generate(
        &self,
        settings: ConversionSettings,
        summary: ConversionSummary,
        sequence: &[PathBuf],
    ) -> Result<ConversionManifest> {
        let images = sequence
            .iter()
            .map(|path| {
                path.file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string()
            })
            .collect();

        let manifest = ConversionManifest {
            generator: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            settings,
            summary,
            images,
        };

        let manifest_json = serde_json::to_string_pretty(&manifest)?;
        fs::write(&self.manifest_path, manifest_json)
            .map_err(|e| ConversionError::io(&self.manifest_path, e))?;

        println!("Manifest:        {}", self.manifest_path.display());
        Ok(manifest)
    }
}
