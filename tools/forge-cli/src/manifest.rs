//! Manifest parsing and build orchestration
//!
//! Parses forge.toml and writes one file per `[[mesh]]` entry.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use meshforge_core::Mesh;
use meshforge_core::export::{gltf, obj};

use crate::scatter::{self, ScatterConfig};
use crate::shapes::ShapeConfig;

/// Root manifest structure
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default, rename = "mesh")]
    pub meshes: Vec<MeshEntry>,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Base seed for scattered entries; entry `i` uses `seed + i`
    #[serde(default)]
    pub seed: u64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            seed: 0,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out/")
}

/// Output file format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Obj,
    Gltf,
    Glb,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Obj => "obj",
            Self::Gltf => "gltf",
            Self::Glb => "glb",
        }
    }

    /// Detect format by extension, `None` if unsupported
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "obj" => Some(Self::Obj),
            "gltf" => Some(Self::Gltf),
            "glb" => Some(Self::Glb),
            _ => None,
        }
    }
}

/// Write a mesh in the format implied by the path extension
pub fn write_mesh(mesh: &Mesh, path: &Path) -> Result<()> {
    let Some(format) = ExportFormat::from_path(path) else {
        bail!("Unsupported output format: {:?} (use .obj, .gltf, or .glb)", path);
    };

    match format {
        ExportFormat::Obj => obj::write_obj(mesh, path),
        ExportFormat::Gltf | ExportFormat::Glb => gltf::write_gltf(mesh, path),
    }
    .with_context(|| format!("Failed to write {:?}", path))
}

#[derive(Debug, Deserialize)]
pub struct MeshEntry {
    /// Output file stem
    pub name: String,
    pub shape: ShapeConfig,
    #[serde(default)]
    pub scatter: Option<ScatterConfig>,
    #[serde(default)]
    pub format: ExportFormat,
}

impl MeshEntry {
    pub fn output_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.{}", self.name, self.format.extension()))
    }

    /// Generate the mesh, scattering it when configured
    pub fn generate(&self, default_seed: u64) -> Result<Mesh> {
        let mesh = self
            .shape
            .generate()
            .with_context(|| format!("Failed to generate {} '{}'", self.shape.kind(), self.name))?;

        match &self.scatter {
            Some(config) => {
                let seed = config.seed.unwrap_or(default_seed);
                scatter::scatter(&mesh, config, seed)
                    .with_context(|| format!("Failed to scatter '{}'", self.name))
            }
            None => Ok(mesh),
        }
    }
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    parse_manifest(&content).with_context(|| format!("Failed to parse manifest: {:?}", path))
}

pub fn parse_manifest(content: &str) -> Result<Manifest> {
    Ok(toml::from_str(content)?)
}

/// Validate a manifest without writing anything
///
/// Names must be unique plain file stems and every entry must generate.
pub fn validate(manifest: &Manifest) -> Result<()> {
    if manifest.meshes.is_empty() {
        bail!("Manifest has no [[mesh]] entries");
    }

    check_names(manifest)?;
    for (index, entry) in manifest.meshes.iter().enumerate() {
        if let Some(scatter) = &entry.scatter {
            scatter
                .check()
                .with_context(|| format!("Mesh '{}' has an invalid scatter", entry.name))?;
        }
        entry.generate(entry_seed(manifest, index))?;
    }
    Ok(())
}

/// Every name must be a unique plain file stem
fn check_names(manifest: &Manifest) -> Result<()> {
    let mut names = HashSet::new();
    for (index, entry) in manifest.meshes.iter().enumerate() {
        if entry.name.is_empty() || entry.name.contains(['/', '\\']) {
            bail!("Mesh #{} has an invalid name: {:?}", index, entry.name);
        }
        if !names.insert(entry.name.as_str()) {
            bail!("Mesh '{}' is defined more than once", entry.name);
        }
    }
    Ok(())
}

fn entry_seed(manifest: &Manifest, index: usize) -> u64 {
    manifest.output.seed.wrapping_add(index as u64)
}

/// Build all meshes from a manifest, returning the written paths
///
/// Names are checked up front so no entry overwrites another's output.
pub fn build_all(manifest: &Manifest, output_override: Option<&Path>) -> Result<Vec<PathBuf>> {
    check_names(manifest)?;

    let output_dir = output_override.unwrap_or(&manifest.output.dir);
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    let mut written = Vec::with_capacity(manifest.meshes.len());
    for (index, entry) in manifest.meshes.iter().enumerate() {
        let output = entry.output_path(output_dir);
        tracing::info!("Generating {}: {} -> {:?}", entry.shape.kind(), entry.name, output);

        let mesh = entry.generate(entry_seed(manifest, index))?;
        write_mesh(&mesh, &output)?;
        written.push(output);
    }

    Ok(written)
}
