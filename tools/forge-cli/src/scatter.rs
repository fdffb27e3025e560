//! Random instancing of a source mesh over the XY ground plane

use std::f32::consts::TAU;

use anyhow::{Result, ensure};
use glam::{Quat, Vec3, Vec4};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Deserialize;
use tracing::debug;

use meshforge_core::{Mesh, Transform, instance};

/// How copies are spread out and tagged
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    /// Number of copies
    pub count: u32,
    /// Copies land in `[-extent, extent)` on X and Y
    pub extent: f32,
    /// Rotate each copy by a random angle about +Z
    pub random_yaw: bool,
    /// Store each copy's XY position in `uvs1`
    pub instance_uvs: bool,
    /// Give each copy one random opaque vertex color
    pub random_colors: bool,
    /// Overrides the manifest seed
    pub seed: Option<u64>,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            count: 50,
            extent: 0.5,
            random_yaw: true,
            instance_uvs: true,
            random_colors: true,
            seed: None,
        }
    }
}

impl ScatterConfig {
    pub fn check(&self) -> Result<()> {
        ensure!(self.count > 0, "scatter count must be at least 1");
        ensure!(
            self.extent.is_finite() && self.extent > 0.0,
            "scatter extent must be finite and > 0.0, got {}",
            self.extent
        );
        Ok(())
    }
}

/// Copy `mesh` to random ground positions and merge the copies
///
/// The same seed always produces the same mesh.
pub fn scatter(mesh: &Mesh, config: &ScatterConfig, seed: u64) -> Result<Mesh> {
    config.check()?;
    let mut rng = Pcg32::seed_from_u64(seed);

    let transforms: Vec<Transform> = (0..config.count)
        .map(|_| {
            let position = Vec3::new(
                rng.random_range(-config.extent..config.extent),
                rng.random_range(-config.extent..config.extent),
                0.0,
            );
            let rotation = if config.random_yaw {
                Quat::from_rotation_z(rng.random_range(0.0..TAU))
            } else {
                Quat::IDENTITY
            };
            Transform::from_position_rotation(position, rotation)
        })
        .collect();

    let mut merged = instance::copy_to_transforms(mesh, &transforms)?;
    let per_instance = mesh.vertex_count();

    if config.instance_uvs {
        merged.uvs1 = Some(
            transforms
                .iter()
                .flat_map(|t| std::iter::repeat_n(t.position.truncate(), per_instance))
                .collect(),
        );
    }

    if config.random_colors {
        let colors: Vec<Vec4> = (0..config.count)
            .map(|_| Vec4::new(rng.random(), rng.random(), rng.random(), 1.0))
            .collect();
        merged.colors = Some(
            colors
                .into_iter()
                .flat_map(|c| std::iter::repeat_n(c, per_instance))
                .collect(),
        );
    }

    debug!(
        "scattered {} copies of {} vertices (seed {seed})",
        config.count, per_instance
    );
    Ok(merged)
}
