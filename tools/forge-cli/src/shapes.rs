//! Shape descriptions shared by the manifest and the demo commands

use anyhow::{Result, bail};
use glam::Vec3;
use serde::Deserialize;

use meshforge_core::Mesh;
use meshforge_core::curve::{self, ExtrusionConfig, FrameMode};
use meshforge_core::procedural::{self, BladeFacing};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaneParams {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for PlaneParams {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            width_segments: 10,
            height_segments: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CubeParams {
    pub size: f32,
}

impl Default for CubeParams {
    fn default() -> Self {
        Self { size: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SphereParams {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            width_segments: 32,
            height_segments: 16,
        }
    }
}

/// Cylinder and cone share one parameter set
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoundParams {
    pub radius: f32,
    pub height: f32,
    pub segments: u32,
}

impl Default for RoundParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            height: 2.0,
            segments: 32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PyramidParams {
    pub base_size: f32,
    pub height: f32,
}

impl Default for PyramidParams {
    fn default() -> Self {
        Self {
            base_size: 1.0,
            height: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TorusParams {
    pub major_radius: f32,
    pub minor_radius: f32,
    pub major_segments: u32,
    pub minor_segments: u32,
}

impl Default for TorusParams {
    fn default() -> Self {
        Self {
            major_radius: 1.0,
            minor_radius: 0.3,
            major_segments: 64,
            minor_segments: 32,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    #[default]
    Forward,
    Up,
}

impl From<Facing> for BladeFacing {
    fn from(facing: Facing) -> Self {
        match facing {
            Facing::Forward => BladeFacing::Forward,
            Facing::Up => BladeFacing::Up,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BladeParams {
    pub segments: u32,
    pub width: f32,
    pub facing: Facing,
}

impl Default for BladeParams {
    fn default() -> Self {
        Self {
            segments: 8,
            width: 0.04,
            facing: Facing::Forward,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frames {
    #[default]
    AxisSeeded,
    ParallelTransport,
}

impl From<Frames> for FrameMode {
    fn from(frames: Frames) -> Self {
        match frames {
            Frames::AxisSeeded => FrameMode::AxisSeeded,
            Frames::ParallelTransport => FrameMode::ParallelTransport,
        }
    }
}

/// Bézier tube: 3 control points sample a quadratic curve, 4 a cubic one
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TubeParams {
    pub control_points: Vec<[f32; 3]>,
    pub samples: u32,
    pub radius: f32,
    pub segments: u32,
    pub frames: Frames,
}

impl Default for TubeParams {
    fn default() -> Self {
        Self {
            control_points: vec![
                [0.0, 0.0, 0.0],
                [0.0, 0.0, 30.0],
                [70.0, 0.0, 100.0],
                [100.0, 0.0, 100.0],
            ],
            samples: 7,
            radius: 2.0,
            segments: 8,
            frames: Frames::AxisSeeded,
        }
    }
}

impl TubeParams {
    /// Sample the curve into a polyline
    pub fn path(&self) -> Result<Vec<Vec3>> {
        let p: Vec<Vec3> = self.control_points.iter().copied().map(Vec3::from).collect();
        let path = match p.as_slice() {
            [p0, p1, p2] => curve::sample_quadratic(*p0, *p1, *p2, self.samples)?,
            [p0, p1, p2, p3] => curve::sample_cubic(*p0, *p1, *p2, *p3, self.samples)?,
            _ => bail!(
                "tube needs 3 or 4 control points, got {}",
                self.control_points.len()
            ),
        };
        Ok(path)
    }
}

/// A generator and its parameters, selected by `type` in TOML
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeConfig {
    Plane(PlaneParams),
    Cube(CubeParams),
    Sphere(SphereParams),
    Cylinder(RoundParams),
    Cone(RoundParams),
    Pyramid(PyramidParams),
    Torus(TorusParams),
    Blade(BladeParams),
    Tube(TubeParams),
}

impl ShapeConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Plane(_) => "plane",
            Self::Cube(_) => "cube",
            Self::Sphere(_) => "sphere",
            Self::Cylinder(_) => "cylinder",
            Self::Cone(_) => "cone",
            Self::Pyramid(_) => "pyramid",
            Self::Torus(_) => "torus",
            Self::Blade(_) => "blade",
            Self::Tube(_) => "tube",
        }
    }

    /// Run the generator
    pub fn generate(&self) -> Result<Mesh> {
        let mesh: Mesh = match self {
            Self::Plane(p) => procedural::generate_plane(
                p.width,
                p.height,
                p.width_segments,
                p.height_segments,
            )?,
            Self::Cube(p) => procedural::generate_cube(p.size)?,
            Self::Sphere(p) => {
                procedural::generate_sphere(p.radius, p.width_segments, p.height_segments)?
            }
            Self::Cylinder(p) => procedural::generate_cylinder(p.radius, p.height, p.segments)?,
            Self::Cone(p) => procedural::generate_cone(p.radius, p.height, p.segments)?,
            Self::Pyramid(p) => procedural::generate_pyramid(p.base_size, p.height)?,
            Self::Torus(p) => procedural::generate_torus(
                p.major_radius,
                p.minor_radius,
                p.major_segments,
                p.minor_segments,
            )?,
            Self::Blade(p) => procedural::generate_blade(p.segments, p.width, p.facing.into())?,
            Self::Tube(p) => {
                let config = ExtrusionConfig::default()
                    .with_radius(p.radius)
                    .with_segments(p.segments)
                    .with_frame_mode(p.frames.into());
                curve::generate_extrusion_with(&p.path()?, &config)?
            }
        };
        Ok(mesh)
    }

    /// One default-parameter instance of every shape
    pub fn showcase() -> Vec<ShapeConfig> {
        vec![
            Self::Plane(PlaneParams::default()),
            Self::Cube(CubeParams::default()),
            Self::Sphere(SphereParams::default()),
            Self::Cylinder(RoundParams::default()),
            Self::Cone(RoundParams::default()),
            Self::Pyramid(PyramidParams::default()),
            Self::Torus(TorusParams::default()),
            Self::Blade(BladeParams::default()),
            Self::Tube(TubeParams::default()),
        ]
    }
}
