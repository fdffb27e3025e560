//! meshforge - procedural mesh generation tool
//!
//! Generates primitives, Bézier tubes and scattered instance fields, and writes
//! them as OBJ or glTF (.gltf/.glb).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use meshforge_core::export::gltf;

mod manifest;
mod scatter;
mod shapes;

use scatter::ScatterConfig;
use shapes::{BladeParams, Frames, ShapeConfig, TubeParams};

#[derive(Parser)]
#[command(name = "meshforge")]
#[command(about = "Procedural mesh generation and OBJ/glTF export")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scatter grass blades over the ground and merge them into one mesh
    Grass {
        /// Number of blades
        #[arg(short, long, default_value_t = 50)]
        count: u32,

        /// RNG seed (random if omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output file (.gltf, .glb or .obj)
        #[arg(short, long, default_value = "mergedGrass.gltf")]
        output: PathBuf,
    },

    /// Sweep a tube along a cubic Bézier curve
    Tube {
        /// Output file (.obj, .gltf or .glb)
        #[arg(short, long, default_value = "bezierCurve.obj")]
        output: PathBuf,

        /// Points sampled along the curve
        #[arg(long, default_value_t = 7)]
        samples: u32,

        /// Use parallel-transport frames instead of axis-seeded ones
        #[arg(long)]
        parallel_transport: bool,
    },

    /// Write every primitive with default parameters as OBJ
    Shapes {
        /// Output directory
        #[arg(short, long, default_value = "out")]
        dir: PathBuf,
    },

    /// Load a glTF/GLB file and print its mesh statistics
    Inspect {
        /// Input .gltf or .glb file
        input: PathBuf,
    },

    /// Build meshes from a manifest file
    Build {
        /// Path to forge.toml manifest
        #[arg(default_value = "forge.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate manifest without building
    Check {
        /// Path to forge.toml manifest
        #[arg(default_value = "forge.toml")]
        manifest: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Grass {
            count,
            seed,
            output,
        } => {
            let seed = seed.unwrap_or_else(rand::random);
            tracing::info!("Scattering {} grass blades (seed {})", count, seed);
            run_grass(count, seed, &output)?;
        }

        Commands::Tube {
            output,
            samples,
            parallel_transport,
        } => {
            let frames = if parallel_transport {
                Frames::ParallelTransport
            } else {
                Frames::AxisSeeded
            };
            run_tube(samples, frames, &output)?;
        }

        Commands::Shapes { dir } => {
            run_shapes(&dir)?;
        }

        Commands::Inspect { input } => {
            run_inspect(&input)?;
        }

        Commands::Build { manifest, output } => {
            tracing::info!("Building meshes from {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            let written = manifest::build_all(&config, output.as_deref())?;
            tracing::info!("Build complete! {} files written", written.len());
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;
            tracing::info!("Manifest is valid!");
        }
    }

    Ok(())
}

fn run_grass(count: u32, seed: u64, output: &Path) -> Result<()> {
    let blade = ShapeConfig::Blade(BladeParams::default()).generate()?;
    let config = ScatterConfig {
        count,
        ..ScatterConfig::default()
    };
    let merged = scatter::scatter(&blade, &config, seed)?;

    manifest::write_mesh(&merged, output)?;
    tracing::info!(
        "Exported mesh with {} vertices and {} triangles",
        merged.vertex_count(),
        merged.triangle_count()
    );
    Ok(())
}

fn run_tube(samples: u32, frames: Frames, output: &Path) -> Result<()> {
    let tube = ShapeConfig::Tube(TubeParams {
        samples,
        frames,
        ..TubeParams::default()
    })
    .generate()?;

    manifest::write_mesh(&tube, output)?;
    tracing::info!(
        "Exported Bezier curve mesh with {} vertices and {} triangles",
        tube.vertex_count(),
        tube.triangle_count()
    );
    Ok(())
}

fn run_shapes(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {:?}", dir))?;

    for shape in ShapeConfig::showcase() {
        let mesh = shape.generate()?;
        let output = dir.join(format!("{}.obj", shape.kind()));
        manifest::write_mesh(&mesh, &output)?;
    }
    Ok(())
}

fn run_inspect(input: &Path) -> Result<()> {
    let meshes =
        gltf::read_all_meshes(input).with_context(|| format!("Failed to load glTF: {:?}", input))?;

    println!("{}: {} mesh(es)", input.display(), meshes.len());
    for (index, mesh) in meshes.iter().enumerate() {
        println!(
            "  [{}] {} vertices, {} triangles, {}",
            index,
            mesh.vertex_count(),
            mesh.triangle_count(),
            mesh.attributes()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_grass_defaults() {
        let cli = Cli::parse_from(["meshforge", "grass"]);
        match cli.command {
            Commands::Grass {
                count,
                seed,
                output,
            } => {
                assert_eq!(count, 50);
                assert_eq!(seed, None);
                assert_eq!(output, PathBuf::from("mergedGrass.gltf"));
            }
            _ => panic!("expected grass"),
        }
    }

    #[test]
    fn test_grass_writes_gltf() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("grass.gltf");
        run_grass(5, 1, &output).unwrap();

        let mesh = gltf::read_gltf(&output).unwrap();
        assert_eq!(mesh.vertex_count(), 5 * 17);
        assert_eq!(mesh.triangle_count(), 5 * 15);
    }

    #[test]
    fn test_tube_writes_obj() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("tube.obj");
        run_tube(7, Frames::AxisSeeded, &output).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 56);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 96);
    }

    #[test]
    fn test_shapes_writes_every_primitive() {
        let dir = tempfile::tempdir().unwrap();
        run_shapes(dir.path()).unwrap();

        for shape in ShapeConfig::showcase() {
            assert!(dir.path().join(format!("{}.obj", shape.kind())).exists());
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("grass.stl");
        assert!(run_grass(1, 0, &output).is_err());
        assert!(!output.exists());
    }
}
