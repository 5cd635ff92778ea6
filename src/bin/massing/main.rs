//! Massing CLI - procedural massing from the command line.
//!
//! Usage: massing <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `massing --help` for available commands. Set `RUST_LOG=debug` to see
//! per-operation face counts.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};

use massing::algo::offset::{offset_mesh, OffsetOptions};
use massing::algo::subdivide::{
    catmull_clark_with_progress, flat_subdivide, CatmullClarkOptions, Extrusion, MeshSubdivider,
    SubdivideOptions,
};
use massing::algo::Progress;
use massing::io;
use massing::mesh::primitives::create_box;
use massing::mesh::Mesh;

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "massing")]
#[command(author, version, about = "Procedural massing CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh information
    Info {
        /// Input mesh file
        input: PathBuf,
    },

    /// Write an axis-aligned box
    Box {
        /// Output mesh file
        output: PathBuf,

        /// Minimum corner
        #[arg(
            long,
            num_args = 3,
            default_values_t = [0.0, 0.0, 0.0],
            allow_negative_numbers = true
        )]
        min: Vec<f64>,

        /// Maximum corner
        #[arg(
            long,
            num_args = 3,
            default_values_t = [1.0, 1.0, 1.0],
            allow_negative_numbers = true
        )]
        max: Vec<f64>,
    },

    /// Subdivide every face of a mesh
    Subdivide {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// Subdivision method
        #[arg(short, long, value_enum, default_value = "catmull-clark")]
        method: SubdivideMethod,

        /// Number of iterations
        #[arg(short, long, default_value = "1")]
        iterations: usize,

        /// Push face points along their face normal (Catmull-Clark only)
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        extrude: f64,

        /// Use parallel execution
        #[arg(long)]
        parallel: bool,
    },

    /// Extrude every face along its normal
    Extrude {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// Extrusion height
        #[arg(long, default_value = "1.0", allow_negative_numbers = true)]
        height: f64,

        /// Leave the top of each extrusion open
        #[arg(long)]
        no_cap: bool,

        /// Use parallel execution
        #[arg(long)]
        parallel: bool,
    },

    /// Split every face into a grid
    Grid {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// Divisions along the first edge
        #[arg(long, default_value = "2")]
        nu: usize,

        /// Divisions along the second edge
        #[arg(long, default_value = "2")]
        nv: usize,

        /// Use parallel execution
        #[arg(long)]
        parallel: bool,
    },

    /// Put a roof on every quad and triangle
    Roof {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// Ridge height
        #[arg(long, default_value = "1.0", allow_negative_numbers = true)]
        height: f64,

        /// Pull of each ridge end toward the other, as a fraction of the ridge
        #[arg(long, default_value = "0.0")]
        gable_inset: f64,
    },

    /// Replace every face with a frame around a hole
    Frame {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// Frame width
        #[arg(long, default_value = "0.1")]
        width: f64,
    },

    /// Thicken a surface into a closed shell
    Offset {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// Offset distance along the vertex normals
        #[arg(long, default_value = "0.1", allow_negative_numbers = true)]
        distance: f64,

        /// Do not weld or close open borders
        #[arg(long)]
        open: bool,

        /// Offset horizontally only
        #[arg(long)]
        constrain_z: bool,
    },

    /// Merge coincident vertices
    Weld {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// Merge vertices within this grid cell size instead of exact matches
        #[arg(long)]
        tolerance: Option<f64>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SubdivideMethod {
    /// Catmull-Clark smoothing subdivision
    CatmullClark,
    /// Split faces into quads without moving vertices
    Flat,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult {
    match cli.command {
        Commands::Info { input } => cmd_info(&input)?,

        Commands::Box { output, min, max } => {
            let mesh = create_box(min[0], min[1], min[2], max[0], max[1], max[2]);
            println!("Result: {} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());
            save(&mesh, &output)?;
        }

        Commands::Subdivide {
            input,
            output,
            method,
            iterations,
            extrude,
            parallel,
        } => {
            cmd_subdivide(&input, &output, method, iterations, extrude, parallel)?;
        }

        Commands::Extrude {
            input,
            output,
            height,
            no_cap,
            parallel,
        } => {
            transform(&input, &output, "extrusion", |mesh| {
                subdivider(parallel).extrude(mesh, height, !no_cap)
            })?;
        }

        Commands::Grid {
            input,
            output,
            nu,
            nv,
            parallel,
        } => {
            transform(&input, &output, "grid", |mesh| {
                subdivider(parallel).grid(mesh, nu, nv)
            })?;
        }

        Commands::Roof {
            input,
            output,
            height,
            gable_inset,
        } => {
            transform(&input, &output, "roof", |mesh| {
                subdivider(false).roof(mesh, height, gable_inset)
            })?;
        }

        Commands::Frame {
            input,
            output,
            width,
        } => {
            transform(&input, &output, "frame", |mesh| {
                subdivider(false).frame(mesh, width)
            })?;
        }

        Commands::Offset {
            input,
            output,
            distance,
            open,
            constrain_z,
        } => {
            let options = OffsetOptions::new(distance)
                .with_close_borders(!open)
                .with_constrain_z(constrain_z);
            transform(&input, &output, "offset", |mesh| offset_mesh(mesh, &options))?;
        }

        Commands::Weld {
            input,
            output,
            tolerance,
        } => {
            transform(&input, &output, "weld", |mesh| {
                let mut welded = mesh.clone();
                match tolerance {
                    Some(tolerance) => welded.weld_vertices_with_tolerance(tolerance)?,
                    None => welded.weld_vertices(),
                }
                Ok(welded)
            })?;
        }
    }

    Ok(())
}

fn subdivider(parallel: bool) -> MeshSubdivider {
    MeshSubdivider::new(SubdivideOptions::default().with_parallel(parallel))
}

fn load(input: &Path) -> Result<Mesh, massing::error::MeshError> {
    log::info!("Loading {}", input.display());
    let mesh = io::load(input)?;
    println!("Loaded: {} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());
    Ok(mesh)
}

fn save(mesh: &Mesh, output: &Path) -> Result<(), massing::error::MeshError> {
    log::info!("Saving {}", output.display());
    io::save(mesh, output)?;
    println!("Saved: {}", output.display());
    Ok(())
}

/// Load `input`, run `op` on it and save the result to `output`.
fn transform<F>(input: &Path, output: &Path, name: &str, op: F) -> CliResult
where
    F: FnOnce(&Mesh) -> massing::error::Result<Mesh>,
{
    let mesh = load(input)?;

    println!("Applying {}...", name);
    let start = Instant::now();
    let result = op(&mesh)?;
    let elapsed = start.elapsed();

    println!(
        "Result: {} vertices, {} faces ({:.2?})",
        result.num_vertices(),
        result.num_faces(),
        elapsed
    );
    save(&result, output)?;
    Ok(())
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    // Highest percent shown so far, so the bar never moves backwards
    let shown = Arc::new(AtomicUsize::new(0));

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }

        let percent = (current.min(total) * 100) / total;
        if shown.fetch_max(percent, Ordering::Relaxed) > percent {
            return;
        }

        let bar_width = 30;
        let filled = (percent * bar_width) / 100;
        eprint!(
            "\r[{}{}] {:3}% {}",
            "=".repeat(filled),
            " ".repeat(bar_width - filled),
            percent,
            message
        );
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn cmd_info(input: &Path) -> CliResult {
    let mesh = io::load(input)?;
    let topology = mesh.build_topology();

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Faces: {}", mesh.num_faces());
    println!("Edges: {}", topology.num_edges());

    let areas: Vec<f64> = (0..mesh.num_faces()).map(|f| mesh.face_area(f)).collect();
    let min_area = areas.iter().copied().fold(f64::INFINITY, f64::min);
    let max_area = areas.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    println!("Surface area: {:.6}", areas.iter().sum::<f64>());
    println!("Face area range: [{:.6}, {:.6}]", min_area, max_area);

    if let Some((min, max)) = mesh.bounding_box() {
        let size = max - min;
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
        println!("Dimensions: {:.3} x {:.3} x {:.3}", size.x, size.y, size.z);
    }

    if mesh.is_triangle_mesh() {
        println!("Mesh type: Triangle mesh");
    } else if mesh.is_quad_mesh() {
        println!("Mesh type: Quad mesh");
    } else {
        println!("Mesh type: Mixed polygon mesh");
    }

    let boundary = topology.boundary_edges().count();
    if boundary == 0 {
        println!("Topology: Closed (no boundary)");
    } else {
        println!("Topology: Open ({} boundary edges)", boundary);
    }

    Ok(())
}

fn cmd_subdivide(
    input: &Path,
    output: &Path,
    method: SubdivideMethod,
    iterations: usize,
    extrude: f64,
    parallel: bool,
) -> CliResult {
    let mut mesh = load(input)?;
    let mode = if parallel { "parallel" } else { "sequential" };

    let start = Instant::now();
    match method {
        SubdivideMethod::CatmullClark => {
            println!(
                "Applying Catmull-Clark subdivision ({} iterations, {})...",
                iterations, mode
            );
            let extrusion = if extrude == 0.0 {
                Extrusion::None
            } else {
                Extrusion::Uniform(extrude)
            };
            let options = CatmullClarkOptions::new(iterations)
                .with_extrusion(extrusion)
                .with_parallel(parallel);
            mesh = catmull_clark_with_progress(&mesh, &options, &create_progress())?;
        }
        SubdivideMethod::Flat => {
            println!("Applying flat subdivision ({} iterations)...", iterations);
            for _ in 0..iterations {
                mesh = flat_subdivide(&mesh);
            }
        }
    }
    let elapsed = start.elapsed();

    println!(
        "Result: {} vertices, {} faces ({:.2?})",
        mesh.num_vertices(),
        mesh.num_faces(),
        elapsed
    );
    save(&mesh, output)?;
    Ok(())
}
