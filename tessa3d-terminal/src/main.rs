//! Tessa3D demo launcher

use anyhow::Context;
use clap::{Parser, Subcommand};
use tessa3d_terminal::{Demo, Scene, TerminalApp};

/// Interactive terminal demos of recursive subdivision, transforms, and
/// projection
#[derive(Parser)]
#[command(name = "tessa3d", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Tessellated triangle gasket, outline by default
    Gasket {
        /// Subdivision depth
        #[arg(long, default_value_t = 4)]
        depth: u32,
        /// Circumradius of the base triangle
        #[arg(long, default_value_t = 1.0)]
        radius: f32,
    },
    /// Sierpinski tetrahedron with one color per face
    Tetra {
        /// Subdivision depth
        #[arg(long, default_value_t = 3)]
        depth: u32,
    },
    /// Phong-shaded geodesic sphere
    Sphere {
        /// Subdivision depth
        #[arg(long, default_value_t = 3)]
        depth: u32,
    },
    /// Perspective/orthographic projection explorer around a colored cube
    Cube,
    /// Free-look camera: yaw/pitch/roll over a cube
    Free,
    /// 2D transform sandbox: translate, rotate, or scale flat shapes
    Planar {
        /// Sides of the disc shape
        #[arg(long, default_value_t = 32)]
        sides: u32,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let (demo, depth) = match cli.command {
        Command::Gasket { depth, radius } => (Demo::Gasket { radius }, depth),
        Command::Tetra { depth } => (Demo::Tetra, depth),
        Command::Sphere { depth } => (Demo::Sphere, depth),
        Command::Cube => (Demo::Cube, 0),
        Command::Free => (Demo::Free, 0),
        Command::Planar { sides } => (Demo::Planar { sides }, 0),
    };

    let scene = Scene::new(demo, depth).context("failed to build the demo scene")?;
    let mut app = TerminalApp::new(scene).context("failed to initialize the terminal")?;
    app.run().context("terminal renderer failed")?;

    Ok(())
}
