use anyhow::Context;
use clap::{Parser, Subcommand};
use simview_kernel::{Simulation, WanderConfig, WanderSimulation};
use simview_render::shapes::{ANIMAL_SIZE, FOOD_RADIUS};
use simview_render::{FrameBudget, RecordingSurface, RenderLoop, SurfaceAdapter, SvgFrame};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "simview-cli", about = "Headless simulation viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and drawing constants
    Info,
    /// Run the render loop for a fixed number of frames
    Render {
        /// Logical surface width in pixels
        #[arg(long, default_value = "800")]
        width: u32,
        /// Logical surface height in pixels
        #[arg(long, default_value = "800")]
        height: u32,
        /// Device pixel ratio to scale the buffer by
        #[arg(long, default_value = "1.0")]
        pixel_ratio: f64,
        /// Number of frames to render
        #[arg(short, long, default_value = "60")]
        frames: u64,
        /// Seed for the stand-in simulation
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Write the last frame as SVG
        #[arg(long)]
        svg: Option<PathBuf>,
        /// Print the last frame's draw commands as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("simview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("food radius: {FOOD_RADIUS} x width");
            println!("animal size: {ANIMAL_SIZE} x width");
        }
        Commands::Render {
            width,
            height,
            pixel_ratio,
            frames,
            seed,
            svg,
            json,
        } => {
            let simulation = WanderSimulation::new(seed, WanderConfig::default())
                .context("failed to seed simulation")?;
            let surface = RecordingSurface::new(width, height);
            let adapter = SurfaceAdapter::initialize(surface, pixel_ratio)
                .context("failed to initialize surface")?;
            let mut render_loop = RenderLoop::new(adapter, simulation);

            let rendered = pollster::block_on(render_loop.run(FrameBudget::new(frames)))
                .context("render loop halted")?;

            let world = render_loop.simulation().world();
            let buffer = render_loop.adapter().surface().buffer_size();
            println!(
                "Rendered {rendered} frames: tick={}, foods={}, animals={}, eaten={}",
                render_loop.simulation().tick(),
                world.foods.len(),
                world.animals.len(),
                render_loop.simulation().total_satiation()
            );
            println!(
                "Surface: logical={width}x{height}, buffer={}x{}, ratio={}",
                buffer.width,
                buffer.height,
                render_loop.adapter().pixel_ratio()
            );

            let last_frame = render_loop.adapter().context().log().last_frame();

            if let Some(path) = svg {
                let document =
                    SvgFrame::from_commands(&last_frame, render_loop.adapter().logical_size());
                std::fs::write(&path, document)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!("last frame written to {}", path.display());
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&last_frame)?);
            }
        }
    }

    Ok(())
}
