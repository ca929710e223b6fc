//! StitchKit command line
//!
//! Usage:
//!   stitchkit ports
//!   stitchkit draw --pattern Pattern2 --out design.gcode 100,100 300,100 300,300
//!   stitchkit show design.gcode
//!   stitchkit stitches design.gcode --pattern Pattern2
//!   stitchkit simulate design.gcode
//!   stitchkit send design.gcode --port /dev/ttyUSB0
//!   stitchkit init-config

use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use stitchkit::app;
use stitchkit::communication::{connect_or_offline, list_ports, SimulationSink, StitchStreamer};
use stitchkit::designer::file_io::load_pattern_file;
use stitchkit::settings::config::default_config_path;
use stitchkit::{init_logging, Config, Point, StreamOutcome, StreamReport};

/// Draw sewing lines, turn them into stitches and send them to a stitching controller
#[derive(Parser, Debug)]
#[command(name = "stitchkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (.toml or .json)
    #[arg(short, long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List serial ports that look like a controller
    Ports,

    /// Draw one polyline into a pattern and save it
    Draw {
        /// Pattern to draw into (it is cleared first)
        #[arg(short, long, default_value = "Pattern1")]
        pattern: String,

        /// Document to update; without it the pattern is saved to
        /// `<output_directory>/<pattern>.gcode`
        #[arg(short, long, value_name = "OUTPUT")]
        out: Option<PathBuf>,

        /// Canvas positions as x,y
        #[arg(value_name = "X,Y", required = true, value_parser = app::parse_point)]
        points: Vec<Point>,
    },

    /// Print the patterns of a document
    Show {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Print the stitch moves of a document
    Stitches {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Only this pattern
        #[arg(short, long)]
        pattern: Option<String>,
    },

    /// Run the stitches through the simulator
    Simulate {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Only this pattern
        #[arg(short, long)]
        pattern: Option<String>,

        /// Skip the per-stitch delay
        #[arg(long)]
        no_delay: bool,
    },

    /// Stream the stitches to the controller
    Send {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Only this pattern
        #[arg(short, long)]
        pattern: Option<String>,

        /// Serial port (overrides the configuration)
        #[arg(long)]
        port: Option<String>,

        /// Baud rate (overrides the configuration)
        #[arg(long)]
        baud: Option<u32>,
    },

    /// Write the default configuration file
    InitConfig {
        /// Where to write it (default: the platform config directory)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    init_logging(level)?;

    let config = Config::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::Ports => cmd_ports(),
        Commands::Draw {
            pattern,
            out,
            points,
        } => cmd_draw(&config, &pattern, out.as_deref(), &points),
        Commands::Show { input } => cmd_show(&config, &input),
        Commands::Stitches { input, pattern } => cmd_stitches(&config, &input, pattern.as_deref()),
        Commands::Simulate {
            input,
            pattern,
            no_delay,
        } => cmd_simulate(config, &input, pattern.as_deref(), !no_delay).await,
        Commands::Send {
            input,
            pattern,
            port,
            baud,
        } => {
            let mut config = config;
            if let Some(port) = port {
                config.connection.port = port;
            }
            if let Some(baud) = baud {
                config.connection.baud_rate = baud;
            }
            config.validate().context("Invalid connection settings")?;
            cmd_send(config, &input, pattern.as_deref()).await
        }
        Commands::InitConfig { path, force } => cmd_init_config(&config, path, force),
    }
}

fn cmd_ports() -> Result<()> {
    let ports = list_ports().context("Failed to list serial ports")?;
    if ports.is_empty() {
        println!("No controller ports found");
    }
    for port in ports {
        println!("{:<24} {}", port.port_name, port.description);
    }
    Ok(())
}

fn cmd_draw(config: &Config, pattern: &str, out: Option<&Path>, points: &[Point]) -> Result<()> {
    let mut state = app::designer_state(config);

    if let Some(out) = out.filter(|p| p.exists()) {
        state
            .open(out)
            .with_context(|| format!("Failed to open {}", out.display()))?;
    }
    state.select_pattern(pattern)?;

    let added = app::draw_polyline(&mut state, points)?;
    let stitches = state.active_snapshot().stitch_count(&state.scale);

    let path = match out {
        Some(out) => {
            state
                .save_all(out)
                .with_context(|| format!("Failed to save {}", out.display()))?;
            out.to_path_buf()
        }
        None => state
            .save_active(&config.files.output_directory)
            .context("Failed to save pattern")?,
    };

    println!(
        "{}: {} segment(s), {} stitch(es) -> {}",
        pattern,
        added,
        stitches,
        path.display()
    );
    Ok(())
}

fn cmd_show(config: &Config, input: &Path) -> Result<()> {
    let set = load(config, input)?;
    for summary in app::summarize(&set, config) {
        println!(
            "{:<16} {:>4} segment(s) {:>9.2} mm {:>6} stitch(es)",
            summary.name, summary.segments, summary.length_mm, summary.stitches
        );
    }
    Ok(())
}

fn cmd_stitches(config: &Config, input: &Path, pattern: Option<&str>) -> Result<()> {
    let set = load(config, input)?;
    let segments = app::segments_of(&set, pattern)?;
    for line in app::stitch_commands(&segments, config) {
        println!("{}", line);
    }
    Ok(())
}

async fn cmd_simulate(config: Config, input: &Path, pattern: Option<&str>, paced: bool) -> Result<()> {
    let set = load(&config, input)?;
    let segments = app::segments_of(&set, pattern)?;
    let streamer = app::streamer(&config, paced);
    let scale = config.scale();

    let report = run_streaming(streamer, move |streamer| {
        let mut sink = SimulationSink::new(scale).with_callback(|stitch| {
            println!(
                "X: {:.2} Y: {:.2}  (canvas {:.1}, {:.1})",
                stitch.x_mm, stitch.y_mm, stitch.canvas.x, stitch.canvas.y
            )
        });
        streamer.stream(&segments, Some(&mut sink))
    })
    .await?;

    print_report(&report);
    Ok(())
}

async fn cmd_send(config: Config, input: &Path, pattern: Option<&str>) -> Result<()> {
    let set = load(&config, input)?;
    let segments = app::segments_of(&set, pattern)?;
    let streamer = app::streamer(&config, true);
    let params = app::connection_params(&config);

    let report = run_streaming(streamer, move |streamer| {
        let mut sink = connect_or_offline(&params);
        streamer.stream(&segments, sink.as_mut())
    })
    .await?;

    print_report(&report);
    Ok(())
}

/// Run a blocking stream on the blocking pool; Ctrl-C cancels it between
/// stitches.
async fn run_streaming<F>(streamer: StitchStreamer, run: F) -> Result<StreamReport>
where
    F: FnOnce(&StitchStreamer) -> StreamReport + Send + 'static,
{
    let cancel = streamer.cancel_flag();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, stopping after the current stitch");
            cancel.store(true, Ordering::SeqCst);
        }
    });

    let report = tokio::task::spawn_blocking(move || run(&streamer))
        .await
        .context("Streaming task failed")?;

    interrupt.abort();
    Ok(report)
}

fn print_report(report: &StreamReport) {
    match report.outcome {
        StreamOutcome::Completed => println!("Sent {} stitch(es)", report.stitches_sent),
        StreamOutcome::Cancelled => {
            println!("Cancelled after {} stitch(es)", report.stitches_sent)
        }
        StreamOutcome::Offline => println!(
            "Controller not available, {} stitch(es) sent",
            report.stitches_sent
        ),
    }
}

fn cmd_init_config(config: &Config, path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => default_config_path()?,
    };
    if path.exists() && !force {
        bail!("{} already exists (use --force to replace it)", path.display());
    }
    config
        .save_to_file(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn load(config: &Config, input: &Path) -> Result<stitchkit::PatternSet> {
    load_pattern_file(input, &config.scale())
        .with_context(|| format!("Failed to load {}", input.display()))
}
