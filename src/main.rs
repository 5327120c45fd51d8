use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use kinect_capture_rs::depth_pipeline::{
    AutoContinue, CaptureConfig, CapturePipeline, CaptureReport, ContinuePrompt, DepthDriver,
    PointCloudMode, ProcessingBackend, ReplayDriver, StdinPrompt, SyntheticDriver,
};
use kinect_capture_rs::logger;

use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DriverKind {
    /// Software-rendered test scene
    Synthetic,
    /// Play back depth dumps from --replay-dir
    Replay,
}

#[derive(Parser, Debug)]
#[command(name = "kinect_capture")]
#[command(about = "Capture depth frames and save them as binary dumps and PLY point clouds")]
#[command(version)]
struct Cli {
    /// Prefix for output files (<prefix>NNN and pc_<prefix>NNN). Without it nothing is written.
    output_prefix: Option<String>,

    /// Rotation step in degrees; captures 360 / angle frames.
    /// Must be 1-360: larger steps would capture nothing and are rejected
    #[arg(default_value_t = 360, value_parser = clap::value_parser!(u32).range(1..=360))]
    angle_degrees: u32,

    /// Camera driver to capture from
    #[arg(long, value_enum, default_value_t = DriverKind::Synthetic)]
    driver: DriverKind,

    /// Directory of depth dumps for the replay driver
    #[arg(long, required_if_eq("driver", "replay"))]
    replay_dir: Option<PathBuf>,

    /// Driver-side processing backend
    #[arg(long, value_enum, default_value_t = ProcessingBackend::OpenGl)]
    backend: ProcessingBackend,

    /// Nearest depth (mm) kept in the point cloud
    #[arg(long, default_value_t = 700.0)]
    min_depth: f32,

    /// Farthest depth (mm) kept in the point cloud
    #[arg(long, default_value_t = 900.0)]
    max_depth: f32,

    /// Frame wait timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,

    /// Also write CSV depth grids and x,y,z text point clouds
    #[arg(long)]
    text_outputs: bool,

    /// Write empty point clouds instead of unprojecting depth
    #[arg(long)]
    empty_point_cloud: bool,

    /// Do not ask between captures
    #[arg(long)]
    no_prompt: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn capture_config(&self) -> CaptureConfig {
        let mode = if self.empty_point_cloud {
            PointCloudMode::Disabled
        } else {
            PointCloudMode::Unproject
        };

        CaptureConfig::builder()
            .output_prefix(self.output_prefix.clone())
            .angle(self.angle_degrees)
            .depth_range(self.min_depth, self.max_depth)
            .frame_timeout(Duration::from_millis(self.timeout_ms))
            .backend(self.backend)
            .point_cloud_mode(mode)
            .text_outputs(self.text_outputs)
            .build()
    }
}

fn capture<D: DepthDriver>(cli: &Cli, driver: &mut D) -> anyhow::Result<CaptureReport> {
    let pipeline = CapturePipeline::new(cli.capture_config()).context("invalid capture settings")?;

    let mut prompt: Box<dyn ContinuePrompt> = if cli.no_prompt {
        Box::new(AutoContinue)
    } else {
        Box::new(StdinPrompt::stdio())
    };

    let report = pipeline
        .run(driver, prompt.as_mut())
        .context("capture failed")?;
    Ok(report)
}

fn run(cli: &Cli) -> anyhow::Result<CaptureReport> {
    match cli.driver {
        DriverKind::Synthetic => capture(cli, &mut SyntheticDriver::new()),
        DriverKind::Replay => {
            let dir = cli
                .replay_dir
                .as_ref()
                .context("--replay-dir is required with --driver replay")?;
            capture(cli, &mut ReplayDriver::new(dir))
        }
    }
}

/// Process status for a finished run: 0 on success, 1 on any fatal error.
///
/// Output files that failed to write do not change the status.
fn exit_status(result: &anyhow::Result<CaptureReport>) -> u8 {
    match result {
        Ok(report) => {
            info!(
                frames = report.frames_captured,
                files = report.files_written.len(),
                "Capture successful"
            );
            if report.write_failures > 0 {
                error!("{} output file(s) could not be written", report.write_failures);
            }
            0
        }
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version land here too.
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };
    logger::init(&cli.log_level);

    info!("Starting kinect_capture...");
    info!(driver = ?cli.driver, backend = %cli.backend, "Capture settings");

    ExitCode::from(exit_status(&run(&cli)))
}
