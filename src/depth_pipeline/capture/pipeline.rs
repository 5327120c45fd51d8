use std::path::{Path, PathBuf};

use tracing::{error, info, instrument, trace};

use crate::depth_pipeline::{
    common::error::Result,
    capture::{
        config::CaptureConfig,
        naming::{depth_file_name, point_cloud_file_name},
        prompt::ContinuePrompt,
        timing::PipelineTimings,
    },
    depth_dump::{BinaryDepthWriter, CsvDepthWriter, DepthWriter, write_depth_file},
    driver::{CameraIntrinsics, DepthDevice, DepthDriver, StreamingSession},
    frame::FrameBuffer,
    point_cloud::{PlyWriter, PointCloudBuilder, PointCloudWriter, XyzWriter, write_point_cloud_file},
};

/// Outcome of a capture session that ran to completion.
#[derive(Debug, Default)]
pub struct CaptureReport {
    /// Frame sets received and copied
    pub frames_captured: usize,
    /// Every file that was written successfully, in write order
    pub files_written: Vec<PathBuf>,
    /// Output files that could not be written
    pub write_failures: usize,
    /// The user ended the session at the prompt
    pub quit_requested: bool,
    /// Step timings, one entry per iteration
    pub timings: Vec<PipelineTimings>,
}

pub struct CapturePipeline<W: DepthWriter, P: PointCloudWriter> {
    depth_writer: W,
    cloud_writer: P,
    builder: PointCloudBuilder,
    config: CaptureConfig,
}

impl CapturePipeline<BinaryDepthWriter, PlyWriter> {
    pub fn new(config: CaptureConfig) -> Result<Self> {
        Self::with_custom(BinaryDepthWriter, PlyWriter, config)
    }
}

impl<W: DepthWriter, P: PointCloudWriter> CapturePipeline<W, P> {
    pub fn with_custom(depth_writer: W, cloud_writer: P, config: CaptureConfig) -> Result<Self> {
        config.validate()?;
        let builder = PointCloudBuilder::new(config.min_depth, config.max_depth, config.point_cloud_mode);
        Ok(Self {
            depth_writer,
            cloud_writer,
            builder,
            config,
        })
    }

    /// Runs a full capture session against `driver`.
    ///
    /// Device, stream and frame-wait failures end the session with an error;
    /// the device is stopped and closed either way. File write failures are
    /// logged, counted in the report, and do not stop the session.
    #[instrument(skip_all, fields(backend = %self.config.backend, max_frames = self.config.iteration_count()))]
    pub fn run<Dr: DepthDriver>(
        &self,
        driver: &mut Dr,
        prompt: &mut dyn ContinuePrompt,
    ) -> Result<CaptureReport> {
        let mut session = StreamingSession::open(driver, self.config.backend)?;
        let intrinsics = session.intrinsics();
        let mut buffer = FrameBuffer::for_depth_stream();
        let mut report = CaptureReport::default();

        let max_frames = self.config.iteration_count();
        let mut counter = 0;
        let mut quit = false;

        while !quit && counter < max_frames {
            counter += 1;
            let _span = tracing::info_span!("capture", frame = counter).entered();

            let timings = self.capture_once(&mut session, &mut buffer, &intrinsics, counter, &mut report)?;
            timings.log_summary(counter);
            report.timings.push(timings);

            if counter < max_frames {
                quit = !prompt.ask_continue()?;
            }
        }

        report.quit_requested = quit;
        session.shutdown()?;

        info!(
            frames = report.frames_captured,
            files = report.files_written.len(),
            write_failures = report.write_failures,
            "Capture session finished"
        );
        Ok(report)
    }

    fn capture_once<D: DepthDevice>(
        &self,
        session: &mut StreamingSession<D>,
        buffer: &mut FrameBuffer,
        intrinsics: &CameraIntrinsics,
        counter: usize,
        report: &mut CaptureReport,
    ) -> Result<PipelineTimings> {
        let mut timings = PipelineTimings::new();

        buffer.reset();

        let frames = timings.time("wait_for_frames", || {
            session.wait_for_frames(self.config.frame_timeout)
        })?;

        let copied = timings.time("copy_depth", || {
            // Color and IR are not used, but the driver hands them out with every set.
            trace!(
                color = ?frames.color().map(|c| (c.width, c.height, c.is_complete())),
                ir = frames.ir().is_some(),
                "Received frame set"
            );
            frames.depth().and_then(|depth| buffer.copy_from(depth))
        });
        session.release(frames);
        copied?;
        report.frames_captured += 1;

        if let Some(prefix) = &self.config.output_prefix {
            self.write_outputs(prefix, counter, buffer, intrinsics, &mut timings, report);
        }

        Ok(timings)
    }

    fn write_outputs(
        &self,
        prefix: &str,
        counter: usize,
        buffer: &FrameBuffer,
        intrinsics: &CameraIntrinsics,
        timings: &mut PipelineTimings,
        report: &mut CaptureReport,
    ) {
        let depth_path = PathBuf::from(depth_file_name(prefix, counter));
        let cloud_path = point_cloud_file_name(prefix, counter);

        let written = timings.time("write_depth", || {
            write_depth_file(&self.depth_writer, buffer, &depth_path)
        });
        record(report, &depth_path, written);

        let cloud = timings.time("build_point_cloud", || self.builder.build(buffer, intrinsics));

        let written = timings.time("write_ply", || {
            write_point_cloud_file(&self.cloud_writer, &cloud, &cloud_path)
        });
        record(report, &cloud_path, written);

        if self.config.text_outputs {
            let csv_path = depth_path.with_file_name(format!("{}.csv", file_name_of(&depth_path)));
            let written = timings.time("write_csv", || {
                write_depth_file(&CsvDepthWriter, buffer, &csv_path)
            });
            record(report, &csv_path, written);

            let xyz_path = cloud_path.with_file_name(format!("{}.xyz", file_name_of(&cloud_path)));
            let written = timings.time("write_xyz", || {
                write_point_cloud_file(&XyzWriter, &cloud, &xyz_path)
            });
            record(report, &xyz_path, written);
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn record(report: &mut CaptureReport, path: &Path, result: Result<()>) {
    match result {
        Ok(()) => {
            info!("Wrote file \"{}\"", path.display());
            report.files_written.push(path.to_path_buf());
        }
        Err(e) => {
            error!("Could not write \"{}\": {}", path.display(), e);
            report.write_failures += 1;
        }
    }
}
