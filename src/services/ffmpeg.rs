//! Video encoding through the system `ffmpeg` binary.
//!
//! Raw RGBA frames go to ffmpeg's stdin; the encoded container comes back
//! on stdout, so no temporary files are involved.

use std::io::{Read, Write};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;

use super::video_exporter::{Frame, FrameSink, FrameSpec};
use crate::error::ExportError;
use crate::models::VideoFormat;

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

struct Running {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: JoinHandle<std::io::Result<Vec<u8>>>,
    stderr: JoinHandle<std::io::Result<Vec<u8>>>,
    frame_len: usize,
}

/// [`FrameSink`] that pipes frames into ffmpeg.
pub struct FfmpegSink {
    format: VideoFormat,
    pixel_scale: u32,
    bitrate: String,
    running: Option<Running>,
}

impl FfmpegSink {
    pub fn new(format: VideoFormat) -> Self {
        Self {
            format,
            pixel_scale: 1,
            bitrate: "2500k".to_string(),
            running: None,
        }
    }

    /// Integer nearest-neighbor upscale, so small retro images stay crisp.
    pub fn pixel_scale(mut self, scale: u32) -> Self {
        self.pixel_scale = scale.max(1);
        self
    }

    pub fn bitrate(mut self, bitrate: impl Into<String>) -> Self {
        self.bitrate = bitrate.into();
        self
    }

    /// Arguments after `ffmpeg` for a capture of `spec`.
    pub fn args(&self, spec: FrameSpec) -> Vec<String> {
        let scale = self.pixel_scale;
        let mut args: Vec<String> = [
            "-hide_banner",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        args.push(format!("{}x{}", spec.width, spec.height));
        args.extend(["-r".to_string(), spec.fps.to_string()]);
        args.extend(["-i", "pipe:0", "-an", "-vf"].map(String::from));
        // yuv420p needs even dimensions.
        args.push(format!(
            "scale=iw*{scale}:ih*{scale}:flags=neighbor,pad=ceil(iw/2)*2:ceil(ih/2)*2"
        ));

        match self.format {
            VideoFormat::Webm => {
                args.extend(["-c:v", "libvpx-vp9", "-b:v"].map(String::from));
                args.push(self.bitrate.clone());
                args.extend(["-pix_fmt", "yuv420p", "-f", "webm"].map(String::from));
            }
            VideoFormat::Mp4 => {
                args.extend(["-c:v", "libx264", "-b:v"].map(String::from));
                args.push(self.bitrate.clone());
                args.extend(
                    [
                        "-pix_fmt",
                        "yuv420p",
                        "-movflags",
                        "frag_keyframe+empty_moov",
                        "-f",
                        "mp4",
                    ]
                    .map(String::from),
                );
            }
        }
        args.push("pipe:1".to_string());
        args
    }
}

impl Running {
    fn spawn(program: &str, args: &[String], frame_len: usize) -> Result<Self, ExportError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ExportError::SinkUnavailable(format!("failed to spawn {program}: {e}")))?;

        let (Some(stdin), Some(stdout), Some(stderr)) =
            (child.stdin.take(), child.stdout.take(), child.stderr.take())
        else {
            let _ = child.kill();
            return Err(ExportError::Sink("failed to open ffmpeg pipes".to_string()));
        };

        Ok(Self {
            child,
            stdin: Some(stdin),
            stdout: drain(stdout),
            stderr: drain(stderr),
            frame_len,
        })
    }

    /// Close stdin, wait for exit and collect both output streams.
    fn finish(mut self) -> Result<(ExitStatus, Vec<u8>, String), ExportError> {
        drop(self.stdin.take());
        let status = self.child.wait()?;
        let stdout = join(self.stdout)?;
        let stderr = join(self.stderr)?;
        let stderr = String::from_utf8_lossy(&stderr).trim().to_string();
        Ok((status, stdout, stderr))
    }
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<std::io::Result<Vec<u8>>> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

impl FrameSink for FfmpegSink {
    fn start(&mut self, spec: FrameSpec) -> Result<(), ExportError> {
        if self.running.is_some() {
            return Err(ExportError::Sink("ffmpeg sink already started".to_string()));
        }
        if !is_ffmpeg_on_path() {
            return Err(ExportError::SinkUnavailable(
                "ffmpeg is required for video export, but was not found on PATH".to_string(),
            ));
        }

        let args = self.args(spec);
        tracing::debug!(args = ?args, "Spawning ffmpeg");
        self.running = Some(Running::spawn(
            "ffmpeg",
            &args,
            spec.width * spec.height * 4,
        )?);
        Ok(())
    }

    fn submit_frame(&mut self, frame: &Frame<'_>) -> Result<(), ExportError> {
        let Some(running) = self.running.as_mut() else {
            return Err(ExportError::Sink("ffmpeg sink is not running".to_string()));
        };
        if frame.rgba.len() != running.frame_len {
            return Err(ExportError::Sink(format!(
                "frame has {} bytes, expected {}",
                frame.rgba.len(),
                running.frame_len
            )));
        }
        let Some(stdin) = running.stdin.as_mut() else {
            return Err(ExportError::Sink("ffmpeg sink is already finalized".to_string()));
        };
        let Err(e) = stdin.write_all(frame.rgba) else {
            return Ok(());
        };

        // A broken pipe means ffmpeg quit early; its own message says why.
        let mut message = format!("failed to write frame {} to ffmpeg: {e}", frame.index);
        if let Some(running) = self.running.take() {
            match running.finish() {
                Ok((status, _, stderr)) if !stderr.is_empty() => {
                    message.push_str(&format!(" (ffmpeg exited with status {status}: {stderr})"));
                }
                Ok((status, _, _)) => {
                    message.push_str(&format!(" (ffmpeg exited with status {status})"));
                }
                Err(finish_error) => {
                    tracing::warn!(%finish_error, "Could not collect ffmpeg output");
                }
            }
        }
        Err(ExportError::Sink(message))
    }

    fn finalize(&mut self) -> Result<Vec<u8>, ExportError> {
        let Some(running) = self.running.take() else {
            return Err(ExportError::Sink("ffmpeg sink is not running".to_string()));
        };
        let (status, stdout, stderr) = running.finish()?;
        if !status.success() {
            return Err(ExportError::Sink(format!(
                "ffmpeg exited with status {status}: {stderr}"
            )));
        }
        Ok(stdout)
    }
}

fn join(handle: JoinHandle<std::io::Result<Vec<u8>>>) -> Result<Vec<u8>, ExportError> {
    handle
        .join()
        .map_err(|_| ExportError::Sink("ffmpeg reader thread panicked".to_string()))?
        .map_err(ExportError::from)
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if let Some(mut running) = self.running.take() {
            drop(running.stdin.take());
            let _ = running.child.kill();
            let _ = running.child.wait();
        }
    }
}
