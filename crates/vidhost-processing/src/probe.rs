//! Dimension probing through `ffprobe`.

use crate::aspect::classify_dimensions;
use crate::error::{ProcessingError, ProcessingResult};
use crate::validation::{validate_path, validate_tool_path};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tokio::process::Command;
use vidhost_core::models::AspectBucket;

/// Width and height of the first stream. Missing values are reported as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamDimensions {
    pub width: u32,
    pub height: u32,
}

impl StreamDimensions {
    pub fn aspect(&self) -> AspectBucket {
        classify_dimensions(self.width, self.height)
    }
}

#[async_trait]
pub trait MediaProber: Send + Sync {
    async fn probe(&self, path: &Path) -> ProcessingResult<StreamDimensions>;
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
}

/// Parse `ffprobe -show_streams -of json` output, taking the first stream.
pub fn parse_probe_output(stdout: &[u8]) -> ProcessingResult<StreamDimensions> {
    let output: ProbeOutput = serde_json::from_slice(stdout)?;
    let stream = output
        .streams
        .into_iter()
        .next()
        .ok_or(ProcessingError::NoStreams)?;

    Ok(StreamDimensions {
        width: stream.width.unwrap_or(0),
        height: stream.height.unwrap_or(0),
    })
}

pub struct FfprobeProber {
    ffprobe_path: String,
}

impl FfprobeProber {
    pub fn new(ffprobe_path: impl Into<String>) -> ProcessingResult<Self> {
        let ffprobe_path = ffprobe_path.into();
        validate_tool_path(&ffprobe_path)?;
        Ok(Self { ffprobe_path })
    }
}

#[async_trait]
impl MediaProber for FfprobeProber {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        process.executable.path = %self.ffprobe_path,
        ffmpeg.operation = "probe"
    ))]
    async fn probe(&self, path: &Path) -> ProcessingResult<StreamDimensions> {
        let start = std::time::Instant::now();
        validate_path(path)?;

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-show_streams", "-of", "json"])
            .arg(path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ProcessingError::Spawn {
                tool: self.ffprobe_path.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProcessingError::ToolFailed {
                tool: self.ffprobe_path.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let dimensions = parse_probe_output(&output.stdout)?;

        tracing::info!(
            duration_ms = start.elapsed().as_millis(),
            width = dimensions.width,
            height = dimensions.height,
            aspect = %dimensions.aspect(),
            "Video probe completed"
        );

        Ok(dimensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LANDSCAPE_PROBE: &str = r#"{
        "streams": [
            {
                "index": 0,
                "codec_name": "h264",
                "codec_type": "video",
                "width": 1920,
                "height": 1080,
                "r_frame_rate": "30/1"
            },
            {
                "index": 1,
                "codec_name": "aac",
                "codec_type": "audio",
                "sample_rate": "48000"
            }
        ]
    }"#;

    #[test]
    fn test_parse_first_stream() {
        let dims = parse_probe_output(LANDSCAPE_PROBE.as_bytes()).unwrap();
        assert_eq!(
            dims,
            StreamDimensions {
                width: 1920,
                height: 1080
            }
        );
        assert_eq!(dims.aspect(), AspectBucket::Landscape);
    }

    #[test]
    fn test_first_stream_without_dimensions_is_other() {
        let json = r#"{"streams":[{"index":0,"codec_type":"audio"}]}"#;
        let dims = parse_probe_output(json.as_bytes()).unwrap();
        assert_eq!(dims, StreamDimensions { width: 0, height: 0 });
        assert_eq!(dims.aspect(), AspectBucket::Other);
    }

    #[test]
    fn test_no_streams() {
        assert!(matches!(
            parse_probe_output(br#"{"streams":[]}"#),
            Err(ProcessingError::NoStreams)
        ));
        assert!(matches!(
            parse_probe_output(b"{}"),
            Err(ProcessingError::NoStreams)
        ));
    }

    #[test]
    fn test_malformed_output() {
        assert!(matches!(
            parse_probe_output(b"not json"),
            Err(ProcessingError::InvalidProbeOutput(_))
        ));
    }

    #[test]
    fn test_rejects_unsafe_tool_path() {
        assert!(FfprobeProber::new("ffprobe; rm -rf /").is_err());
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let prober = FfprobeProber::new("vidhost-no-such-ffprobe").unwrap();
        let err = prober
            .probe(Path::new("/tmp/input.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessingError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_tool_failure() {
        let prober = FfprobeProber::new("false").unwrap();
        let err = prober
            .probe(Path::new("/tmp/input.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessingError::ToolFailed { .. }));
    }
}
