//! Run configuration: file paths, frame dimensions and worker count.
//!
//! Loaded once before the pipeline starts and read-only afterwards. Files are either `key=value`
//! text or, with a `.json` extension, a JSON object with the same field names.

use std::path::{Path, PathBuf};

use crate::foundation::{
    core::FrameSize,
    error::{OverlayError, OverlayResult},
};

/// Default input stream path.
pub const DEFAULT_INPUT_VIDEO: &str = "input.yuv";
/// Default output stream path.
pub const DEFAULT_OUTPUT_VIDEO: &str = "output.yuv";
/// Default overlay image path.
pub const DEFAULT_OVERLAY_IMAGE: &str = "input.bmp";
/// Default frame width.
pub const DEFAULT_FRAME_WIDTH: u32 = 1920;
/// Default frame height.
pub const DEFAULT_FRAME_HEIGHT: u32 = 1080;

/// Everything one overlay run needs.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Raw 4:2:0 planar input stream.
    pub input_video: PathBuf,
    /// Raw 4:2:0 planar output stream (created or truncated).
    pub output_video: PathBuf,
    /// 24-bit BMP to overlay.
    pub overlay_image: PathBuf,
    /// Luma width of every frame.
    pub frame_width: u32,
    /// Luma height of every frame.
    pub frame_height: u32,
    /// Conversion worker threads; `None` uses the hardware count.
    pub threads: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_video: PathBuf::from(DEFAULT_INPUT_VIDEO),
            output_video: PathBuf::from(DEFAULT_OUTPUT_VIDEO),
            overlay_image: PathBuf::from(DEFAULT_OVERLAY_IMAGE),
            frame_width: DEFAULT_FRAME_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
            threads: None,
        }
    }
}

impl Config {
    /// Load a config file, choosing the parser by extension.
    pub fn from_path(path: &Path) -> OverlayResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| OverlayError::io(format!("read config '{}'", path.display()), e))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let cfg = if is_json {
            serde_json::from_str(&text).map_err(|e| {
                OverlayError::config(format!("parse '{}' as JSON: {e}", path.display()))
            })?
        } else {
            Self::parse_kv(&text).map_err(|e| match e {
                OverlayError::Config(msg) => {
                    OverlayError::config(format!("'{}': {msg}", path.display()))
                }
                other => other,
            })?
        };
        tracing::debug!(path = %path.display(), ?cfg, "loaded config");
        Ok(cfg)
    }

    /// Parse `key=value` lines on top of the defaults.
    ///
    /// Blank lines and lines starting with `#` or `;` are skipped. Keys are case-insensitive and
    /// surrounding whitespace is trimmed. Unknown keys are ignored with a warning.
    pub fn parse_kv(text: &str) -> OverlayResult<Self> {
        let mut cfg = Self::default();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(OverlayError::config(format!(
                    "line {line_no}: expected key=value, got '{line}'"
                )));
            };
            let key = key.trim().to_ascii_lowercase();
            let value = unquote(value.trim());

            match key.as_str() {
                "input_video" => cfg.input_video = PathBuf::from(value),
                "output_video" => cfg.output_video = PathBuf::from(value),
                "overlay_image" => cfg.overlay_image = PathBuf::from(value),
                "frame_width" => cfg.frame_width = parse_number(line_no, &key, value)?,
                "frame_height" => cfg.frame_height = parse_number(line_no, &key, value)?,
                "threads" => {
                    cfg.threads = if value.is_empty() || value.eq_ignore_ascii_case("auto") {
                        None
                    } else {
                        Some(parse_number(line_no, &key, value)?)
                    }
                }
                _ => tracing::warn!(line = line_no, key = %key, "ignoring unknown config key"),
            }
        }

        Ok(cfg)
    }

    /// Check dimensions, paths and worker count.
    pub fn validate(&self) -> OverlayResult<()> {
        self.frame_size()?;

        for (name, path) in [
            ("input_video", &self.input_video),
            ("output_video", &self.output_video),
            ("overlay_image", &self.overlay_image),
        ] {
            if path.as_os_str().is_empty() {
                return Err(OverlayError::config(format!("{name} must not be empty")));
            }
        }
        if self.input_video == self.output_video {
            return Err(OverlayError::config(format!(
                "input_video and output_video are both '{}'",
                self.input_video.display()
            )));
        }
        if self.threads == Some(0) {
            return Err(OverlayError::config("threads must be >= 1 when set"));
        }
        Ok(())
    }

    /// Frame dimensions as a validated [`FrameSize`].
    pub fn frame_size(&self) -> OverlayResult<FrameSize> {
        FrameSize::new(self.frame_width, self.frame_height)
            .map_err(|e| OverlayError::config(e.to_string()))
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn parse_number<T>(line_no: usize, key: &str, value: &str) -> OverlayResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e| {
        OverlayError::config(format!("line {line_no}: invalid {key} '{value}': {e}"))
    })
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
