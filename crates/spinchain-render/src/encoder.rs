//! Animation encoders.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::gif::{GifEncoder as GifWriter, Repeat};
use image::{Delay, Frame, ImageFormat};
use tracing::{debug, trace};

use crate::error::RenderResult;
use crate::frame::AnimationFrame;

/// Serialises a stream of frames into an output artifact.
pub trait AnimationEncoder {
    /// Short name for logs and summaries.
    fn name(&self) -> &'static str;

    /// Consume `frames` and write them to `path`, returning how many were
    /// written. Existing output is overwritten.
    fn encode(
        &self,
        frames: &mut dyn Iterator<Item = AnimationFrame>,
        fps: u32,
        path: &Path,
    ) -> RenderResult<usize>;
}

/// Looping animated GIF.
#[derive(Debug, Clone, Copy)]
pub struct GifEncoder {
    /// Quantisation speed, 1 (best) to 30 (fastest).
    pub speed: i32,
}

impl Default for GifEncoder {
    fn default() -> Self {
        Self { speed: 10 }
    }
}

impl AnimationEncoder for GifEncoder {
    fn name(&self) -> &'static str {
        "gif"
    }

    fn encode(
        &self,
        frames: &mut dyn Iterator<Item = AnimationFrame>,
        fps: u32,
        path: &Path,
    ) -> RenderResult<usize> {
        let mut writer = BufWriter::new(File::create(path)?);
        let delay = Delay::from_numer_denom_ms(1000, fps.max(1));
        let mut count = 0;
        {
            let mut gif = GifWriter::new_with_speed(&mut writer, self.speed.clamp(1, 30));
            gif.set_repeat(Repeat::Infinite)?;
            for frame in frames {
                trace!(index = frame.index, step = frame.step, "encoding gif frame");
                gif.encode_frame(Frame::from_parts(frame.image, 0, 0, delay))?;
                count += 1;
            }
        }
        writer.flush()?;
        debug!(count, path = %path.display(), "gif written");
        Ok(count)
    }
}

/// One PNG per frame, `frame_00000.png` onwards, inside a directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngSequenceEncoder;

impl PngSequenceEncoder {
    /// File name of frame `index`.
    pub fn file_name(index: usize) -> String {
        format!("frame_{index:05}.png")
    }
}

impl AnimationEncoder for PngSequenceEncoder {
    fn name(&self) -> &'static str {
        "png-sequence"
    }

    fn encode(
        &self,
        frames: &mut dyn Iterator<Item = AnimationFrame>,
        _fps: u32,
        path: &Path,
    ) -> RenderResult<usize> {
        fs::create_dir_all(path)?;
        let mut count = 0;
        for frame in frames {
            let file = path.join(Self::file_name(frame.index));
            frame.image.save_with_format(&file, ImageFormat::Png)?;
            count += 1;
        }
        debug!(count, dir = %path.display(), "png sequence written");
        Ok(count)
    }
}
