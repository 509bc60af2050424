//! Asynchronous gradient lookup textures.
//!
//! The blob effect tints its surface with a gradient image. Decoding is the
//! only asynchronous operation in the renderer: a worker thread loads the
//! file and hands the decoded image over a channel, while the instance
//! keeps rendering with a 1x1 white placeholder until the result lands.
//! A load failure is not fatal; the placeholder simply stays.

use std::path::PathBuf;
use std::thread;

use anyhow::{Context, Result};
use crossbeam_channel::{bounded, Receiver, TryRecvError};
use image::RgbaImage;

/// A gradient lookup slot owned by one effect instance. Dropping the slot
/// disconnects the loader; a worker finishing afterwards finds no receiver
/// and its result is discarded.
pub struct GradientSlot {
    current: RgbaImage,
    version: u64,
    pending: Option<Receiver<Result<RgbaImage>>>,
}

fn placeholder_image() -> RgbaImage {
    RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]))
}

impl GradientSlot {
    /// Slot with no texture to load; stays on the placeholder forever.
    pub fn placeholder() -> Self {
        Self {
            current: placeholder_image(),
            version: 0,
            pending: None,
        }
    }

    /// Starts decoding `path` on a worker thread.
    pub fn load(path: PathBuf) -> Self {
        let (tx, rx) = bounded(1);
        thread::spawn(move || {
            let result = image::open(&path)
                .map(|img| img.to_rgba8())
                .with_context(|| format!("failed to load gradient at {}", path.display()));
            // The receiver may already be gone if the effect was switched
            // away; nothing to do then.
            let _ = tx.send(result);
        });
        Self {
            current: placeholder_image(),
            version: 0,
            pending: Some(rx),
        }
    }

    /// Slot fed by an external channel; used by tests and custom loaders.
    pub fn from_receiver(rx: Receiver<Result<RgbaImage>>) -> Self {
        Self {
            current: placeholder_image(),
            version: 0,
            pending: Some(rx),
        }
    }

    /// Non-blocking poll for a finished load; called once per tick.
    pub fn poll(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(img)) => {
                tracing::info!(width = img.width(), height = img.height(), "gradient ready");
                self.current = img;
                self.version += 1;
                self.pending = None;
            }
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "gradient load failed; keeping placeholder");
                self.pending = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                tracing::warn!("gradient loader vanished; keeping placeholder");
                self.pending = None;
            }
        }
    }

    /// The image to sample right now (placeholder until the load resolves).
    pub fn image(&self) -> &RgbaImage {
        &self.current
    }

    /// Bumps when a new image replaces the current one, so the presentation
    /// layer knows to re-upload.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn placeholder_is_a_single_white_pixel() {
        let slot = GradientSlot::placeholder();
        assert_eq!(slot.image().dimensions(), (1, 1));
        assert_eq!(slot.image().get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert!(!slot.is_pending());
    }

    #[test]
    fn stays_on_placeholder_until_the_load_resolves() {
        let (tx, rx) = bounded(1);
        let mut slot = GradientSlot::from_receiver(rx);
        slot.poll();
        assert!(slot.is_pending());
        assert_eq!(slot.image().dimensions(), (1, 1));
        assert_eq!(slot.version(), 0);

        let img = RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]));
        tx.send(Ok(img)).unwrap();
        slot.poll();
        assert!(!slot.is_pending());
        assert_eq!(slot.image().dimensions(), (4, 2));
        assert_eq!(slot.version(), 1);
    }

    #[test]
    fn failed_load_keeps_the_placeholder() {
        let (tx, rx) = bounded(1);
        let mut slot = GradientSlot::from_receiver(rx);
        tx.send(Err(anyhow::anyhow!("no such file"))).unwrap();
        slot.poll();
        assert!(!slot.is_pending());
        assert_eq!(slot.image().dimensions(), (1, 1));
        assert_eq!(slot.version(), 0);
    }

    #[test]
    fn loads_a_real_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradient.png");
        RgbaImage::from_pixel(8, 1, image::Rgba([255, 136, 0, 255]))
            .save(&path)
            .unwrap();

        let mut slot = GradientSlot::load(path);
        let deadline = Instant::now() + Duration::from_secs(5);
        while slot.is_pending() && Instant::now() < deadline {
            slot.poll();
            thread::sleep(Duration::from_millis(5));
        }
        assert!(!slot.is_pending(), "loader never finished");
        assert_eq!(slot.image().dimensions(), (8, 1));
        assert_eq!(slot.version(), 1);
    }

    #[test]
    fn missing_file_degrades_to_placeholder() {
        let mut slot = GradientSlot::load(PathBuf::from("/definitely/not/here.png"));
        let deadline = Instant::now() + Duration::from_secs(5);
        while slot.is_pending() && Instant::now() < deadline {
            slot.poll();
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(slot.image().dimensions(), (1, 1));
    }
}
