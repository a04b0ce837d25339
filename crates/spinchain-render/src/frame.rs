//! Frame rendering.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{
    draw_antialiased_line_segment_mut, draw_filled_circle_mut, draw_filled_rect_mut,
    draw_hollow_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut,
};
use imageproc::pixelops::interpolate;
use imageproc::rect::Rect;
use spinchain_sim::{StateSnapshot, Trajectory};
use tracing::debug;

use crate::colormap::coolwarm;
use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([20, 20, 20, 255]);
const BOND: Rgba<u8> = Rgba([150, 150, 150, 255]);
const GRID: Rgba<u8> = Rgba([200, 200, 200, 255]);
const TRACE: Rgba<u8> = Rgba([31, 119, 180, 255]);
const MARKER: Rgba<u8> = Rgba([214, 39, 40, 255]);
const PROGRESS: Rgba<u8> = Rgba([90, 90, 90, 255]);

/// Vertical range of the magnetisation axis.
const Z_LIMIT: f32 = 1.1;
const DASH: f32 = 6.0;
const GAP: f32 = 4.0;

/// One rendered snapshot.
#[derive(Debug, Clone)]
pub struct AnimationFrame {
    /// Position in the animation, starting at 0.
    pub index: usize,
    /// Trotter step of the snapshot this frame shows.
    pub step: usize,
    /// Pixels.
    pub image: RgbaImage,
}

/// Draws one frame per snapshot.
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    config: RenderConfig,
}

impl FrameRenderer {
    /// Create a renderer; fails on unusable settings.
    pub fn new(config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The settings in use.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Lazily render every snapshot, in order.
    pub fn frames<'a>(
        &'a self,
        trajectory: &'a Trajectory,
    ) -> RenderResult<impl Iterator<Item = AnimationFrame> + 'a> {
        let layout = self.layout(trajectory)?;
        debug!(
            frames = trajectory.len(),
            width = self.config.width,
            height = self.config.height,
            "rendering frames"
        );
        Ok(trajectory
            .iter()
            .enumerate()
            .map(move |(index, snapshot)| self.draw(trajectory, &layout, index, snapshot)))
    }

    /// Render every snapshot into memory.
    pub fn render(&self, trajectory: &Trajectory) -> RenderResult<Vec<AnimationFrame>> {
        Ok(self.frames(trajectory)?.collect())
    }

    fn layout(&self, trajectory: &Trajectory) -> RenderResult<Layout> {
        if trajectory.is_empty() {
            return Err(RenderError::EmptyTrajectory);
        }
        if self.config.tracked_qubit >= trajectory.num_qubits() {
            return Err(RenderError::InvalidConfig(format!(
                "tracked qubit {} is outside a chain of {}",
                self.config.tracked_qubit,
                trajectory.num_qubits()
            )));
        }
        let total_time = self
            .config
            .total_time
            .unwrap_or_else(|| trajectory.duration());
        let total_time = if total_time > 0.0 { total_time } else { 1.0 };
        Ok(Layout::new(&self.config, trajectory.num_qubits(), total_time))
    }

    fn draw(
        &self,
        trajectory: &Trajectory,
        layout: &Layout,
        index: usize,
        snapshot: &StateSnapshot,
    ) -> AnimationFrame {
        let mut image = RgbaImage::from_pixel(self.config.width, self.config.height, BACKGROUND);

        draw_chain(&mut image, layout, snapshot);
        draw_axes(&mut image, layout);
        draw_history(
            &mut image,
            layout,
            &trajectory.snapshots()[..=index],
            self.config.tracked_qubit,
        );
        draw_progress(&mut image, layout, snapshot.time);

        AnimationFrame {
            index,
            step: snapshot.step,
            image,
        }
    }
}

/// Pixel geometry shared by every frame of one animation.
#[derive(Debug, Clone)]
struct Layout {
    chain_y: f32,
    site_x: Vec<f32>,
    radius: f32,
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    bar_y: f32,
    bar_height: f32,
    total_time: f64,
}

impl Layout {
    fn new(config: &RenderConfig, num_qubits: usize, total_time: f64) -> Self {
        let w = config.width as f32;
        let h = config.height as f32;
        let left = (w * 0.08).round();
        let right = (w * 0.96).round();

        let spacing = (right - left) / num_qubits as f32;
        let site_x = (0..num_qubits)
            .map(|i| left + spacing * (i as f32 + 0.5))
            .collect();

        Self {
            chain_y: (h * 0.18).round(),
            site_x,
            radius: (spacing * 0.35).min(h * 0.12).max(3.0),
            left,
            right,
            top: (h * 0.42).round(),
            bottom: (h * 0.86).round(),
            bar_y: (h * 0.92).round(),
            bar_height: (h * 0.025).max(4.0).round(),
            total_time,
        }
    }

    fn x_at(&self, time: f64) -> f32 {
        let frac = (time / self.total_time).clamp(0.0, 1.0) as f32;
        self.left + frac * (self.right - self.left)
    }

    fn y_at(&self, z: f64) -> f32 {
        let z = (z as f32).clamp(-Z_LIMIT, Z_LIMIT);
        self.top + (Z_LIMIT - z) / (2.0 * Z_LIMIT) * (self.bottom - self.top)
    }
}

fn draw_chain(image: &mut RgbaImage, layout: &Layout, snapshot: &StateSnapshot) {
    let y = layout.chain_y;
    for pair in layout.site_x.windows(2) {
        draw_line_segment_mut(image, (pair[0], y), (pair[1], y), BOND);
    }

    let r = layout.radius.round() as i32;
    for (&x, &z) in layout.site_x.iter().zip(&snapshot.magnetization) {
        let center = (x.round() as i32, y.round() as i32);
        draw_filled_circle_mut(image, center, r, coolwarm(z));
        draw_hollow_circle_mut(image, center, r, INK);

        // Spin arrow: up for ⟨Z⟩ = +1, down for −1.
        let tip = y - (z as f32).clamp(-1.0, 1.0) * layout.radius * 0.8;
        for dx in [-1.0, 0.0, 1.0] {
            draw_line_segment_mut(image, (x + dx, y), (x + dx, tip), INK);
        }
    }
}

fn draw_axes(image: &mut RgbaImage, layout: &Layout) {
    for z in [-1.0, -0.5, 0.0, 0.5, 1.0] {
        let y = layout.y_at(z);
        draw_dashed_line(image, (layout.left, y), (layout.right, y), GRID);
    }
    for k in 1..5 {
        let x = layout.x_at(layout.total_time * f64::from(k) / 5.0);
        draw_dashed_line(image, (x, layout.top), (x, layout.bottom), GRID);
    }

    let width = (layout.right - layout.left).max(1.0) as u32;
    let height = (layout.bottom - layout.top).max(1.0) as u32;
    draw_hollow_rect_mut(
        image,
        Rect::at(layout.left as i32, layout.top as i32).of_size(width, height),
        INK,
    );
}

fn draw_history(
    image: &mut RgbaImage,
    layout: &Layout,
    history: &[StateSnapshot],
    qubit: usize,
) {
    let points: Vec<(i32, i32)> = history
        .iter()
        .map(|s| {
            (
                layout.x_at(s.time).round() as i32,
                layout.y_at(s.magnetization[qubit]).round() as i32,
            )
        })
        .collect();

    for pair in points.windows(2) {
        draw_antialiased_line_segment_mut(image, pair[0], pair[1], TRACE, interpolate);
    }
    if let Some(&current) = points.last() {
        draw_filled_circle_mut(image, current, 4, MARKER);
    }
}

fn draw_progress(image: &mut RgbaImage, layout: &Layout, time: f64) {
    let x = layout.left as i32;
    let y = layout.bar_y as i32;
    let full = (layout.right - layout.left).max(1.0) as u32;
    let height = layout.bar_height as u32;

    let filled = (layout.x_at(time) - layout.left).round() as u32;
    if filled > 0 {
        draw_filled_rect_mut(
            image,
            Rect::at(x, y).of_size(filled.min(full), height),
            PROGRESS,
        );
    }
    draw_hollow_rect_mut(image, Rect::at(x, y).of_size(full, height), INK);
}

fn draw_dashed_line(image: &mut RgbaImage, start: (f32, f32), end: (f32, f32), color: Rgba<u8>) {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let length = dx.hypot(dy);
    if length <= 0.0 {
        return;
    }
    let at = |s: f32| (start.0 + dx * s / length, start.1 + dy * s / length);

    let mut s = 0.0;
    while s < length {
        let e = (s + DASH).min(length);
        draw_line_segment_mut(image, at(s), at(e), color);
        s += DASH + GAP;
    }
}
