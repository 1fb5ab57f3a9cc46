// Destructible 1-D heightmap.
//
// Samples are normalized heights in [0, 1] spread evenly across the playfield
// width. They are only ever lowered (by cratering) after generation.

use rand::Rng;
use std::f32::consts::PI;

/// Screen-space fraction of the playfield height reached by a sample of 1.0.
const GROUND_TOP: f32 = 0.42;
/// Screen-space fraction of the playfield height reached by a sample of 0.0.
const GROUND_BOTTOM: f32 = 0.84;
/// Ground line used when the playfield has no usable width.
const DEGENERATE_GROUND: f32 = 0.75;

/// Height the map edges are pulled toward.
const EDGE_HEIGHT: f32 = 0.55;
/// Smallest weight a generated sample keeps after edge tapering.
const EDGE_WEIGHT_FLOOR: f32 = 0.15;
/// Seeds are drawn from [0, SEED_SPAN).
const SEED_SPAN: f32 = 1000.0;

/// Largest normalized cut a single crater can take out of one sample.
const MAX_CRATER_CUT: f32 = 0.45;
/// How far below the playfield a crater floor may reach.
const CRATER_FLOOR_SLACK: f32 = 200.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    samples: Vec<f32>,
    width: f32,
    height: f32,
}

impl Terrain {
    /// Generates a fresh map from two random phase seeds.
    pub fn generate<R: Rng + ?Sized>(
        sample_count: usize,
        width: f32,
        height: f32,
        rng: &mut R,
    ) -> Self {
        let seed_a = rng.gen_range(0.0..SEED_SPAN);
        let seed_b = rng.gen_range(0.0..SEED_SPAN);
        Self::from_seeds(sample_count, width, height, seed_a, seed_b)
    }

    /// Builds the map that two given phase seeds describe.
    pub fn from_seeds(sample_count: usize, width: f32, height: f32, seed_a: f32, seed_b: f32) -> Self {
        let last = sample_count.saturating_sub(1).max(1) as f32;
        let samples = (0..sample_count)
            .map(|i| {
                let t = i as f32 / last;
                let raw = waveform(t, seed_a) + waveform(t, seed_b) * 0.6;
                let value = ((raw + 1.2) / 2.4).clamp(0.0, 1.0);

                // Pull both ends toward mid-height so spawns never sit on a spike or in a pit.
                let edge = (PI * t).sin().clamp(EDGE_WEIGHT_FLOOR, 1.0);
                lerp(EDGE_HEIGHT, value, edge)
            })
            .collect();

        Self {
            samples,
            width,
            height,
        }
    }

    /// Wraps explicit samples, clamping each into [0, 1].
    pub fn from_samples(samples: Vec<f32>, width: f32, height: f32) -> Self {
        let samples = samples
            .into_iter()
            .map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) })
            .collect();
        Self {
            samples,
            width,
            height,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Ground Y (pixels, +Y down) under pixel column `x`.
    pub fn height_at(&self, x: f32) -> f32 {
        if self.width <= 1.0 || self.samples.is_empty() {
            return self.height * DEGENERATE_GROUND;
        }

        let last = self.samples.len() - 1;
        let fx = (x / self.width).clamp(0.0, 1.0);
        let idx = fx * last as f32;
        let i0 = (idx.floor() as usize).min(last);
        let i1 = (i0 + 1).min(last);
        let t = idx - i0 as f32;

        self.sample_to_y(lerp(self.samples[i0], self.samples[i1], t))
    }

    /// Carves a circular bite centred at (cx, cy). Samples are only lowered.
    pub fn crater(&mut self, cx: f32, cy: f32, radius: f32) {
        if !(radius > 0.0) || self.samples.len() < 2 || self.width <= 1.0 {
            return;
        }

        let last = (self.samples.len() - 1) as f32;
        let band = (self.height * (GROUND_BOTTOM - GROUND_TOP)).max(1.0);
        let first = (((cx - radius) / self.width).clamp(0.0, 1.0) * last).floor() as usize;
        let end = (((cx + radius) / self.width).clamp(0.0, 1.0) * last).ceil() as usize;
        let floor_limit = self.height + CRATER_FLOOR_SLACK;

        for i in first..=end.min(self.samples.len() - 1) {
            let x = i as f32 / last * self.width;
            let dx = x - cx;
            if dx.abs() > radius {
                continue;
            }

            let depth = (radius * radius - dx * dx).max(0.0).sqrt();
            let cut_y = (cy + depth).clamp(0.0, floor_limit);
            let surface_y = self.sample_to_y(self.samples[i]);
            if cut_y > surface_y {
                let cut = ((cut_y - surface_y) / band).clamp(0.0, MAX_CRATER_CUT);
                self.samples[i] = (self.samples[i] - cut).clamp(0.0, 1.0);
            }
        }
    }

    fn sample_to_y(&self, value: f32) -> f32 {
        lerp(self.height * GROUND_BOTTOM, self.height * GROUND_TOP, value)
    }
}

fn waveform(t: f32, seed: f32) -> f32 {
    let x = t * 6.0 + seed;
    x.sin() * 0.5 + (x * 0.37).sin() * 0.3 + (x * 1.73).sin() * 0.2
}

pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
