use std::f64::consts::PI;

use typhoon_core::errors::{Result, TyphoonError};
use typhoon_core::models::{GenomicWindow, ReadRecord};

/// Kernels further than this many standard deviations away contribute nothing
/// representable in an f64.
const KERNEL_CUTOFF_SD: f64 = 40.0;

pub fn standard_normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

///
/// Sample positions `start, start + step, ...` strictly below `window.end`.
///
pub fn sample_positions(window: &GenomicWindow, step: i64) -> Result<Vec<i64>> {
    if step <= 0 {
        return Err(TyphoonError::InvalidParameter(format!(
            "sampling step must be positive, got {}",
            step
        )));
    }
    Ok((window.start..window.end).step_by(step as usize).collect())
}

///
/// Sum of Gaussian kernels of width `sd` centred on every point, evaluated at
/// each sample.
///
pub fn gaussian_kde(points: &[i64], samples: &[i64], sd: f64) -> Vec<f64> {
    let mut sorted = points.to_vec();
    sorted.sort_unstable();
    let reach = KERNEL_CUTOFF_SD * sd;

    samples
        .iter()
        .map(|&x| {
            let x = x as f64;
            let first = sorted.partition_point(|&p| (p as f64) < x - reach);
            sorted[first..]
                .iter()
                .take_while(|&&p| (p as f64) <= x + reach)
                .map(|&p| standard_normal_pdf((x - p as f64) / sd) / sd)
                .sum::<f64>()
        })
        .collect()
}

/// Density of fragment midpoints sampled across a window.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityCurve {
    pub window: GenomicWindow,
    pub positions: Vec<i64>,
    pub density: Vec<f64>,
}

impl DensityCurve {
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.positions
            .iter()
            .zip(self.density.iter())
            .map(|(x, y)| (*x as f64, *y))
    }

    pub fn peak(&self) -> f64 {
        self.density.iter().copied().fold(0.0, f64::max)
    }
}

///
/// Midpoint density estimator. `bandwidth` is the distance between samples,
/// `kernel_sd` the width of every kernel.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelDensity {
    pub bandwidth: i64,
    pub kernel_sd: f64,
}

impl KernelDensity {
    pub fn new(bandwidth: i64, kernel_sd: f64) -> Self {
        KernelDensity {
            bandwidth,
            kernel_sd,
        }
    }

    pub fn estimate<I>(&self, window: &GenomicWindow, reads: I) -> Result<DensityCurve>
    where
        I: IntoIterator<Item = ReadRecord>,
    {
        let midpoints: Vec<i64> = reads.into_iter().map(|r| r.midpoint()).collect();
        let positions = sample_positions(window, self.bandwidth)?;
        let density = gaussian_kde(&midpoints, &positions, self.kernel_sd);

        Ok(DensityCurve {
            window: window.clone(),
            positions,
            density,
        })
    }
}
