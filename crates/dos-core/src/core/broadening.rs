use crate::error::DosError;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

const RELATIVE_TOLERANCE: f64 = 1e-5;
const ABSOLUTE_TOLERANCE: f64 = 1e-8;

/// Broadening kernel used to turn weighted points into a continuous curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Smearing {
    /// Normalised Gaussian with standard deviation equal to the width.
    #[default]
    Gauss,
}

impl Smearing {
    /// Evaluates the kernel centred on `x0` at every point of `x`, adding
    /// `scale * kernel` into `out`.
    #[inline]
    pub fn accumulate(&self, x: &[f64], x0: f64, width: f64, scale: f64, out: &mut [f64]) {
        match self {
            Smearing::Gauss => {
                let norm = scale / ((2.0 * PI).sqrt() * width);
                for (acc, &xi) in out.iter_mut().zip(x) {
                    let u = (xi - x0) / width;
                    *acc += norm * (-0.5 * u * u).exp();
                }
            }
        }
    }

    /// Single-point kernel value.
    #[inline]
    pub fn delta(&self, x: f64, x0: f64, width: f64) -> f64 {
        match self {
            Smearing::Gauss => {
                let u = (x - x0) / width;
                (-0.5 * u * u).exp() / ((2.0 * PI).sqrt() * width)
            }
        }
    }
}

impl FromStr for Smearing {
    type Err = DosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gauss" => Ok(Smearing::Gauss),
            _ => Err(DosError::UnknownSmearing(s.to_string())),
        }
    }
}

impl fmt::Display for Smearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Smearing::Gauss => write!(f, "Gauss"),
        }
    }
}

pub fn check_positive_width(width: f64) -> Result<(), DosError> {
    if width <= 0.0 || width.is_nan() {
        return Err(DosError::InvalidWidth(width));
    }
    Ok(())
}

/// `npts` evenly spaced values from `start` to `stop`, both inclusive.
pub fn linspace(start: f64, stop: f64, npts: usize) -> Vec<f64> {
    match npts {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (npts - 1) as f64;
            (0..npts)
                .map(|i| {
                    if i == npts - 1 {
                        stop
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

#[inline]
pub fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= ABSOLUTE_TOLERANCE + RELATIVE_TOLERANCE * b.abs()
}

/// Element-wise closeness of two equal-length sequences.
pub fn all_close(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| is_close(x, y))
}

/// Checks that `energies` is (close to) an evenly spaced ascending grid.
pub fn is_evenly_spaced(energies: &[f64]) -> bool {
    match energies {
        [] => true,
        [first, .., last] => all_close(energies, &linspace(*first, *last, energies.len())),
        [_] => true,
    }
}

/// Trapezoid-rule integral of `y` over `x`.
pub fn trapezoid(y: &[f64], x: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| 0.5 * (xs[1] - xs[0]) * (ys[0] + ys[1]))
        .sum()
}
