//! Polynomial helpers for transfer-function coefficients.
//!
//! Polynomials are stored in descending powers of `z` (equivalently ascending
//! powers of `z⁻¹`): `c[0] + c[1]·z⁻¹ + … + c[n]·z⁻ⁿ`, the layout used for
//! `feedforward` / `feedback`.
use rustfft::num_complex::Complex64;

/// Expand `∏ (z - r_i)` into coefficients `[1, c1, …, cn]`.
pub fn poly_from_roots(roots: &[Complex64]) -> Vec<Complex64> {
    let mut c = Vec::with_capacity(roots.len() + 1);
    c.push(Complex64::new(1.0, 0.0));
    for &r in roots {
        c.push(Complex64::new(0.0, 0.0));
        // Multiply in place by (z - r), highest index first.
        for k in (1..c.len()).rev() {
            let prev = c[k - 1];
            c[k] -= r * prev;
        }
    }
    c
}

/// Drop the imaginary parts of `c`, returning `(real, max |imag|)`.
///
/// The caller decides whether the residue is acceptable.
pub fn split_real(c: &[Complex64]) -> (Vec<f64>, f64) {
    let max_imag = c.iter().map(|v| v.im.abs()).fold(0.0_f64, f64::max);
    (c.iter().map(|v| v.re).collect(), max_imag)
}

/// Evaluate `c[0] + c[1]·z⁻¹ + … + c[n]·z⁻ⁿ` at `z = e^{jω}`.
pub fn eval_at_unit_circle(c: &[f64], omega: f64) -> Complex64 {
    // Horner in w = z⁻¹.
    let w = Complex64::from_polar(1.0, -omega);
    c.iter().rev().fold(Complex64::new(0.0, 0.0), |acc, &v| acc * w + v)
}

/// Schur–Cohn stability test by step-down recursion.
///
/// `a` must be monic (`a[0] == 1`).  Returns `true` iff every root of
/// `a[0]·zⁿ + … + a[n]` lies strictly inside the unit circle, i.e. every
/// reflection coefficient has magnitude below one.
pub fn is_schur_stable(a: &[f64]) -> bool {
    let mut cur: Vec<f64> = a.to_vec();
    while cur.len() > 1 {
        let m = cur.len() - 1;
        let k = cur[m];
        if !k.is_finite() || k.abs() >= 1.0 {
            return false;
        }
        let denom = 1.0 - k * k;
        let next: Vec<f64> = (0..m).map(|i| (cur[i] - k * cur[m - i]) / denom).collect();
        cur = next;
    }
    true
}

/// Roots of `c[0]·zⁿ + … + c[n]` by Aberth–Ehrlich iteration.
///
/// Accurate enough to report pole radii; not meant as a general-purpose
/// polynomial solver.
pub fn roots(c: &[f64]) -> Vec<Complex64> {
    let lead = match c.iter().position(|&v| v != 0.0) {
        Some(i) => i,
        None => return vec![],
    };
    let c: Vec<f64> = c[lead..].iter().map(|&v| v / c[lead]).collect();
    let n = c.len() - 1;
    if n == 0 {
        return vec![];
    }

    // Initial guesses on a circle whose radius bounds the roots (Cauchy),
    // offset in angle so no guess lands on the real axis.
    let radius = 1.0 + c[1..].iter().map(|v| v.abs()).fold(0.0_f64, f64::max);
    let mut z: Vec<Complex64> = (0..n)
        .map(|k| {
            let theta = 2.0 * std::f64::consts::PI * k as f64 / n as f64 + 0.4;
            Complex64::from_polar(radius.min(2.0), theta)
        })
        .collect();

    let deriv: Vec<f64> = (0..n).map(|i| c[i] * (n - i) as f64).collect();
    let horner = |p: &[f64], x: Complex64| {
        p.iter().fold(Complex64::new(0.0, 0.0), |acc, &v| acc * x + v)
    };

    for _ in 0..500 {
        let mut max_step = 0.0_f64;
        for i in 0..n {
            let p = horner(&c, z[i]);
            let dp = horner(&deriv, z[i]);
            if p.norm() == 0.0 {
                continue;
            }
            let ratio = p / dp;
            let repulsion: Complex64 = (0..n)
                .filter(|&j| j != i)
                .map(|j| (z[i] - z[j]).inv())
                .sum();
            let step = ratio / (Complex64::new(1.0, 0.0) - ratio * repulsion);
            if step.is_finite() {
                z[i] -= step;
                max_step = max_step.max(step.norm());
            }
        }
        if max_step < 1e-14 {
            break;
        }
    }
    z
}

/// Largest root magnitude of `c[0]·zⁿ + … + c[n]` (0 for constants).
pub fn max_root_radius(c: &[f64]) -> f64 {
    roots(c).iter().map(|z| z.norm()).fold(0.0_f64, f64::max)
}
