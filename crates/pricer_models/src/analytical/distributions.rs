//! Standard normal distribution functions.
//!
//! - [`norm_cdf`]: Φ(x), via a rational erfc approximation
//! - [`norm_pdf`]: φ(x)
//! - [`inverse_norm_cdf`]: Φ⁻¹(p), used to map uniform low-discrepancy
//!   points onto Gaussian draws

/// 1 / sqrt(2π)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Complementary error function, Abramowitz and Stegun 7.1.26.
///
/// Maximum absolute error 1.5e-7.
#[inline]
fn erfc_approx(x: f64) -> f64 {
    const A1: f64 = 0.254_829_592;
    const A2: f64 = -0.284_496_736;
    const A3: f64 = 1.421_413_741;
    const A4: f64 = -1.453_152_027;
    const A5: f64 = 1.061_405_429;
    const P: f64 = 0.327_591_1;

    let z = x.abs();
    let t = 1.0 / (1.0 + P * z);
    let poly = A1 + t * (A2 + t * (A3 + t * (A4 + t * A5)));
    let tail = t * poly * (-z * z).exp();
    if x < 0.0 {
        2.0 - tail
    } else {
        tail
    }
}

/// Standard normal cumulative distribution function.
///
/// Φ(x) = ½·erfc(−x/√2), accurate to about 1e-7.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-7);
/// assert!((norm_cdf(1.0) - 0.841_344_746).abs() < 1e-6);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc_approx(-x / std::f64::consts::SQRT_2)
}

/// Standard normal density φ(x) = exp(−x²/2)/√(2π).
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Inverse standard normal CDF (Acklam's rational approximation).
///
/// Relative error below 1.2e-9 on (0, 1). Returns ∓∞ at 0 and 1 and NaN
/// outside `[0, 1]`.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::inverse_norm_cdf;
///
/// assert!(inverse_norm_cdf(0.5).abs() < 1e-12);
/// assert!((inverse_norm_cdf(0.975) - 1.959_963_985).abs() < 1e-8);
/// ```
pub fn inverse_norm_cdf(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.024_25;

    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    let tail = |q: f64| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_norm_cdf_reference_values() {
        let cases = [
            (-3.0, 0.001_349_898_031_630_094_6),
            (-1.0, 0.158_655_253_931_457_02),
            (0.0, 0.5),
            (0.5, 0.691_462_461_274_013_1),
            (2.0, 0.977_249_868_051_820_8),
        ];
        for (x, expected) in cases {
            assert_relative_eq!(norm_cdf(x), expected, epsilon = 2e-7);
        }
    }

    #[test]
    fn test_norm_cdf_tails() {
        assert!(norm_cdf(-40.0) >= 0.0);
        assert!(norm_cdf(-40.0) < 1e-12);
        assert!(norm_cdf(40.0) <= 1.0);
        assert!(norm_cdf(40.0) > 1.0 - 1e-12);
    }

    #[test]
    fn test_norm_pdf() {
        assert_relative_eq!(norm_pdf(0.0), FRAC_1_SQRT_2PI, epsilon = 1e-15);
        assert_relative_eq!(norm_pdf(1.0), 0.241_970_724_519_143_37, epsilon = 1e-14);
        assert_eq!(norm_pdf(2.5), norm_pdf(-2.5));
    }

    #[test]
    fn test_inverse_norm_cdf_edges() {
        assert_eq!(inverse_norm_cdf(0.0), f64::NEG_INFINITY);
        assert_eq!(inverse_norm_cdf(1.0), f64::INFINITY);
        assert!(inverse_norm_cdf(-0.1).is_nan());
        assert!(inverse_norm_cdf(f64::NAN).is_nan());
    }

    #[test]
    fn test_inverse_norm_cdf_tail_region() {
        assert_relative_eq!(inverse_norm_cdf(0.001), -3.090_232_306_167_813_5, epsilon = 1e-7);
        assert_relative_eq!(inverse_norm_cdf(0.999), 3.090_232_306_167_813_5, epsilon = 1e-7);
    }

    proptest! {
        #[test]
        fn prop_norm_cdf_symmetry(x in -8.0f64..8.0) {
            prop_assert!((norm_cdf(x) + norm_cdf(-x) - 1.0).abs() < 1e-8);
        }

        #[test]
        fn prop_inverse_then_cdf(p in 1e-6f64..(1.0 - 1e-6)) {
            let x = inverse_norm_cdf(p);
            prop_assert!((norm_cdf(x) - p).abs() < 5e-7);
        }

        #[test]
        fn prop_inverse_is_monotone(p in 1e-6f64..0.5, dp in 1e-6f64..0.4) {
            prop_assert!(inverse_norm_cdf(p) < inverse_norm_cdf(p + dp));
        }
    }
}
