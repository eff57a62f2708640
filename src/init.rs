//! Weight initialization distributions.

use rand::distributions::Distribution;
use rand::Rng;

/// Largest magnitude produced by [`SignedTenths`].
pub const MAX_MAGNITUDE: f64 = 0.5;

/// Samples a magnitude uniformly from `{0.0, 0.1, 0.2, 0.3, 0.4, 0.5}` and
/// negates it with probability one half.
#[derive(Copy, Clone, Debug, Default)]
pub struct SignedTenths;

impl Distribution<f64> for SignedTenths {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let negative = rng.gen_bool(0.5);
        let magnitude = f64::from(rng.gen_range(0u8..6)) / 10.0;
        if negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn bounded_tenths() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for x in SignedTenths.sample_iter(&mut rng).take(10_000) {
            assert!(x.abs() <= MAX_MAGNITUDE);
            let tenths = x * 10.0;
            assert!((tenths - tenths.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn covers_both_signs_and_all_magnitudes() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut seen = [false; 11];
        for x in SignedTenths.sample_iter(&mut rng).take(10_000) {
            seen[((x * 10.0).round() as i32 + 5) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
