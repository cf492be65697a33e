//! Seeded coherent noise.
//!
//! Classic Perlin gradient noise with fractal (fBm) octave summation.
//! The permutation table is shuffled with a seeded ChaCha stream, so a
//! given seed always yields the same noise surface on every platform.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded 2D Perlin noise sampler.
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    /// Permutation table, 256 entries duplicated to avoid wrap lookups.
    perm: [u8; 512],
}

impl PerlinNoise {
    /// Build a sampler from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut table: Vec<u8> = (0..=255).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        table.shuffle(&mut rng);

        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i & 255];
        }
        Self { perm }
    }

    /// Quintic fade curve, zero first and second derivatives at 0 and 1.
    #[inline]
    fn fade(t: f64) -> f64 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    #[inline]
    fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a + t * (b - a)
    }

    /// Gradient dot product for one of 8 axis/diagonal directions.
    #[inline]
    fn grad(hash: u8, x: f64, y: f64) -> f64 {
        let h = hash & 0xF;
        let u = if h < 8 { x } else { y };
        let v = if h < 8 { y } else { x };
        let su = if (h & 1) == 0 { u } else { -u };
        let sv = if (h & 2) == 0 { v } else { -v };
        su + sv
    }

    /// Raw single-octave noise at `(x, y)`, roughly in `[-sqrt(2), sqrt(2)]`.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let xi = (x.floor() as i64 & 255) as usize;
        let yi = (y.floor() as i64 & 255) as usize;
        let xf = x - x.floor();
        let yf = y - y.floor();

        let u = Self::fade(xf);
        let v = Self::fade(yf);

        let aa = self.perm[(self.perm[xi] as usize + yi) & 255];
        let ab = self.perm[(self.perm[xi] as usize + ((yi + 1) & 255)) & 255];
        let ba = self.perm[(self.perm[(xi + 1) & 255] as usize + yi) & 255];
        let bb = self.perm[(self.perm[(xi + 1) & 255] as usize + ((yi + 1) & 255)) & 255];

        let x1 = Self::lerp(Self::grad(aa, xf, yf), Self::grad(ba, xf - 1.0, yf), u);
        let x2 = Self::lerp(
            Self::grad(ab, xf, yf - 1.0),
            Self::grad(bb, xf - 1.0, yf - 1.0),
            u,
        );
        Self::lerp(x1, x2, v)
    }

    /// Fractal (fBm) noise: octave summation with the given amplitude
    /// falloff and frequency growth, normalized to roughly `[-1, 1]`.
    #[must_use]
    pub fn fbm(&self, x: f64, y: f64, octaves: u32, persistence: f64, lacunarity: f64) -> f64 {
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut total = 0.0;
        let mut max_amplitude = 0.0;

        for _ in 0..octaves.max(1) {
            total += self.sample(x * frequency, y * frequency) * amplitude;
            max_amplitude += amplitude;
            amplitude *= persistence;
            frequency *= lacunarity;
        }

        total / max_amplitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let a = PerlinNoise::new(1234);
        let b = PerlinNoise::new(1234);
        assert_eq!(
            a.fbm(10.5, -3.7, 4, 0.5, 2.0).to_bits(),
            b.fbm(10.5, -3.7, 4, 0.5, 2.0).to_bits()
        );
    }

    #[test]
    fn test_seeds_differ() {
        let a = PerlinNoise::new(1);
        let b = PerlinNoise::new(2);
        let pts = [(0.3, 0.7), (5.1, 9.2), (100.4, 42.0)];
        assert!(pts.iter().any(|&(x, y)| {
            (a.fbm(x, y, 4, 0.5, 2.0) - b.fbm(x, y, 4, 0.5, 2.0)).abs() > 1e-9
        }));
    }

    #[test]
    fn test_fbm_range() {
        let noise = PerlinNoise::new(0);
        for y in 0..32 {
            for x in 0..32 {
                let v = noise.fbm(f64::from(x) * 0.1, f64::from(y) * 0.1, 6, 0.5, 2.0);
                assert!((-1.0 - 1e-6..=1.0 + 1e-6).contains(&v), "value {v} out of range");
            }
        }
    }
}
