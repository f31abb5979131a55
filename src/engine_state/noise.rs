//! # Gradient Noise Module
//!
//! Classic Perlin gradient noise over 2D and 3D coordinates, used as the
//! terrain height function during chunk generation.
//!
//! The permutation table is fixed and hard-coded (Ken Perlin's reference
//! permutation), so the generator is fully deterministic across runs: the
//! same inputs always produce bit-identical outputs. This is what makes
//! world generation reproducible and testable against golden values.

/// Ken Perlin's reference permutation of 0..=255.
///
/// Duplicated into a 512-entry table at construction so that lattice hashing
/// never has to branch on index wraparound.
#[rustfmt::skip]
const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225,
    140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148,
    247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32,
    57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122,
    60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54,
    65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169,
    200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64,
    52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213,
    119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9,
    129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104,
    218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

/// Deterministic gradient noise generator.
///
/// Provides a 2D sample remapped to `[0, 1]`, a raw 3D sample in `[-1, 1]`,
/// and an octave-summed 3D variant that adds detail by layering samples at
/// doubling frequency and halving amplitude.
pub struct Perlin {
    /// The 256-entry permutation duplicated to 512 entries.
    perm: [usize; 512],
}

impl Perlin {
    /// Number of octaves summed by [`Perlin::octave_noise`].
    pub const OCTAVES: u32 = 4;

    /// Builds the generator by expanding the fixed permutation table.
    ///
    /// No entropy source is involved; every `Perlin` behaves identically.
    pub fn new() -> Self {
        let mut perm = [0usize; 512];
        for i in 0..256 {
            perm[i] = PERMUTATION[i] as usize;
            perm[i + 256] = PERMUTATION[i] as usize;
        }
        Perlin { perm }
    }

    /// Smoothstep-like interpolation weight `6t^5 - 15t^4 + 10t^3`.
    fn fade(t: f32) -> f32 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + t * (b - a)
    }

    /// Dot product with one of 8 gradient directions selected by the low
    /// three bits of the lattice hash.
    fn grad2(hash: usize, x: f32, y: f32) -> f32 {
        let h = hash & 7;
        let u = if h < 4 { x } else { y };
        let v = if h < 4 { y } else { x };
        (if h & 1 != 0 { -u } else { u }) + (if h & 2 != 0 { -v } else { v })
    }

    /// Dot product with one of 12 gradient directions (improved-noise set).
    fn grad3(hash: usize, x: f32, y: f32, z: f32) -> f32 {
        let h = hash & 15;
        let u = if h < 8 { x } else { y };
        let v = if h < 4 {
            y
        } else if h == 12 || h == 14 {
            x
        } else {
            z
        };
        (if h & 1 != 0 { -u } else { u }) + (if h & 2 != 0 { -v } else { v })
    }

    /// Samples 2D gradient noise at `(x, y)`.
    ///
    /// # Returns
    /// A value in `[0, 1]`: the raw noise in `[-1, 1]` is remapped with
    /// `(n + 1) / 2`.
    pub fn sample2d(&self, x: f32, y: f32) -> f32 {
        let xi = (x.floor() as i32 & 255) as usize;
        let yi = (y.floor() as i32 & 255) as usize;

        let xf = x - x.floor();
        let yf = y - y.floor();

        let u = Self::fade(xf);
        let v = Self::fade(yf);

        let aa = self.perm[self.perm[xi] + yi];
        let ab = self.perm[self.perm[xi] + yi + 1];
        let ba = self.perm[self.perm[xi + 1] + yi];
        let bb = self.perm[self.perm[xi + 1] + yi + 1];

        let x1 = Self::lerp(Self::grad2(aa, xf, yf), Self::grad2(ba, xf - 1.0, yf), u);
        let x2 = Self::lerp(
            Self::grad2(ab, xf, yf - 1.0),
            Self::grad2(bb, xf - 1.0, yf - 1.0),
            u,
        );

        (Self::lerp(x1, x2, v) + 1.0) / 2.0
    }

    /// Samples 3D gradient noise at `(x, y, z)`.
    ///
    /// # Returns
    /// A value in `[-1, 1]` (not remapped).
    pub fn sample3d(&self, x: f32, y: f32, z: f32) -> f32 {
        let xi = (x.floor() as i32 & 255) as usize;
        let yi = (y.floor() as i32 & 255) as usize;
        let zi = (z.floor() as i32 & 255) as usize;

        let xf = x - x.floor();
        let yf = y - y.floor();
        let zf = z - z.floor();

        let u = Self::fade(xf);
        let v = Self::fade(yf);
        let w = Self::fade(zf);

        let a = self.perm[xi] + yi;
        let aa = self.perm[a] + zi;
        let ab = self.perm[a + 1] + zi;
        let b = self.perm[xi + 1] + yi;
        let ba = self.perm[b] + zi;
        let bb = self.perm[b + 1] + zi;

        Self::lerp(
            Self::lerp(
                Self::lerp(
                    Self::grad3(self.perm[aa], xf, yf, zf),
                    Self::grad3(self.perm[ba], xf - 1.0, yf, zf),
                    u,
                ),
                Self::lerp(
                    Self::grad3(self.perm[ab], xf, yf - 1.0, zf),
                    Self::grad3(self.perm[bb], xf - 1.0, yf - 1.0, zf),
                    u,
                ),
                v,
            ),
            Self::lerp(
                Self::lerp(
                    Self::grad3(self.perm[aa + 1], xf, yf, zf - 1.0),
                    Self::grad3(self.perm[ba + 1], xf - 1.0, yf, zf - 1.0),
                    u,
                ),
                Self::lerp(
                    Self::grad3(self.perm[ab + 1], xf, yf - 1.0, zf - 1.0),
                    Self::grad3(self.perm[bb + 1], xf - 1.0, yf - 1.0, zf - 1.0),
                    u,
                ),
                v,
            ),
            w,
        )
    }

    /// Octave-summed 3D noise: [`Perlin::OCTAVES`] layers of [`Perlin::sample3d`],
    /// each at doubled frequency and halved amplitude, normalized by the total
    /// amplitude so the result stays in approximately `[-1, 1]`.
    pub fn octave_noise(&self, x: f32, y: f32, z: f32) -> f32 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;

        for _ in 0..Self::OCTAVES {
            total += self.sample3d(x * frequency, y * frequency, z * frequency) * amplitude;
            max_value += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }

        total / max_value
    }
}

impl Default for Perlin {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample2d_is_deterministic() {
        let a = Perlin::new();
        let b = Perlin::new();
        for i in 0..64 {
            let x = i as f32 * 0.37 - 5.0;
            let y = i as f32 * 0.91 + 2.0;
            // Two independent instances must agree bit for bit.
            assert_eq!(a.sample2d(x, y).to_bits(), b.sample2d(x, y).to_bits());
        }
    }

    #[test]
    fn sample2d_matches_golden_values() {
        let noise = Perlin::new();
        let golden = [
            ((0.5f32, 0.5f32), 0.250000000f32),
            ((1.25, 3.75), 0.453599930),
            ((10.1, 20.2), 0.615593375),
            ((-4.4, 7.7), 0.288075304),
            ((100.9, 0.3), 0.604459228),
        ];
        for ((x, y), expected) in golden {
            let got = noise.sample2d(x, y);
            assert!(
                (got - expected).abs() < 1e-5,
                "sample2d({x}, {y}) = {got}, expected {expected}"
            );
        }
    }

    #[test]
    fn sample2d_stays_in_unit_range() {
        let noise = Perlin::new();
        for i in -50..50 {
            for j in -50..50 {
                let v = noise.sample2d(i as f32 * 0.173, j as f32 * 0.291);
                assert!((0.0..=1.0).contains(&v), "sample2d out of range: {v}");
            }
        }
    }

    #[test]
    fn octave_noise_matches_golden_values() {
        let noise = Perlin::new();
        let golden = [
            ((0.5f32, 0.0f32, 0.5f32), -0.133333333f32),
            ((1.6, 0.0, 2.4), 0.044497382),
            ((-3.3, 0.0, 7.1), -0.110835876),
        ];
        for ((x, y, z), expected) in golden {
            let got = noise.octave_noise(x, y, z);
            assert!(
                (got - expected).abs() < 1e-5,
                "octave_noise({x}, {y}, {z}) = {got}, expected {expected}"
            );
        }
    }

    #[test]
    fn octave_noise_stays_normalized() {
        let noise = Perlin::new();
        for i in -40..40 {
            for j in -40..40 {
                let v = noise.octave_noise(i as f32 * 0.13, 0.0, j as f32 * 0.17);
                assert!((-1.0..=1.0).contains(&v), "octave_noise out of range: {v}");
            }
        }
    }
}
