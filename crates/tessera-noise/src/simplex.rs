use crate::fbm::FbmParams;

const PERIOD: usize = 256;
const TABLE_LEN: usize = PERIOD * 2;

/// Park-Miller modulus (2^31 - 1).
const LCG_MODULUS: u64 = 2_147_483_647;
const LCG_MULTIPLIER: u64 = 16_807;

// Skew/unskew factors for the 2D simplex grid.
const F2: f64 = 0.366_025_403_784_438_6; // (sqrt(3) - 1) / 2
const G2: f64 = 0.211_324_865_405_187_1; // (3 - sqrt(3)) / 6

const GRAD3: [(f64, f64); 12] = [
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (0.0, 1.0),
    (0.0, -1.0),
];

/// Seeded 2D simplex noise source.
///
/// The permutation is a pure function of the seed, so two fields built from the
/// same seed agree on every coordinate.
#[derive(Clone)]
pub struct NoiseField {
    seed: i64,
    perm: [u8; TABLE_LEN],
    perm_mod12: [u8; TABLE_LEN],
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}

struct ParkMiller {
    state: u64,
}

impl ParkMiller {
    fn new(seed: i64) -> Self {
        // Reduce into [1, m - 1]; zero is a fixed point of the generator.
        let state = seed.rem_euclid((LCG_MODULUS - 1) as i64) as u64 + 1;
        Self { state }
    }

    #[inline]
    fn next(&mut self) -> u64 {
        self.state = self.state * LCG_MULTIPLIER % LCG_MODULUS;
        self.state
    }
}

impl NoiseField {
    pub fn new(seed: i64) -> Self {
        let mut base = [0u8; PERIOD];
        for (i, p) in base.iter_mut().enumerate() {
            *p = i as u8;
        }
        let mut rng = ParkMiller::new(seed);
        for i in (1..PERIOD).rev() {
            let j = (rng.next() % (i as u64 + 1)) as usize;
            base.swap(i, j);
        }

        let mut perm = [0u8; TABLE_LEN];
        let mut perm_mod12 = [0u8; TABLE_LEN];
        for i in 0..TABLE_LEN {
            perm[i] = base[i & (PERIOD - 1)];
            perm_mod12[i] = perm[i] % 12;
        }
        Self {
            seed,
            perm,
            perm_mod12,
        }
    }

    #[inline]
    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Permutation entry for a lattice index; the index is wrapped into the table.
    #[inline]
    pub fn permutation(&self, index: i64) -> u8 {
        self.perm[(index & 255) as usize]
    }

    /// Raw 2D simplex noise in `[-1, 1]`.
    pub fn noise2d(&self, x: f64, y: f64) -> f64 {
        if !x.is_finite() || !y.is_finite() {
            return 0.0;
        }
        let s = (x + y) * F2;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        let (i1, j1) = if x0 > y0 { (1usize, 0usize) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        // Masking keeps ii/jj in 0..=255; the largest composite index is
        // 255 + 1 + 255 = 511, the last slot of the doubled tables.
        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;
        let gi0 = self.perm_mod12[ii + self.perm[jj] as usize] as usize;
        let gi1 = self.perm_mod12[ii + i1 + self.perm[jj + j1] as usize] as usize;
        let gi2 = self.perm_mod12[ii + 1 + self.perm[jj + 1] as usize] as usize;

        let n0 = corner(gi0, x0, y0);
        let n1 = corner(gi1, x1, y1);
        let n2 = corner(gi2, x2, y2);

        (70.0 * (n0 + n1 + n2)).clamp(-1.0, 1.0)
    }

    /// Fractal Brownian motion over `noise2d`, normalized to `[0, 1]`.
    pub fn fbm(&self, x: f64, y: f64, params: &FbmParams) -> f64 {
        if params.octaves == 0 {
            return 0.5;
        }
        let mut total = 0.0;
        let mut max_amplitude = 0.0;
        let mut amplitude = params.amplitude;
        let mut frequency = params.frequency;
        for _ in 0..params.octaves {
            let n = self.noise2d(x * params.scale * frequency, y * params.scale * frequency);
            let v = if params.ridged {
                let r = 1.0 - n.abs();
                r * r
            } else {
                (n + 1.0) * 0.5
            };
            total += v * amplitude;
            max_amplitude += amplitude;
            amplitude *= params.persistence;
            frequency *= params.lacunarity;
        }
        if max_amplitude <= 0.0 || !max_amplitude.is_finite() {
            return 0.5;
        }
        (total / max_amplitude).clamp(0.0, 1.0)
    }

    /// `fbm` with default parameters.
    #[inline]
    pub fn noise(&self, x: f64, y: f64) -> f64 {
        self.fbm(x, y, &FbmParams::default())
    }
}

#[inline]
fn corner(gi: usize, x: f64, y: f64) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        0.0
    } else {
        let t2 = t * t;
        let (gx, gy) = GRAD3[gi];
        t2 * t2 * (gx * x + gy * y)
    }
}
