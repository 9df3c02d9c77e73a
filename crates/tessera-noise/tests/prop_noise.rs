use proptest::prelude::*;
use tessera_noise::{FbmParams, NoiseField};

fn world_coord() -> impl Strategy<Value = f64> {
    // Integer tile coordinates scaled the way terrain layers sample them.
    (i32::MIN..=i32::MAX).prop_map(|v| v as f64)
}

fn arb_params() -> impl Strategy<Value = FbmParams> {
    (
        1e-5f64..0.5,
        0u32..8,
        0.1f64..0.9,
        1.5f64..3.0,
        any::<bool>(),
    )
        .prop_map(|(scale, octaves, persistence, lacunarity, ridged)| FbmParams {
            scale,
            octaves,
            persistence,
            lacunarity,
            amplitude: 1.0,
            frequency: 1.0,
            ridged,
        })
}

proptest! {
    // Raw simplex stays inside [-1, 1] for any coordinate, including negatives and
    // values far outside the permutation period.
    #[test]
    fn noise2d_in_range(seed in any::<i64>(), x in world_coord(), y in world_coord()) {
        let field = NoiseField::new(seed);
        let v = field.noise2d(x * 0.013, y * 0.013);
        prop_assert!(v.is_finite());
        prop_assert!((-1.0..=1.0).contains(&v));
    }

    #[test]
    fn fbm_in_unit_range(
        seed in any::<i64>(),
        x in -1_000_000i32..1_000_000,
        y in -1_000_000i32..1_000_000,
        params in arb_params(),
    ) {
        let field = NoiseField::new(seed);
        let v = field.fbm(x as f64, y as f64, &params);
        prop_assert!((0.0..=1.0).contains(&v));
    }

    // Same seed, same answer: fields are rebuilt from scratch each time.
    #[test]
    fn same_seed_is_deterministic(
        seed in any::<i64>(),
        x in -50_000i32..50_000,
        y in -50_000i32..50_000,
    ) {
        let a = NoiseField::new(seed);
        let b = NoiseField::new(seed);
        let params = FbmParams::new(0.02, 5);
        let (sx, sy) = (x as f64 * 0.1, y as f64 * 0.1);
        prop_assert_eq!(a.noise2d(sx, sy).to_bits(), b.noise2d(sx, sy).to_bits());
        let (fx, fy) = (x as f64, y as f64);
        prop_assert_eq!(a.fbm(fx, fy, &params).to_bits(), b.fbm(fx, fy, &params).to_bits());
    }

    #[test]
    fn permutation_lookup_never_panics(seed in any::<i64>(), idx in any::<i64>()) {
        let field = NoiseField::new(seed);
        let _ = field.permutation(idx);
    }
}

#[test]
fn ridged_octaves_differ_from_plain() {
    let field = NoiseField::new(1234);
    let plain = FbmParams::new(0.05, 3);
    let ridged = plain.ridged();
    let differs = (0..64).any(|i| {
        let x = i as f64 * 3.7;
        field.fbm(x, -x, &plain) != field.fbm(x, -x, &ridged)
    });
    assert!(differs);
}

#[test]
fn noise_alias_uses_defaults() {
    let field = NoiseField::new(77);
    let defaults = FbmParams::default();
    assert_eq!(field.noise(31.0, -8.0), field.fbm(31.0, -8.0, &defaults));
}

#[test]
fn params_deserialize_with_defaults() {
    let params: FbmParams = toml::from_str("scale = 0.004\nridged = true\n").unwrap();
    assert_eq!(params.scale, 0.004);
    assert!(params.ridged);
    assert_eq!(params.octaves, FbmParams::default().octaves);
}

#[test]
fn distinct_seeds_decorrelate() {
    let a = NoiseField::new(8_675_309);
    let b = NoiseField::new(24_601);
    let differing = (0..100)
        .filter(|i| {
            let x = *i as f64 * 1.37 + 0.5;
            let y = *i as f64 * -0.91 + 0.25;
            a.noise2d(x, y) != b.noise2d(x, y)
        })
        .count();
    assert!(differing > 50);
}
