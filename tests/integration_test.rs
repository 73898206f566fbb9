//! Integration tests: bin random and hand-picked sky pointings into hit maps and
//! check the invariants that downstream coverage analysis relies on.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use rand_distr::{Distribution, Normal};

use hitmap::healpix::{nside2npix, ring2nest};
use hitmap::{
    compute_hit_map, ColumnPointings, CsvPointings, HealpixGrid, HitMap, HitMapConfig,
    HitMapError, Pointing, PointingSource, Scheme,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
}

/// Points distributed uniformly over the sphere, as (ra, dec) in degrees.
///
/// Normalizing isotropic Gaussian vectors gives a uniform direction.
fn random_sky(seed: u64, n: usize) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0_f64, 1.0).unwrap();
    let mut ra = Vec::with_capacity(n);
    let mut dec = Vec::with_capacity(n);
    while ra.len() < n {
        let v = hitmap::Vector3::new(
            normal.sample(&mut rng),
            normal.sample(&mut rng),
            normal.sample(&mut rng),
        );
        let norm = v.norm();
        if norm < 1e-9 {
            continue;
        }
        let v = v / norm;
        ra.push(v.y.atan2(v.x).to_degrees().rem_euclid(360.0));
        dec.push(v.z.asin().to_degrees());
    }
    (ra, dec)
}

/// A simulated constant-elevation scan: RA sweeps while Dec drifts slowly.
fn scan_strip(seed: u64, n: usize) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let ra = (0..n)
        .map(|i| (i as f64 * 0.37 + rng.random::<f64>() * 0.01).rem_euclid(360.0))
        .collect();
    let dec = (0..n)
        .map(|i| -30.0 + 20.0 * (i as f64 / n as f64) + rng.random::<f64>() * 0.05)
        .collect();
    (ra, dec)
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("hitmap_it_{}_{name}", std::process::id()))
}

#[test]
fn test_counts_are_conserved() {
    init_tracing();
    let (ra, dec) = random_sky(42, 5000);
    for nside in [1, 2, 3, 7, 16, 64, 100] {
        let counts = compute_hit_map(&ra, &dec, nside).unwrap();
        assert_eq!(counts.len() as u64, nside2npix(nside as u32));
        assert_eq!(counts.iter().sum::<u64>(), ra.len() as u64, "nside {nside}");
    }
}

#[test]
fn test_empty_input_gives_zero_map() {
    let counts = compute_hit_map(&[], &[], 8).unwrap();
    assert_eq!(counts.len(), 768);
    assert!(counts.iter().all(|&c| c == 0));
}

#[test]
fn test_deterministic() {
    let (ra, dec) = scan_strip(7, 20_000);
    let a = compute_hit_map(&ra, &dec, 32).unwrap();
    let b = compute_hit_map(&ra, &dec, 32).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_resolution_hierarchy() {
    let (ra, dec) = random_sky(3, 2000);
    let pointings: Vec<Pointing> = ra
        .iter()
        .zip(&dec)
        .map(|(&r, &d)| Pointing::new(r, d))
        .collect();

    let mut last_npix = 0;
    for order in 0..8 {
        let nside = 1_u32 << order;
        let npix = nside2npix(nside);
        assert!(npix > last_npix);
        last_npix = npix;

        let nest = HealpixGrid::new(nside, Scheme::Nested).unwrap();
        let nest2 = HealpixGrid::new(2 * nside, Scheme::Nested).unwrap();
        let ring = HealpixGrid::new(nside, Scheme::Ring).unwrap();
        let ring2 = HealpixGrid::new(2 * nside, Scheme::Ring).unwrap();

        for p in &pointings {
            let (theta, phi) = (p.theta(), p.phi());
            assert_eq!(
                nest2.ang2pix(theta, phi).unwrap() >> 2,
                nest.ang2pix(theta, phi).unwrap()
            );

            let parent = ring2nest(nside, ring.ang2pix(theta, phi).unwrap()).unwrap();
            let child = ring2nest(2 * nside, ring2.ang2pix(theta, phi).unwrap()).unwrap();
            assert_eq!(child >> 2, parent);
        }
    }
}

#[test]
fn test_scan_strip_coverage() {
    init_tracing();
    let (ra, dec) = scan_strip(11, 50_000);
    let map = HitMap::from_radec_deg(&ra, &dec, &HitMapConfig::default()).unwrap();

    assert_eq!(map.total_hits(), 50_000);
    // The strip spans 20 degrees of declination all the way around in RA:
    // about 17% of the sky, so coverage must be well below full and well above zero
    let fraction = map.covered_fraction();
    assert!(fraction > 0.05 && fraction < 0.25, "covered fraction {fraction}");

    // Every covered cell center lies inside the strip (padded by one cell)
    let grid = map.grid().unwrap();
    let pad = grid.resolution_rad().to_degrees();
    for (pix, _) in map.covered_cells() {
        let (theta, _) = grid.pix2ang(pix).unwrap();
        let cell_dec = 90.0 - theta.to_degrees();
        assert!(cell_dec > -30.0 - pad && cell_dec < -10.0 + pad, "dec {cell_dec}");
    }
}

#[test]
fn test_concrete_scenario() {
    let counts = compute_hit_map(&[0.0, 0.0, 180.0], &[0.0, 0.0, -90.0], 4).unwrap();
    assert_eq!(counts.len(), 192);
    assert_eq!(counts.iter().sum::<u64>(), 3);
    let nonzero: Vec<u64> = counts.iter().copied().filter(|&c| c > 0).collect();
    assert_eq!(nonzero.len(), 2);
    assert!(nonzero.contains(&2) && nonzero.contains(&1));
}

#[test]
fn test_error_scenarios() {
    assert!(matches!(
        compute_hit_map(&[0.0, 1.0, 2.0], &[0.0, 1.0], 4),
        Err(HitMapError::InvalidInput(_))
    ));
    assert!(matches!(
        compute_hit_map(&[0.0], &[0.0], 0),
        Err(HitMapError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        compute_hit_map(&[0.0], &[f64::NAN], 4),
        Err(HitMapError::InvalidInput(_))
    ));
    assert!(matches!(
        compute_hit_map(&[0.0], &[0.0], (1_i64 << 29) + 1),
        Err(HitMapError::InvalidConfiguration(_))
    ));
    // The largest valid nside is accepted but its dense map cannot be held in memory
    assert!(matches!(
        compute_hit_map(&[0.0], &[0.0], 1_i64 << 29),
        Err(HitMapError::InvalidConfiguration(_))
    ));
    let nested_odd = HitMapConfig {
        nside: 3,
        scheme: Scheme::Nested,
    };
    assert!(matches!(
        HitMap::from_radec_deg(&[0.0], &[0.0], &nested_odd),
        Err(HitMapError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_block_maps_accumulate() {
    // A dispatcher splits a scan into blocks and co-adds the per-block maps
    let (ra, dec) = random_sky(99, 3000);
    let config = HitMapConfig {
        nside: 16,
        scheme: Scheme::Nested,
    };
    let whole = HitMap::from_radec_deg(&ra, &dec, &config).unwrap();

    let mut sum = HitMap::empty(&config).unwrap();
    for (ra_block, dec_block) in ra.chunks(700).zip(dec.chunks(700)) {
        let block = HitMap::from_radec_deg(ra_block, dec_block, &config).unwrap();
        sum.accumulate(&block).unwrap();
    }
    assert_eq!(sum, whole);
}

#[test]
fn test_degrade_and_reorder_match_direct_binning() {
    let (ra, dec) = random_sky(5, 4000);
    let fine = HitMap::from_radec_deg(
        &ra,
        &dec,
        &HitMapConfig {
            nside: 32,
            scheme: Scheme::Ring,
        },
    )
    .unwrap();

    let coarse = fine.degrade(8).unwrap();
    let direct = compute_hit_map(&ra, &dec, 8).unwrap();
    assert_eq!(coarse.counts(), direct.as_slice());

    let nested = fine.reorder(Scheme::Nested).unwrap();
    assert_eq!(nested.total_hits(), 4000);
    assert_eq!(nested.reorder(Scheme::Ring).unwrap(), fine);
}

#[test]
fn test_sources_end_to_end() {
    init_tracing();
    let csv_path = temp_path("pointings.csv");
    std::fs::write(
        &csv_path,
        "time,ra,dec\n0.0,0.0,0.0\n1.0,0.0,0.0\n2.0,180.0,-90.0\n",
    )
    .unwrap();
    let columns_path = temp_path("pointings.txt");
    std::fs::write(&columns_path, "# ra dec\n0.0 0.0\n\n0.0 0.0\n180.0 -90.0\n").unwrap();

    let config = HitMapConfig {
        nside: 4,
        scheme: Scheme::Ring,
    };
    let from_csv = CsvPointings::new(&csv_path)
        .load_radec()
        .unwrap()
        .hit_map(&config)
        .unwrap();
    let from_columns = ColumnPointings::new(&columns_path)
        .load_radec()
        .unwrap()
        .hit_map(&config)
        .unwrap();
    let direct = compute_hit_map(&[0.0, 0.0, 180.0], &[0.0, 0.0, -90.0], 4).unwrap();

    assert_eq!(from_csv.counts(), direct.as_slice());
    assert_eq!(from_csv, from_columns);

    let saved = temp_path("map.rkyv");
    from_csv.save_to_file(&saved).unwrap();
    let loaded = HitMap::load_from_file(&saved).unwrap();
    assert_eq!(loaded, from_csv);

    let _ = std::fs::remove_file(&csv_path);
    let _ = std::fs::remove_file(&columns_path);
    let _ = std::fs::remove_file(&saved);
}

#[test]
fn test_missing_column_is_reported() {
    let path = temp_path("no_dec.csv");
    std::fs::write(&path, "ra,elevation\n1.0,2.0\n").unwrap();
    let err = CsvPointings::new(&path).load_radec().unwrap_err();
    assert!(err.to_string().contains("column 'dec' not found"), "{err}");
    let _ = std::fs::remove_file(&path);
}
