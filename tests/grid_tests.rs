
use bsm_lib::{
    default_grids, price_call, price_call_batch, price_grid, price_put, price_put_batch, AxisSpec,
    BatchParameters, GridConfig, PricingError,
};
use ndarray::Array2;
use test_utils::linspace;

/// A 5x5 (S, sigma) batch must agree with the scalar pricer cell by cell.
#[test]
fn test_batch_grid_matches_scalar_pricing() {
    let spots = linspace(80.0, 120.0, 5);
    let vols = linspace(0.1, 0.5, 5);

    let mut s_mesh = Array2::zeros((5, 5));
    let mut v_mesh = Array2::zeros((5, 5));
    for i in 0..5 {
        for j in 0..5 {
            s_mesh[[i, j]] = spots[i];
            v_mesh[[i, j]] = vols[j];
        }
    }

    let batch = BatchParameters::new(&s_mesh, 100.0, 1.0, 0.05, &v_mesh, 0.02);
    let calls = price_call_batch(&batch).unwrap();
    let puts = price_put_batch(&batch).unwrap();
    assert_eq!(calls.shape(), &[5, 5]);

    for i in 0..5 {
        for j in 0..5 {
            let call = price_call(spots[i], 100.0, 1.0, 0.05, vols[j], 0.02).unwrap();
            let put = price_put(spots[i], 100.0, 1.0, 0.05, vols[j], 0.02).unwrap();
            assert!((calls[[i, j]] - call).abs() < 1e-12);
            assert!((puts[[i, j]] - put).abs() < 1e-12);
        }
    }
}

#[test]
fn test_price_grid_layout() {
    let grid = price_grid(&default_grids::coarse()).unwrap();
    assert_eq!(grid.shape(), (5, 5));
    assert_eq!(grid.spots, vec![80.0, 90.0, 100.0, 110.0, 120.0]);

    for cell in grid.cells() {
        let call = price_call(cell.spot, 100.0, 1.0, 0.05, cell.vol, 0.0).unwrap();
        assert_eq!(cell.call, call);
    }

    // calls rise with spot down each column, and with vol along each row
    for j in 0..5 {
        for i in 1..5 {
            assert!(grid.calls[[i, j]] > grid.calls[[i - 1, j]]);
            assert!(grid.puts[[i, j]] < grid.puts[[i - 1, j]]);
        }
    }
    for i in 0..5 {
        for j in 1..5 {
            assert!(grid.calls[[i, j]] > grid.calls[[i, j - 1]]);
        }
    }

    assert!(grid.parity_residual() < 1e-10);
    assert!(grid.get(5, 0).is_none());
    assert!(grid.get(0, 5).is_none());
}

#[test]
fn test_standard_grid_parity() {
    let grid = price_grid(&default_grids::standard()).unwrap();
    assert_eq!(grid.shape(), (21, 21));
    assert!(grid.parity_residual() < 1e-7);
    assert!(grid.calls.iter().chain(grid.puts.iter()).all(|&p| p >= -1e-9));
}

/// The grid the demo builds without a config file is the default form grid.
#[test]
fn test_default_grid_is_standard() {
    let config = default_grids::standard();
    assert_eq!(config, GridConfig::default());
    assert_eq!(config.spot_axis, AxisSpec::new(50.0, 150.0, 21));
    assert_eq!(config.vol_axis, AxisSpec::new(0.05, 0.8, 21));
    assert_ne!(config, default_grids::coarse());

    let base = config.base_params().unwrap();
    assert_eq!((base.spot(), base.strike(), base.expiry()), (100.0, 100.0, 1.0));
    assert_eq!((base.rate(), base.vol(), base.dividend()), (0.05, 0.2, 0.0));
}

#[test]
fn test_grid_rejects_bad_config() {
    let config = GridConfig {
        spot_axis: AxisSpec::new(0.0, 100.0, 3),
        ..GridConfig::default()
    };
    assert!(matches!(price_grid(&config), Err(PricingError::InvalidGrid(_))));

    let config = GridConfig {
        expiry: 0.0,
        ..GridConfig::default()
    };
    assert!(matches!(
        price_grid(&config),
        Err(PricingError::InvalidParameter { name: "T", .. })
    ));
}

#[test]
fn test_grid_csv_export() {
    let config = GridConfig {
        spot_axis: AxisSpec::new(90.0, 110.0, 2),
        vol_axis: AxisSpec::new(0.2, 0.3, 2),
        ..GridConfig::default()
    };
    let grid = price_grid(&config).unwrap();

    let mut out = Vec::new();
    grid.write_csv(&mut out).unwrap();

    let mut reader = csv::Reader::from_reader(out.as_slice());
    assert_eq!(
        reader.headers().unwrap(),
        vec!["spot", "vol", "call", "put"]
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 4);
    assert_eq!(&rows[1][0], "90");
    assert_eq!(&rows[1][1], "0.3");
    let call: f64 = rows[3][2].parse().unwrap();
    assert_eq!(call, grid.calls[[1, 1]]);
}

#[test]
fn test_grid_config_from_file() {
    let path = std::env::temp_dir().join(format!("bsm_grid_{}.toml", std::process::id()));
    std::fs::write(
        &path,
        r#"
        spot = 50.0
        strike = 55.0
        expiry = 0.25
        rate = 0.01
        vol = 0.3
        dividend = 0.0

        [spot_axis]
        min = 40.0
        max = 60.0
        steps = 3

        [vol_axis]
        min = 0.2
        max = 0.4
        steps = 2
        "#,
    )
    .unwrap();

    let config = GridConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let grid = price_grid(&config).unwrap();
    assert_eq!(grid.shape(), (3, 2));
    assert_eq!(grid.base.strike(), 55.0);
    let cell = grid.get(2, 1).unwrap();
    assert_eq!(cell.spot, 60.0);
    assert_eq!(cell.vol, 0.4);
    assert_eq!(cell.put, price_put(60.0, 55.0, 0.25, 0.01, 0.4, 0.0).unwrap());

    assert!(GridConfig::from_file("/nonexistent/grid.toml").is_err());
}
