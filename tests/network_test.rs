//! End-to-end run of the burn network into the viewer's loader.

use tempfile::tempdir;

use cno_viewer::chart::Chart;
use cno_viewer::data::{load, write_table};
use cno_viewer::network::{Burn, COLUMN_NAMES, MASS_NUMBER, MOLAR_MASS};
use cno_viewer::species::CNO_SPECIES;

fn nucleons(mass_fractions: &[f64]) -> f64 {
    mass_fractions
        .iter()
        .zip(MOLAR_MASS.iter().zip(MASS_NUMBER))
        .map(|(&x, (&m, a))| x / m * a)
        .sum()
}

#[test]
fn test_default_burn_produces_plottable_table() {
    let burn = Burn::default();
    let table = burn.run().unwrap();
    assert!(table.n_rows() > 10);
    assert_eq!(table.n_columns(), 14);

    // Time strictly increases and ends on t_stop.
    let time = table.column("tnow").unwrap();
    assert!(time.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(*time.last().unwrap(), burn.t_stop);

    // Mass fractions stay non-negative.
    for name in COLUMN_NAMES {
        assert!(table.column(name).unwrap().iter().all(|&x| x >= 0.0), "{name}");
    }

    // Hydrogen has burned to helium by 1e22 s.
    let last = table.n_rows() - 1;
    assert!(table.column("h1").unwrap()[last] < 0.5);
    assert!(table.column("he4").unwrap()[last] > 0.5);

    // Nucleon number is conserved up to the killed traces.
    let start = nucleons(&burn.initial);
    let row = table.row(last).unwrap();
    let end = nucleons(&row[1..]);
    assert!((end - start).abs() <= 1e-6 * start, "{start} -> {end}");

    let chart = Chart::build(&table, &CNO_SPECIES).unwrap();
    assert_eq!(chart.series.len(), 13);
}

#[test]
fn test_short_burn_round_trips_through_results_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.dat");
    let burn = Burn {
        t_stop: 1.0e10,
        ..Burn::default()
    };
    let table = burn.run().unwrap();
    write_table(&path, &table).unwrap();

    let loaded = load(&path, ' ').unwrap();
    assert_eq!(loaded.n_rows(), table.n_rows());
    assert_eq!(loaded.column_names(), table.column_names());

    let h1 = loaded.column("h1").unwrap();
    assert!((h1[0] - 0.99).abs() < 1e-4);
}
