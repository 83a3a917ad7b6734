use ticks_rs::{ScaleError, TickFactory, TickFormat};

fn labels(min: f64, max: f64, max_ticks: usize, tight: bool) -> Vec<String> {
    let mut factory = TickFactory::new(TickFormat::Auto, None);
    factory
        .generate_log_ticks(min, max, max_ticks, true, tight)
        .expect("positive range")
        .iter()
        .map(|tick| tick.text().to_string())
        .collect()
}

#[test]
fn non_positive_bounds_are_rejected() {
    let mut factory = TickFactory::new(TickFormat::Auto, None);
    let err = factory
        .generate_log_ticks(0.0, 10.0, 5, true, false)
        .unwrap_err();
    assert!(matches!(err, ScaleError::NonPositiveLogRange { .. }));
    assert!(factory.generate_log_ticks(-1.0, 10.0, 5, true, false).is_err());
    assert!(factory.generate_log_ticks(1.0, f64::NAN, 5, true, false).is_err());
}

#[test]
fn single_decade_range() {
    assert_eq!(labels(1.0, 2.0, 4, true), ["1"]);
    assert_eq!(labels(1.0, 2.0, 4, false), ["1", "10"]);
}

#[test]
fn decade_ticks_within_budget() {
    assert_eq!(labels(1.0, 20.0, 4, false), ["1", "10", "100"]);
    assert_eq!(labels(1.0, 20.0, 4, true), ["1", "10"]);
}

#[test]
fn six_decades_keep_fixed_notation() {
    assert_eq!(
        labels(1e-3, 2e2, 7, false),
        [
            "0.001",
            "0.010",
            "0.100",
            "1.000",
            "10.000",
            "100.000",
            "1000.000"
        ]
    );
    assert_eq!(labels(1e-3, 2e2, 7, true).len(), 6);
}

#[test]
fn tight_decade_budget_widens_the_unit() {
    assert_eq!(
        labels(1e-3, 2e2, 3, false),
        ["0.001", "0.100", "10.000", "1000.000"]
    );
}

#[test]
fn low_decades_switch_to_exponential_notation() {
    assert_eq!(
        labels(1e-4, 2e2, 3, false),
        ["1e-04", "1e-01", "1e+02", "1e+05"]
    );
    assert_eq!(labels(1e-4, 2e2, 3, true), ["1e-04", "1e-01", "1e+02"]);
}

#[test]
fn sub_decade_range_injects_a_tick() {
    assert_eq!(labels(2.3e-5, 4.5e-5, 4, false), ["1e-05", "1e-04"]);
    assert_eq!(labels(2.3e-5, 4.5e-5, 4, true), ["1e-05"]);
}

#[test]
fn full_f64_decade_span_stays_representable() {
    assert_eq!(
        labels(2.23e-308, 1.79e308, 8, false),
        [
            "1e-308", "1e-231", "1e-154", "1e-77", "1e+00", "1e+77", "1e+154", "1e+231",
            "1e+308"
        ]
    );
}

#[test]
fn subnormal_bound_clamps_to_the_lowest_decade() {
    let mut factory = TickFactory::new(TickFormat::Auto, None);
    let ticks = factory
        .generate_log_ticks(4.9e-324, 1.79e308, 8, true, false)
        .expect("positive range");
    assert!(!ticks.is_empty());
    for tick in &ticks {
        assert!(tick.value().is_finite());
        assert!(tick.value() > 0.0);
    }
    assert_eq!(ticks.last().map(|t| t.text()), Some("1e+308"));
}

#[test]
fn reversed_log_range_runs_high_to_low() {
    let mut factory = TickFactory::new(TickFormat::Auto, None);
    let ticks = factory
        .generate_log_ticks(100.0, 0.1, 6, true, false)
        .expect("positive range");
    assert!(factory.is_reversed());
    let texts: Vec<_> = ticks.iter().map(|t| t.text().to_string()).collect();
    assert_eq!(texts, ["100.0", "10.0", "1.0", "0.1"]);
    assert!(ticks[0].position() < ticks[3].position());
}

#[test]
fn positions_are_log_spaced() {
    let mut factory = TickFactory::new(TickFormat::Auto, None);
    let ticks = factory
        .generate_log_ticks(1.0, 1000.0, 4, true, false)
        .expect("positive range");
    assert_eq!(ticks.len(), 4);
    for (i, tick) in ticks.iter().enumerate() {
        let expected = i as f64 / 3.0;
        assert!((tick.position() - expected).abs() < 1e-12);
    }
}
