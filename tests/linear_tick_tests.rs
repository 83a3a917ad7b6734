use approx::assert_relative_eq;
use ticks_rs::{TickFactory, TickFormat};

fn labels(min: f64, max: f64, max_ticks: usize, tight: bool) -> Vec<String> {
    let mut factory = TickFactory::new(TickFormat::Auto, None);
    factory
        .generate_ticks(min, max, max_ticks, true, tight)
        .iter()
        .map(|tick| tick.text().to_string())
        .collect()
}

#[test]
fn unit_range_with_budget_of_ten() {
    assert_eq!(
        labels(0.0, 1.0, 10, false),
        [
            "0.0", "0.1", "0.2", "0.3", "0.4", "0.5", "0.6", "0.7", "0.8", "0.9", "1.0"
        ]
    );
}

#[test]
fn unit_range_with_budget_of_five() {
    assert_eq!(
        labels(0.0, 1.0, 5, false),
        ["0.00", "0.25", "0.50", "0.75", "1.00"]
    );
}

#[test]
fn straddling_range_loose_and_tight() {
    assert_eq!(labels(-0.9, 2.1, 5, false), ["-1", "0", "1", "2", "3"]);
    assert_eq!(labels(-0.9, 2.1, 5, true), ["0", "1", "2"]);
}

#[test]
fn negated_range_mirrors_the_labels() {
    assert_eq!(labels(-2.1, 0.9, 5, false), ["-3", "-2", "-1", "0", "1"]);
}

#[test]
fn reversed_range_runs_high_to_low() {
    let mut factory = TickFactory::new(TickFormat::Auto, None);
    let ticks = factory.generate_ticks(2.1, -0.9, 5, true, false);
    assert!(factory.is_reversed());
    let texts: Vec<_> = ticks.iter().map(|t| t.text().to_string()).collect();
    assert_eq!(texts, ["3", "2", "1", "0", "-1"]);
    assert_relative_eq!(ticks[0].position(), 0.0);
    assert_relative_eq!(ticks[4].position(), 1.0);
}

#[test]
fn large_magnitudes_switch_to_exponential_labels() {
    assert_eq!(
        labels(0.0, 1e6, 5, false),
        [
            "0.000e+00",
            "2.500e+05",
            "5.000e+05",
            "7.500e+05",
            "1.000e+06"
        ]
    );
}

#[test]
fn small_magnitudes_switch_to_exponential_labels() {
    assert_eq!(
        labels(0.0, 1e-6, 5, false),
        ["0.00e+00", "2.50e-07", "5.00e-07", "7.50e-07", "1.00e-06"]
    );
}

#[test]
fn degenerate_range_widens_upward_by_one() {
    assert_eq!(
        labels(3.0, 3.0, 5, false),
        ["3.00", "3.25", "3.50", "3.75", "4.00"]
    );
}

#[test]
fn range_below_f64_resolution_yields_no_ticks() {
    let lo = 0.12345678901234560e20;
    assert!(labels(lo, lo + 8.0e3, 6, false).is_empty());
    assert!(labels(lo, lo + 8.0e3, 6, true).is_empty());
}

#[test]
fn non_finite_bounds_yield_no_ticks() {
    assert!(labels(f64::NAN, 1.0, 5, false).is_empty());
    assert!(labels(0.0, f64::INFINITY, 5, false).is_empty());
}

#[test]
fn tight_narrow_range_injects_the_bounds() {
    assert_eq!(labels(0.41, 0.44, 2, true), ["0.41", "0.44"]);
}

#[test]
fn tight_ticks_stay_inside_the_range() {
    let mut factory = TickFactory::new(TickFormat::Auto, None);
    let ticks = factory.generate_ticks(0.123, 7.89, 8, true, true);
    assert!(!ticks.is_empty());
    for tick in &ticks {
        assert!(tick.value() >= 0.123 && tick.value() <= 7.89);
    }
}

#[test]
fn bounds_near_f64_max_stay_finite() {
    let mut factory = TickFactory::new(TickFormat::Auto, None);
    let ticks = factory.generate_ticks(-1.7e308, 1.7e308, 5, true, false);
    let texts: Vec<_> = ticks.iter().map(|t| t.text().to_string()).collect();
    assert_eq!(texts, ["-2e+308", "-7e+307", "3e+307", "2e+308"]);
    for tick in &ticks {
        assert!(tick.value().is_finite());
        assert!(tick.position().is_finite());
    }
}

#[test]
fn zero_tick_labels_positive_zero() {
    let texts = labels(-1.0, 1.0, 5, false);
    assert!(texts.iter().any(|label| label == "0.0"));
    assert!(texts.iter().all(|label| label != "-0.0"));
}

#[test]
fn exponent_mode_formats_every_label_exponentially() {
    let mut factory = TickFactory::new(TickFormat::Exponent, None);
    let ticks = factory.generate_ticks(0.0, 1.0, 5, true, false);
    for tick in &ticks {
        assert!(tick.text().contains('e'), "label {}", tick.text());
    }
}

#[test]
fn si_mode_uses_magnitude_suffixes() {
    let mut factory = TickFactory::new(TickFormat::SiUnits, None);
    let ticks = factory.generate_ticks(0.0, 1e5, 5, true, false);
    assert!(ticks.iter().skip(1).all(|t| t.text().ends_with('k')));
}
