use super::*;

fn euro(value: f64) -> String {
    YFormatter::default().format(value)
}

#[test]
fn small_amounts_print_whole_units() {
    assert_eq!(euro(500.0), "500 €");
    assert_eq!(euro(0.0), "0 €");
    assert_eq!(euro(-42.0), "-42 €");
}

#[test]
fn fractional_amounts_round_to_nearest_unit() {
    assert_eq!(euro(12.4), "12 €");
    assert_eq!(euro(12.6), "13 €");
}

#[test]
fn threshold_boundary() {
    assert_eq!(euro(999.0), "999 €");
    assert_eq!(euro(-999.0), "-999 €");
    assert_eq!(euro(1000.0), "1K €");
}

#[test]
fn rounding_happens_before_threshold_check() {
    assert_eq!(euro(999.4), "999 €");
    assert_eq!(euro(999.5), "1K €");
}

#[test]
fn thousands_round_half_away_from_zero() {
    assert_eq!(euro(1500.0), "2K €");
    assert_eq!(euro(-2500.0), "-3K €");
    assert_eq!(euro(1499.0), "1K €");
    assert_eq!(euro(125_400.0), "125K €");
}

#[test]
fn negative_zero_prints_as_zero() {
    assert_eq!(euro(-0.4), "0 €");
}

#[test]
fn suffix_is_configurable() {
    let formatter = YFormatter::new(" $");
    assert_eq!(formatter.suffix(), " $");
    assert_eq!(formatter.format(-1200.0), "-1K $");
    assert_eq!(format_amount(7.0, ""), "7");
}
