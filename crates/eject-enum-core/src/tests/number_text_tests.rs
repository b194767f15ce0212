use crate::number_text::number_to_string;

#[test]
fn integers_print_without_fraction() {
    assert_eq!(number_to_string(0.0), "0");
    assert_eq!(number_to_string(-0.0), "0");
    assert_eq!(number_to_string(1.0), "1");
    assert_eq!(number_to_string(-16.0), "-16");
    assert_eq!(number_to_string(4660.0), "4660");
    assert_eq!(number_to_string(9007199254740992.0), "9007199254740992");
    assert_eq!(number_to_string(1e20), "100000000000000000000");
}

#[test]
fn fractions_use_shortest_round_trip_digits() {
    assert_eq!(number_to_string(0.5), "0.5");
    assert_eq!(number_to_string(-2.25), "-2.25");
    assert_eq!(number_to_string(0.1 + 0.2), "0.30000000000000004");
    assert_eq!(number_to_string(0.000001), "0.000001");
    assert_eq!(number_to_string(123.456), "123.456");
}

#[test]
fn large_and_small_magnitudes_use_exponent_form() {
    assert_eq!(number_to_string(1e21), "1e+21");
    assert_eq!(number_to_string(1.5e300), "1.5e+300");
    assert_eq!(number_to_string(1e-7), "1e-7");
    assert_eq!(number_to_string(1.5e-10), "1.5e-10");
    assert_eq!(number_to_string(5e-324), "5e-324");
    assert_eq!(number_to_string(f64::MAX), "1.7976931348623157e+308");
}

#[test]
fn non_finite_values_have_names() {
    assert_eq!(number_to_string(f64::NAN), "NaN");
    assert_eq!(number_to_string(f64::INFINITY), "Infinity");
    assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
}
