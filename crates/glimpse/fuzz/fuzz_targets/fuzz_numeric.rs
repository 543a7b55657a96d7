//! Fuzz target for the numeric check.

#![no_main]

use glimpse::is_numeric_value;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|value: &str| {
    let numeric = is_numeric_value(value);

    // Surrounding whitespace never changes the answer.
    assert_eq!(numeric, is_numeric_value(&format!("  {value}\t")));

    if value.trim().is_empty() {
        assert!(!numeric);
    }
});
