//! Fuzz target for the CSV decoder.
//!
//! Arbitrary bytes must never panic the decoder or the inference run over
//! whatever rows it managed to produce.

#![no_main]

use glimpse::{CsvDecoder, Dataset, DecoderConfig, infer_all};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let (batch_size, bytes) = match data.split_first() {
        Some((first, rest)) => (*first as usize, rest),
        None => (1, data),
    };

    let decoder = CsvDecoder::with_config(DecoderConfig { batch_size });
    let mut dataset = Dataset::new();
    for batch in decoder.batches(bytes) {
        match batch {
            Ok(rows) => {
                assert!(!rows.is_empty());
                dataset.append(rows);
            }
            Err(_) => break,
        }
    }

    let types = infer_all(&dataset);
    assert_eq!(types.len(), dataset.columns().len());
});
