#![no_main]
use humpf_core::SpringSequence;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parse and validation errors are fine; panics are not.
    let Ok(cfg) = toml::from_str::<humpf_config::Config>(data) else {
        return;
    };
    if cfg.validate().is_err() {
        return;
    }
    // A validated timeline must build and evaluate without panicking.
    if let Ok(seq) = SpringSequence::try_from(&cfg) {
        for step in seq.steps() {
            let t = step.time();
            let _ = seq.evaluate(t);
            let _ = seq.stable(t + 1.0);
        }
        let _ = seq.evaluate(0.0);
    }
});
