#![no_main]

use cmdutil::{Config, ConfigOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary TOML must never panic, and whatever parses must either
    // configure cleanly or leave the config untouched
    let contents = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return,
    };

    let options: ConfigOptions = match toml::from_str(contents) {
        Ok(options) => options,
        Err(_) => return,
    };

    let before = Config::new("fuzz");
    let mut config = before.clone();
    match config.configure(options) {
        Ok(()) => {
            if let Some(usage) = config.usage() {
                assert!(!usage.synopses().is_empty());
            }
        }
        Err(_) => assert_eq!(config, before),
    }
});
