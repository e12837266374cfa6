#![no_main]

use cmdutil::{Config, ConfigOptions, Messenger};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Split input into lines: prog name, usage message, then synopses
    let text = String::from_utf8_lossy(data);
    let mut parts = text.split('\n');
    let prog_name = parts.next().unwrap_or_default().to_string();
    let message = parts.next().unwrap_or_default().to_string();
    let synopses: Vec<String> = parts.map(str::to_string).collect();
    if synopses.is_empty() {
        return;
    }

    let config = Config::new(prog_name)
        .with(ConfigOptions {
            prog_name: None,
            usage_message: Some(message),
            synopses: Some(synopses.clone()),
        })
        .expect("synopses are non-empty");

    let mut first = Messenger::with_writer(config.clone(), Vec::new());
    let mut second = Messenger::with_writer(config, Vec::new());
    assert_eq!(first.usage().unwrap().code(), 2);
    assert_eq!(second.usage().unwrap().code(), 2);

    // Rendering is deterministic
    assert_eq!(first.into_inner(), second.into_inner());
});
