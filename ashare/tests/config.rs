use std::collections::HashMap;

use ashare::config::{self, RuntimeConfig};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn lookup_parsing_splits_and_trims_the_stock_list() {
    let cfg = RuntimeConfig::from_lookup(lookup_from(&[
        ("STOCK_LIST", "600519, 000001 ,,300750"),
        ("MAX_WORKERS", "5"),
    ]));

    assert_eq!(cfg.stock_list, vec!["600519", "000001", "300750"]);
    assert_eq!(cfg.max_workers, 5);
    assert_eq!(cfg.fetch_delay_secs, (1.0, 3.0));
}

#[test]
fn unparseable_values_fall_back_to_defaults() {
    let cfg = RuntimeConfig::from_lookup(lookup_from(&[
        ("MAX_WORKERS", "plenty"),
        ("FETCH_DELAY_MIN_SECS", "0.5"),
    ]));

    assert_eq!(cfg.max_workers, 3);
    assert_eq!(cfg.fetch_delay_secs, (0.5, 3.0));
    assert!(cfg.stock_list.is_empty());
}

#[test]
fn validate_flags_startup_problems() {
    let empty = RuntimeConfig::from_lookup(|_| None);
    assert!(!empty.validate().is_empty());

    let inverted = RuntimeConfig {
        stock_list: vec!["600519".to_string()],
        max_workers: 3,
        fetch_delay_secs: (3.0, 1.0),
    };
    assert_eq!(inverted.validate().len(), 1);

    let healthy = RuntimeConfig {
        stock_list: vec!["600519".to_string()],
        ..RuntimeConfig::default()
    };
    assert!(healthy.validate().is_empty());
}

// Process-scoped state is exercised in a single test: these assertions
// share one global slot and must not interleave across threads.
#[test]
fn install_read_and_reset_round_trip() {
    config::reset();
    assert!(config::current().is_none());

    config::init(RuntimeConfig {
        stock_list: vec!["600519".to_string()],
        ..RuntimeConfig::default()
    });
    let installed = config::current().expect("config was just installed");
    assert_eq!(installed.stock_list, vec!["600519"]);

    config::init(RuntimeConfig::default());
    let replaced = config::current().expect("config was replaced");
    assert!(replaced.stock_list.is_empty());

    config::reset();
    assert!(config::current().is_none());
}
