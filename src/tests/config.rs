use std::path::PathBuf;

use serial_test::serial;

use crate::config::AppConfig;
use crate::forwarder::ForwardingPolicy;

fn clear_env() {
    for (key, _) in std::env::vars() {
        if key.starts_with("CONTACT_") {
            std::env::remove_var(key);
        }
    }
}

#[serial]
#[test]
fn test_parse_defaults() {
    clear_env();

    let config = AppConfig::parse().expect("failed to parse config");
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.bind_address, "0.0.0.0:8000".parse().unwrap());
    assert!(config.webhook.url.is_empty());
    assert_eq!(config.webhook.timeout_secs, 10);
    assert_eq!(config.webhook.policy, ForwardingPolicy::Strict);
}

#[serial]
#[test]
fn test_parse_env() {
    clear_env();

    std::env::set_var("CONTACT_LOG_LEVEL", "contact_api=debug");
    std::env::set_var("CONTACT_BIND_ADDRESS", "127.0.0.1:9100");
    std::env::set_var("CONTACT_DATA_DIR", "/tmp/contact-data");
    std::env::set_var("CONTACT_WEBHOOK_URL", "  https://example.com/hook  ");
    std::env::set_var("CONTACT_WEBHOOK_TIMEOUT", "3");
    std::env::set_var("CONTACT_FORWARDING", "lenient");

    let config = AppConfig::parse().expect("failed to parse config");
    assert_eq!(config.logging.level, "contact_api=debug");
    assert_eq!(config.bind_address, "127.0.0.1:9100".parse().unwrap());
    assert_eq!(config.data_dir, PathBuf::from("/tmp/contact-data"));
    assert_eq!(config.webhook.url, "https://example.com/hook");
    assert_eq!(config.webhook.timeout_secs, 3);
    assert_eq!(config.webhook.policy, ForwardingPolicy::Lenient);

    clear_env();
}

#[serial]
#[test]
fn test_parse_invalid_policy() {
    clear_env();

    std::env::set_var("CONTACT_FORWARDING", "loose");
    assert!(AppConfig::parse().is_err());

    clear_env();
}

#[serial]
#[test]
fn test_parse_invalid_bind_address() {
    clear_env();

    std::env::set_var("CONTACT_BIND_ADDRESS", "not-an-address");
    assert!(AppConfig::parse().is_err());

    clear_env();
}

#[serial]
#[test]
fn test_parse_invalid_timeout() {
    clear_env();

    std::env::set_var("CONTACT_WEBHOOK_TIMEOUT", "soon");
    assert!(AppConfig::parse().is_err());

    clear_env();
}
