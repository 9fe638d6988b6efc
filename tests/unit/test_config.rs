//! Unit tests for the config module
//!
//! Tests cover:
//! - Loading from an explicit TOML file
//! - Error context on unreadable or malformed files
//! - Fallback file lookup when no path is given
//! - Building buffers from config

use cbuffer::config::{RingConfig, DEFAULT_CONFIG_FILE, ENV_CAPACITY};
use cbuffer::{RingBuffer, Sample};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cbuffer.toml");
    fs::write(&path, "capacity = 32\nlog_filter = \"cbuffer=debug\"\n").unwrap();

    let config = RingConfig::load(path.to_str()).unwrap();
    assert_eq!(config.capacity, 32);
    assert!(config.log_filter.is_some());
}

#[test]
fn test_load_missing_file_has_context() {
    let err = RingConfig::load(Some("/nonexistent/cbuffer.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config"));
}

#[test]
fn test_load_malformed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "capacity = [").unwrap();

    let err = RingConfig::load(path.to_str()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}

#[test]
fn test_load_rejects_zero_capacity() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("zero.toml");
    fs::write(&path, "capacity = 0").unwrap();

    let err = RingConfig::load(path.to_str()).unwrap_err();
    assert!(err.to_string().contains("capacity must be at least 1"));
}

// ============================================================================
// Fallback file lookup
// ============================================================================

mod fallback_tests {
    use super::*;

    #[test]
    fn test_no_path_reads_fallback_file() {
        let dir = tempdir().unwrap();
        let fallback = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&fallback, "capacity = 96").unwrap();

        let config = RingConfig::load_with(None, &fallback, |_| None).unwrap();
        assert_eq!(config.capacity, 96);
    }

    #[test]
    fn test_no_path_and_no_fallback_uses_defaults() {
        let dir = tempdir().unwrap();
        let fallback = dir.path().join(DEFAULT_CONFIG_FILE);

        let config = RingConfig::load_with(None, &fallback, |_| None).unwrap();
        assert_eq!(config, RingConfig::default());
    }

    #[test]
    fn test_overrides_apply_to_fallback_file() {
        let dir = tempdir().unwrap();
        let fallback = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&fallback, "capacity = 96").unwrap();

        let config = RingConfig::load_with(None, &fallback, |key| {
            (key == ENV_CAPACITY).then(|| "40".to_string())
        })
        .unwrap();
        assert_eq!(config.capacity, 40);
    }

    #[test]
    fn test_malformed_fallback_is_error() {
        let dir = tempdir().unwrap();
        let fallback = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&fallback, "capacity = [").unwrap();

        let err = RingConfig::load_with(None, &fallback, |_| None).unwrap_err();
        assert!(err.to_string().contains("Invalid config in"));
    }

    #[test]
    fn test_explicit_path_ignores_fallback() {
        let dir = tempdir().unwrap();
        let fallback = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&fallback, "capacity = 96").unwrap();
        let explicit = dir.path().join("explicit.toml");
        fs::write(&explicit, "capacity = 7").unwrap();

        let config = RingConfig::load_with(explicit.to_str(), &fallback, |_| None).unwrap();
        assert_eq!(config.capacity, 7);
    }
}

#[test]
fn test_override_then_build_buffer() {
    let mut config = RingConfig::default();
    config.apply_overrides(|key| (key == ENV_CAPACITY).then(|| "12".to_string()));
    config.validate().unwrap();

    let buf = RingBuffer::<Sample>::from_config(&config).unwrap();
    assert_eq!(buf.capacity(), 12);
    assert_eq!(buf.free_space(), 12);
}
