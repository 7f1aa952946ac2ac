use pretty_assertions::assert_eq;
use serial_test::serial;
use std::env;

use iplr_cms::config::{Config, DEFAULT_MAX_IMAGE_BYTES};

const KEYS: &[&str] = &[
    "DATABASE_URL",
    "JWT_SECRET",
    "SESSION_TTL_HOURS",
    "HOST",
    "PORT",
    "ENVIRONMENT",
    "BASE_URL",
    "PUBLIC_BASE_URL",
    "STORAGE_DIR",
    "MAX_IMAGE_BYTES",
    "METRICS_REFRESH_SECONDS",
    "ADMIN_USERNAME",
    "ADMIN_PASSWORD",
];

/// Clears the config variables for the duration of `f`, then restores them.
fn with_clean_env(f: impl FnOnce()) {
    let saved: Vec<_> = KEYS.iter().map(|k| (*k, env::var(k).ok())).collect();
    for key in KEYS {
        unsafe { env::remove_var(key) };
    }

    f();

    for (key, value) in saved {
        match value {
            Some(value) => unsafe { env::set_var(key, value) },
            None => unsafe { env::remove_var(key) },
        }
    }
}

#[test]
#[serial]
fn defaults_apply_when_nothing_is_set() {
    with_clean_env(|| {
        let config = Config::from_env_only().unwrap();

        assert_eq!(config.session_ttl_hours, 24);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, "development");
        assert_eq!(config.public_base_url, "http://127.0.0.1:8080");
        assert_eq!(config.storage_dir, "./storage");
        assert_eq!(config.max_image_bytes, DEFAULT_MAX_IMAGE_BYTES);
        assert_eq!(config.metrics_refresh_seconds, 30);
        assert_eq!(config.admin_username, None);
        assert!(config.is_development());
    });
}

#[test]
#[serial]
fn environment_overrides_defaults() {
    with_clean_env(|| {
        unsafe {
            env::set_var("SESSION_TTL_HOURS", "12");
            env::set_var("PORT", "9000");
            env::set_var("ENVIRONMENT", "production");
            env::set_var("PUBLIC_BASE_URL", "https://cdn.iplr.org/");
            env::set_var("MAX_IMAGE_BYTES", "1024");
            env::set_var("ADMIN_USERNAME", "admin");
            env::set_var("ADMIN_PASSWORD", "");
        }

        let config = Config::from_env_only().unwrap();

        assert_eq!(config.session_ttl_hours, 12);
        assert_eq!(config.server_address(), "127.0.0.1:9000");
        assert!(config.is_production());
        assert_eq!(config.public_base_url, "https://cdn.iplr.org");
        assert_eq!(config.max_image_bytes, 1024);
        assert_eq!(config.admin_username.as_deref(), Some("admin"));
        assert_eq!(config.admin_password, None);
    });
}

#[test]
#[serial]
fn unparsable_numbers_fall_back() {
    with_clean_env(|| {
        unsafe {
            env::set_var("PORT", "not-a-port");
            env::set_var("METRICS_REFRESH_SECONDS", "soon");
        }

        let config = Config::from_env_only().unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.metrics_refresh_seconds, 30);
    });
}
