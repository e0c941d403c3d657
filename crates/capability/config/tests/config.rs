use domain::UnitSystem;
use prodmon_config::AppConfig;

#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::set_var("PRODMON_HTTP_ADDR", "127.0.0.1:8081");
        std::env::set_var("PRODMON_DEFAULT_UNIT_SYSTEM", "metric");
        std::env::set_var("PRODMON_DOWNTIME_DAYS", "14");
        std::env::set_var("PRODMON_SEED_DEMO", "false");
    }

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.http_addr, "127.0.0.1:8081");
    assert_eq!(config.default_unit_system, UnitSystem::Metric);
    assert_eq!(config.downtime_days, 14);
    assert_eq!(config.default_locale, "en");
    assert!((config.gas_lift_min_injection_mcfd - 50.0).abs() < f64::EPSILON);
    assert!(!config.seed_demo);

    unsafe {
        std::env::set_var("PRODMON_DEFAULT_UNIT_SYSTEM", "cubits");
    }
    assert!(AppConfig::from_env().is_err());
}
