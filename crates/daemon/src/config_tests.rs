use super::*;

#[test]
fn defaults_and_overrides() {
    for key in ["CM_WORKER_COUNT", "CM_POLL_INTERVAL_MS", "CM_ARTIFACT_ROOT", "CM_WAL_PATH", "CM_BATCH_SIZE"] {
        std::env::remove_var(key);
    }
    let defaults = DaemonConfig::from_env();
    assert_eq!(defaults.worker_count, 4);
    assert_eq!(defaults.poll_interval, Duration::from_millis(500));
    assert_eq!(defaults.batch_size, 16);

    std::env::set_var("CM_WORKER_COUNT", "8");
    std::env::set_var("CM_POLL_INTERVAL_MS", "250");
    std::env::set_var("CM_BATCH_SIZE", "32");
    let overridden = DaemonConfig::from_env();
    assert_eq!(overridden.worker_count, 8);
    assert_eq!(overridden.poll_interval, Duration::from_millis(250));
    assert_eq!(overridden.batch_size, 32);

    std::env::remove_var("CM_WORKER_COUNT");
    std::env::remove_var("CM_POLL_INTERVAL_MS");
    std::env::remove_var("CM_BATCH_SIZE");
}
