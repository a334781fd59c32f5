//! Testes de integração para o monitor do flowwatch.

use std::sync::Arc;
use std::thread;

use flowwatch::detection::{PathStatus, RiskLevel, RiskSample};
use flowwatch::monitor::Monitor;
use flowwatch::trace::{self, MetricsSink, Tracer};
use flowwatch::types::requests::Observation;
use flowwatch::types::responses::VerdictKind;
use flowwatch::Config;

fn create_monitor(capacity: usize) -> (Monitor, Arc<MetricsSink>) {
    let mut config = Config::default_config();
    config.cache.capacity = capacity;

    let metrics = Arc::new(MetricsSink::new());
    let mut tracer = Tracer::new();
    tracer.register(metrics.clone());

    let monitor = Monitor::new(&config, tracer).expect("Failed to create monitor");
    (monitor, metrics)
}

mod processing_tests {
    use super::*;

    #[test]
    fn test_process_mixed_batch() {
        let (monitor, metrics) = create_monitor(10);
        let batch = vec![
            Observation::path(["a", "b"]),
            Observation::risk(RiskSample::new(200.0, 10.0, 0).with_token("MINT1")),
            Observation::path(["a", "unknown_wallet", "b", "unknown_wallet", "c", "d"]),
        ];

        let labels: Vec<String> = batch
            .iter()
            .map(|obs| monitor.process(obs).label)
            .collect();

        assert_eq!(
            labels,
            vec![
                PathStatus::NormalFlow.to_string(),
                RiskLevel::Watchlist.to_string(),
                PathStatus::SuspiciousMovement.to_string(),
            ]
        );
        assert_eq!(metrics.count(trace::PATH_ANALYSIS), 2);
        assert_eq!(metrics.count(trace::RISK_ASSESSMENT), 1);
        assert_eq!(metrics.total(), 3);
    }

    #[test]
    fn test_window_order_matches_processing_order() {
        let (monitor, _) = create_monitor(3);
        let tokens = ["T1", "T2", "T3", "T4", "T5"];
        for token in tokens {
            monitor.assess_risk(&RiskSample::new(1.0, 1.0, 0).with_token(token));
        }

        let keys: Vec<Option<String>> = monitor.latest(None).into_iter().map(|v| v.key).collect();
        assert_eq!(
            keys,
            vec![
                Some("T3".to_string()),
                Some("T4".to_string()),
                Some("T5".to_string())
            ]
        );
    }

    #[test]
    fn test_lookup_outlives_window() {
        let (monitor, _) = create_monitor(2);
        let path = ["walletA", "walletB", "walletC"];

        let first = monitor.inspect_path(&path);
        monitor.assess_risk(&RiskSample::new(1.0, 1.0, 0));
        monitor.assess_risk(&RiskSample::new(2.0, 1.0, 0));

        assert!(monitor.latest(None).iter().all(|v| v.kind == VerdictKind::Risk));
        assert_eq!(monitor.lookup_path(&path), Some(first));
        assert_eq!(monitor.stats().evictions, 1);
    }

    #[test]
    fn test_repeated_path_overwrites_key() {
        let (monitor, _) = create_monitor(5);
        let path = ["x", "y", "z"];

        let first = monitor.inspect_path(&path);
        let second = monitor.inspect_path(&path);

        assert_ne!(first.id, second.id);
        assert_eq!(monitor.lookup_path(&path).map(|v| v.id), Some(second.id));
        assert_eq!(monitor.latest(None).len(), 2);
    }
}

mod sharing_tests {
    use super::*;

    #[test]
    fn test_monitor_clones_share_cache() {
        let (monitor, _) = create_monitor(50);

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let monitor = monitor.clone();
                thread::spawn(move || {
                    for j in 0..10 {
                        let token = format!("T{}-{}", i, j);
                        monitor.assess_risk(&RiskSample::new(100.0, 1.0, 0).with_token(token));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("worker panicked");
        }

        let stats = monitor.stats();
        assert_eq!(stats.size, 40);
        assert_eq!(stats.indexed, 40);
        assert!(monitor.lookup("T3-9").is_some());
    }

    #[test]
    fn test_with_cache_writes_to_given_cache() {
        let config = Config::default_config();
        let (source, _) = create_monitor(4);
        let other = Monitor::with_cache(&config, Tracer::new(), source.cache());

        other.inspect_path(&["a"]);
        assert_eq!(source.latest(None).len(), 1);

        source.clear();
        assert!(other.last().is_none());
    }
}
