//! Sinks padrão do flowwatch.
//!
//! - `LoggingSink`: Registra eventos no log
//! - `MetricsSink`: Conta eventos por nome

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use serde_json::Value;

use super::TraceSink;

// ═══════════════════════════════════════════════════════════════════════════
// LoggingSink
// ═══════════════════════════════════════════════════════════════════════════

/// Sink que registra cada evento no log em nível debug.
///
/// O timestamp é o instante Unix (segundos, com fração) em que o evento
/// foi recebido.
#[derive(Debug, Default)]
pub struct LoggingSink;

impl LoggingSink {
    /// Cria um novo LoggingSink.
    pub fn new() -> Self {
        Self
    }
}

impl TraceSink for LoggingSink {
    fn name(&self) -> &str {
        "logging"
    }

    fn record(&self, event: &str, metadata: &Value) {
        let timestamp = Utc::now().timestamp_millis() as f64 / 1000.0;
        tracing::debug!(
            trace_event = %event,
            metadata = %metadata,
            timestamp,
            "[TRACE]"
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// MetricsSink
// ═══════════════════════════════════════════════════════════════════════════

/// Sink que conta eventos por nome.
#[derive(Debug, Default)]
pub struct MetricsSink {
    /// Total de eventos recebidos.
    total: AtomicU64,

    /// Contagem por nome de evento.
    counts: Mutex<BTreeMap<String, u64>>,
}

impl MetricsSink {
    /// Cria um novo MetricsSink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retorna o total de eventos.
    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    /// Retorna quantas vezes `event` foi recebido.
    pub fn count(&self, event: &str) -> u64 {
        self.counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event)
            .copied()
            .unwrap_or(0)
    }

    /// Retorna as métricas em formato estruturado.
    pub fn snapshot(&self) -> Value {
        let counts = self
            .counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        serde_json::json!({
            "total": self.total(),
            "events": counts,
        })
    }

    /// Zera os contadores.
    pub fn reset(&self) {
        self.total.store(0, Ordering::Relaxed);
        self.counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl TraceSink for MetricsSink {
    fn name(&self) -> &str {
        "metrics"
    }

    fn record(&self, event: &str, _metadata: &Value) {
        self.total.fetch_add(1, Ordering::Relaxed);
        *self
            .counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event.to_string())
            .or_insert(0) += 1;
    }
}
