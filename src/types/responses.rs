//! Tipos de resposta do flowwatch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detection::{PathStatus, RiskLevel};

/// Origem de um veredito.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VerdictKind {
    /// Análise de caminho de transação.
    Path,
    /// Classificação de risco por densidade.
    Risk,
}

impl std::fmt::Display for VerdictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerdictKind::Path => write!(f, "path"),
            VerdictKind::Risk => write!(f, "risk"),
        }
    }
}

/// Resultado de uma classificação, como guardado no cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Verdict {
    /// ID único do veredito.
    pub id: uuid::Uuid,

    /// Regra que produziu o veredito.
    pub kind: VerdictKind,

    /// Rótulo retornado pela regra.
    pub label: String,

    /// Chave sob a qual o veredito foi indexado, se houver.
    pub key: Option<String>,

    /// Momento da classificação.
    pub timestamp: DateTime<Utc>,
}

impl Verdict {
    /// Cria um veredito de caminho.
    pub fn path(status: PathStatus, key: Option<String>) -> Self {
        Self::new(VerdictKind::Path, status.to_string(), key)
    }

    /// Cria um veredito de risco.
    pub fn risk(level: RiskLevel, key: Option<String>) -> Self {
        Self::new(VerdictKind::Risk, level.to_string(), key)
    }

    fn new(kind: VerdictKind, label: String, key: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            kind,
            label,
            key,
            timestamp: Utc::now(),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.key {
            Some(key) => write!(f, "[{}] {} ({})", self.kind, self.label, key),
            None => write!(f, "[{}] {}", self.kind, self.label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_labels() {
        let v = Verdict::path(PathStatus::ObscuredTrail, None);
        assert_eq!(v.kind, VerdictKind::Path);
        assert_eq!(v.label, "Obscured Transaction Trail");

        let r = Verdict::risk(RiskLevel::Watchlist, Some("MINT1".to_string()));
        assert_eq!(r.kind, VerdictKind::Risk);
        assert_eq!(r.to_string(), "[risk] Watchlist (MINT1)");
    }

    #[test]
    fn test_verdict_ids_are_unique() {
        let a = Verdict::path(PathStatus::NormalFlow, None);
        let b = Verdict::path(PathStatus::NormalFlow, None);
        assert_ne!(a.id, b.id);
        assert_ne!(a, b);
    }

    #[test]
    fn test_verdict_serialization() {
        let v = Verdict::risk(RiskLevel::ImmediateRisk, None);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["kind"], "risk");
        assert_eq!(json["label"], "Immediate Risk Alert");
        assert!(json["key"].is_null());
    }
}
