//! Regras de detecção do flowwatch.
//!
//! Duas regras puras, sem estado, que recebem valores primitivos e
//! retornam um rótulo de um conjunto fechado:
//!
//! - **Caminho** ([`classify_path`]): pontua a ofuscação de um caminho de
//!   transação pelo comprimento e pelo número de carteiras desconhecidas.
//! - **Risco** ([`classify_risk`]): classifica um token pela densidade de
//!   transações, idade e alertas recentes.
//!
//! ## Exemplo
//!
//! ```rust
//! use flowwatch::detection::{dark_track, risk_alert, PathStatus, RiskLevel};
//!
//! let path = ["walletA", "unknown_wallet", "walletB", "unknown_wallet", "walletC", "walletD"];
//! assert_eq!(dark_track(&path), PathStatus::SuspiciousMovement);
//! assert_eq!(risk_alert(320.0, 2.0, 3), RiskLevel::ImmediateRisk);
//! ```

mod path;
mod risk;

pub use path::{classify_path, dark_track, PathStatus, PathThresholds, UNKNOWN_WALLET};
pub use risk::{classify_risk, risk_alert, RiskLevel, RiskSample, RiskThresholds};
