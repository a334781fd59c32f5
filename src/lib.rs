//! # flowwatch
//!
//! Cache de resultados recentes para monitoramento de fluxo de transações.
//!
//! O núcleo é um cache de capacidade fixa que guarda os N vereditos mais
//! recentes, com busca por chave ao lado da ordem de inserção. Em volta
//! dele, regras de detecção alimentam o cache e reportam a um canal de
//! trace injetado.
//!
//! ## Módulos
//!
//! - [`cache`] - Janela de resultados recentes com índice por chave
//! - [`detection`] - Regras de caminho e de risco
//! - [`trace`] - Canal de trace (sinks de eventos)
//! - [`monitor`] - Liga regras, trace e cache
//! - [`cli`] - Interface de linha de comando
//! - [`types`] - Tipos compartilhados

pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod detection;
pub mod monitor;
pub mod trace;
pub mod types;

pub use cache::{ResultCache, SharedResultCache};
pub use types::config::Config;
pub use types::errors::{FlowWatchError, FlowWatchResult};
