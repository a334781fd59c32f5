//! Cache de resultados recentes.
//!
//! Este módulo implementa uma janela de recência de capacidade fixa:
//! guarda os N resultados mais recentes em ordem de inserção e descarta
//! o mais antigo quando a capacidade é excedida (FIFO, não LRU).
//!
//! Ao lado da janela existe um índice por chave. O índice é um
//! armazenamento separado: uma entrada removida da janela continua
//! acessível pela chave até `clear`.
//!
//! - [`ResultCache`] - estrutura de dono único (`&mut self`)
//! - [`SharedResultCache`] - handle clonável protegido por um único mutex

mod shared;
mod window;

pub use shared::SharedResultCache;
pub use window::{CacheStats, ResultCache};

/// Capacidade padrão do cache.
pub const DEFAULT_CAPACITY: usize = 10;
