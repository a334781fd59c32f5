//! Handle compartilhado para o cache de resultados.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::FlowWatchResult;

use super::window::{CacheStats, ResultCache};

/// Cache de resultados compartilhável entre threads.
///
/// Janela e índice ficam atrás de um único mutex, então `add_result`
/// atualiza os dois como uma unidade e `get_latest` sempre vê um estado
/// consistente. Clonar o handle compartilha o mesmo cache.
#[derive(Debug)]
pub struct SharedResultCache<T> {
    inner: Arc<Mutex<ResultCache<T>>>,
}

impl<T> Clone for SharedResultCache<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> SharedResultCache<T> {
    /// Cria um novo cache compartilhado.
    pub fn new(capacity: usize) -> FlowWatchResult<Self> {
        Ok(Self::from_cache(ResultCache::new(capacity)?))
    }

    /// Envolve um cache existente.
    pub fn from_cache(cache: ResultCache<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    // Nenhuma operação deixa janela e índice em estado parcial, então
    // um lock envenenado ainda guarda um cache válido.
    fn lock(&self) -> MutexGuard<'_, ResultCache<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Capacidade máxima da janela.
    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    /// Número de entradas na janela.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Verifica se a janela está vazia.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Limpa janela e índice sob o mesmo lock.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Retorna estatísticas do cache.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }
}

impl<T: Clone> SharedResultCache<T> {
    /// Ver [`ResultCache::add_result`].
    pub fn add_result(&self, result: T, key: Option<&str>) {
        self.lock().add_result(result, key);
    }

    /// Ver [`ResultCache::get_latest`].
    pub fn get_latest(&self, n: Option<usize>) -> Vec<T> {
        self.lock().get_latest(n)
    }

    /// Ver [`ResultCache::get_by_key`].
    pub fn get_by_key(&self, key: &str) -> Option<T> {
        self.lock().get_by_key(key)
    }

    /// Ver [`ResultCache::get_last`].
    pub fn get_last(&self) -> Option<T> {
        self.lock().get_last()
    }
}

impl<T> Default for SharedResultCache<T> {
    fn default() -> Self {
        Self::from_cache(ResultCache::default())
    }
}
