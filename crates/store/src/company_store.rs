use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use rebill_core::CompanyId;

/// Company-isolated key/value store abstraction for record collections.
pub trait CompanyStore<K, V>: Send + Sync {
    fn get(&self, company_id: CompanyId, key: &K) -> Option<V>;
    fn upsert(&self, company_id: CompanyId, key: K, value: V);
    /// All records of a company, in key order.
    fn list(&self, company_id: CompanyId) -> Vec<V>;
}

impl<K, V, S> CompanyStore<K, V> for Arc<S>
where
    S: CompanyStore<K, V> + ?Sized,
{
    fn get(&self, company_id: CompanyId, key: &K) -> Option<V> {
        (**self).get(company_id, key)
    }

    fn upsert(&self, company_id: CompanyId, key: K, value: V) {
        (**self).upsert(company_id, key, value)
    }

    fn list(&self, company_id: CompanyId) -> Vec<V> {
        (**self).list(company_id)
    }
}

/// In-memory company-isolated store.
///
/// Ordered maps keep listings stable across runs; with time-ordered record
/// ids that means creation order.
#[derive(Debug)]
pub struct InMemoryCompanyStore<K, V> {
    inner: RwLock<BTreeMap<CompanyId, BTreeMap<K, V>>>,
}

impl<K, V> InMemoryCompanyStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryCompanyStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> CompanyStore<K, V> for InMemoryCompanyStore<K, V>
where
    K: Clone + Ord + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, company_id: CompanyId, key: &K) -> Option<V> {
        let map = self.inner.read().ok()?;
        map.get(&company_id)?.get(key).cloned()
    }

    fn upsert(&self, company_id: CompanyId, key: K, value: V) {
        if let Ok(mut map) = self.inner.write() {
            map.entry(company_id).or_default().insert(key, value);
        }
    }

    fn list(&self, company_id: CompanyId) -> Vec<V> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };

        map.get(&company_id)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default()
    }
}
