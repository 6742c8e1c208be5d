use std::collections::VecDeque;
use tokio::sync::RwLock;

use super::types::MonitorSnapshot;

/// Журнал снимков мониторинга.
///
/// `capacity = Some(n)` - кольцевой буфер, старые снимки вытесняются;
/// `None` - журнал растет без ограничений.
pub struct History {
    entries: RwLock<VecDeque<MonitorSnapshot>>,
    capacity: Option<usize>,
}

impl History {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: RwLock::new(VecDeque::new()),
            capacity,
        }
    }

    pub async fn push(&self, snapshot: MonitorSnapshot) {
        let mut entries = self.entries.write().await;

        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                return;
            }
            while entries.len() >= capacity {
                entries.pop_front();
            }
        }

        entries.push_back(snapshot);
    }

    /// Копия журнала, от старых к новым
    pub async fn snapshot(&self) -> Vec<MonitorSnapshot> {
        self.entries.read().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
