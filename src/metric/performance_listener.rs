use crate::metric::{TEST_SET_PERCENT_WRONG, TRAINING_SET_PERCENT_WRONG, VALIDATION_SET_PERCENT_WRONG};
use crate::traits::PerformanceListener;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

/// Logs each metrics event through `tracing` at `info` level.
///
/// Error fractions under the well-known keys are rendered as tab-separated percentages
/// with one decimal, e.g. `Training set % wrong: 12.5`. Events without any known key are
/// not logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPerformanceListener;

impl TracingPerformanceListener {
    pub fn new() -> Self {
        Self
    }

    /// Renders the known metrics of one event, or `None` if it has none.
    pub fn format_event(metrics: &BTreeMap<String, f64>) -> Option<String> {
        let labelled = [
            (TRAINING_SET_PERCENT_WRONG, "Training set % wrong"),
            (VALIDATION_SET_PERCENT_WRONG, "Validation set % wrong"),
            (TEST_SET_PERCENT_WRONG, "Test set % wrong"),
        ];
        let parts: Vec<String> = labelled
            .iter()
            .filter_map(|(key, label)| {
                metrics
                    .get(*key)
                    .map(|value| format!("{}: {:.1}", label, value * 100.0))
            })
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\t"))
        }
    }
}

impl PerformanceListener for TracingPerformanceListener {
    fn performance_event(&mut self, metrics: &BTreeMap<String, f64>) {
        if let Some(message) = Self::format_event(metrics) {
            info!("{}", message);
        }
    }
}

/// Records every metrics event so it can be read back after (or during) training,
/// for example to chart training curves.
///
/// Clones share the same history: keep one clone, hand the other to the halting strategy.
///
/// # Example
/// ```rust
/// use std::collections::BTreeMap;
/// use rustymlp::metric::{PerformanceHistory, VALIDATION_SET_PERCENT_WRONG};
/// use rustymlp::traits::PerformanceListener;
///
/// let history = PerformanceHistory::new();
/// let mut listener = history.clone();
///
/// let mut event = BTreeMap::new();
/// event.insert(VALIDATION_SET_PERCENT_WRONG.to_string(), 0.25);
/// listener.performance_event(&event);
///
/// assert_eq!(history.series(VALIDATION_SET_PERCENT_WRONG), vec![0.25]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PerformanceHistory {
    events: Arc<Mutex<Vec<BTreeMap<String, f64>>>>,
}

impl PerformanceHistory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<BTreeMap<String, f64>>> {
        // A poisoned lock still holds every event recorded before the panic
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// A copy of every recorded event, oldest first.
    pub fn events(&self) -> Vec<BTreeMap<String, f64>> {
        self.lock().clone()
    }

    /// The values recorded under `key`, oldest first. Events without the key are skipped.
    pub fn series(&self, key: &str) -> Vec<f64> {
        self.lock()
            .iter()
            .filter_map(|event| event.get(key).copied())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl PerformanceListener for PerformanceHistory {
    fn performance_event(&mut self, metrics: &BTreeMap<String, f64>) {
        self.lock().push(metrics.clone());
    }
}
