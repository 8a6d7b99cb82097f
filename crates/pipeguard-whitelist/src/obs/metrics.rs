//! Minimal metrics registry for the decision service.
//!
//! Counters with dynamic labels backed by `DashMap`. Labels are flattened into
//! sorted key vectors to keep deterministic ordering. Policies themselves stay
//! stateless; only the service layer records decisions here.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let key = label_key(labels);
        let counter = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for an exact label set (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format. Series are sorted.
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        let mut rows: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| {
                let label_str = r
                    .key()
                    .iter()
                    .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                    .collect::<Vec<_>>()
                    .join(",");
                (label_str, r.value().load(Ordering::Relaxed))
            })
            .collect();
        rows.sort();
        for (label_str, val) in rows {
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str, val);
        }
    }
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

#[derive(Default)]
pub struct GuardMetrics {
    /// Labels: kind, outcome (permitted | denied | error).
    pub decisions: CounterVec,
    /// Requests naming a runtime type the type model could not resolve.
    pub unresolved: CounterVec,
}

impl GuardMetrics {
    /// Render all registered metrics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.decisions.render("pipeguard_decisions_total", &mut out);
        self.unresolved.render("pipeguard_unresolved_total", &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_order_does_not_split_series() {
        let c = CounterVec::default();
        c.inc(&[("kind", "method"), ("outcome", "denied")]);
        c.inc(&[("outcome", "denied"), ("kind", "method")]);
        assert_eq!(c.get(&[("kind", "method"), ("outcome", "denied")]), 2);
    }

    #[test]
    fn render_is_prometheus_text() {
        let m = GuardMetrics::default();
        m.decisions.inc(&[("kind", "new"), ("outcome", "permitted")]);
        let out = m.render();
        assert!(out.contains("# TYPE pipeguard_decisions_total counter"));
        assert!(out.contains("pipeguard_decisions_total{kind=\"new\",outcome=\"permitted\"} 1"));
    }
}
