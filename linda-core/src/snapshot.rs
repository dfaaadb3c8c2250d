//! Point-in-time view of a space for diagnostics

use linda_types::{Template, Tuple};
use serde::Serialize;
use std::fmt::{self, Write};

/// One pending queue: a template and the number of callbacks waiting on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingQueue {
    pub template: Template,
    pub waiting: usize,
}

/// Everything `debug` reports, captured under the engine lock
#[derive(Debug, Clone, Serialize)]
pub struct SpaceSnapshot {
    pub name: String,
    /// Resident tuples in store order
    pub tuples: Vec<Tuple>,
    pub pending_reads: Vec<PendingQueue>,
    pub pending_takes: Vec<PendingQueue>,
    /// Threads currently inside a blocking `read`
    pub parked_reads: usize,
    /// Threads currently inside a blocking `take`
    pub parked_takes: usize,
}

impl SpaceSnapshot {
    pub fn size(&self) -> usize {
        self.tuples.len()
    }

    /// Threads blocked in either `read` or `take`
    pub fn active_processes(&self) -> usize {
        self.parked_reads + self.parked_takes
    }

    /// Render the report with every line prefixed by `label`
    pub fn render(&self, label: &str) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_report(&mut out, label);
        out
    }

    fn write_report(&self, out: &mut impl Write, label: &str) -> fmt::Result {
        writeln!(out, "{} TupleSpace:", label)?;
        for tuple in &self.tuples {
            writeln!(out, "{}   {}", label, tuple)?;
        }
        writeln!(out, "{} PendingReads:", label)?;
        for queue in &self.pending_reads {
            writeln!(out, "{}   {} ({})", label, queue.template, queue.waiting)?;
        }
        writeln!(out, "{} PendingTakes:", label)?;
        for queue in &self.pending_takes {
            writeln!(out, "{}   {} ({})", label, queue.template, queue.waiting)?;
        }
        writeln!(out, "{} TupleSpace size: {}", label, self.size())?;
        writeln!(
            out,
            "{} Blocked processes: {} ({} reads, {} takes)",
            label,
            self.active_processes(),
            self.parked_reads,
            self.parked_takes
        )
    }
}

impl fmt::Display for SpaceSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_report(f, &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linda_types::{Field, FieldType, Value};

    #[test]
    fn test_render_lists_everything() {
        let snapshot = SpaceSnapshot {
            name: "space".to_string(),
            tuples: vec![Tuple::new(vec![Value::from(2)])],
            pending_reads: vec![],
            pending_takes: vec![PendingQueue {
                template: Template::new(vec![Field::wildcard(FieldType::String)]),
                waiting: 2,
            }],
            parked_reads: 0,
            parked_takes: 2,
        };

        let report = snapshot.render("[t]");
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[t] TupleSpace:",
                "[t]   [ 2 ]",
                "[t] PendingReads:",
                "[t] PendingTakes:",
                "[t]   [ ?String ] (2)",
                "[t] TupleSpace size: 1",
                "[t] Blocked processes: 2 (0 reads, 2 takes)",
            ]
        );
        assert!(snapshot.to_string().starts_with("space TupleSpace:"));
    }
}
