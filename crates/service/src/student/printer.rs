//! Two-thread print demonstration over a snapshot of students.
//!
//! Students 0 and 1 are written on the calling thread. Thread `printer-a`
//! sleeps for the configured delay and writes 2 and 3, thread `printer-b`
//! writes 4 and 5 straight away. In synchronized mode every write holds the
//! shared print lock.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::info;

use models::student;

use crate::errors::ServiceError;

/// Minimum number of students the demo needs.
pub const REQUIRED_STUDENTS: usize = 6;

/// Destination for printed lines.
pub trait LineSink: Send + Sync {
    fn write_line(&self, line: &str);
}

/// Default sink: one `info!` event per line, tagged with the writing thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LineSink for TracingSink {
    fn write_line(&self, line: &str) {
        let current = thread::current();
        info!(thread = current.name().unwrap_or("unnamed"), "{}", line);
    }
}

/// Keeps every line in write order; used by tests.
#[derive(Debug, Default)]
pub struct CollectingSink {
    lines: Mutex<Vec<String>>,
}

impl CollectingSink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl LineSink for CollectingSink {
    fn write_line(&self, line: &str) {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).push(line.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    Parallel,
    Synchronized,
}

/// Handles of the spawned printer threads. Dropping it detaches them.
#[derive(Debug)]
pub struct PrintJob {
    handles: Vec<JoinHandle<()>>,
}

impl PrintJob {
    /// Wait for both printer threads.
    pub fn join(self) -> Result<(), ServiceError> {
        for h in self.handles {
            h.join().map_err(|_| ServiceError::Internal("printer thread panicked".into()))?;
        }
        Ok(())
    }
}

#[derive(Clone)]
struct Writer {
    sink: Arc<dyn LineSink>,
    lock: Option<Arc<Mutex<()>>>,
}

impl Writer {
    fn write(&self, s: &student::Model) {
        let line = s.to_string();
        match &self.lock {
            Some(lock) => {
                let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
                self.sink.write_line(&line);
            }
            None => self.sink.write_line(&line),
        }
    }
}

pub(crate) fn spawn_print(
    students: Vec<student::Model>,
    mode: PrintMode,
    sink: Arc<dyn LineSink>,
    lock: Arc<Mutex<()>>,
    delay: Duration,
) -> Result<PrintJob, ServiceError> {
    if students.len() < REQUIRED_STUDENTS {
        return Err(ServiceError::Validation(format!(
            "print demo needs at least {REQUIRED_STUDENTS} students, found {}",
            students.len()
        )));
    }
    let writer = Writer { sink, lock: (mode == PrintMode::Synchronized).then_some(lock) };

    writer.write(&students[0]);
    writer.write(&students[1]);

    let delayed = [students[2].clone(), students[3].clone()];
    let immediate = [students[4].clone(), students[5].clone()];

    let w = writer.clone();
    let a = thread::Builder::new()
        .name("printer-a".into())
        .spawn(move || {
            thread::sleep(delay);
            delayed.iter().for_each(|s| w.write(s));
        })
        .map_err(|e| ServiceError::Internal(format!("spawn printer-a: {e}")))?;

    let w = writer;
    let b = thread::Builder::new()
        .name("printer-b".into())
        .spawn(move || immediate.iter().for_each(|s| w.write(s)))
        .map_err(|e| ServiceError::Internal(format!("spawn printer-b: {e}")))?;

    Ok(PrintJob { handles: vec![a, b] })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn students(n: usize) -> Vec<student::Model> {
        (0..n)
            .map(|i| student::Model { id: i as i64 + 1, name: format!("s{i}"), age: 11, faculty_id: None })
            .collect()
    }

    #[test]
    fn rejects_fewer_than_six() {
        let sink = Arc::new(CollectingSink::default());
        let err = spawn_print(students(5), PrintMode::Parallel, sink.clone(), Arc::default(), Duration::ZERO)
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn each_thread_keeps_its_own_order() {
        let sink = Arc::new(CollectingSink::default());
        let all = students(6);
        let job = spawn_print(all.clone(), PrintMode::Synchronized, sink.clone(), Arc::default(), Duration::from_millis(20))
            .unwrap();
        job.join().unwrap();

        let lines = sink.lines();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[..2], [all[0].to_string(), all[1].to_string()]);
        let pos = |i: usize| lines.iter().position(|l| *l == all[i].to_string()).unwrap();
        assert!(pos(2) < pos(3));
        assert!(pos(4) < pos(5));
    }
}
