//! Student records: repository abstraction, service and the print demonstration.

pub mod domain;
pub mod printer;
pub mod repository;
pub mod service;

pub use service::StudentService;
