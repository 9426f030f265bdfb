//! Faculty records: repository abstraction and service.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::FacultyService;
