//! Service layer for the school records backend.
//! - Repository traits abstract persistence (SeaORM in production, in-memory in tests).
//! - `StudentService` / `FacultyService` hold the business operations.
//! - Errors are typed with `ServiceError`; HTTP mapping lives in the server crate.

pub mod errors;
pub mod faculty;
pub mod student;
pub mod mock;
#[cfg(test)]
pub mod test_support;
