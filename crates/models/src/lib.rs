pub mod errors;
pub mod db;
pub mod faculty;
pub mod student;

#[cfg(test)]
mod tests;
