pub mod db;
pub mod employee;
pub mod errors;
pub mod store;
pub mod supplier;
