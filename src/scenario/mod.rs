pub mod basic;
pub mod random;
pub mod scenario;
pub mod stress;
