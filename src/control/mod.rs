pub mod controller;
pub mod outcome;
