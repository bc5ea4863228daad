pub mod disturbance;
pub mod engine;
pub mod modifiers;
