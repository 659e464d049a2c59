pub mod air;
pub mod health;
