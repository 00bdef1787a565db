pub mod calculators;
pub mod catalog;
pub mod health;
