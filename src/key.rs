//! Composite keys

pub mod composite;

pub mod range;
