//! Data models for the person registry.

pub mod person;

pub use person::Person;
