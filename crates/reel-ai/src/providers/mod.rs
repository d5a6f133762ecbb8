//! Concrete text-generation providers

pub mod google;
