//! Host metric collectors for check plugins.
//!
//! Each [`Collector`] reads one category of local system metrics and returns
//! them as [`Sample`]s, ready to be added to a check run as performance
//! data.

pub mod load;
pub mod memory;

use anyhow::Result;

/// One measured value with its unit of measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: String,
    pub value: f64,
    /// Performance data unit (`B`, `%`, `s`, ...); empty for plain numbers.
    pub uom: &'static str,
}

impl Sample {
    pub fn new(name: impl Into<String>, value: f64, uom: &'static str) -> Self {
        Self {
            name: name.into(),
            value,
            uom,
        }
    }
}

/// A local metric source.
pub trait Collector: Send {
    /// Collector name (e.g. `"load"`), used for selection and logging.
    fn name(&self) -> &str;

    /// Reads current values.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying system API call fails.
    fn collect(&mut self) -> Result<Vec<Sample>>;
}

/// Builds the collector registered under `name`.
pub fn by_name(name: &str) -> Option<Box<dyn Collector>> {
    match name {
        "load" => Some(Box::new(load::LoadCollector::new())),
        "memory" => Some(Box::new(memory::MemoryCollector::new())),
        _ => None,
    }
}

pub const NAMES: [&str; 2] = ["load", "memory"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_collectors_resolve() {
        for name in NAMES {
            let collector = by_name(name).unwrap_or_else(|| panic!("{name} not registered"));
            assert_eq!(collector.name(), name);
        }
        assert!(by_name("cpu").is_none());
    }
}
