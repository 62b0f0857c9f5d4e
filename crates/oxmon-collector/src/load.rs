use crate::{Collector, Sample};
use anyhow::Result;
use sysinfo::System;

#[derive(Debug, Default)]
pub struct LoadCollector;

impl LoadCollector {
    pub fn new() -> Self {
        Self
    }
}

impl Collector for LoadCollector {
    fn name(&self) -> &str {
        "load"
    }

    fn collect(&mut self) -> Result<Vec<Sample>> {
        let load_avg = System::load_average();

        Ok(vec![
            Sample::new("load1", load_avg.one, ""),
            Sample::new("load5", load_avg.five, ""),
            Sample::new("load15", load_avg.fifteen, ""),
            Sample::new("uptime", System::uptime() as f64, "s"),
        ])
    }
}
