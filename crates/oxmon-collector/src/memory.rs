use crate::{Collector, Sample};
use anyhow::Result;
use sysinfo::System;

pub struct MemoryCollector {
    system: System,
}

impl MemoryCollector {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }
}

impl Default for MemoryCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn percent(part: u64, total: u64) -> f64 {
    if total > 0 {
        (part as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

impl Collector for MemoryCollector {
    fn name(&self) -> &str {
        "memory"
    }

    fn collect(&mut self) -> Result<Vec<Sample>> {
        self.system.refresh_memory();

        let total = self.system.total_memory();
        let used = self.system.used_memory();
        let available = self.system.available_memory();

        let swap_total = self.system.total_swap();
        let swap_used = self.system.used_swap();

        Ok(vec![
            Sample::new("used", used as f64, "B"),
            Sample::new("available", available as f64, "B"),
            Sample::new("used_percent", percent(used, total), "%"),
            Sample::new("swap_used", swap_used as f64, "B"),
            Sample::new("swap_percent", percent(swap_used, swap_total), "%"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_handles_zero_total() {
        assert_eq!(percent(10, 0), 0.0);
        assert_eq!(percent(25, 100), 25.0);
    }

    #[test]
    fn percentages_stay_in_range() {
        let samples = MemoryCollector::new().collect().unwrap();
        for s in samples.iter().filter(|s| s.uom == "%") {
            assert!((0.0..=100.0).contains(&s.value), "{} = {}", s.name, s.value);
        }
    }
}
