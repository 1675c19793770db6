//! Memory and storage size extraction.
//!
//! Examples:
//!   "64GB unified memory", "128 GB RAM"  -> memory
//!   "2TB SSD", "1.5 TB SSD", "512GB SSD" -> storage (GB, 1 TB = 1024 GB)

use anyhow::Result;
use regex::Regex;

const GB_PER_TB: f64 = 1024.0;

pub struct SizeParser {
    memory_re: Regex,
    ram_re: Regex,
    storage_tb_re: Regex,
    storage_gb_re: Regex,
}

impl SizeParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            memory_re: Regex::new(r"(?i)\b(?P<gb>\d{2,4})\s*GB\s*(?:unified\s*)?memory")?,
            ram_re: Regex::new(r"(?i)\b(?P<gb>\d{2,4})\s*GB\s*RAM")?,
            storage_tb_re: Regex::new(r"(?i)\b(?P<tb>\d+(?:\.\d+)?)\s*TB\s*SSD")?,
            storage_gb_re: Regex::new(r"(?i)\b(?P<gb>\d{3,5})\s*GB\s*SSD")?,
        })
    }

    pub fn memory_gb(&self, text: &str) -> Option<u32> {
        let caps = self
            .memory_re
            .captures(text)
            .or_else(|| self.ram_re.captures(text))?;
        caps["gb"].parse().ok()
    }

    pub fn storage_gb(&self, text: &str) -> Option<u32> {
        if let Some(caps) = self.storage_tb_re.captures(text) {
            let tb: f64 = caps["tb"].parse().ok()?;
            let gb = (tb * GB_PER_TB).trunc();
            if !gb.is_finite() || gb > f64::from(u32::MAX) {
                return None;
            }
            return Some(gb as u32);
        }

        let caps = self.storage_gb_re.captures(text)?;
        caps["gb"].parse().ok()
    }
}
