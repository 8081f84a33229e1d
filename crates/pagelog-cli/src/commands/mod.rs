//! Command handlers

pub mod config;
pub mod heatmap;
pub mod session;
pub mod stats;
pub mod status;
pub mod transfer;

use anyhow::{bail, Result};
use pagelog_core::StorageError;

/// Parse a `YYYY-MM` month argument.
pub(crate) fn parse_month(s: &str) -> Result<(i32, u32)> {
    let parts: Vec<&str> = s.splitn(2, '-').collect();
    if parts.len() == 2 {
        if let (Ok(year), Ok(month)) = (parts[0].parse::<i32>(), parts[1].parse::<u32>()) {
            if (1..=12).contains(&month) {
                return Ok((year, month));
            }
        }
    }
    bail!("Invalid month '{}'. Expected YYYY-MM, e.g. 2024-03.", s);
}

/// Attach the recovery hint to a storage failure before it reaches
/// the user. Capacity-exceeded in particular must point at the
/// export-before-clear flow.
pub(crate) fn storage_err(e: StorageError) -> anyhow::Error {
    match e.recovery_suggestion() {
        Some(hint) => anyhow::anyhow!("{}\n  hint: {}", e, hint),
        None => anyhow::Error::new(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-03").unwrap(), (2024, 3));
        assert_eq!(parse_month("1999-12").unwrap(), (1999, 12));
        assert!(parse_month("2024").is_err());
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("march").is_err());
    }
}
