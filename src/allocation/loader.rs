//! Load an asset allocation from CSV
//!
//! Expected header: `asset,weight,expected_return`

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use log::debug;

use super::{AssetAllocation, Holding};
use crate::error::AllocationError;

/// Raw CSV row matching the allocation file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    asset: String,
    weight: f64,
    expected_return: f64,
}

impl CsvRow {
    fn into_holding(self) -> Holding {
        Holding::new(self.asset, self.weight, self.expected_return)
    }
}

/// Load and validate an allocation from a CSV file
pub fn load_allocation<P: AsRef<Path>>(path: P) -> Result<AssetAllocation, AllocationError> {
    let file = std::fs::File::open(path.as_ref())?;
    debug!("Loading allocation from {}", path.as_ref().display());
    load_allocation_from_reader(file)
}

/// Load and validate an allocation from any reader (e.g., string buffer)
pub fn load_allocation_from_reader<R: Read>(reader: R) -> Result<AssetAllocation, AllocationError> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut holdings = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        holdings.push(row.into_holding());
    }

    let allocation = AssetAllocation::new(holdings);
    allocation.validate()?;
    Ok(allocation)
}
