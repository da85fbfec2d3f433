//! CSV loaders for the shared read-only collaborators.
//!
//! Both loaders read the whole file up front; they are meant to run once
//! before any worker starts.  The file handle is dropped on every exit path.
//!
//! # Region table
//!
//! ```csv
//! zone,region
//! 1,CH
//! 2,CH
//! 3,DE
//! ```
//!
//! # Demand matrix
//!
//! One row per OD cell.  Repeated cells accumulate.
//!
//! ```csv
//! from,to,demand
//! 1,2,750
//! 1,3,70
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{EvalError, EvalResult, ODPair, OdMatrix, RegionMap, ZoneId};

#[derive(Deserialize)]
struct RegionRecord {
    zone:   u32,
    region: String,
}

#[derive(Deserialize)]
struct DemandRecord {
    from:   u32,
    to:     u32,
    demand: f64,
}

/// Load a zone → region table from a CSV file.
pub fn load_regions_csv(path: &Path) -> EvalResult<RegionMap> {
    let file = std::fs::File::open(path)?;
    load_regions_reader(file)
}

/// Like [`load_regions_csv`] but accepts any `Read` source.
pub fn load_regions_reader<R: Read>(reader: R) -> EvalResult<RegionMap> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut regions = RegionMap::new();

    for result in csv_reader.deserialize::<RegionRecord>() {
        let row = result.map_err(|e| EvalError::Parse(e.to_string()))?;
        let region = row.region.trim();
        if region.is_empty() {
            return Err(EvalError::Parse(format!("zone {} has an empty region code", row.zone)));
        }
        regions.insert(ZoneId(row.zone), region);
    }

    Ok(regions)
}

/// Load an OD demand matrix from a CSV file.
pub fn load_demand_csv(path: &Path) -> EvalResult<OdMatrix> {
    let file = std::fs::File::open(path)?;
    load_demand_reader(file)
}

/// Like [`load_demand_csv`] but accepts any `Read` source.
pub fn load_demand_reader<R: Read>(reader: R) -> EvalResult<OdMatrix> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut matrix = OdMatrix::new();

    for result in csv_reader.deserialize::<DemandRecord>() {
        let row = result.map_err(|e| EvalError::Parse(e.to_string()))?;
        if !row.demand.is_finite() || row.demand < 0.0 {
            return Err(EvalError::Parse(format!(
                "invalid demand {} for {}->{}: expected a finite value ≥ 0",
                row.demand, row.from, row.to
            )));
        }
        matrix.add(ODPair::new(ZoneId(row.from), ZoneId(row.to)), row.demand);
    }

    Ok(matrix)
}
