//! CSV elasticity table loader.
//!
//! # CSV format
//!
//! One row per cluster × segment × skim type.  `kg_max` may be left empty
//! or omitted as a column.
//!
//! ```csv
//! cluster,segment,description,skim_type,elasticity0,a,b,min,max,f_min,f_max,kg_max
//! domestic,business,journey time,JRT,-0.8,0.05,-0.1,-2.0,-0.1,0.1,10.0,
//! domestic,business,adaptation time,ADT,-0.3,-0.02,0.0,-1.0,0.0,0.1,10.0,90
//! ```
//!
//! Rows of every segment are returned; [`ElasticityModel::new`] picks the
//! configured one.
//!
//! [`ElasticityModel::new`]: crate::ElasticityModel::new

use std::io::Read;
use std::path::Path;

use crate::{ElasticityEntry, ElasticityError, ElasticityResult};

/// Load all elasticity rows from a CSV file.
pub fn load_elasticities_csv(path: &Path) -> ElasticityResult<Vec<ElasticityEntry>> {
    let file = std::fs::File::open(path)?;
    load_elasticities_reader(file)
}

/// Like [`load_elasticities_csv`] but accepts any `Read` source.
pub fn load_elasticities_reader<R: Read>(reader: R) -> ElasticityResult<Vec<ElasticityEntry>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    for (i, result) in csv_reader.deserialize::<ElasticityEntry>().enumerate() {
        let entry = result.map_err(|e| ElasticityError::Parse(e.to_string()))?;
        entry
            .validate()
            .map_err(|msg| ElasticityError::Parse(format!("row {}: {msg}", i + 1)))?;
        entries.push(entry);
    }

    Ok(entries)
}
