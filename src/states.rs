use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{Result, SearchError};

const BUNDLED_STATES: &str = include_str!("../data/postal_codes.txt");

/// Reads a single-column state list, one abbreviation per row.
pub fn load_states(path: &Path) -> Result<Vec<String>> {
    let file = std::fs::File::open(path).map_err(|e| SearchError::StateList {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    read_states(file).map_err(|source| SearchError::StateList {
        path: path.to_path_buf(),
        source,
    })
}

/// The US postal codes shipped with the binary.
pub fn bundled_states() -> Vec<String> {
    // The bundled list is plain ASCII, one code per line, so reading it cannot fail.
    read_states(BUNDLED_STATES.as_bytes()).unwrap_or_default()
}

fn read_states<R: Read>(reader: R) -> std::result::Result<Vec<String>, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut states = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if let Some(code) = record.get(0).map(str::trim).filter(|c| !c.is_empty()) {
            states.push(code.to_string());
        }
    }
    Ok(states)
}
