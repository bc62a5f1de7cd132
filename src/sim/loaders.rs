// Primitives for reading the flat input files.

use std::fs;

use csv::ReaderBuilder;
use log::{debug, warn};
use snafu::prelude::*;

use crate::sim::*;

/// Reads the voter roster from a CSV file.
///
/// The first line is the header; the voter id is the first column. The
/// Status column travels with the file but nothing in the simulation keys
/// off it. An unreadable roster is a hard failure: there is no election
/// without eligible voters.
pub fn read_voter_roster(path: &str) -> SimResult<Vec<String>> {
    let rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context(OpeningRosterSnafu { path })?;
    let mut res: Vec<String> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        // Line 1 is the header.
        let lineno = idx + 2;
        let line = line_r.context(RosterLineParseSnafu { lineno })?;
        let voter_id = line.get(0).context(RosterLineTooShortSnafu { lineno })?;
        debug!("read_voter_roster: line {}: {:?}", lineno, voter_id);
        res.push(voter_id.to_string());
    }
    Ok(res)
}

/// Reads the candidate list, one name per line, blank lines ignored.
///
/// An unreadable file is not a failure: the election starts with an empty
/// ballot and the condition is reported as a diagnostic.
pub fn read_candidate_file(path: &str) -> Vec<String> {
    let contents = match fs::read_to_string(path) {
        Result::Ok(c) => c,
        Result::Err(e) => {
            warn!(
                "candidate file {} could not be read ({}), running with an empty ballot",
                path, e
            );
            return Vec::new();
        }
    };
    contents
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}
