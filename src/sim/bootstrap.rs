// Writes the dummy input files so that a simulation can run.

use std::fs;

use csv::Writer;
use log::info;
use snafu::prelude::*;

use crate::sim::*;

const DEFAULT_CANDIDATES: [&str; 3] = ["Alice Kumar", "Bob Singh", "Charlie Patel"];

/// Creates the two flat input files: the voter roster (CSV, one header row,
/// one row per voter) and the candidate list (one name per line).
pub fn create_initial_data(
    voters_path: &str,
    candidates_path: &str,
    total_voters: u64,
) -> SimResult<()> {
    write_voter_file(voters_path, total_voters)?;
    write_candidate_file(candidates_path, &DEFAULT_CANDIDATES)?;
    info!(
        "wrote {} voters to {} and {} candidates to {}",
        total_voters,
        voters_path,
        DEFAULT_CANDIDATES.len(),
        candidates_path
    );
    Ok(())
}

fn write_voter_file(path: &str, total_voters: u64) -> SimResult<()> {
    let mut wtr = Writer::from_path(path).context(WritingCsvSnafu { path })?;
    wtr.write_record(["Voter_ID", "Status"])
        .context(WritingCsvSnafu { path })?;
    for i in 1..=total_voters {
        wtr.write_record([format!("VOTER{:03}", i).as_str(), "Registered"])
            .context(WritingCsvSnafu { path })?;
    }
    wtr.flush().context(WritingDataSnafu { path })?;
    Ok(())
}

fn write_candidate_file(path: &str, names: &[&str]) -> SimResult<()> {
    let mut contents = String::new();
    for name in names {
        contents.push_str(name);
        contents.push('\n');
    }
    fs::write(path, contents).context(WritingDataSnafu { path })?;
    Ok(())
}
