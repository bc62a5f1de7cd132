use log::{debug, info, warn};

use election_engine::builder::Builder;
use snafu::{prelude::*, Snafu};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use std::fs;

use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;

pub mod bootstrap;
pub mod loaders;
pub mod report;

// How many of the scripted votes go through the confirmation observer.
const CONFIRMED_VOTES: usize = 5;

#[derive(Debug, Snafu)]
pub enum SimError {
    #[snafu(display("Error writing file {path}"))]
    WritingData {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing csv file {path}"))]
    WritingCsv { source: csv::Error, path: String },
    #[snafu(display("Error opening roster file {path}"))]
    OpeningRoster { source: csv::Error, path: String },
    #[snafu(display("Error reading roster line {lineno}"))]
    RosterLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Roster line {lineno} has no voter id column"))]
    RosterLineTooShort { lineno: usize },
    #[snafu(display("Error opening summary file {path}"))]
    OpeningSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error handling summary JSON"))]
    ParsingSummary { source: serde_json::Error },
    #[snafu(display("Error writing summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The simulated summary differs from the reference summary"))]
    SummaryMismatch {},
}

pub type SimResult<T> = Result<T, SimError>;

/// Runs one full simulation: bootstrap the input files, load them, cast the
/// scripted votes and report the outcome.
pub fn run_simulation(args: &Args) -> SimResult<()> {
    if args.skip_setup {
        info!("skipping setup, reusing {} and {}", args.voters, args.candidates);
    } else {
        bootstrap::create_initial_data(&args.voters, &args.candidates, args.total_voters)?;
    }

    let roster = loaders::read_voter_roster(&args.voters)?;
    let candidates = loaders::read_candidate_file(&args.candidates);

    let mut election = Builder::new(args.name.as_str())
        .voters(&roster)
        .candidates(&candidates)
        .voting_period("Oct 12", "Oct 14")
        .build();

    let ballots = vote_plan(&candidates, &roster, args.seed);
    info!("casting {} scripted votes", ballots.len());
    let mut rejected: u64 = 0;
    for (idx, (voter_id, candidate_name)) in ballots.iter().enumerate() {
        let res = if idx < CONFIRMED_VOTES {
            election.cast_vote_observed(voter_id, candidate_name, |v, c| {
                println!("CONFIRMED: vote for {} successfully logged by {}.", c, v)
            })
        } else {
            election.cast_vote(voter_id, candidate_name)
        };
        if let Err(reason) = res {
            debug!("scripted ballot {} was rejected: {}", idx, reason);
            rejected += 1;
        }
    }
    if rejected > 0 {
        warn!("{} of the scripted votes were rejected", rejected);
    }

    let summary = election.results();
    report::print_report(&election, &summary);

    let summary_js = report::build_summary_js(&election, &summary);
    let pretty_js_stats =
        serde_json::to_string_pretty(&summary_js).context(ParsingSummarySnafu {})?;
    match args.out.as_deref() {
        Some("stdout") => {
            println!("{}", pretty_js_stats);
        }
        Some(path) => {
            fs::write(path, &pretty_js_stats).context(WritingSummarySnafu { path })?;
            info!("summary written to {}", path);
        }
        None => {}
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &args.reference {
        check_against_reference(&pretty_js_stats, reference_path)?;
    }

    Ok(())
}

/// Builds the scripted (voter, candidate) pairs for one run.
///
/// Roughly 90% of the roster votes, in roster order. The votes are split
/// across the candidates with linearly decreasing weights and the resulting
/// list is shuffled, so a 3-candidate, 500-voter run is the familiar
/// 200/150/100 split in a random casting order.
fn vote_plan(
    candidates: &[String],
    roster: &[String],
    seed: Option<u64>,
) -> Vec<(String, String)> {
    if candidates.is_empty() || roster.is_empty() {
        return Vec::new();
    }
    let num_votes = (roster.len() * 9) / 10;
    let n = candidates.len() as u64;
    // Candidate at position i gets weight n + 1 - i.
    let weight_total: u64 = (2..=n + 1).sum();
    let mut targets: Vec<u64> = (0..n)
        .map(|i| (num_votes as u64) * (n + 1 - i) / weight_total)
        .collect();
    // Hand the rounding remainder to the front-runners.
    let mut shortfall = num_votes as u64 - targets.iter().sum::<u64>();
    for t in targets.iter_mut() {
        if shortfall == 0 {
            break;
        }
        *t += 1;
        shortfall -= 1;
    }
    debug!("vote_plan: targets {:?}", targets);

    let mut vote_list: Vec<&String> = Vec::with_capacity(num_votes);
    for (cname, target) in candidates.iter().zip(targets.iter()) {
        for _ in 0..*target {
            vote_list.push(cname);
        }
    }
    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    vote_list.shuffle(&mut rng);

    roster
        .iter()
        .zip(vote_list.iter())
        .map(|(v, c)| (v.clone(), (*c).clone()))
        .collect()
}

fn check_against_reference(pretty_js_stats: &str, reference_path: &str) -> SimResult<()> {
    let contents = fs::read_to_string(reference_path).context(OpeningSummarySnafu {
        path: reference_path.to_string(),
    })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingSummarySnafu {})?;
    let pretty_js_ref = serde_json::to_string_pretty(&js).context(ParsingSummarySnafu {})?;
    if pretty_js_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_ref.as_str(), pretty_js_stats, "\n");
        return SummaryMismatchSnafu {}.fail();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn temp_file(name: &str) -> String {
        let dir: PathBuf = std::env::temp_dir().join(format!("electsim-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name).to_str().unwrap().to_string()
    }

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bootstrap_and_loaders_round_trip() {
        let voters_path = temp_file("round_trip_voters.csv");
        let candidates_path = temp_file("round_trip_candidates.txt");
        bootstrap::create_initial_data(&voters_path, &candidates_path, 12).unwrap();

        let roster = loaders::read_voter_roster(&voters_path).unwrap();
        assert_eq!(roster.len(), 12);
        assert_eq!(roster[0], "VOTER001");
        assert_eq!(roster[11], "VOTER012");

        let candidates = loaders::read_candidate_file(&candidates_path);
        assert_eq!(
            candidates,
            strings(&["Alice Kumar", "Bob Singh", "Charlie Patel"])
        );
    }

    #[test]
    fn missing_candidate_file_is_an_empty_ballot() {
        let path = temp_file("no_such_candidates.txt");
        assert_eq!(loaders::read_candidate_file(&path), Vec::<String>::new());
    }

    #[test]
    fn candidate_loader_skips_blank_lines() {
        let path = temp_file("gappy_candidates.txt");
        fs::write(&path, "Anna\n\n  \nBob\n").unwrap();
        assert_eq!(loaders::read_candidate_file(&path), strings(&["Anna", "Bob"]));
    }

    #[test]
    fn missing_roster_file_is_fatal() {
        let path = temp_file("no_such_voters.csv");
        assert!(loaders::read_voter_roster(&path).is_err());
    }

    #[test]
    fn vote_plan_matches_the_fixed_distribution() {
        let roster: Vec<String> = (1..=500).map(|i| format!("VOTER{:03}", i)).collect();
        let candidates = strings(&["Alice Kumar", "Bob Singh", "Charlie Patel"]);
        let ballots = vote_plan(&candidates, &roster, Some(7));
        assert_eq!(ballots.len(), 450);

        let mut per_candidate: HashMap<&str, u64> = HashMap::new();
        for (_, cname) in ballots.iter() {
            *per_candidate.entry(cname.as_str()).or_insert(0) += 1;
        }
        assert_eq!(per_candidate["Alice Kumar"], 200);
        assert_eq!(per_candidate["Bob Singh"], 150);
        assert_eq!(per_candidate["Charlie Patel"], 100);

        // Voters are distinct, so every scripted ballot is accepted.
        let mut voters: Vec<&str> = ballots.iter().map(|(v, _)| v.as_str()).collect();
        voters.dedup();
        assert_eq!(voters.len(), 450);
    }

    #[test]
    fn vote_plan_is_reproducible_with_a_seed() {
        let roster: Vec<String> = (1..=50).map(|i| format!("V{}", i)).collect();
        let candidates = strings(&["A", "B"]);
        let a = vote_plan(&candidates, &roster, Some(42));
        let b = vote_plan(&candidates, &roster, Some(42));
        assert_eq!(a, b);
    }

    #[test]
    fn vote_plan_without_candidates_is_empty() {
        let roster = strings(&["V1", "V2"]);
        assert!(vote_plan(&[], &roster, Some(1)).is_empty());
    }

    #[test]
    fn simulation_runs_end_to_end() {
        let args = Args {
            voters: temp_file("e2e_voters.csv"),
            candidates: temp_file("e2e_candidates.txt"),
            name: "End to end".to_string(),
            total_voters: 40,
            skip_setup: false,
            seed: Some(3),
            out: Some(temp_file("e2e_summary.json")),
            reference: None,
            verbose: false,
        };
        run_simulation(&args).unwrap();

        let summary: JSValue =
            serde_json::from_str(&fs::read_to_string(args.out.unwrap()).unwrap()).unwrap();
        assert_eq!(summary["config"]["votesCast"], 36);
        assert_eq!(summary["abstentions"], 4);
        assert_eq!(summary["results"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn reference_check_accepts_a_matching_summary() {
        let path = temp_file("matching_reference.json");
        fs::write(&path, "{\"abstentions\": 4}").unwrap();
        check_against_reference("{\n  \"abstentions\": 4\n}", &path).unwrap();
    }

    #[test]
    fn reference_check_rejects_a_differing_summary() {
        let path = temp_file("differing_reference.json");
        fs::write(&path, "{\"abstentions\": 5}").unwrap();
        let res = check_against_reference("{\n  \"abstentions\": 4\n}", &path);
        assert!(matches!(res, Err(SimError::SummaryMismatch {})));
    }
}
