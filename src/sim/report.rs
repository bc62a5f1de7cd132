// Console rendering and JSON summary for a finished run.

use election_engine::{Election, ElectionSummary, VotingPeriod};

use serde::Serialize;
use serde_json::json;
use serde_json::Value as JSValue;

const BAR_WIDTH: u64 = 40;

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
struct SummaryConfig {
    election: String,
    #[serde(rename = "votingPeriod")]
    voting_period: Option<String>,
    #[serde(rename = "eligibleVoters")]
    eligible_voters: u64,
    #[serde(rename = "votesCast")]
    votes_cast: u64,
}

fn format_period(period: VotingPeriod) -> String {
    format!(
        "{} - {}",
        period.start.format("%b %d"),
        period.end.format("%b %d")
    )
}

/// Assembles the machine-readable summary of a run.
///
/// Percentages are rendered as strings with one decimal so that the output
/// is stable under the reference comparison.
pub fn build_summary_js(election: &Election, summary: &ElectionSummary) -> JSValue {
    let c = SummaryConfig {
        election: election.name().to_string(),
        voting_period: election.voting_period().map(format_period),
        eligible_voters: election.total_eligible_voters(),
        votes_cast: election.total_votes_cast(),
    };
    let standings: Vec<JSValue> = summary
        .standings
        .iter()
        .map(|s| {
            json!({
                "candidate": s.name,
                "votes": s.votes,
                "percentage": format!("{:.1}", s.percentage),
            })
        })
        .collect();
    let winner = match &summary.winner {
        Some(w) => json!({
            "name": w.name,
            "percentage": format!("{:.1}", w.percentage),
        }),
        None => json!({
            "name": "N/A",
            "percentage": "0.0",
        }),
    };
    json!({
        "config": c,
        "results": standings,
        "winner": winner,
        "turnout": format!("{:.1}", summary.turnout),
        "abstentions": summary.abstentions,
    })
}

/// Prints the final report: status block, results table, vote charts and the
/// headline metrics.
pub fn print_report(election: &Election, summary: &ElectionSummary) {
    println!();
    println!("--- VOTING STATUS ---");
    println!(
        "Total eligible voters: {}",
        election.total_eligible_voters()
    );
    println!(
        "Votes cast: {} ({:.1}% participation)",
        election.total_votes_cast(),
        summary.turnout
    );
    match election.voting_period() {
        Some(p) => println!("Voting period: {}", format_period(p)),
        None => println!("Voting period: not set"),
    }

    println!();
    println!("--- RESULTS ---");
    print_standings(summary);

    println!();
    println!("--- ELECTION METRICS ---");
    println!("Voter turnout: {:.1}%", summary.turnout);
    match &summary.winner {
        Some(w) => println!(
            "Provisional winner: {} with {:.1}% of votes.",
            w.name, w.percentage
        ),
        None => println!("Provisional winner: N/A (no candidates on the ballot)"),
    }
    println!("Abstentions: {}", summary.abstentions);
}

fn print_standings(summary: &ElectionSummary) {
    if summary.standings.is_empty() {
        println!("(no candidates)");
        return;
    }
    let name_width = summary
        .standings
        .iter()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(0)
        .max("Candidate".len());
    println!(
        "{:<width$}  {:>6}  {:>10}",
        "Candidate",
        "Votes",
        "Percentage",
        width = name_width
    );
    for s in summary.standings.iter() {
        println!(
            "{:<width$}  {:>6}  {:>9.1}%",
            s.name,
            s.votes,
            s.percentage,
            width = name_width
        );
    }

    let max_votes = summary.standings.iter().map(|s| s.votes).max().unwrap_or(0);
    if max_votes == 0 {
        return;
    }
    println!();
    for s in summary.standings.iter() {
        let bar = "#".repeat((s.votes * BAR_WIDTH / max_votes) as usize);
        println!("{:<width$}  {}", s.name, bar, width = name_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use election_engine::Election;

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn summary_js_carries_the_full_outcome() {
        let mut e = Election::new(
            "Unit race",
            &strings(&["V1", "V2", "V3", "V4"]),
            &strings(&["A", "B"]),
        );
        e.set_voting_period("Oct 12", "Oct 14");
        e.cast_vote("V1", "A").unwrap();
        e.cast_vote("V2", "A").unwrap();
        e.cast_vote("V3", "B").unwrap();

        let js = build_summary_js(&e, &e.results());
        assert_eq!(js["config"]["election"], "Unit race");
        assert_eq!(js["config"]["votingPeriod"], "Oct 12 - Oct 14");
        assert_eq!(js["config"]["eligibleVoters"], 4);
        assert_eq!(js["config"]["votesCast"], 3);
        assert_eq!(js["results"][0]["candidate"], "A");
        assert_eq!(js["results"][0]["votes"], 2);
        assert_eq!(js["results"][0]["percentage"], "66.7");
        assert_eq!(js["winner"]["name"], "A");
        assert_eq!(js["turnout"], "75.0");
        assert_eq!(js["abstentions"], 1);
    }

    #[test]
    fn summary_js_uses_the_sentinel_without_candidates() {
        let e = Election::new("Empty race", &strings(&["V1"]), &[]);
        let js = build_summary_js(&e, &e.results());
        assert_eq!(js["results"].as_array().unwrap().len(), 0);
        assert_eq!(js["winner"]["name"], "N/A");
        assert_eq!(js["winner"]["percentage"], "0.0");
        assert_eq!(js["turnout"], "0.0");
    }
}
