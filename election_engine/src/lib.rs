pub mod builder;
mod config;

use log::{debug, info, warn};

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

pub use crate::config::*;

// The labels carry a month and a day but no year ("Oct 12"). Parsing pins
// them to a fixed year so that chrono accepts them.
const PERIOD_LABEL_FORMAT: &str = "%b %d %Y";
const PERIOD_LABEL_YEAR: &str = "1900";

fn parse_period_label(label: &str) -> Option<NaiveDate> {
    let padded = format!("{} {}", label, PERIOD_LABEL_YEAR);
    NaiveDate::parse_from_str(padded.as_str(), PERIOD_LABEL_FORMAT).ok()
}

/// A single-race election: the roster of eligible voters, the candidates,
/// and the record of who voted so far.
///
/// The election owns all of its state. Votes enter through [Election::cast_vote]
/// only, which maintains the invariant that the total number of votes cast
/// equals both the number of distinct voters who voted and the sum of the
/// candidate counts.
///
/// The election never closes: the voting period is informational and is not
/// checked when a vote is cast.
#[derive(Debug, Clone)]
pub struct Election {
    name: String,
    voting_period: Option<VotingPeriod>,
    candidates: HashMap<String, Candidate>,
    eligible_voters: HashSet<String>,
    voted_voters: HashSet<String>,
    total_votes_cast: u64,
}

impl Election {
    /// Creates an election from an already-loaded roster and candidate list.
    ///
    /// Duplicate voter ids or candidate names in the inputs collapse to a
    /// single entry. An empty candidate list is accepted: the election then
    /// rejects every vote and reports no winner.
    pub fn new(name: &str, voter_ids: &[String], candidate_names: &[String]) -> Election {
        let eligible_voters: HashSet<String> = voter_ids.iter().cloned().collect();
        let mut candidates: HashMap<String, Candidate> = HashMap::new();
        for cname in candidate_names {
            candidates
                .entry(cname.clone())
                .or_insert_with(|| Candidate::new(cname));
        }
        info!(
            "election {:?}: {} eligible voters, {} candidates",
            name,
            eligible_voters.len(),
            candidates.len()
        );
        Election {
            name: name.to_string(),
            voting_period: None,
            candidates,
            eligible_voters,
            voted_voters: HashSet::new(),
            total_votes_cast: 0,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn voting_period(&self) -> Option<VotingPeriod> {
        self.voting_period
    }

    pub fn total_eligible_voters(&self) -> u64 {
        self.eligible_voters.len() as u64
    }

    pub fn total_votes_cast(&self) -> u64 {
        self.total_votes_cast
    }

    /// Sets the nominal voting window from two labels such as "Oct 12".
    ///
    /// A label that does not parse leaves the period unset: the failure is
    /// reported as a diagnostic and does not affect any other state. The
    /// period is display-only and never gates [Election::cast_vote].
    pub fn set_voting_period(&mut self, start_label: &str, end_label: &str) {
        match (parse_period_label(start_label), parse_period_label(end_label)) {
            (Some(start), Some(end)) => {
                self.voting_period = Some(VotingPeriod { start, end });
            }
            _ => {
                warn!(
                    "could not understand voting period {:?} - {:?}, expected labels like \"Oct 12\"",
                    start_label, end_label
                );
            }
        }
    }

    /// Attempts to record one vote.
    ///
    /// The checks run in a fixed order and the first failing one wins:
    /// eligibility, then double voting, then candidate existence. A rejected
    /// vote leaves the election untouched.
    pub fn cast_vote(
        &mut self,
        voter_id: &str,
        candidate_name: &str,
    ) -> Result<(), VoteRejection> {
        if !self.eligible_voters.contains(voter_id) {
            info!("vote rejected: voter id {} is not eligible", voter_id);
            return Err(VoteRejection::NotEligible);
        }
        if self.voted_voters.contains(voter_id) {
            info!("vote rejected: voter id {} has already cast a vote", voter_id);
            return Err(VoteRejection::AlreadyVoted);
        }
        let candidate = match self.candidates.get_mut(candidate_name) {
            Some(c) => c,
            None => {
                info!("vote rejected: candidate {:?} is not running", candidate_name);
                return Err(VoteRejection::NotRunning);
            }
        };
        candidate.add_vote();
        self.voted_voters.insert(voter_id.to_string());
        self.total_votes_cast += 1;
        debug!("vote recorded: {} -> {}", voter_id, candidate_name);
        Ok(())
    }

    /// Same as [Election::cast_vote], with a confirmation callback that runs
    /// only when the vote was accepted.
    ///
    /// The callback receives the voter id and the candidate name. It is the
    /// caller's hook for confirmation output; the engine itself prints
    /// nothing.
    pub fn cast_vote_observed<F>(
        &mut self,
        voter_id: &str,
        candidate_name: &str,
        on_accept: F,
    ) -> Result<(), VoteRejection>
    where
        F: FnOnce(&str, &str),
    {
        let res = self.cast_vote(voter_id, candidate_name);
        if res.is_ok() {
            on_accept(voter_id, candidate_name);
        }
        res
    }

    /// Percentage of eligible voters who cast a vote, or zero for an empty
    /// roster.
    pub fn turnout(&self) -> f64 {
        if self.eligible_voters.is_empty() {
            return 0.0;
        }
        (self.total_votes_cast as f64 / self.eligible_voters.len() as f64) * 100.0
    }

    /// Tallies the election as it currently stands.
    ///
    /// Standings are sorted by decreasing vote count; equal counts are
    /// ordered by candidate name so that the outcome does not depend on map
    /// iteration order. With no candidates the standings are empty and there
    /// is no winner.
    pub fn results(&self) -> ElectionSummary {
        let mut standings: Vec<CandidateStanding> = self
            .candidates
            .values()
            .map(|c| {
                let percentage = if self.total_votes_cast > 0 {
                    (c.vote_count() as f64 / self.total_votes_cast as f64) * 100.0
                } else {
                    0.0
                };
                CandidateStanding {
                    name: c.name().to_string(),
                    votes: c.vote_count(),
                    percentage,
                }
            })
            .collect();
        standings.sort_by(|a, b| b.votes.cmp(&a.votes).then_with(|| a.name.cmp(&b.name)));

        let winner = standings.first().map(|s| Winner {
            name: s.name.clone(),
            percentage: s.percentage,
        });

        ElectionSummary {
            standings,
            winner,
            turnout: self.turnout(),
            abstentions: self.total_eligible_voters() - self.total_votes_cast,
        }
    }
}
