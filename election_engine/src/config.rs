// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

use chrono::NaiveDate;

/// A registered candidate and the running count of votes in their favour.
///
/// Candidates are created when the election is constructed and are never
/// removed afterwards. The count only moves through [Candidate::add_vote].
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Candidate {
    name: String,
    vote_count: u64,
}

impl Candidate {
    pub fn new(name: &str) -> Candidate {
        Candidate {
            name: name.to_string(),
            vote_count: 0,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Records one vote for this candidate. Always succeeds.
    pub fn add_vote(&mut self) {
        self.vote_count += 1;
    }

    pub fn vote_count(&self) -> u64 {
        self.vote_count
    }
}

// ******** Output data structures *********

/// One row of the final tally: votes and share of all the votes cast.
#[derive(PartialEq, Debug, Clone)]
pub struct CandidateStanding {
    pub name: String,
    pub votes: u64,
    /// Percentage of the votes cast, in [0, 100]. Zero when no vote was cast.
    pub percentage: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct Winner {
    pub name: String,
    pub percentage: f64,
}

/// The outcome of an election at the time it was requested.
///
/// Standings are ordered by decreasing vote count; candidates with the same
/// count are ordered by name. The winner is the first standing, or `None`
/// when the election has no candidates at all.
#[derive(PartialEq, Debug, Clone)]
pub struct ElectionSummary {
    pub standings: Vec<CandidateStanding>,
    pub winner: Option<Winner>,
    /// Percentage of eligible voters who cast a vote, in [0, 100].
    pub turnout: f64,
    /// Eligible voters who did not vote.
    pub abstentions: u64,
}

/// The nominal voting window. Display-only: casting a vote is allowed
/// whether or not a period is set.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct VotingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// The reasons a vote can be turned away.
///
/// A rejection is a normal outcome of casting, not a failure of the engine.
/// The variants are ordered the way the checks run.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum VoteRejection {
    /// The voter id is not present in the roster.
    NotEligible,
    /// The voter id has already cast a vote in this election.
    AlreadyVoted,
    /// The candidate name is not on the ballot.
    NotRunning,
}

impl Error for VoteRejection {}

impl Display for VoteRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteRejection::NotEligible => write!(f, "voter is not eligible"),
            VoteRejection::AlreadyVoted => write!(f, "voter has already cast a vote"),
            VoteRejection::NotRunning => write!(f, "candidate is not running"),
        }
    }
}
