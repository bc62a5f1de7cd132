pub use crate::config::*;
use crate::Election;

/// A builder for assembling an election.
///
/// This is a convenience over [Election::new] for callers that gather the
/// roster and the ballot from separate sources.
///
/// ```
/// pub use election_engine::builder::Builder;
///
/// let mut election = Builder::new("Club treasurer")
///     .candidates(&["Anna".to_string(), "Bob".to_string()])
///     .voters(&["V-001".to_string(), "V-002".to_string()])
///     .voting_period("Oct 12", "Oct 14")
///     .build();
///
/// assert_eq!(election.cast_vote("V-001", "Anna"), Ok(()));
/// ```
pub struct Builder {
    pub(crate) _name: String,
    pub(crate) _candidates: Vec<String>,
    pub(crate) _voters: Vec<String>,
    pub(crate) _period_labels: Option<(String, String)>,
}

impl Builder {
    pub fn new(name: &str) -> Builder {
        Builder {
            _name: name.to_string(),
            _candidates: Vec::new(),
            _voters: Vec::new(),
            _period_labels: None,
        }
    }

    pub fn candidates(self, cands: &[String]) -> Builder {
        Builder {
            _candidates: cands.to_vec(),
            ..self
        }
    }

    pub fn voters(self, voter_ids: &[String]) -> Builder {
        Builder {
            _voters: voter_ids.to_vec(),
            ..self
        }
    }

    /// Attaches a nominal voting window from short labels such as "Oct 12".
    ///
    /// The labels go through the same lenient parsing as
    /// [Election::set_voting_period]: a malformed label leaves the period
    /// unset on the built election.
    pub fn voting_period(self, start_label: &str, end_label: &str) -> Builder {
        Builder {
            _period_labels: Some((start_label.to_string(), end_label.to_string())),
            ..self
        }
    }

    pub fn build(self) -> Election {
        let mut election = Election::new(self._name.as_str(), &self._voters, &self._candidates);
        if let Some((start, end)) = self._period_labels {
            election.set_voting_period(start.as_str(), end.as_str());
        }
        election
    }
}
