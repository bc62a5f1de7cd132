use clap::Parser;

/// This is a single-race election simulator. It generates a dummy voter
/// roster and candidate list, casts a scripted round of votes against the
/// eligibility rules and prints the tally, the turnout and the winner.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The CSV file holding the voter roster, with the columns Voter_ID and Status.
    /// The file is regenerated at startup unless --skip-setup is passed.
    #[clap(long, value_parser, default_value = "voters.csv")]
    pub voters: String,

    /// (file path) The text file holding the candidate list, one name per line.
    #[clap(long, value_parser, default_value = "candidates.txt")]
    pub candidates: String,

    /// The display name of the simulated race.
    #[clap(long, value_parser, default_value = "Student Council President")]
    pub name: String,

    /// The number of voters written into the generated roster.
    #[clap(long, value_parser, default_value_t = 500)]
    pub total_voters: u64,

    /// If passed as an argument, the input files are used as they are on disk instead of
    /// being regenerated.
    #[clap(long, takes_value = false)]
    pub skip_setup: bool,

    /// (integer, optional) Seed for the vote shuffle. Two runs with the same seed and the
    /// same inputs cast the same votes in the same order.
    #[clap(long, value_parser)]
    pub seed: Option<u64>,

    /// (file path, 'stdout' or empty) If specified, the summary of the election will be written
    /// in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the expected summary of the run in JSON format.
    /// If provided, electsim will check that the simulated outcome matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
