mod candidates;
pub use candidates::conjunctive_partitions;
pub use candidates::polarity_assignments;
pub use candidates::variable_subsets;

mod consistency;
pub use consistency::goals_conjunction;
pub use consistency::goals_consistency_cnf;
pub use consistency::goals_consistent;

mod observer;
pub use observer::LoggingObserver;
pub use observer::SearchObserver;

mod revision;
pub use revision::revise;

mod synthesizer;
pub use synthesizer::synthesize_announcement;
pub use synthesizer::AnnouncementOutcome;
pub use synthesizer::AnnouncementSynthesizer;
pub use synthesizer::MAX_SEARCH_VARS;
