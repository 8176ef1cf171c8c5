// Candidate analysis screen: search a position, compare the first two
// candidates, render the comparison.

pub mod handlers;
pub mod search;
