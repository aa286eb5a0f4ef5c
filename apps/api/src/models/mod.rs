pub mod candidate_scores;
