use super::constants::{MAX_SEARCH_DEPTH, NULL_MOVE_MIN_DEPTH, NULL_MOVE_REDUCTION};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchParams {
    pub null_reduction: u32,
    /// Null move is tried only above this remaining depth
    pub null_min_depth: u32,
    /// Earlier occurrences of a position that make a non-root node a draw
    pub repetition_threshold: usize,
    pub max_depth: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            null_reduction: NULL_MOVE_REDUCTION,
            null_min_depth: NULL_MOVE_MIN_DEPTH,
            repetition_threshold: 1,
            max_depth: MAX_SEARCH_DEPTH,
        }
    }
}
