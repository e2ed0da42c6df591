use crate::board::Move;

/// Progress of one completed iterative-deepening depth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchInfo {
    pub depth: u32,
    /// Root-relative score in centipawns or mate-encoded
    pub score: i32,
    pub nodes: u64,
    pub nps: u64,
    pub hashfull: u32,
    pub time_ms: u64,
    pub pv: Vec<Move>,
}

impl SearchInfo {
    /// PV as space-separated coordinate moves
    #[must_use]
    pub fn pv_string(&self) -> String {
        self.pv
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Receives advisory progress after each completed depth.
pub trait SearchReporter {
    fn report(&mut self, info: &SearchInfo);
}

/// Discards all progress.
pub struct NullReporter;

impl SearchReporter for NullReporter {
    fn report(&mut self, _info: &SearchInfo) {}
}

impl SearchReporter for Vec<SearchInfo> {
    fn report(&mut self, info: &SearchInfo) {
        self.push(info.clone());
    }
}
