use std::io::Write;

use crate::board::search::score::format_score;
use crate::board::search::{SearchInfo, SearchReporter};

/// Prints one `info` line per completed depth.
pub struct UciReporter<'a, W: Write> {
    out: &'a mut W,
}

impl<'a, W: Write> UciReporter<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        UciReporter { out }
    }
}

/// `info depth D score S nodes N nps R hashfull H time T pv ...`
#[must_use]
pub fn format_info(info: &SearchInfo) -> String {
    format!(
        "info depth {} score {} nodes {} nps {} hashfull {} time {} pv {}",
        info.depth,
        format_score(info.score),
        info.nodes,
        info.nps,
        info.hashfull,
        info.time_ms,
        info.pv_string()
    )
}

impl<W: Write> SearchReporter for UciReporter<'_, W> {
    fn report(&mut self, info: &SearchInfo) {
        // progress is advisory; a closed pipe surfaces on the bestmove write
        let _ = writeln!(self.out, "{}", format_info(info));
        let _ = self.out.flush();
    }
}
