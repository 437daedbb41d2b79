use std::{error::Error, fmt};

use lantern_crawl_core::{Direction, Intent};

/// Parses a compact intent script such as `"eess.n"`.
///
/// `n`, `s`, `e` and `w` step in the matching direction and `.` waits.
/// Whitespace is ignored so scripts may be split across lines.
pub(crate) fn parse(script: &str) -> Result<Vec<Intent>, ScriptError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, symbol)| !symbol.is_whitespace())
        .map(|(offset, symbol)| intent_for(symbol).ok_or(ScriptError { symbol, offset }))
        .collect()
}

fn intent_for(symbol: char) -> Option<Intent> {
    match symbol {
        'n' => Some(Intent::Move(Direction::North)),
        's' => Some(Intent::Move(Direction::South)),
        'e' => Some(Intent::Move(Direction::East)),
        'w' => Some(Intent::Move(Direction::West)),
        '.' => Some(Intent::Wait),
        _ => None,
    }
}

/// A script contained a character with no intent.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ScriptError {
    symbol: char,
    offset: usize,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown intent {:?} at offset {} (expected n, s, e, w or .)",
            self.symbol, self.offset
        )
    }
}

impl Error for ScriptError {}
