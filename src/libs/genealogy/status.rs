/// Simulation stage encoded in a generator status code.
///
/// Both the Pythia 6 convention (3 for every documentation line of the hard
/// process) and the Pythia 8 one (20-29) are recognised as hard-process codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    HardProcess,
    Shower,
    Stable,
    Other,
}

impl Stage {
    pub fn of(status: i32) -> Self {
        match status {
            3 | 20..=29 => Stage::HardProcess,
            2 => Stage::Shower,
            1 => Stage::Stable,
            _ => Stage::Other,
        }
    }
}

/// Status codes of partons entering the hard process
pub fn is_entering_status(status: i32) -> bool {
    status == 3 || status == 21
}
