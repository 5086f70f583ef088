//! Walk/run mode shared by the controller and the motion engine.

/// How fast a creature moves along whatever motion it was given.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveMode {
    /// Creatures spawn in walk mode.
    #[default]
    Walk,
    Run,
}

impl MoveMode {
    #[inline]
    pub fn from_run(run: bool) -> Self {
        if run { MoveMode::Run } else { MoveMode::Walk }
    }

    #[inline]
    pub fn is_run(self) -> bool {
        matches!(self, MoveMode::Run)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MoveMode::Walk => "walk",
            MoveMode::Run  => "run",
        }
    }
}

impl std::fmt::Display for MoveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
