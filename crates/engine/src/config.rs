use serde::{Deserialize, Serialize};

/// Tunables for the TETR.IO season 1 damage formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TetrioS1Options {
    pub garbage_multiplier: u8,
    pub b2b_chaining: bool,
}

impl Default for TetrioS1Options {
    fn default() -> Self {
        Self {
            garbage_multiplier: 1,
            b2b_chaining: true,
        }
    }
}

impl TetrioS1Options {
    /// Flat +1 back-to-back bonus.
    pub fn classic() -> Self {
        Self {
            b2b_chaining: false,
            ..Self::default()
        }
    }
}

/// Scoring rules selectable from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ModeKind {
    TetrioS1 {
        #[serde(default)]
        options: TetrioS1Options,
    },
    Botris,
}

impl Default for ModeKind {
    fn default() -> Self {
        ModeKind::TetrioS1 {
            options: TetrioS1Options::default(),
        }
    }
}
