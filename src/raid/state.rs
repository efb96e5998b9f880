//! RAID state normalization.
//! Maps the labels reported in an array's `state` list onto the fixed set of
//! 14 canonical states, one 0/1 flag each.

use std::fmt;
use std::str::FromStr;

use crate::error::UnrecognizedState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RaidState {
    Online,
    Initialized,
    Initing,
    Degraded,
    Reconstructing,
    Offline,
    NeedRecon,
    NeedInit,
    ReadOnly,
    Unrecovered,
    None,
    Restriping,
    NeedResize,
    NeedRestripe,
}

impl RaidState {
    /// All canonical states in chart dimension order.
    pub const ALL: [RaidState; 14] = [
        RaidState::Online,
        RaidState::Initialized,
        RaidState::Initing,
        RaidState::Degraded,
        RaidState::Reconstructing,
        RaidState::Offline,
        RaidState::NeedRecon,
        RaidState::NeedInit,
        RaidState::ReadOnly,
        RaidState::Unrecovered,
        RaidState::None,
        RaidState::Restriping,
        RaidState::NeedResize,
        RaidState::NeedRestripe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RaidState::Online => "online",
            RaidState::Initialized => "initialized",
            RaidState::Initing => "initing",
            RaidState::Degraded => "degraded",
            RaidState::Reconstructing => "reconstructing",
            RaidState::Offline => "offline",
            RaidState::NeedRecon => "need_recon",
            RaidState::NeedInit => "need_init",
            RaidState::ReadOnly => "read_only",
            RaidState::Unrecovered => "unrecovered",
            RaidState::None => "none",
            RaidState::Restriping => "restriping",
            RaidState::NeedResize => "need_resize",
            RaidState::NeedRestripe => "need_restripe",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for RaidState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RaidState {
    type Err = UnrecognizedState;

    /// Case-insensitive. Inner whitespace folds to `_` ("read Only" -> read_only).
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let key = label
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase();

        RaidState::ALL
            .iter()
            .copied()
            .find(|s| s.as_str() == key)
            .ok_or_else(|| UnrecognizedState(label.to_string()))
    }
}

/// One 0/1 flag per canonical state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateFlags([bool; 14]);

impl StateFlags {
    pub fn is_set(&self, state: RaidState) -> bool {
        self.0[state.index()]
    }

    pub fn set(&mut self, state: RaidState) {
        self.0[state.index()] = true;
    }

    /// Number of flags set to 1.
    pub fn active(&self) -> usize {
        self.0.iter().filter(|f| **f).count()
    }

    /// (state, 0|1) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (RaidState, i64)> + '_ {
        RaidState::ALL
            .iter()
            .map(move |s| (*s, i64::from(self.is_set(*s))))
    }
}

/// Build the flag set for an array's reported state labels.
/// Any number of labels is accepted; a single unknown label fails the whole set.
pub fn normalize<S: AsRef<str>>(labels: &[S]) -> Result<StateFlags, UnrecognizedState> {
    let mut flags = StateFlags::default();
    for label in labels {
        flags.set(label.as_ref().parse()?);
    }
    Ok(flags)
}
