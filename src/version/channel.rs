//! Release channel selection
//!
//! Picks the "latest" runtime release channel from a release index.
//! A runtime may sit between LTS releases with no current non-LTS channel,
//! so the policy falls back from `current` to `lts`.

use crate::version::types::{ReleaseEntry, SupportPhase};

/// Phases in order of preference
const PHASE_PRECEDENCE: [SupportPhase; 2] = [SupportPhase::Current, SupportPhase::Lts];

/// Parse a channel version like "8.0" into a numeric tuple.
///
/// Returns `None` if any segment is not a non-negative integer.
pub fn parse_channel_version(channel_version: &str) -> Option<Vec<u64>> {
    channel_version
        .trim()
        .split('.')
        .map(|segment| segment.parse().ok())
        .collect()
}

/// Select the latest release channel.
///
/// Prefers any `current` entry over any `lts` entry; within a phase the
/// numerically greatest channel version wins. Entries of other phases are
/// never selected.
pub fn select_latest(entries: &[ReleaseEntry]) -> Option<&ReleaseEntry> {
    PHASE_PRECEDENCE.iter().find_map(|phase| {
        entries
            .iter()
            .filter(|entry| entry.support_phase == *phase)
            .max_by(|a, b| {
                parse_channel_version(&a.channel_version)
                    .cmp(&parse_channel_version(&b.channel_version))
            })
    })
}
