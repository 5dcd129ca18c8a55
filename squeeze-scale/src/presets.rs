// SPDX-License-Identifier: MIT
//! # Byte-Budget Presets
//!
//! Named byte budgets for common delivery targets, plus the inclusive clamp
//! applied to user-supplied targets before they reach the search core.
//!
//! ## Budget Strategy
//!
//! Targets are expressed in kilobytes because that is how users reason about
//! upload limits and mail attachments. All presets sit inside the supported
//! clamp range of [50, 5000] KB, so a preset can never produce an
//! out-of-range budget.

/// Inclusive clamp range for user-supplied targets, in KB.
pub const MIN_TARGET_KB: u32 = 50;
pub const MAX_TARGET_KB: u32 = 5000;

/// Named byte budgets for common delivery targets.
///
/// Each preset maps to a target size in kilobytes. The naming follows the
/// destination rather than the mechanism: pick the preset for where the
/// image is going, not for how much it shrinks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum BudgetPreset {
    /// 100 KB: profile pictures and other small square crops.
    #[clap(name = "avatar")]
    Avatar100K,
    /// 500 KB: mail-attachment friendly, the classic default.
    #[clap(name = "email")]
    Email500K,
    /// 1000 KB: general web page embedding.
    #[clap(name = "web")]
    Web1M,
    /// 5000 KB: print-oriented masters, the largest supported budget.
    #[clap(name = "print")]
    Print5M,
}

impl BudgetPreset {
    /// Target size in kilobytes for this preset.
    pub fn target_kb(self) -> u32 {
        match self {
            BudgetPreset::Avatar100K => 100,
            BudgetPreset::Email500K => 500,
            BudgetPreset::Web1M => 1000,
            BudgetPreset::Print5M => 5000,
        }
    }

    /// Target size in bytes for this preset.
    pub fn target_bytes(self) -> u64 {
        self.target_kb() as u64 * 1024
    }
}

/// Clamp a user-supplied target to the supported inclusive range.
///
/// Zero (e.g. from an unparsable input upstream) falls back to the 500 KB
/// default before clamping.
pub fn clamp_target_kb(kb: u32) -> u32 {
    let kb = if kb == 0 { 500 } else { kb };
    kb.clamp(MIN_TARGET_KB, MAX_TARGET_KB)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_within_clamp_range() {
        for preset in [
            BudgetPreset::Avatar100K,
            BudgetPreset::Email500K,
            BudgetPreset::Web1M,
            BudgetPreset::Print5M,
        ] {
            let kb = preset.target_kb();
            assert_eq!(clamp_target_kb(kb), kb);
            assert_eq!(preset.target_bytes(), kb as u64 * 1024);
        }
    }

    #[test]
    fn test_clamp_target_kb() {
        assert_eq!(clamp_target_kb(0), 500);
        assert_eq!(clamp_target_kb(10), 50);
        assert_eq!(clamp_target_kb(50), 50);
        assert_eq!(clamp_target_kb(500), 500);
        assert_eq!(clamp_target_kb(5000), 5000);
        assert_eq!(clamp_target_kb(99999), 5000);
    }
}
