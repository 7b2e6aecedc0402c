//! Dual-stock ammunition pool.
//!
//! The gunner hands out blank and live bullets. Each holder carries at most
//! one bullet at a time. For either kind, `remaining` plus the number of
//! assignments of that kind never exceeds the kind's maximum; it falls below
//! only while fired bullets are waiting to be refunded.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Bullet kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmmoKind {
    /// Harmless.
    Blank,
    /// Lethal.
    Live,
}

/// Stock counters for one kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmoStock {
    /// Configured maximum.
    pub max: u32,
    /// Bullets not yet handed out.
    pub remaining: u32,
}

impl AmmoStock {
    fn full(max: u32) -> Self {
        Self { max, remaining: max }
    }
}

/// One bullet in someone's hands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmmoAssignment {
    /// Who carries it.
    pub holder_id: PlayerId,
    /// Which kind.
    pub kind: AmmoKind,
    /// Round it was handed out.
    pub round_given: u32,
}

/// The singleton ammunition pool.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmmunitionPool {
    #[serde(alias = "blankBullets")]
    blank: AmmoStock,
    #[serde(alias = "liveBullets")]
    live: AmmoStock,
    #[serde(alias = "bulletHolders")]
    assignments: Vec<AmmoAssignment>,
}

impl AmmunitionPool {
    /// Create a full pool.
    #[must_use]
    pub fn new(blank_max: u32, live_max: u32) -> Self {
        Self {
            blank: AmmoStock::full(blank_max),
            live: AmmoStock::full(live_max),
            assignments: Vec::new(),
        }
    }

    fn stock_mut(&mut self, kind: AmmoKind) -> &mut AmmoStock {
        match kind {
            AmmoKind::Blank => &mut self.blank,
            AmmoKind::Live => &mut self.live,
        }
    }

    /// Counters for a kind.
    #[must_use]
    pub fn stock(&self, kind: AmmoKind) -> AmmoStock {
        match kind {
            AmmoKind::Blank => self.blank,
            AmmoKind::Live => self.live,
        }
    }

    /// Bullets of `kind` left to give.
    #[must_use]
    pub fn remaining(&self, kind: AmmoKind) -> u32 {
        self.stock(kind).remaining
    }

    /// Bullets of either kind left to give.
    #[must_use]
    pub fn total_remaining(&self) -> u32 {
        self.blank.remaining + self.live.remaining
    }

    /// Hand a bullet to `holder`.
    ///
    /// Fails if the kind is out of stock or the holder already carries one.
    pub fn give_bullet(&mut self, holder: PlayerId, kind: AmmoKind, round: u32) -> bool {
        if self.assignment(holder).is_some() {
            return false;
        }
        let stock = self.stock_mut(kind);
        if stock.remaining == 0 {
            return false;
        }
        stock.remaining -= 1;
        self.assignments.push(AmmoAssignment {
            holder_id: holder,
            kind,
            round_given: round,
        });
        true
    }

    /// Put one bullet of `kind` back in stock.
    ///
    /// Only refunds bullets that are neither in stock nor assigned, so the
    /// counters can never exceed the maximum.
    pub fn return_bullet(&mut self, kind: AmmoKind) -> bool {
        let assigned = self.assigned_count(kind);
        let stock = self.stock_mut(kind);
        if stock.remaining + assigned >= stock.max {
            return false;
        }
        stock.remaining += 1;
        true
    }

    /// Take back `holder`'s bullet and return it to stock.
    pub fn revoke(&mut self, holder: PlayerId) -> Option<AmmoKind> {
        let kind = self.use_bullet(holder)?;
        self.return_bullet(kind);
        Some(kind)
    }

    /// Remove and return `holder`'s bullet kind.
    pub fn use_bullet(&mut self, holder: PlayerId) -> Option<AmmoKind> {
        let pos = self.assignments.iter().position(|a| a.holder_id == holder)?;
        Some(self.assignments.remove(pos).kind)
    }

    /// Holders still carrying a live bullet.
    #[must_use]
    pub fn unused_live_holders(&self) -> Vec<PlayerId> {
        self.assignments
            .iter()
            .filter(|a| a.kind == AmmoKind::Live)
            .map(|a| a.holder_id)
            .collect()
    }

    /// End of discussion: drop every assignment.
    ///
    /// Returns the live holders, who the caller must eliminate.
    pub fn expire(&mut self) -> Vec<PlayerId> {
        let live = self.unused_live_holders();
        self.assignments.clear();
        live
    }

    /// `holder`'s current assignment.
    #[must_use]
    pub fn assignment(&self, holder: PlayerId) -> Option<&AmmoAssignment> {
        self.assignments.iter().find(|a| a.holder_id == holder)
    }

    /// All active assignments.
    #[must_use]
    pub fn assignments(&self) -> &[AmmoAssignment] {
        &self.assignments
    }

    /// Active assignments of one kind.
    #[must_use]
    pub fn assigned_count(&self, kind: AmmoKind) -> u32 {
        self.assignments.iter().filter(|a| a.kind == kind).count() as u32
    }
}
