//! Causal policy engine
//!
//! "Enabling" means different things for different motif pairs, so verdicts are looked up
//! by the ordered `(Motif, Motif)` pair. Pairs without a bespoke policy fall through to the
//! table's default entry.

use std::collections::HashMap;

use crate::motifs::Motif;
use crate::skill_stack::SkillStackResult;
use crate::walker::Walk;

/// Latest solver move at which a motif may still count as setting up the mate
pub const MATE_ENABLER_CEILING: usize = 2;

/// A causal policy: (motif1, motif2, replay) -> verdict
pub type PolicyFn = fn(Motif, Motif, &Walk) -> SkillStackResult;

/// Dispatch table from ordered motif pairs to policies
#[derive(Clone)]
pub struct PolicyTable {
    policies: HashMap<(Motif, Motif), PolicyFn>,
    fallback: PolicyFn,
}

impl PolicyTable {
    /// An empty table: every pair gets the generic verdict
    pub fn new() -> Self {
        Self {
            policies: HashMap::new(),
            fallback: generic,
        }
    }

    /// The combinations the curation pipeline knows how to judge
    pub fn standard() -> Self {
        let mut table = Self::new();

        for motif in [Motif::Fork, Motif::Pin, Motif::Skewer, Motif::DiscoveredAttack] {
            table.insert(motif, Motif::Checkmate, motif_then_mate);
        }
        table.insert(Motif::Deflection, Motif::Checkmate, forcing_then_mate);

        for motif in [Motif::Pin, Motif::Skewer, Motif::DiscoveredAttack, Motif::Deflection] {
            table.insert(motif, Motif::Fork, motif_then_motif);
        }

        table
    }

    pub fn insert(&mut self, motif1: Motif, motif2: Motif, policy: PolicyFn) {
        self.policies.insert((motif1, motif2), policy);
    }

    /// Does the pair have a bespoke policy?
    pub fn has_policy(&self, motif1: Motif, motif2: Motif) -> bool {
        self.policies.contains_key(&(motif1, motif2))
    }

    /// The policy for a pair, or the fallback
    pub fn policy(&self, motif1: Motif, motif2: Motif) -> PolicyFn {
        self.policies
            .get(&(motif1, motif2))
            .copied()
            .unwrap_or(self.fallback)
    }

    pub fn evaluate(&self, motif1: Motif, motif2: Motif, walk: &Walk) -> SkillStackResult {
        (self.policy(motif1, motif2))(motif1, motif2, walk)
    }

    /// Known pairs, sorted
    pub fn pairs(&self) -> Vec<(Motif, Motif)> {
        let mut pairs: Vec<_> = self.policies.keys().copied().collect();
        pairs.sort();
        pairs
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Motif -> checkmate: the motif must come first and within the opening moves
pub fn motif_then_mate(motif1: Motif, _motif2: Motif, walk: &Walk) -> SkillStackResult {
    let first = walk.ply_of(motif1);
    let Some(mate) = walk.ply_of(Motif::Checkmate) else {
        return SkillStackResult::invalid(first, None, "no checkmate found in solution");
    };

    match first {
        Some(ply) if ply < mate && ply <= MATE_ENABLER_CEILING => SkillStackResult::confirmed(
            ply,
            mate,
            format!("{motif1} at move {ply} enables checkmate at move {mate}"),
        ),
        Some(ply) if ply < mate => SkillStackResult::invalid(
            first,
            Some(mate),
            format!(
                "mate puzzle with incidental tag - {motif1} at move {ply} is past move \
                 {MATE_ENABLER_CEILING}, checkmate at move {mate}"
            ),
        ),
        _ => SkillStackResult::invalid(
            first,
            Some(mate),
            format!("mate puzzle with incidental tag - {motif1} not enabling checkmate at move {mate}"),
        ),
    }
}

/// Motif -> motif: the first occurrence of motif1 precedes the first of motif2
pub fn motif_then_motif(motif1: Motif, motif2: Motif, walk: &Walk) -> SkillStackResult {
    let first = walk.ply_of(motif1);
    let second = walk.ply_of(motif2);

    match (first, second) {
        (Some(a), Some(b)) if a < b => SkillStackResult::confirmed(
            a,
            b,
            format!("{motif1} at move {a} sets up {motif2} at move {b}"),
        ),
        (Some(a), Some(b)) => SkillStackResult::invalid(
            first,
            second,
            format!("{motif2} at move {b} does not follow {motif1} at move {a}"),
        ),
        (None, _) => SkillStackResult::invalid(
            first,
            second,
            format!("{motif1} not found in solution"),
        ),
        (_, None) => SkillStackResult::invalid(
            first,
            second,
            format!("{motif2} not found in solution"),
        ),
    }
}

/// Deflection -> checkmate: the first capture or check precedes the mate
pub fn forcing_then_mate(motif1: Motif, _motif2: Motif, walk: &Walk) -> SkillStackResult {
    let forcing = walk.first_forcing;
    let Some(mate) = walk.ply_of(Motif::Checkmate) else {
        return SkillStackResult::invalid(forcing, None, "no checkmate found in solution");
    };

    match forcing {
        Some(ply) if ply < mate => SkillStackResult::confirmed(
            ply,
            mate,
            format!("forcing {motif1} at move {ply} leads to checkmate at move {mate}"),
        ),
        _ => SkillStackResult::invalid(
            forcing,
            Some(mate),
            format!("no capture or check before checkmate at move {mate}"),
        ),
    }
}

/// Fallback for pairs without a bespoke policy
pub fn generic(motif1: Motif, motif2: Motif, _walk: &Walk) -> SkillStackResult {
    SkillStackResult::generic(motif1.name(), motif2.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill_stack::Confidence;

    fn walk_with(occurrences: &[(Motif, usize)]) -> Walk {
        let mut walk = Walk::default();
        for (motif, ply) in occurrences {
            walk.record(*motif, *ply, false);
        }
        walk
    }

    #[test]
    fn test_standard_table_pairs() {
        let table = PolicyTable::standard();
        assert!(table.has_policy(Motif::Fork, Motif::Checkmate));
        assert!(table.has_policy(Motif::Pin, Motif::Fork));
        assert!(table.has_policy(Motif::Deflection, Motif::Checkmate));
        assert!(!table.has_policy(Motif::Fork, Motif::Pin));
        assert!(!table.has_policy(Motif::Checkmate, Motif::Fork));
        assert_eq!(table.pairs().len(), 9);
    }

    #[test]
    fn test_motif_then_mate() {
        let walk = walk_with(&[(Motif::Fork, 1), (Motif::Checkmate, 2)]);
        let result = motif_then_mate(Motif::Fork, Motif::Checkmate, &walk);
        assert!(result.valid);
        assert_eq!(result.motif1_ply_index, Some(1));
        assert_eq!(result.motif2_ply_index, Some(2));
        assert!(result.reasoning.contains("move 1"));
        assert!(result.reasoning.contains("move 2"));
    }

    #[test]
    fn test_motif_then_mate_ceiling() {
        let walk = walk_with(&[(Motif::Pin, 3), (Motif::Checkmate, 4)]);
        let result = motif_then_mate(Motif::Pin, Motif::Checkmate, &walk);
        assert!(!result.valid);
        assert!(result.reasoning.contains("incidental"));
    }

    #[test]
    fn test_motif_then_mate_incidental() {
        let missing = walk_with(&[(Motif::Checkmate, 2)]);
        let result = motif_then_mate(Motif::Fork, Motif::Checkmate, &missing);
        assert!(!result.valid);
        assert!(result.reasoning.contains("incidental"));
        assert_eq!(result.motif1_ply_index, None);
        assert_eq!(result.motif2_ply_index, Some(2));

        let same_ply = walk_with(&[(Motif::Fork, 2), (Motif::Checkmate, 2)]);
        assert!(!motif_then_mate(Motif::Fork, Motif::Checkmate, &same_ply).valid);
    }

    #[test]
    fn test_motif_then_mate_without_mate() {
        let walk = walk_with(&[(Motif::Fork, 1)]);
        let result = motif_then_mate(Motif::Fork, Motif::Checkmate, &walk);
        assert!(!result.valid);
        assert_eq!(result.motif2_ply_index, None);
    }

    #[test]
    fn test_motif_then_fork_has_no_ceiling() {
        let walk = walk_with(&[(Motif::Pin, 1), (Motif::Fork, 5)]);
        let result = motif_then_motif(Motif::Pin, Motif::Fork, &walk);
        assert!(result.valid);
        assert_eq!(result.motif2_ply_index, Some(5));
    }

    #[test]
    fn test_motif_then_fork_order() {
        let reversed = walk_with(&[(Motif::Pin, 3), (Motif::Fork, 1)]);
        assert!(!motif_then_motif(Motif::Pin, Motif::Fork, &reversed).valid);

        let together = walk_with(&[(Motif::Pin, 2), (Motif::Fork, 2)]);
        assert!(!motif_then_motif(Motif::Pin, Motif::Fork, &together).valid);

        let no_fork = walk_with(&[(Motif::Pin, 1)]);
        let result = motif_then_motif(Motif::Pin, Motif::Fork, &no_fork);
        assert!(!result.valid);
        assert!(result.reasoning.contains("fork not found"));
    }

    #[test]
    fn test_forcing_then_mate() {
        let mut walk = walk_with(&[(Motif::Checkmate, 3)]);
        walk.first_forcing = Some(2);
        let result = forcing_then_mate(Motif::Deflection, Motif::Checkmate, &walk);
        assert!(result.valid);
        assert_eq!(result.motif1_ply_index, Some(2));
        assert_eq!(result.motif2_ply_index, Some(3));

        // The mate itself is the first forcing move
        walk.first_forcing = Some(3);
        assert!(!forcing_then_mate(Motif::Deflection, Motif::Checkmate, &walk).valid);
    }

    #[test]
    fn test_unknown_pair_falls_back_to_generic() {
        let table = PolicyTable::standard();
        let result = table.evaluate(Motif::Fork, Motif::Skewer, &Walk::default());
        assert!(result.valid);
        assert_eq!(result.confidence, Confidence::Generic);
        assert_eq!(result.motif1_ply_index, Some(1));
        assert_eq!(result.motif2_ply_index, Some(2));
        assert!(result.reasoning.contains("review recommended"));
    }

    #[test]
    fn test_insert_is_additive() {
        let mut table = PolicyTable::new();
        assert!(!table.has_policy(Motif::Fork, Motif::Skewer));
        table.insert(Motif::Fork, Motif::Skewer, motif_then_motif);
        let walk = walk_with(&[(Motif::Fork, 1), (Motif::Skewer, 2)]);
        let result = table.evaluate(Motif::Fork, Motif::Skewer, &walk);
        assert_eq!(result.confidence, Confidence::Confirmed);
        assert!(result.valid);
    }
}
