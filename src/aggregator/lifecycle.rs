//! Reconstructed stack lifecycle state.
//!
//! The parser's stack forest is never visible in the trace. What we keep
//! instead is a flat set of stack ids believed to be alive, plus each stack's
//! most recent reduction so that splits can be blamed on the rule that
//! produced the parent stack's current state.
//!
//! Every update is tolerant: deaths and renames of unknown stacks, and
//! splits from parents with no recorded reduction, are silent no-ops. Traces
//! are frequently captured mid-run, so missing history is expected.

use super::counters::SplitCounter;
use crate::parser::{RuleSite, StackId, TraceEvent};
use crate::utils::config::ROOT_STACK_ID;
use log::trace;
use std::collections::{HashMap, HashSet};

/// Accumulated state for one stretch of trace
#[derive(Debug, Clone)]
pub struct StackLifecycle {
    live: HashSet<StackId>,
    highest_stack_id: StackId,
    peak_live: usize,
    current_token: Option<String>,
    token_splits: SplitCounter<String>,
    rule_splits: SplitCounter<RuleSite>,
    last_reduction: HashMap<StackId, RuleSite>,
    total_splits: u64,
    attribute_rules: bool,
    active: bool,
}

impl StackLifecycle {
    /// State at the start of a trace: only the root stack is alive
    pub fn new(attribute_rules: bool) -> Self {
        let mut live = HashSet::new();
        live.insert(ROOT_STACK_ID);

        Self {
            live,
            highest_stack_id: ROOT_STACK_ID,
            peak_live: 1,
            current_token: None,
            token_splits: SplitCounter::new(),
            rule_splits: SplitCounter::new(),
            last_reduction: HashMap::new(),
            total_splits: 0,
            attribute_rules,
            active: false,
        }
    }

    /// State right after a run boundary: nothing is known to be alive
    pub fn after_boundary(attribute_rules: bool) -> Self {
        Self {
            live: HashSet::new(),
            peak_live: 0,
            ..Self::new(attribute_rules)
        }
    }

    /// Apply one event
    pub fn apply(&mut self, event: &TraceEvent) {
        match event {
            TraceEvent::Token(token) => {
                self.current_token = token.clone();
            }

            TraceEvent::Split { stack, parent } => self.split(*stack, *parent),

            TraceEvent::Death { stack } => {
                if !self.live.remove(stack) {
                    trace!("Death of untracked stack {}", stack);
                }
            }

            TraceEvent::Rename { from, to } => {
                if self.live.remove(from) {
                    self.live.insert(*to);
                    self.update_peak();
                } else {
                    trace!("Rename of untracked stack {} -> {}", from, to);
                }
            }

            TraceEvent::Reduction { stack, site } => {
                if self.attribute_rules {
                    self.last_reduction.insert(*stack, *site);
                }
            }

            TraceEvent::Boundary(_) => {
                self.live.clear();
            }
        }

        if !matches!(event, TraceEvent::Boundary(_)) {
            self.active = true;
        }
    }

    fn split(&mut self, stack: StackId, parent: Option<StackId>) {
        self.highest_stack_id = self.highest_stack_id.max(stack);
        self.live.insert(stack);
        self.update_peak();
        self.total_splits += 1;

        if let Some(token) = &self.current_token {
            self.token_splits.increment(token.clone());
        }

        if self.attribute_rules {
            if let Some(site) = parent.and_then(|p| self.last_reduction.get(&p)) {
                self.rule_splits.increment(*site);
            }
        }
    }

    fn update_peak(&mut self) {
        self.peak_live = self.peak_live.max(self.live.len());
    }

    /// Whether the stack is currently believed alive
    pub fn is_live(&self, stack: StackId) -> bool {
        self.live.contains(&stack)
    }

    /// Live stack ids in ascending order
    pub fn live_stacks(&self) -> Vec<StackId> {
        let mut ids: Vec<StackId> = self.live.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn highest_stack_id(&self) -> StackId {
        self.highest_stack_id
    }

    pub fn peak_live(&self) -> usize {
        self.peak_live
    }

    pub fn current_token(&self) -> Option<&str> {
        self.current_token.as_deref()
    }

    /// Number of split events applied, attributed or not
    pub fn total_splits(&self) -> u64 {
        self.total_splits
    }

    pub fn token_splits(&self) -> &SplitCounter<String> {
        &self.token_splits
    }

    pub fn rule_splits(&self) -> &SplitCounter<RuleSite> {
        &self.rule_splits
    }

    pub fn last_reduction(&self, stack: StackId) -> Option<RuleSite> {
        self.last_reduction.get(&stack).copied()
    }

    pub fn attributes_rules(&self) -> bool {
        self.attribute_rules
    }

    /// Whether any non-boundary event has been applied
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Default for StackLifecycle {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::BoundaryKind;

    fn split(stack: StackId, parent: StackId) -> TraceEvent {
        TraceEvent::Split {
            stack,
            parent: Some(parent),
        }
    }

    fn token(sym: &str) -> TraceEvent {
        TraceEvent::Token(Some(sym.to_string()))
    }

    #[test]
    fn test_initial_state() {
        let state = StackLifecycle::default();
        assert_eq!(state.live_stacks(), vec![0]);
        assert_eq!(state.peak_live(), 1);
        assert_eq!(state.highest_stack_id(), 0);
        assert!(!state.is_active());
    }

    #[test]
    fn test_split_without_token() {
        let mut state = StackLifecycle::default();
        state.apply(&split(1, 0));

        assert_eq!(state.highest_stack_id(), 1);
        assert_eq!(state.peak_live(), 2);
        assert!(state.token_splits().is_empty());
        assert_eq!(state.total_splits(), 1);
    }

    #[test]
    fn test_death_of_unknown_stack_is_noop() {
        let mut state = StackLifecycle::default();
        state.apply(&TraceEvent::Death { stack: 9 });
        assert_eq!(state.live_stacks(), vec![0]);
    }

    #[test]
    fn test_rename() {
        let mut state = StackLifecycle::default();
        state.apply(&split(1, 0));
        state.apply(&TraceEvent::Rename { from: 1, to: 4 });
        assert!(!state.is_live(1));
        assert!(state.is_live(4));

        state.apply(&TraceEvent::Rename { from: 2, to: 5 });
        assert_eq!(state.live_stacks(), vec![0, 4]);
    }

    #[test]
    fn test_rule_attribution_uses_parent() {
        let mut state = StackLifecycle::default();
        state.apply(&TraceEvent::Reduction {
            stack: 0,
            site: RuleSite::new(12, 88),
        });
        state.apply(&token("LPAREN"));
        state.apply(&split(1, 0));
        // Parent 1 has no reduction yet
        state.apply(&split(2, 1));

        assert_eq!(state.rule_splits().count(&RuleSite::new(12, 88)), 1);
        assert_eq!(state.rule_splits().total(), 1);
        assert_eq!(state.token_splits().count("LPAREN"), 2);
    }

    #[test]
    fn test_reduction_overwrites() {
        let mut state = StackLifecycle::default();
        state.apply(&TraceEvent::Reduction {
            stack: 3,
            site: RuleSite::new(1, 10),
        });
        state.apply(&TraceEvent::Reduction {
            stack: 3,
            site: RuleSite::new(2, 20),
        });
        assert_eq!(state.last_reduction(3), Some(RuleSite::new(2, 20)));
    }

    #[test]
    fn test_attribution_disabled() {
        let mut state = StackLifecycle::new(false);
        state.apply(&TraceEvent::Reduction {
            stack: 0,
            site: RuleSite::new(12, 88),
        });
        state.apply(&split(1, 0));

        assert!(state.rule_splits().is_empty());
        assert_eq!(state.last_reduction(0), None);
    }

    #[test]
    fn test_boundary_clears_live_but_keeps_counters() {
        let mut state = StackLifecycle::default();
        state.apply(&token("ID"));
        state.apply(&split(3, 0));
        state.apply(&TraceEvent::Boundary(BoundaryKind::Cleanup));

        assert_eq!(state.live_count(), 0);
        assert_eq!(state.highest_stack_id(), 3);
        assert_eq!(state.peak_live(), 2);
        assert_eq!(state.token_splits().count("ID"), 1);
        assert_eq!(state.current_token(), Some("ID"));
    }

    #[test]
    fn test_after_boundary_starts_empty() {
        let state = StackLifecycle::after_boundary(true);
        assert_eq!(state.live_count(), 0);
        assert_eq!(state.peak_live(), 0);
        assert!(!state.is_active());
    }
}
