#[cfg(test)]
#[path = "../../tests/unit/matching/matcher_test.rs"]
mod matcher_test;

use super::*;
use crate::models::*;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Builds solutions for a phase: filters candidate pools by requirements, then lazily enumerates
/// vessel and equipment combinations of every template and prunes them by compatibility rules.
/// A port is not enumerated: each combination gets the first port in catalog order which passes
/// all port-vessel rules, a combination without such port is pruned.
pub struct CombinationMatcher<'a> {
    phase: &'a Phase,
    vessel_pools: FxHashMap<String, Vec<Arc<Vessel>>>,
    equipment_pools: FxHashMap<String, Vec<Arc<Equipment>>>,
    ports: Vec<Arc<Port>>,
    filters: Vec<FilterReport>,
    rules: Vec<Rule>,
    vessel_equipment: FxHashMap<String, Vec<usize>>,
    port_vessel: Vec<usize>,
    allow_missing: bool,
}

impl<'a> CombinationMatcher<'a> {
    /// Creates a new instance of `CombinationMatcher` filtering catalog candidates used by phase
    /// templates.
    pub fn new(phase: &'a Phase, catalog: &Catalog, allow_missing: bool) -> Self {
        let requirements = &phase.requirements;
        let mut filters = Vec::new();

        let vessel_kinds =
            phase.templates.iter().flat_map(|t| t.vessels.iter().map(|s| s.kind.as_str())).collect::<BTreeSet<_>>();
        let vessel_pools = vessel_kinds
            .into_iter()
            .map(|kind| {
                let rules = requirements.vessels.get(kind).map(|rules| rules.as_slice()).unwrap_or_default();
                let (kept, report) = filter_candidates(kind, &catalog.vessels_of(kind), rules, allow_missing);
                filters.push(report);

                (kind.to_string(), kept)
            })
            .collect();

        let equipment_kinds =
            phase.templates.iter().flat_map(|t| t.equipment.iter().map(|s| s.kind.as_str())).collect::<BTreeSet<_>>();
        let equipment_pools = equipment_kinds
            .into_iter()
            .map(|kind| {
                let rules = requirements.equipment.get(kind).map(|rules| rules.as_slice()).unwrap_or_default();
                let (kept, report) = filter_candidates(kind, &catalog.equipment_of(kind), rules, allow_missing);
                filters.push(report);

                (kind.to_string(), kept)
            })
            .collect();

        let (ports, report) = filter_candidates("port", &catalog.ports, &requirements.ports, allow_missing);
        filters.push(report);

        let mut rules = Vec::new();
        let vessel_equipment = phase
            .compatibility
            .vessel_equipment
            .iter()
            .map(|(kind, kind_rules)| {
                let ids = kind_rules
                    .iter()
                    .map(|rule| {
                        rules.push(reserve_cargo(rule, &phase.cargo));
                        rules.len() - 1
                    })
                    .collect::<Vec<_>>();

                (kind.clone(), ids)
            })
            .collect();

        let port_vessel = phase
            .compatibility
            .port_vessel
            .iter()
            .map(|rule| {
                rules.push(rule.clone());
                rules.len() - 1
            })
            .collect();

        Self {
            phase,
            vessel_pools,
            equipment_pools,
            ports,
            filters,
            rules,
            vessel_equipment,
            port_vessel,
            allow_missing,
        }
    }

    /// Returns filtering reports.
    pub fn filter_reports(&self) -> &[FilterReport] {
        self.filters.as_slice()
    }

    /// Returns a lazy iterator over solutions in deterministic order: templates in phase order,
    /// then combinations in lexicographic order of vessel slots and equipment slots.
    pub fn solutions(&self) -> SolutionIter<'_> {
        SolutionIter {
            matcher: self,
            next_template: 0,
            state: None,
            tally: vec![0; self.rules.len()],
            unresolved: BTreeSet::new(),
            discarded: Vec::new(),
            enumerated: 0,
            matched: 0,
        }
    }

    fn first_failure(
        &self,
        rule_ids: &[usize],
        context: &RuleContext,
        unresolved: &mut BTreeSet<String>,
    ) -> Option<usize> {
        rule_ids.iter().copied().find(|&id| {
            let rule = &self.rules[id];
            match rule.check(context) {
                RuleCheck::Pass => false,
                RuleCheck::Fail => true,
                RuleCheck::Unresolved(reason) => {
                    unresolved.insert(format!("{}: {reason} in '{rule}'", describe_context(context)));
                    !self.allow_missing
                }
            }
        })
    }
}

/// Runs the matcher to completion collecting all solutions and the match report.
pub fn match_solutions(phase: &Phase, catalog: &Catalog, allow_missing: bool) -> (Vec<Solution>, MatchReport) {
    let matcher = CombinationMatcher::new(phase, catalog, allow_missing);

    let mut iter = matcher.solutions();
    let solutions = iter.by_ref().collect::<Vec<_>>();
    let report = iter.report();

    (solutions, report)
}

/// A lazy solution generator.
pub struct SolutionIter<'a> {
    matcher: &'a CombinationMatcher<'a>,
    next_template: usize,
    state: Option<TemplateState>,
    tally: Vec<usize>,
    unresolved: BTreeSet<String>,
    discarded: Vec<TemplateDiscard>,
    enumerated: usize,
    matched: usize,
}

struct TemplateState {
    index: usize,
    vessels: Vec<Vec<Arc<Vessel>>>,
    equipment: Vec<Vec<Arc<Equipment>>>,
    combinations: Combinations,
    // first failing rule per (vessel, equipment) pair of each equipment slot
    equipment_verdicts: Vec<Vec<Option<usize>>>,
    // first failing rule per (vessel, port) pair of each vessel slot
    port_verdicts: Vec<Vec<Option<usize>>>,
}

impl SolutionIter<'_> {
    /// Returns a report about work done so far.
    pub fn report(&self) -> MatchReport {
        let rejections = self
            .matcher
            .rules
            .iter()
            .zip(self.tally.iter())
            .filter(|(_, count)| **count > 0)
            .map(|(rule, count)| RuleRejection { rule: rule.to_string(), count: *count })
            .collect();

        MatchReport {
            filters: self.matcher.filters.clone(),
            discarded_templates: self.discarded.clone(),
            rejections,
            unresolved: self.unresolved.clone(),
            enumerated: self.enumerated,
            matched: self.matched,
        }
    }

    fn start_template(&mut self, index: usize) -> Option<TemplateState> {
        let matcher = self.matcher;
        let template = &matcher.phase.templates[index];

        let discard = |reason: String| TemplateDiscard { template: template.name.clone(), reason };

        let vessels = template
            .vessels
            .iter()
            .map(|slot| match matcher.vessel_pools.get(&slot.kind) {
                Some(pool) if !pool.is_empty() => Ok(pool.clone()),
                _ => Err(discard(format!("no '{}' vessels left after filtering", slot.kind))),
            })
            .collect::<Result<Vec<_>, _>>();

        let equipment = template
            .equipment
            .iter()
            .map(|slot| match matcher.equipment_pools.get(&slot.kind) {
                Some(pool) if !pool.is_empty() => Ok(pool.clone()),
                _ => Err(discard(format!("no '{}' equipment left after filtering", slot.kind))),
            })
            .collect::<Result<Vec<_>, _>>();

        let (vessels, equipment) = match (vessels, equipment) {
            (Ok(_), Ok(_)) if matcher.ports.is_empty() => {
                self.discarded.push(discard("no ports left after filtering".to_string()));
                return None;
            }
            (Ok(vessels), Ok(equipment)) => (vessels, equipment),
            (Err(err), _) | (_, Err(err)) => {
                self.discarded.push(err);
                return None;
            }
        };

        let no_rules = Vec::new();
        let equipment_verdicts = template
            .equipment
            .iter()
            .zip(equipment.iter())
            .map(|(slot, equipment_pool)| {
                let rule_ids = matcher.vessel_equipment.get(&slot.kind).unwrap_or(&no_rules);
                vessels[slot.vessel_slot]
                    .iter()
                    .flat_map(|vessel| equipment_pool.iter().map(move |equipment| (vessel, equipment)))
                    .map(|(vessel, equipment)| {
                        let context = RuleContext {
                            vessel: Some(vessel.as_ref()),
                            equipment: Some(equipment.as_ref()),
                            port: None,
                        };
                        matcher.first_failure(rule_ids, &context, &mut self.unresolved)
                    })
                    .collect()
            })
            .collect();

        let port_verdicts = vessels
            .iter()
            .map(|vessel_pool| {
                vessel_pool
                    .iter()
                    .flat_map(|vessel| matcher.ports.iter().map(move |port| (vessel, port)))
                    .map(|(vessel, port)| {
                        let context =
                            RuleContext { vessel: Some(vessel.as_ref()), equipment: None, port: Some(port.as_ref()) };
                        matcher.first_failure(&matcher.port_vessel, &context, &mut self.unresolved)
                    })
                    .collect()
            })
            .collect();

        let radices = vessels.iter().map(|pool| pool.len()).chain(equipment.iter().map(|pool| pool.len())).collect();

        Some(TemplateState {
            index,
            vessels,
            equipment,
            combinations: Combinations::new(radices),
            equipment_verdicts,
            port_verdicts,
        })
    }

    fn try_build(&mut self, state: &TemplateState, indices: &[usize]) -> Option<Solution> {
        let matcher = self.matcher;
        let template = &matcher.phase.templates[state.index];

        let (vessel_idx, equipment_idx) = indices.split_at(state.vessels.len());

        let equipment_failure = template.equipment.iter().enumerate().find_map(|(slot_idx, slot)| {
            let carrier = vessel_idx[slot.vessel_slot];
            let pool_size = state.equipment[slot_idx].len();
            state.equipment_verdicts[slot_idx][carrier * pool_size + equipment_idx[slot_idx]]
        });

        if let Some(rule_id) = equipment_failure {
            self.tally[rule_id] += 1;
            return None;
        }

        let port_failure = |port_idx: usize| {
            vessel_idx.iter().enumerate().find_map(|(slot_idx, &vessel)| {
                state.port_verdicts[slot_idx][vessel * matcher.ports.len() + port_idx]
            })
        };

        let mut port_rejections = BTreeSet::new();
        let port_idx = (0..matcher.ports.len()).find(|&port_idx| match port_failure(port_idx) {
            Some(rule_id) => {
                port_rejections.insert(rule_id);
                false
            }
            None => true,
        });

        let Some(port_idx) = port_idx else {
            // every rule which turned a port away counts once for the pruned combination
            port_rejections.into_iter().for_each(|rule_id| self.tally[rule_id] += 1);
            return None;
        };

        let vessels = template
            .vessels
            .iter()
            .zip(vessel_idx)
            .enumerate()
            .map(|(slot_idx, (slot, &idx))| VesselAssignment {
                vessel: state.vessels[slot_idx][idx].clone(),
                quantity: slot.quantity,
            })
            .collect();

        let equipment = template
            .equipment
            .iter()
            .zip(equipment_idx)
            .enumerate()
            .map(|(slot_idx, (slot, &idx))| EquipmentAssignment {
                equipment: state.equipment[slot_idx][idx].clone(),
                quantity: slot.quantity,
                vessel_slot: slot.vessel_slot,
            })
            .collect();

        Some(Solution {
            template_index: state.index,
            vessels,
            equipment,
            port: matcher.ports[port_idx].clone(),
            schedule: None,
            cost: None,
        })
    }
}

impl Iterator for SolutionIter<'_> {
    type Item = Solution;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(mut state) = self.state.take() {
                while let Some(indices) = state.combinations.next() {
                    self.enumerated += 1;
                    if let Some(solution) = self.try_build(&state, &indices) {
                        self.matched += 1;
                        self.state = Some(state);
                        return Some(solution);
                    }
                }
            }

            if self.next_template >= self.matcher.phase.templates.len() {
                return None;
            }

            let index = self.next_template;
            self.next_template += 1;
            self.state = self.start_template(index);
        }
    }
}

/// Adds the cargo reservation to the consuming side of a rule checked against a vessel capacity.
fn reserve_cargo(rule: &Rule, cargo: &CargoReservation) -> Rule {
    let reserved = |expr: &Expr| match expr.as_field() {
        Some(Field::Vessel(attr)) => cargo.amount_for(*attr).filter(|amount| *amount != 0.),
        _ => None,
    };

    match (rule.op, reserved(&rule.left), reserved(&rule.right)) {
        (Operator::Inf, _, Some(amount)) => rule.with_consumer_offset(ConsumerSide::Left, amount),
        (Operator::Sup, Some(amount), _) => rule.with_consumer_offset(ConsumerSide::Right, amount),
        _ => rule.clone(),
    }
}

fn describe_context(context: &RuleContext) -> String {
    [
        context.vessel.map(|vessel| format!("vessel '{}'", vessel.id)),
        context.equipment.map(|equipment| format!("equipment '{}'", equipment.id)),
        context.port.map(|port| format!("port '{}'", port.id)),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(", ")
}
