#[cfg(test)]
#[path = "../../../tests/unit/format/problem/reader_test.rs"]
mod reader_test;

use super::*;
use crate::format::VALIDATION_CODE;
use rustc_hash::{FxHashMap, FxHashSet};
use seaops_core::models::common::Value;
use seaops_core::models::{
    CargoReservation, Catalog as CoreCatalog, CombinationTemplate, CompatibilityRules, Equipment, EquipmentAttr,
    EquipmentSlot as CoreEquipmentSlot, EquipmentSpecs, Expr, Field, Olc, Phase as CorePhase, Port, PortAttr,
    PortSpecs, Requirements as CoreRequirements, Rule, Strategy as CoreStrategy, Subject, Token, Vessel, VesselAttr,
    VesselSlot as CoreVesselSlot, VesselSpecs,
};
use seaops_core::scheduling::{SeaLeg as CoreSeaLeg, StrategyDurations, TabularDurations};
use seaops_core::utils::GenericResult;
use std::sync::Arc;
use time::PrimitiveDateTime;
use time::macros::format_description;

/// Converts a deserialized problem into a core project validating its content. All found
/// validation errors are returned at once.
pub fn map_to_project(problem: Problem) -> Result<CoreProject, Vec<FormatError>> {
    let mut errors = Vec::new();

    let catalog = map_catalog(&problem.catalog, &mut errors);
    check_unique("phase", problem.phases.iter().map(|phase| phase.name.as_str()), &mut errors);

    let phases = problem.phases.iter().filter_map(|phase| map_phase(phase, &mut errors)).collect::<Vec<_>>();

    if errors.is_empty() { Ok(CoreProject { catalog, phases }) } else { Err(errors) }
}

fn create_validation_error(cause: String, action: &str) -> FormatError {
    FormatError::new(VALIDATION_CODE.to_string(), cause, action.to_string())
}

fn check_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>, errors: &mut Vec<FormatError>) {
    let mut known = FxHashSet::default();
    let duplicates = ids.filter(|id| !known.insert(*id)).collect::<Vec<_>>();

    if !duplicates.is_empty() {
        errors.push(create_validation_error(
            format!("duplicated {kind} ids: {}", duplicates.join(", ")),
            &format!("ensure that every {kind} has an unique id"),
        ));
    }
}

fn map_specs<A>(
    owner: &str,
    specs: &BTreeMap<String, Float>,
    from_name: fn(&str) -> Option<A>,
    errors: &mut Vec<FormatError>,
) -> Vec<(A, Float)> {
    specs
        .iter()
        .filter_map(|(name, value)| match from_name(name) {
            Some(attr) => Some((attr, *value)),
            None => {
                errors.push(create_validation_error(
                    format!("unknown attribute '{name}' of {owner}"),
                    "use attribute names listed in the catalog documentation",
                ));
                None
            }
        })
        .collect()
}

fn map_catalog(catalog: &Catalog, errors: &mut Vec<FormatError>) -> CoreCatalog {
    check_unique("vessel", catalog.vessels.iter().map(|vessel| vessel.id.as_str()), errors);
    check_unique("equipment", catalog.equipment.iter().map(|equipment| equipment.id.as_str()), errors);
    check_unique("port", catalog.ports.iter().map(|port| port.id.as_str()), errors);

    let vessels = catalog
        .vessels
        .iter()
        .map(|record| {
            let mut specs = VesselSpecs::default();
            let owner = format!("vessel '{}'", record.id);
            for (attr, value) in map_specs(&owner, &record.specs, VesselAttr::from_name, errors) {
                specs.set(attr, value);
            }

            Vessel::new(&record.id, &record.kind, specs)
        })
        .collect();

    let equipment = catalog
        .equipment
        .iter()
        .map(|record| {
            let mut specs = EquipmentSpecs::default();
            let owner = format!("equipment '{}'", record.id);
            for (attr, value) in map_specs(&owner, &record.specs, EquipmentAttr::from_name, errors) {
                specs.set(attr, value);
            }

            Equipment::new(&record.id, &record.kind, specs)
        })
        .collect();

    let ports = catalog
        .ports
        .iter()
        .map(|record| {
            let mut specs = PortSpecs::default();
            let owner = format!("port '{}'", record.id);
            for (attr, value) in map_specs(&owner, &record.specs, PortAttr::from_name, errors) {
                specs.set(attr, value);
            }

            Port::new(&record.id, specs)
        })
        .collect();

    CoreCatalog::new(vessels, equipment, ports)
}

fn map_phase(phase: &Phase, errors: &mut Vec<FormatError>) -> Option<CorePhase> {
    let errors_before = errors.len();
    let name = phase.name.as_str();

    let requested_start = parse_datetime(&phase.requested_start)
        .map_err(|err| {
            errors.push(create_validation_error(
                format!("phase '{name}' has invalid requested start '{}': {err}", phase.requested_start),
                "use YYYY-MM-DDTHH:MM:SS format",
            ))
        })
        .ok();

    let requirements = map_requirements(name, &phase.requirements, errors);
    let compatibility = map_compatibility(name, &phase.compatibility, errors);
    let templates = map_templates(name, &phase.templates, errors);
    let (strategies, durations) = map_strategies(name, &phase.strategies, errors);

    let cargo = CargoReservation {
        deck_space: phase.cargo.deck_space.unwrap_or(0.),
        max_cargo: phase.cargo.max_cargo.unwrap_or(0.),
        deck_loading: phase.cargo.deck_loading.unwrap_or(0.),
    };

    match requested_start {
        Some(requested_start) if errors.len() == errors_before => Some(CorePhase {
            name: name.to_string(),
            requested_start,
            requirements,
            compatibility,
            cargo,
            templates,
            strategies,
            durations: Arc::new(TabularDurations::new(durations)),
        }),
        _ => None,
    }
}

/// Parses a date time in `YYYY-MM-DDTHH:MM:SS` form.
pub(crate) fn parse_datetime(text: &str) -> Result<PrimitiveDateTime, String> {
    PrimitiveDateTime::parse(text, format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"))
        .map_err(|err| err.to_string())
}

fn map_rule(chain: &[RuleToken]) -> GenericResult<Rule> {
    chain
        .iter()
        .map(|token| match token {
            RuleToken::Number(value) => Ok(Token::Const(Value::Number(*value))),
            RuleToken::Text(text) => Token::parse(text),
        })
        .collect::<GenericResult<Vec<_>>>()
        .and_then(Rule::from_tokens)
}

fn format_chain(chain: &[RuleToken]) -> String {
    chain
        .iter()
        .map(|token| match token {
            RuleToken::Number(value) => value.to_string(),
            RuleToken::Text(text) => text.clone(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn map_rules(
    context: &str,
    chains: &[RuleChain],
    subject: Option<Subject>,
    errors: &mut Vec<FormatError>,
) -> Vec<Rule> {
    chains
        .iter()
        .filter_map(|chain| {
            let rule = map_rule(chain)
                .map_err(|err| format!("{context} has invalid rule '{}': {err}", format_chain(chain)))
                .and_then(|rule| match subject.and_then(|subject| find_foreign_field(&rule, subject)) {
                    Some(field) => {
                        Err(format!("{context} has rule '{rule}' which references unrelated field '{field}'"))
                    }
                    None => Ok(rule),
                });

            rule.map_err(|cause| errors.push(create_validation_error(cause, "check rule tokens and field names")))
                .ok()
        })
        .collect()
}

fn find_foreign_field(rule: &Rule, subject: Subject) -> Option<Field> {
    fn find(expr: &Expr, subject: Subject) -> Option<Field> {
        match expr {
            Expr::Field(field) if field.subject() != subject => Some(*field),
            Expr::Field(_) | Expr::Const(_) => None,
            Expr::Binary(_, left, right) => find(left, subject).or_else(|| find(right, subject)),
        }
    }

    find(&rule.left, subject).or_else(|| find(&rule.right, subject))
}

fn map_requirements(phase: &str, requirements: &Requirements, errors: &mut Vec<FormatError>) -> CoreRequirements {
    let vessels = requirements
        .vessels
        .iter()
        .map(|(kind, chains)| {
            let context = format!("phase '{phase}', vessel type '{kind}'");
            (kind.clone(), map_rules(&context, chains, Some(Subject::Vessel), errors))
        })
        .collect::<FxHashMap<_, _>>();

    let equipment = requirements
        .equipment
        .iter()
        .map(|(kind, chains)| {
            let context = format!("phase '{phase}', equipment type '{kind}'");
            (kind.clone(), map_rules(&context, chains, Some(Subject::Equipment), errors))
        })
        .collect::<FxHashMap<_, _>>();

    let ports = map_rules(&format!("phase '{phase}', ports"), &requirements.ports, Some(Subject::Port), errors);

    CoreRequirements { vessels, equipment, ports }
}

fn map_compatibility(phase: &str, compatibility: &Compatibility, errors: &mut Vec<FormatError>) -> CompatibilityRules {
    let vessel_equipment = compatibility
        .vessel_equipment
        .iter()
        .map(|(kind, chains)| {
            let context = format!("phase '{phase}', vessel compatibility of equipment type '{kind}'");
            (kind.clone(), map_rules(&context, chains, None, errors))
        })
        .collect::<FxHashMap<_, _>>();

    let context = format!("phase '{phase}', port compatibility");
    let port_vessel = map_rules(&context, &compatibility.port_vessel, None, errors);

    CompatibilityRules { vessel_equipment, port_vessel }
}

fn map_templates(phase: &str, templates: &[Template], errors: &mut Vec<FormatError>) -> Vec<CombinationTemplate> {
    if templates.is_empty() {
        errors.push(create_validation_error(
            format!("phase '{phase}' has no combination templates"),
            "specify at least one template",
        ));
    }

    templates
        .iter()
        .filter_map(|template| {
            let vessels = template
                .vessels
                .iter()
                .map(|slot| CoreVesselSlot { kind: slot.kind.clone(), quantity: slot.quantity.unwrap_or(1) })
                .collect();
            let equipment = template
                .equipment
                .iter()
                .map(|slot| CoreEquipmentSlot {
                    kind: slot.kind.clone(),
                    quantity: slot.quantity.unwrap_or(1),
                    vessel_slot: slot.vessel_slot.unwrap_or(0),
                })
                .collect();

            CombinationTemplate::new(&template.name, vessels, equipment)
                .map_err(|err| {
                    errors.push(create_validation_error(
                        format!("phase '{phase}': {err}"),
                        "check template slots and their bindings",
                    ))
                })
                .ok()
        })
        .collect()
}

fn map_strategies(
    phase: &str,
    strategies: &[Strategy],
    errors: &mut Vec<FormatError>,
) -> (Vec<CoreStrategy>, Vec<StrategyDurations>) {
    if strategies.is_empty() {
        errors.push(create_validation_error(
            format!("phase '{phase}' has no strategies"),
            "specify at least one strategy with its sea legs",
        ));
    }

    strategies
        .iter()
        .map(|strategy| {
            let has_negative = strategy.prep_time < 0.
                || strategy.transit_distance < 0.
                || strategy.legs.iter().any(|leg| leg.duration < 0.);

            if has_negative {
                errors.push(create_validation_error(
                    format!("phase '{phase}', strategy '{}' has negative duration or distance", strategy.name),
                    "use non-negative hours and kilometers",
                ));
            }

            let legs = strategy
                .legs
                .iter()
                .map(|leg| CoreSeaLeg {
                    name: leg.name.clone(),
                    duration: leg.duration,
                    olc: Olc::from_optional(leg.limits.max_hs, leg.limits.max_tp, leg.limits.max_ws, leg.limits.max_cs),
                })
                .collect();

            (
                CoreStrategy { name: strategy.name.clone() },
                StrategyDurations {
                    prep_time: strategy.prep_time,
                    legs,
                    transit_distance: strategy.transit_distance,
                },
            )
        })
        .unzip()
}
