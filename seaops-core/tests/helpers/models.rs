use crate::models::common::Float;
use crate::models::*;
use crate::scheduling::{SeaLeg, StrategyDurations, TabularDurations};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use time::{Date, Month, PrimitiveDateTime, Time};

pub fn test_vessel(id: &str, kind: &str, attrs: &[(VesselAttr, Float)]) -> Vessel {
    let mut specs = VesselSpecs::default();
    attrs.iter().for_each(|(attr, value)| {
        specs.set(*attr, *value);
    });

    Vessel::new(id, kind, specs)
}

pub fn test_equipment(id: &str, kind: &str, attrs: &[(EquipmentAttr, Float)]) -> Equipment {
    let mut specs = EquipmentSpecs::default();
    attrs.iter().for_each(|(attr, value)| {
        specs.set(*attr, *value);
    });

    Equipment::new(id, kind, specs)
}

pub fn test_port(id: &str, attrs: &[(PortAttr, Float)]) -> Port {
    let mut specs = PortSpecs::default();
    attrs.iter().for_each(|(attr, value)| {
        specs.set(*attr, *value);
    });

    Port::new(id, specs)
}

/// Parses rule from space separated tokens, e.g. "vessel.deck_space sup 100".
pub fn rule(text: &str) -> Rule {
    let tokens = text.split_whitespace().map(|token| Token::parse(token).expect("valid token")).collect();

    Rule::from_tokens(tokens).expect("valid rule")
}

pub fn rules(texts: &[&str]) -> Vec<Rule> {
    texts.iter().map(|text| rule(text)).collect()
}

pub fn datetime(year: i32, month: u8, day: u8, hour: u8) -> PrimitiveDateTime {
    PrimitiveDateTime::new(
        Date::from_calendar_date(year, Month::try_from(month).expect("valid month"), day).expect("valid date"),
        Time::from_hms(hour, 0, 0).expect("valid time"),
    )
}

pub fn vessel_slot(kind: &str, quantity: usize) -> VesselSlot {
    VesselSlot { kind: kind.to_string(), quantity }
}

pub fn equipment_slot(kind: &str, quantity: usize, vessel_slot: usize) -> EquipmentSlot {
    EquipmentSlot { kind: kind.to_string(), quantity, vessel_slot }
}

pub fn template(name: &str, vessels: Vec<VesselSlot>, equipment: Vec<EquipmentSlot>) -> CombinationTemplate {
    CombinationTemplate::new(name, vessels, equipment).expect("valid template")
}

pub fn sea_leg(duration: Float, olc: Olc) -> SeaLeg {
    SeaLeg { name: "operation".to_string(), duration, olc }
}

pub fn durations(prep_time: Float, legs: Vec<SeaLeg>, transit_distance: Float) -> StrategyDurations {
    StrategyDurations { prep_time, legs, transit_distance }
}

/// Creates a phase with one template of one vessel slot carrying one equipment slot.
pub fn create_simple_phase(vessel_kind: &str, equipment_kind: &str, strategies: Vec<StrategyDurations>) -> Phase {
    let strategy_names = (0..strategies.len()).map(|idx| Strategy { name: format!("strategy{idx}") }).collect();

    Phase {
        name: "phase".to_string(),
        requested_start: datetime(2000, 1, 1, 0),
        requirements: Requirements::default(),
        compatibility: CompatibilityRules::default(),
        cargo: CargoReservation::default(),
        templates: vec![template(
            "default",
            vec![vessel_slot(vessel_kind, 1)],
            vec![equipment_slot(equipment_kind, 1, 0)],
        )],
        strategies: strategy_names,
        durations: Arc::new(TabularDurations::new(strategies)),
    }
}

pub fn kind_rules(entries: Vec<(&str, Vec<Rule>)>) -> FxHashMap<String, Vec<Rule>> {
    entries.into_iter().map(|(kind, rules)| (kind.to_string(), rules)).collect()
}

/// Creates a solution from one vessel carrying one equipment at the given port.
pub fn create_solution(vessel: Vessel, equipment: Vec<Equipment>, port: Port) -> Solution {
    Solution {
        template_index: 0,
        vessels: vec![VesselAssignment { vessel: Arc::new(vessel), quantity: 1 }],
        equipment: equipment
            .into_iter()
            .map(|equipment| EquipmentAssignment { equipment: Arc::new(equipment), quantity: 1, vessel_slot: 0 })
            .collect(),
        port: Arc::new(port),
        schedule: None,
        cost: None,
    }
}
