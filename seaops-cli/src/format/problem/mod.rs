//! Specifies logic to read a planning problem from json input.

use super::{FormatError, PROBLEM_FORMAT_CODE};
use seaops_core::models::Project as CoreProject;
use seaops_core::prelude::Float;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{BufReader, Read};

mod reader;
pub use self::reader::map_to_project;

// region Catalog

/// A vessel record of the catalog.
#[derive(Clone, Deserialize, Serialize, Debug)]
pub struct VesselRecord {
    /// An unique vessel id.
    pub id: String,
    /// A vessel type, e.g. "jack-up vessel".
    #[serde(rename = "type")]
    pub kind: String,
    /// Numeric attributes keyed by attribute name, e.g. "deck_space".
    #[serde(default)]
    pub specs: BTreeMap<String, Float>,
}

/// An equipment record of the catalog.
#[derive(Clone, Deserialize, Serialize, Debug)]
pub struct EquipmentRecord {
    /// An unique equipment id.
    pub id: String,
    /// An equipment type, e.g. "piling".
    #[serde(rename = "type")]
    pub kind: String,
    /// Numeric attributes keyed by attribute name, e.g. "mass".
    #[serde(default)]
    pub specs: BTreeMap<String, Float>,
}

/// A port record of the catalog.
#[derive(Clone, Deserialize, Serialize, Debug)]
pub struct PortRecord {
    /// An unique port id.
    pub id: String,
    /// Numeric attributes keyed by attribute name, e.g. "terminal_area".
    #[serde(default)]
    pub specs: BTreeMap<String, Float>,
}

/// A candidate database.
#[derive(Clone, Deserialize, Serialize, Debug)]
pub struct Catalog {
    /// Vessel records.
    pub vessels: Vec<VesselRecord>,
    /// Equipment records.
    #[serde(default)]
    pub equipment: Vec<EquipmentRecord>,
    /// Port records.
    pub ports: Vec<PortRecord>,
}

// endregion

// region Rules

/// A token of a rule chain: either a number or a word such as "vessel.deck_space" or "sup".
#[derive(Clone, Deserialize, Serialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum RuleToken {
    /// A numeric constant.
    Number(Float),
    /// A field reference, an operator word or a textual constant.
    Text(String),
}

/// A rule chain, e.g. `["equipment.mass", "inf", "vessel.crane_capacity"]`.
pub type RuleChain = Vec<RuleToken>;

/// Per candidate threshold rules.
#[derive(Clone, Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    /// Vessel rules keyed by vessel type.
    #[serde(default)]
    pub vessels: BTreeMap<String, Vec<RuleChain>>,
    /// Equipment rules keyed by equipment type.
    #[serde(default)]
    pub equipment: BTreeMap<String, Vec<RuleChain>>,
    /// Port rules.
    #[serde(default)]
    pub ports: Vec<RuleChain>,
}

/// Rules between candidates.
#[derive(Clone, Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Compatibility {
    /// Vessel-equipment rules keyed by equipment type.
    #[serde(default)]
    pub vessel_equipment: BTreeMap<String, Vec<RuleChain>>,
    /// Port-vessel rules.
    #[serde(default)]
    pub port_vessel: Vec<RuleChain>,
}

// endregion

// region Phase

/// Capacity taken by the primary cargo of a phase.
#[derive(Clone, Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cargo {
    /// Deck area [m^2].
    pub deck_space: Option<Float>,
    /// Cargo mass [t].
    pub max_cargo: Option<Float>,
    /// Deck loading [t/m^2].
    pub deck_loading: Option<Float>,
}

/// A vessel slot of a template.
#[derive(Clone, Deserialize, Serialize, Debug)]
pub struct VesselSlot {
    /// A vessel type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Amount of vessels, default is 1.
    pub quantity: Option<usize>,
}

/// An equipment slot of a template.
#[derive(Clone, Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentSlot {
    /// An equipment type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Amount of equipment items, default is 1.
    pub quantity: Option<usize>,
    /// An index of the vessel slot which carries the equipment, default is 0.
    pub vessel_slot: Option<usize>,
}

/// A combination template.
#[derive(Clone, Deserialize, Serialize, Debug)]
pub struct Template {
    /// A template name.
    pub name: String,
    /// Vessel slots.
    pub vessels: Vec<VesselSlot>,
    /// Equipment slots.
    #[serde(default)]
    pub equipment: Vec<EquipmentSlot>,
}

/// Operational limit conditions, absent or zero values are inactive.
#[derive(Clone, Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Limits {
    /// Significant wave height limit [m].
    pub max_hs: Option<Float>,
    /// Peak wave period limit [s].
    pub max_tp: Option<Float>,
    /// Wind speed limit [m/s].
    pub max_ws: Option<Float>,
    /// Current speed limit [m/s].
    pub max_cs: Option<Float>,
}

/// A sea leg of an operation.
#[derive(Clone, Deserialize, Serialize, Debug)]
pub struct SeaLeg {
    /// A leg name.
    pub name: String,
    /// Duration [h].
    pub duration: Float,
    /// Leg limits.
    #[serde(default)]
    pub limits: Limits,
}

/// A sequencing strategy with its precomputed durations.
#[derive(Clone, Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    /// A strategy name.
    pub name: String,
    /// Preparation time in port [h].
    #[serde(default)]
    pub prep_time: Float,
    /// Sea legs.
    pub legs: Vec<SeaLeg>,
    /// Transit distance [km], default is 0.
    #[serde(default)]
    pub transit_distance: Float,
}

/// A phase of the project.
#[derive(Clone, Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    /// A phase name.
    pub name: String,
    /// Requested start in `YYYY-MM-DDTHH:MM:SS` form.
    pub requested_start: String,
    /// Candidate requirements.
    #[serde(default)]
    pub requirements: Requirements,
    /// Compatibility rules.
    #[serde(default)]
    pub compatibility: Compatibility,
    /// Cargo reservation.
    #[serde(default)]
    pub cargo: Cargo,
    /// Combination templates.
    pub templates: Vec<Template>,
    /// Sequencing strategies.
    pub strategies: Vec<Strategy>,
}

// endregion

/// A planning problem.
#[derive(Clone, Deserialize, Serialize, Debug)]
pub struct Problem {
    /// A candidate database.
    pub catalog: Catalog,
    /// Project phases.
    pub phases: Vec<Phase>,
}

/// Reads a project from json input.
pub trait JsonProblem {
    /// Reads a project with all its rules resolved.
    fn read_json(self) -> Result<CoreProject, Vec<FormatError>>;
}

impl<R: Read> JsonProblem for BufReader<R> {
    fn read_json(self) -> Result<CoreProject, Vec<FormatError>> {
        deserialize_problem(self).and_then(map_to_project)
    }
}

impl JsonProblem for Problem {
    fn read_json(self) -> Result<CoreProject, Vec<FormatError>> {
        map_to_project(self)
    }
}

/// Deserializes a problem in json format from `BufReader`.
pub fn deserialize_problem<R: Read>(reader: BufReader<R>) -> Result<Problem, Vec<FormatError>> {
    serde_json::from_reader(reader).map_err(|err| {
        vec![FormatError::new_with_details(
            PROBLEM_FORMAT_CODE.to_string(),
            "cannot deserialize problem".to_string(),
            "check input json: ensure valid json is used with required fields".to_string(),
            format!("{err}"),
        )]
    })
}
