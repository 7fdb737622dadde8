//! Specifies logic to write a project plan into json.

#[cfg(test)]
#[path = "../../tests/unit/format/plan_test.rs"]
mod plan_test;

use seaops_core::models::{Project as CoreProject, WindowStrategy};
use seaops_core::planning::{PhaseOutcome, PhasePlan, PhaseResult, ProjectPlan};
use seaops_core::prelude::Float;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter, Read, Write};
use time::PrimitiveDateTime;
use time::macros::format_description;

/// A terminal status of a phase.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PhaseStatus {
    /// The phase is planned.
    Planned,
    /// All combinations are pruned by matching rules.
    NoFeasibleCombination,
    /// No solution fits into weather windows.
    NoWeatherWindow,
}

/// A vessel assigned to a phase.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct VesselEntry {
    /// A vessel id.
    pub id: String,
    /// A vessel type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Amount of vessels.
    pub quantity: usize,
}

/// An equipment assigned to a phase.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentEntry {
    /// An equipment id.
    pub id: String,
    /// An equipment type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Amount of equipment items.
    pub quantity: usize,
    /// A vessel id which carries the equipment.
    pub carrier: Option<String>,
}

/// A schedule estimated for one year of the metocean series.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearEntry {
    /// A calendar year.
    pub year: i32,
    /// Start delay [h].
    pub start_delay: Float,
    /// Waiting time between windows [h].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiting_time: Option<Float>,
}

/// A schedule of a planned phase, all durations in hours.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// A requested start.
    pub requested_start: String,
    /// An estimated completion.
    pub completion: String,
    /// Preparation time in port.
    pub prep_time: Float,
    /// Time at sea.
    pub sea_time: Float,
    /// Transit time.
    pub transit_time: Float,
    /// Delay until the first usable window.
    pub start_delay: Float,
    /// Waiting time between windows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiting_time: Option<Float>,
    /// A window strategy: "whole" or "combined".
    pub window_strategy: String,
    /// Per year schedules the values are reduced from.
    pub years: Vec<YearEntry>,
    /// Searched years which cannot be placed with the window strategy.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub dropped_years: Vec<i32>,
}

/// A cost breakdown.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEntry {
    /// Vessel cost.
    pub vessels: Float,
    /// Equipment cost.
    pub equipment: Float,
    /// Port cost.
    pub port: Float,
    /// Fuel cost.
    pub fuel: Float,
    /// Total cost.
    pub total: Float,
}

/// A selected solution of a phase.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionEntry {
    /// A strategy name.
    pub strategy: String,
    /// A template name.
    pub template: String,
    /// Assigned vessels.
    pub vessels: Vec<VesselEntry>,
    /// Assigned equipment.
    pub equipment: Vec<EquipmentEntry>,
    /// A port id.
    pub port: String,
    /// A schedule.
    pub schedule: ScheduleEntry,
    /// A cost breakdown.
    pub cost: CostEntry,
    /// Amount of evaluated strategy and solution pairs.
    pub evaluated: usize,
    /// Amount of scheduled strategy and solution pairs.
    pub scheduled: usize,
}

/// A result of a phase.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseEntry {
    /// A phase name.
    pub name: String,
    /// A phase status.
    pub status: PhaseStatus,
    /// A selected solution, present only for planned phases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionEntry>,
    /// Reasons why the phase is not planned.
    #[serde(default)]
    pub reasons: Vec<String>,
    /// Missing data warnings.
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// A project plan.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Total cost of planned phases.
    pub total_cost: Float,
    /// Phase results in project order.
    pub phases: Vec<PhaseEntry>,
}

/// Writes a project plan as json.
pub trait JsonPlan<W: Write> {
    /// Writes the plan into the writer.
    fn write_json(&self, project: &CoreProject, writer: BufWriter<W>) -> Result<(), String>;
}

impl<W: Write> JsonPlan<W> for ProjectPlan {
    fn write_json(&self, project: &CoreProject, writer: BufWriter<W>) -> Result<(), String> {
        serialize_plan(writer, &create_plan(project, self)).map_err(|err| format!("cannot write plan: '{err}'"))
    }
}

/// Creates a serializable plan. Phase results are expected in project order.
pub fn create_plan(project: &CoreProject, plan: &ProjectPlan) -> Plan {
    let phases = plan
        .phases
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            let template = |plan: &PhasePlan| {
                project
                    .phases
                    .get(idx)
                    .and_then(|phase| phase.templates.get(plan.solution.template_index))
                    .map(|template| template.name.clone())
                    .unwrap_or_default()
            };

            create_phase_entry(result, template)
        })
        .collect();

    Plan { total_cost: plan.total_cost(), phases }
}

/// Serializes plan in json format.
pub fn serialize_plan<W: Write>(writer: BufWriter<W>, plan: &Plan) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(writer, plan)
}

/// Deserializes plan from json format.
pub fn deserialize_plan<R: Read>(reader: BufReader<R>) -> Result<Plan, serde_json::Error> {
    serde_json::from_reader(reader)
}

fn create_phase_entry(result: &PhaseResult, template: impl Fn(&PhasePlan) -> String) -> PhaseEntry {
    let warnings = result.diagnostics.warnings().map(|warning| warning.to_string()).collect();

    let (status, selection, reasons) = match &result.outcome {
        PhaseOutcome::Planned(plan) => {
            let plan = plan.as_ref();
            (PhaseStatus::Planned, Some(create_selection(plan, template(plan))), vec![])
        }
        PhaseOutcome::NoFeasibleCombination(report) => {
            let reasons = report
                .filters
                .iter()
                .filter(|filter| filter.kept < filter.total)
                .map(|filter| {
                    let rules = filter
                        .rejections
                        .iter()
                        .map(|rejection| format!("'{}' rejected {}", rejection.rule, rejection.count))
                        .collect::<Vec<_>>();
                    format!("{}: kept {} of {}, {}", filter.kind, filter.kept, filter.total, rules.join(", "))
                })
                .chain(
                    report
                        .discarded_templates
                        .iter()
                        .map(|discard| format!("template '{}' discarded: {}", discard.template, discard.reason)),
                )
                .chain(
                    report
                        .rejections
                        .iter()
                        .map(|rejection| format!("combination rule '{}' rejected {}", rejection.rule, rejection.count)),
                )
                .chain(std::iter::once(format!("matched {} of {} combinations", report.matched, report.enumerated)))
                .collect();

            (PhaseStatus::NoFeasibleCombination, None, reasons)
        }
        PhaseOutcome::NoWeatherWindow(report) => {
            let reasons = std::iter::once(format!(
                "{} of {} matched solutions cannot be scheduled",
                report.unscheduled, report.matched
            ))
            .chain(report.estimation_errors.iter().map(|err| format!("cannot estimate durations for {err}")))
            .chain(report.failures.iter().map(|failure| failure.to_string()))
            .collect();

            (PhaseStatus::NoWeatherWindow, None, reasons)
        }
    };

    PhaseEntry { name: result.name.clone(), status, selection, reasons, warnings }
}

fn create_selection(plan: &PhasePlan, template: String) -> SelectionEntry {
    let solution = &plan.solution;
    let schedule = &plan.schedule;

    let vessels = solution
        .vessels
        .iter()
        .map(|assignment| VesselEntry {
            id: assignment.vessel.id.clone(),
            kind: assignment.vessel.kind.clone(),
            quantity: assignment.quantity,
        })
        .collect();

    let equipment = solution
        .equipment
        .iter()
        .map(|assignment| EquipmentEntry {
            id: assignment.equipment.id.clone(),
            kind: assignment.equipment.kind.clone(),
            quantity: assignment.quantity,
            carrier: solution.carrier_of(assignment).map(|carrier| carrier.vessel.id.clone()),
        })
        .collect();

    let years = schedule
        .years
        .iter()
        .map(|year| YearEntry { year: year.year, start_delay: year.start_delay, waiting_time: year.waiting_time })
        .collect();

    SelectionEntry {
        strategy: plan.strategy_name.clone(),
        template,
        vessels,
        equipment,
        port: solution.port.id.clone(),
        schedule: ScheduleEntry {
            requested_start: format_datetime(plan.requested_start),
            completion: format_datetime(plan.completion()),
            prep_time: schedule.prep_time,
            sea_time: schedule.sea_time,
            transit_time: schedule.transit_time,
            start_delay: schedule.start_delay,
            waiting_time: schedule.waiting_time,
            window_strategy: match schedule.strategy {
                WindowStrategy::Whole => "whole".to_string(),
                WindowStrategy::Combined => "combined".to_string(),
            },
            years,
            dropped_years: schedule.dropped_years.clone(),
        },
        cost: CostEntry {
            vessels: plan.cost.vessel_cost,
            equipment: plan.cost.equipment_cost,
            port: plan.cost.port_cost,
            fuel: plan.cost.fuel_cost,
            total: plan.cost.total_cost,
        },
        evaluated: plan.evaluated,
        scheduled: plan.scheduled,
    }
}

fn format_datetime(datetime: PrimitiveDateTime) -> String {
    datetime
        .format(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"))
        .unwrap_or_else(|_| datetime.to_string())
}
