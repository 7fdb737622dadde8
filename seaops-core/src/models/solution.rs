use crate::models::common::{Cost, Duration};
use crate::models::{Equipment, Olc, Port, Vessel};
use std::sync::Arc;

/// A vessel candidate chosen for a vessel slot.
#[derive(Clone, Debug)]
pub struct VesselAssignment {
    /// A chosen vessel.
    pub vessel: Arc<Vessel>,
    /// Amount of vessels.
    pub quantity: usize,
}

/// An equipment candidate chosen for an equipment slot.
#[derive(Clone, Debug)]
pub struct EquipmentAssignment {
    /// A chosen equipment.
    pub equipment: Arc<Equipment>,
    /// Amount of equipment items.
    pub quantity: usize,
    /// An index of the vessel assignment which carries the equipment.
    pub vessel_slot: usize,
}

/// One concrete assignment of vessels, equipment and port to a phase.
#[derive(Clone, Debug)]
pub struct Solution {
    /// An index of the combination template the solution is built from.
    pub template_index: usize,
    /// Vessel assignments in template slot order.
    pub vessels: Vec<VesselAssignment>,
    /// Equipment assignments in template slot order.
    pub equipment: Vec<EquipmentAssignment>,
    /// A chosen port.
    pub port: Arc<Port>,
    /// A schedule, set once the solution is scheduled.
    pub schedule: Option<ScheduleResult>,
    /// A cost, set once the solution is costed.
    pub cost: Option<CostBreakdown>,
}

impl Solution {
    /// Returns a vessel bound to the given equipment assignment.
    pub fn carrier_of(&self, assignment: &EquipmentAssignment) -> Option<&VesselAssignment> {
        self.vessels.get(assignment.vessel_slot)
    }
}

/// Durations of one operation sequence as estimated for a solution.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationTimes {
    /// Preparation time at port [h].
    pub prep_time: Duration,
    /// Weather sensitive time at sea [h].
    pub sea_time: Duration,
    /// Transit time [h].
    pub transit_time: Duration,
    /// Operational limits of each sea leg.
    pub leg_olcs: Vec<Olc>,
    /// Operational limits which gate the whole sea time.
    pub olc: Olc,
}

/// Specifies which weather window search produced a schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowStrategy {
    /// The whole operation fits one window.
    Whole,
    /// The operation spans several windows with waiting in between.
    Combined,
}

/// A schedule estimated for one calendar year of the weather series.
#[derive(Clone, Debug, PartialEq)]
pub struct YearlySchedule {
    /// A calendar year the requested start was mapped into.
    pub year: i32,
    /// Delay from the mapped requested start to the first usable window [h].
    pub start_delay: Duration,
    /// Sum of gaps bridged between windows [h], absent for whole window schedules.
    pub waiting_time: Option<Duration>,
}

/// A schedule of a solution.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleResult {
    /// Preparation time [h].
    pub prep_time: Duration,
    /// Sea time [h].
    pub sea_time: Duration,
    /// Transit time [h].
    pub transit_time: Duration,
    /// Delay before the operation can start [h].
    pub start_delay: Duration,
    /// Waiting time between windows [h], absent when the operation fits one window.
    pub waiting_time: Option<Duration>,
    /// Operational limits which gated each sea leg.
    pub leg_olcs: Vec<Olc>,
    /// A window search strategy which produced the schedule.
    pub strategy: WindowStrategy,
    /// Per year schedules the result is reduced from.
    pub years: Vec<YearlySchedule>,
    /// Years of the series which cannot be placed with the strategy and are not reduced.
    pub dropped_years: Vec<i32>,
}

impl ScheduleResult {
    /// Returns total time from the requested start until the operation is complete [h].
    pub fn total_time(&self) -> Duration {
        self.prep_time + self.transit_time + self.start_delay + self.sea_time + self.waiting_time.unwrap_or(0.)
    }
}

/// A cost breakdown of a solution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CostBreakdown {
    /// Vessel charter cost.
    pub vessel_cost: Cost,
    /// Equipment cost.
    pub equipment_cost: Cost,
    /// Port cost.
    pub port_cost: Cost,
    /// Fuel cost.
    pub fuel_cost: Cost,
    /// Total cost.
    pub total_cost: Cost,
}

impl CostBreakdown {
    /// Creates a new instance of `CostBreakdown` calculating total cost.
    pub fn new(vessel_cost: Cost, equipment_cost: Cost, port_cost: Cost, fuel_cost: Cost) -> Self {
        let total_cost = vessel_cost + equipment_cost + port_cost + fuel_cost;

        Self { vessel_cost, equipment_cost, port_cost, fuel_cost, total_cost }
    }
}
