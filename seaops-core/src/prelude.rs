//! This module reimports commonly used types.

pub use crate::models::common::{Cost, Duration, Float, Timestamp, Value};
pub use crate::models::{
    CargoReservation, Catalog, CombinationTemplate, CompatibilityRules, CostBreakdown, Equipment, EquipmentAttr,
    EquipmentSlot, EquipmentSpecs, Olc, Phase, Port, PortAttr, PortSpecs, Project, Requirements, Rule, ScheduleResult,
    Solution, Strategy, Token, Vessel, VesselAttr, VesselSlot, VesselSpecs, WeatherRecord, WeatherSeries, WeatherWindow,
};

pub use crate::costing::CostSettings;
pub use crate::planning::{PhaseOutcome, PhaseResult, Planner, PlannerConfig, ProjectPlan};
pub use crate::scheduling::{
    DelayStatistic, DurationEstimator, SeaLeg, StrategyDurations, TabularDurations, WindowCache,
};

pub use crate::utils::{Environment, GenericError, GenericResult, InfoLogger, Parallelism, TimeQuota};
