use crate::models::common::Float;
use crate::models::{Catalog, CombinationTemplate, Rule, VesselAttr};
use crate::scheduling::DurationEstimator;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use time::PrimitiveDateTime;

/// Capacity occupied on a vessel by the primary cargo of the phase. Vessel deck space, max cargo
/// and deck loading are remaining capacities, so these amounts are added to the consuming side of
/// rules checked against them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CargoReservation {
    /// Deck area [m^2].
    pub deck_space: Float,
    /// Cargo mass [t].
    pub max_cargo: Float,
    /// Deck loading [t/m^2].
    pub deck_loading: Float,
}

impl CargoReservation {
    /// Returns reserved amount for a vessel capacity attribute.
    pub fn amount_for(&self, attr: VesselAttr) -> Option<Float> {
        match attr {
            VesselAttr::DeckSpace => Some(self.deck_space),
            VesselAttr::MaxCargo => Some(self.max_cargo),
            VesselAttr::DeckLoading => Some(self.deck_loading),
            _ => None,
        }
    }
}

/// Per candidate threshold rules produced by external requirement formulas.
#[derive(Clone, Debug, Default)]
pub struct Requirements {
    /// Rules for vessels keyed by vessel kind.
    pub vessels: FxHashMap<String, Vec<Rule>>,
    /// Rules for equipment keyed by equipment kind.
    pub equipment: FxHashMap<String, Vec<Rule>>,
    /// Rules for ports.
    pub ports: Vec<Rule>,
}

/// Rules which check candidates against each other.
#[derive(Clone, Debug, Default)]
pub struct CompatibilityRules {
    /// Vessel-equipment rules keyed by equipment kind, checked for every equipment and its carrier.
    pub vessel_equipment: FxHashMap<String, Vec<Rule>>,
    /// Port-vessel rules, checked for every vessel and the chosen port.
    pub port_vessel: Vec<Rule>,
}

/// A sequencing strategy of a phase, e.g. transporting all cargo at once or in several trips.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Strategy {
    /// A strategy name.
    pub name: String,
}

/// A phase of an offshore project: a single operation to be matched, scheduled and costed.
#[derive(Clone)]
pub struct Phase {
    /// A phase name.
    pub name: String,
    /// A requested start date time. Only month, day and hour are used as it is mapped into
    /// every year of the weather series.
    pub requested_start: PrimitiveDateTime,
    /// Candidate requirements.
    pub requirements: Requirements,
    /// Compatibility rules.
    pub compatibility: CompatibilityRules,
    /// Primary cargo reservation.
    pub cargo: CargoReservation,
    /// Combination templates.
    pub templates: Vec<CombinationTemplate>,
    /// Sequencing strategies.
    pub strategies: Vec<Strategy>,
    /// Estimates operation durations of a solution for every strategy.
    pub durations: Arc<dyn DurationEstimator>,
}

/// A project: a candidate catalog and phases to plan.
#[derive(Clone)]
pub struct Project {
    /// Known candidates.
    pub catalog: Catalog,
    /// Phases in planning order.
    pub phases: Vec<Phase>,
}
