#[cfg(test)]
#[path = "../../tests/unit/models/catalog_test.rs"]
mod catalog_test;

use crate::models::common::{Float, Value};
use crate::models::{Field, FieldSource, Olc, Subject};
use std::sync::Arc;

attribute_record! {
    /// Numeric attributes of a vessel, one row of a vessel database.
    VesselSpecs,
    /// Names a vessel attribute.
    VesselAttr {
        /// Overall length [m].
        length => Length: "length",
        /// Beam [m].
        beam => Beam: "beam",
        /// Maximum draft [m].
        draft => Draft: "draft",
        /// Free deck space [m^2], remaining after the primary cargo reservation.
        deck_space => DeckSpace: "deck_space",
        /// Maximum cargo [t], remaining after the primary cargo reservation.
        max_cargo => MaxCargo: "max_cargo",
        /// Deck loading [t/m^2], remaining after the primary cargo reservation.
        deck_loading => DeckLoading: "deck_loading",
        /// Main crane capacity [t].
        crane_capacity => CraneCapacity: "crane_capacity",
        /// Bollard pull [t].
        bollard_pull => BollardPull: "bollard_pull",
        /// Dynamic positioning class.
        dp_class => DpClass: "dp_class",
        /// Transit speed [knots].
        transit_speed => TransitSpeed: "transit_speed",
        /// Fuel consumption per hour of transit.
        fuel_consumption => FuelConsumption: "fuel_consumption",
        /// Minimum day rate.
        day_rate_min => DayRateMin: "day_rate_min",
        /// Maximum day rate.
        day_rate_max => DayRateMax: "day_rate_max",
        /// Mobilisation percentage charged over preparation time.
        mobilisation_pct => MobilisationPct: "mobilisation_pct",
        /// Jacking capability flag, 1 when the vessel is a jack-up.
        jacking_capability => JackingCapability: "jacking_capability",
        /// Maximum jacking depth [m].
        jacking_depth => JackingDepth: "jacking_depth",
        /// Significant wave height limit [m].
        max_hs => MaxHs: "max_hs",
        /// Peak wave period limit [s].
        max_tp => MaxTp: "max_tp",
        /// Wind speed limit [m/s].
        max_ws => MaxWs: "max_ws",
        /// Current speed limit [m/s].
        max_cs => MaxCs: "max_cs",
    }
}

attribute_record! {
    /// Numeric attributes of an equipment item.
    EquipmentSpecs,
    /// Names an equipment attribute.
    EquipmentAttr {
        /// Length [m].
        length => Length: "length",
        /// Width [m].
        width => Width: "width",
        /// Height [m].
        height => Height: "height",
        /// Mass [t].
        mass => Mass: "mass",
        /// Extra deck footprint needed for operation [m^2].
        footprint => Footprint: "footprint",
        /// Depth rating [m].
        depth_rating => DepthRating: "depth_rating",
        /// Lifting or operating capacity [t].
        capacity => Capacity: "capacity",
        /// Day rate.
        day_rate => DayRate: "day_rate",
        /// Flat cost per unit, disposable items are charged once instead of per day.
        cost_per_unit => CostPerUnit: "cost_per_unit",
        /// Significant wave height limit [m].
        max_hs => MaxHs: "max_hs",
        /// Peak wave period limit [s].
        max_tp => MaxTp: "max_tp",
        /// Wind speed limit [m/s].
        max_ws => MaxWs: "max_ws",
        /// Current speed limit [m/s].
        max_cs => MaxCs: "max_cs",
    }
}

attribute_record! {
    /// Numeric attributes of a port terminal.
    PortSpecs,
    /// Names a port attribute.
    PortAttr {
        /// Entrance width [m].
        entrance_width => EntranceWidth: "entrance_width",
        /// Terminal length [m].
        terminal_length => TerminalLength: "terminal_length",
        /// Terminal draught [m].
        terminal_draught => TerminalDraught: "terminal_draught",
        /// Terminal area [m^2].
        terminal_area => TerminalArea: "terminal_area",
        /// Terminal load bearing [t/m^2].
        terminal_load_bearing => TerminalLoadBearing: "terminal_load_bearing",
        /// Crane capacity [t].
        crane_capacity => CraneCapacity: "crane_capacity",
        /// Jacking capability flag, 1 when jack-up vessels can operate at the terminal.
        jacking_capability => JackingCapability: "jacking_capability",
    }
}

/// An entity which can be picked to fill a slot of a combination.
pub trait Candidate: FieldSource + Send + Sync {
    /// Returns an unique id of the candidate.
    fn id(&self) -> &str;

    /// Returns a kind of the candidate, e.g. vessel or equipment type.
    fn kind(&self) -> &str;
}

/// A vessel candidate.
#[derive(Clone, Debug, PartialEq)]
pub struct Vessel {
    /// An unique vessel id.
    pub id: String,
    /// A vessel type, e.g. "jack-up vessel".
    pub kind: String,
    /// Numeric attributes.
    pub specs: VesselSpecs,
}

impl Vessel {
    /// Creates a new instance of `Vessel`.
    pub fn new(id: &str, kind: &str, specs: VesselSpecs) -> Self {
        Self { id: id.to_string(), kind: kind.to_string(), specs }
    }

    /// Returns operational limit conditions of the vessel.
    pub fn olc(&self) -> Olc {
        let specs = &self.specs;
        Olc::from_optional(specs.max_hs, specs.max_tp, specs.max_ws, specs.max_cs)
    }

    /// Returns a mean day rate when at least one of min/max rates is known.
    pub fn mean_day_rate(&self) -> Option<Float> {
        match (self.specs.day_rate_min, self.specs.day_rate_max) {
            (Some(min), Some(max)) => Some((min + max) / 2.),
            (Some(rate), None) | (None, Some(rate)) => Some(rate),
            (None, None) => None,
        }
    }
}

impl FieldSource for Vessel {
    fn resolve(&self, field: &Field) -> Option<Value> {
        match field {
            Field::Vessel(attr) => self.specs.get(*attr).map(Value::Number),
            Field::Kind(Subject::Vessel) => Some(Value::Text(self.kind.clone())),
            _ => None,
        }
    }
}

impl Candidate for Vessel {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn kind(&self) -> &str {
        self.kind.as_str()
    }
}

/// An equipment candidate.
#[derive(Clone, Debug, PartialEq)]
pub struct Equipment {
    /// An unique equipment id.
    pub id: String,
    /// An equipment type, e.g. "rov" or "piling".
    pub kind: String,
    /// Numeric attributes.
    pub specs: EquipmentSpecs,
}

impl Equipment {
    /// Creates a new instance of `Equipment`.
    pub fn new(id: &str, kind: &str, specs: EquipmentSpecs) -> Self {
        Self { id: id.to_string(), kind: kind.to_string(), specs }
    }

    /// Returns operational limit conditions of the equipment.
    pub fn olc(&self) -> Olc {
        let specs = &self.specs;
        Olc::from_optional(specs.max_hs, specs.max_tp, specs.max_ws, specs.max_cs)
    }
}

impl FieldSource for Equipment {
    fn resolve(&self, field: &Field) -> Option<Value> {
        match field {
            Field::Equipment(attr) => self.specs.get(*attr).map(Value::Number),
            Field::Kind(Subject::Equipment) => Some(Value::Text(self.kind.clone())),
            _ => None,
        }
    }
}

impl Candidate for Equipment {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn kind(&self) -> &str {
        self.kind.as_str()
    }
}

/// A port terminal candidate.
#[derive(Clone, Debug, PartialEq)]
pub struct Port {
    /// An unique port id.
    pub id: String,
    /// Numeric attributes.
    pub specs: PortSpecs,
}

impl Port {
    /// Creates a new instance of `Port`.
    pub fn new(id: &str, specs: PortSpecs) -> Self {
        Self { id: id.to_string(), specs }
    }
}

impl FieldSource for Port {
    fn resolve(&self, field: &Field) -> Option<Value> {
        match field {
            Field::Port(attr) => self.specs.get(*attr).map(Value::Number),
            Field::Kind(Subject::Port) => Some(Value::Text(self.id.clone())),
            _ => None,
        }
    }
}

impl Candidate for Port {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn kind(&self) -> &str {
        "port"
    }
}

/// Keeps all candidates known to the planner: an external vessel, equipment and port database.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    /// Vessel candidates.
    pub vessels: Vec<Arc<Vessel>>,
    /// Equipment candidates.
    pub equipment: Vec<Arc<Equipment>>,
    /// Port candidates.
    pub ports: Vec<Arc<Port>>,
}

impl Catalog {
    /// Creates a new instance of `Catalog`.
    pub fn new(vessels: Vec<Vessel>, equipment: Vec<Equipment>, ports: Vec<Port>) -> Self {
        Self {
            vessels: vessels.into_iter().map(Arc::new).collect(),
            equipment: equipment.into_iter().map(Arc::new).collect(),
            ports: ports.into_iter().map(Arc::new).collect(),
        }
    }

    /// Returns vessels of the given kind keeping catalog order.
    pub fn vessels_of(&self, kind: &str) -> Vec<Arc<Vessel>> {
        self.vessels.iter().filter(|vessel| vessel.kind == kind).cloned().collect()
    }

    /// Returns equipment of the given kind keeping catalog order.
    pub fn equipment_of(&self, kind: &str) -> Vec<Arc<Equipment>> {
        self.equipment.iter().filter(|equipment| equipment.kind == kind).cloned().collect()
    }
}
