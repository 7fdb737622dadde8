#[cfg(test)]
#[path = "../../tests/unit/models/template_test.rs"]
mod template_test;

use crate::utils::GenericResult;

/// A vessel slot of a combination template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VesselSlot {
    /// A vessel kind which fills the slot.
    pub kind: String,
    /// Amount of vessels of the chosen candidate.
    pub quantity: usize,
}

/// An equipment slot bound to one of template's vessel slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquipmentSlot {
    /// An equipment kind which fills the slot.
    pub kind: String,
    /// Amount of equipment items of the chosen candidate.
    pub quantity: usize,
    /// An index of the vessel slot which carries the equipment.
    pub vessel_slot: usize,
}

/// Specifies which vessels and attached equipment can jointly execute a phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombinationTemplate {
    /// A template name used in reports.
    pub name: String,
    /// Vessel slots in enumeration order.
    pub vessels: Vec<VesselSlot>,
    /// Equipment slots in enumeration order.
    pub equipment: Vec<EquipmentSlot>,
}

impl CombinationTemplate {
    /// Creates a new instance of `CombinationTemplate` checking that every equipment slot
    /// references an existing vessel slot.
    pub fn new(name: &str, vessels: Vec<VesselSlot>, equipment: Vec<EquipmentSlot>) -> GenericResult<Self> {
        if vessels.is_empty() {
            return Err(format!("template '{name}' has no vessel slots").into());
        }

        if let Some(slot) = vessels.iter().find(|slot| slot.quantity == 0) {
            return Err(format!("template '{name}' has zero quantity for vessel slot '{}'", slot.kind).into());
        }

        if let Some(slot) = equipment.iter().find(|slot| slot.quantity == 0) {
            return Err(format!("template '{name}' has zero quantity for equipment slot '{}'", slot.kind).into());
        }

        if let Some(slot) = equipment.iter().find(|slot| slot.vessel_slot >= vessels.len()) {
            return Err(format!(
                "template '{name}' binds equipment '{}' to unknown vessel slot {}, vessel slots: {}",
                slot.kind,
                slot.vessel_slot,
                vessels.len()
            )
            .into());
        }

        Ok(Self { name: name.to_string(), vessels, equipment })
    }
}
