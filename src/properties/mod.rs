//! Gas-property collaborator: interpolation tables and species packs.
//!
//! In the host environment the anode and cathode flow networks publish their
//! domain constants (specific gas constants, enthalpy/viscosity/saturation
//! tables) through observation ports. This module is the standalone stand-in:
//! every property the stack model consumes is looked up here, never hardcoded
//! in the physics.

mod species;
mod table;

pub use species::{GasPropertyPack, WaterPropertyPack};
pub use table::{Extrapolation, PropertyTable, TableError};

use serde::{Deserialize, Serialize};

/// The full property set the stack model is constructed with: one pack per
/// reactant gas plus the water pack shared by both electrodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackProperties {
    /// Anode reactant (hydrogen)
    pub hydrogen: GasPropertyPack,
    /// Cathode reactant (oxygen)
    pub oxygen: GasPropertyPack,
    /// Water, shared by both electrodes
    pub water: WaterPropertyPack,
}

impl StackProperties {
    /// Check the shape of every contained table.
    pub fn validate(&self) -> Result<(), TableError> {
        self.hydrogen.validate()?;
        self.oxygen.validate()?;
        self.water.validate()
    }
}

impl Default for StackProperties {
    fn default() -> Self {
        Self {
            hydrogen: GasPropertyPack::hydrogen(),
            oxygen: GasPropertyPack::oxygen(),
            water: WaterPropertyPack::standard(),
        }
    }
}
