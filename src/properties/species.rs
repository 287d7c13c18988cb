//! Species property packs with literature-sourced default tables.
//!
//! Each pack mirrors the constant tables a flow-domain observation port
//! publishes: a specific gas constant plus temperature-indexed property
//! tables. Defaults cover 273.15–373.15 K, the validated operating range of
//! the stack model.
//!
//! Sources:
//! - Specific gas constants and enthalpies: NIST-JANAF thermochemical tables
//! - Water saturation pressure: Wagner & Pruss, J Phys Chem Ref Data 2002
//! - Liquid water viscosity and latent heat: IAPWS correlations

use serde::{Deserialize, Serialize};

use super::table::{Extrapolation, PropertyTable, TableError};

/// Shared temperature grid for the default tables (K)
const TEMPERATURE_GRID_K: [f64; 6] = [273.15, 293.15, 313.15, 333.15, 353.15, 373.15];

fn default_table(values: [f64; 6]) -> PropertyTable {
    PropertyTable {
        breakpoints_K: TEMPERATURE_GRID_K.to_vec(),
        values: values.to_vec(),
        extrapolation: Extrapolation::Linear,
    }
}

/// Property pack for a dry reactant gas (H2 or O2).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GasPropertyPack {
    /// Specific gas constant (J/(kg·K))
    pub specific_gas_constant_J_per_kgK: f64,
    /// Specific enthalpy vs temperature (J/kg), datum at 273.15 K
    pub enthalpy_J_per_kg: PropertyTable,
}

impl GasPropertyPack {
    /// Hydrogen defaults.
    /// R = 4124.2 J/(kg·K); cp ≈ 14.3 kJ/(kg·K) over the grid.
    pub fn hydrogen() -> Self {
        Self {
            specific_gas_constant_J_per_kgK: 4124.2,
            enthalpy_J_per_kg: default_table([
                0.0, 285_900.0, 572_200.0, 859_200.0, 1_147_000.0, 1_435_600.0,
            ]),
        }
    }

    /// Oxygen defaults.
    /// R = 259.84 J/(kg·K); cp ≈ 0.92 kJ/(kg·K) over the grid.
    pub fn oxygen() -> Self {
        Self {
            specific_gas_constant_J_per_kgK: 259.84,
            enthalpy_J_per_kg: default_table([
                0.0, 18_370.0, 36_820.0, 55_350.0, 73_960.0, 92_650.0,
            ]),
        }
    }

    /// Check the shape of every contained table.
    pub fn validate(&self) -> Result<(), TableError> {
        self.enthalpy_J_per_kg.validate()
    }
}

/// Property pack for water: vapor enthalpy plus the condensed-phase data the
/// membrane transport and energy balance need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterPropertyPack {
    /// Specific gas constant of water vapor (J/(kg·K))
    pub specific_gas_constant_J_per_kgK: f64,
    /// Vapor specific enthalpy vs temperature (J/kg), datum at 273.15 K
    pub vapor_enthalpy_J_per_kg: PropertyTable,
    /// Latent heat of vaporization vs temperature (J/kg)
    pub latent_heat_J_per_kg: PropertyTable,
    /// Liquid dynamic viscosity vs temperature (Pa·s)
    pub liquid_viscosity_Pa_s: PropertyTable,
    /// Natural log of saturation pressure vs temperature, ln(Pa)
    pub ln_saturation_pressure: PropertyTable,
}

impl WaterPropertyPack {
    /// Standard-water defaults. R = 461.52 J/(kg·K).
    pub fn standard() -> Self {
        Self {
            specific_gas_constant_J_per_kgK: 461.52,
            vapor_enthalpy_J_per_kg: default_table([
                0.0, 37_330.0, 74_740.0, 112_240.0, 149_830.0, 187_530.0,
            ]),
            latent_heat_J_per_kg: default_table([
                2.5009e6, 2.4535e6, 2.4062e6, 2.3580e6, 2.3082e6, 2.2564e6,
            ]),
            liquid_viscosity_Pa_s: default_table([
                1.792e-3, 1.002e-3, 6.53e-4, 4.67e-4, 3.55e-4, 2.82e-4,
            ]),
            // ln of [611.2, 2339.3, 7384.9, 19946, 47414, 101325] Pa
            ln_saturation_pressure: default_table([
                6.4158, 7.7575, 8.9072, 9.9008, 10.7668, 11.5261,
            ]),
        }
    }

    /// Saturation pressure (Pa) at a temperature.
    pub fn saturation_pressure_Pa(&self, temperature_K: f64) -> f64 {
        self.ln_saturation_pressure.evaluate(temperature_K).exp()
    }

    /// Check the shape of every contained table.
    pub fn validate(&self) -> Result<(), TableError> {
        self.vapor_enthalpy_J_per_kg.validate()?;
        self.latent_heat_J_per_kg.validate()?;
        self.liquid_viscosity_Pa_s.validate()?;
        self.ln_saturation_pressure.validate()
    }
}
