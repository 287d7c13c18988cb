//! Reaction stoichiometry, enthalpy bookkeeping, and the stack heat balance.
//!
//! Net chemical power is the lower-heating-value release of the consumed
//! hydrogen, corrected to the stack temperature by sensible-enthalpy terms
//! for every species source and sink, plus the enthalpy carried by water
//! crossing the membrane. Whatever the terminals do not export electrically
//! is dissipated into the thermal domain.

use crate::config::{
    CellStackParameters, DerivedConstants, ELECTRONS_PER_H2, FARADAY_C_PER_MOL,
};
use crate::properties::StackProperties;

/// Molar consumption/production rates for the whole stack (mol/s).
#[derive(Debug, Clone, Copy)]
pub struct SpeciesRates {
    /// Hydrogen consumed at the anode
    pub hydrogen_consumed_mol_per_s: f64,
    /// Oxygen consumed at the cathode
    pub oxygen_consumed_mol_per_s: f64,
    /// Water produced at the cathode
    pub water_generated_mol_per_s: f64,
    /// Water moved anode to cathode through the membrane
    pub water_transported_mol_per_s: f64,
}

impl SpeciesRates {
    /// Faradaic rates from the discharge current density, scaled to the full
    /// stack active area. One H2 and one H2O per two electrons, one O2 per
    /// four.
    pub fn from_current(
        current_density_A_per_m2: f64,
        membrane_flux_mol_per_m2_s: f64,
        parameters: &CellStackParameters,
    ) -> Self {
        let total_area_m2 =
            parameters.geometry.cell_count as f64 * parameters.geometry.cell_area_m2;
        let hydrogen_consumed_mol_per_s =
            total_area_m2 * current_density_A_per_m2 / (ELECTRONS_PER_H2 * FARADAY_C_PER_MOL);

        Self {
            hydrogen_consumed_mol_per_s,
            oxygen_consumed_mol_per_s: 0.5 * hydrogen_consumed_mol_per_s,
            water_generated_mol_per_s: hydrogen_consumed_mol_per_s,
            water_transported_mol_per_s: total_area_m2 * membrane_flux_mol_per_m2_s,
        }
    }
}

/// One command to an internal mass-source element. Sign convention:
/// positive injects into the channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassSourceCommand {
    /// Species mass flow (kg/s)
    pub mass_flow_kg_per_s: f64,
    /// Sensible enthalpy carried with the flow at stack temperature (W)
    pub enthalpy_flow_W: f64,
}

/// Commands for the four mass-source elements: a reaction and a
/// moisture-transport element on each side.
#[derive(Debug, Clone, Copy)]
pub struct ChannelCommands {
    /// Hydrogen removal from the anode channel
    pub anode_reaction: MassSourceCommand,
    /// Transported water removal from the anode channel
    pub anode_moisture: MassSourceCommand,
    /// Oxygen removal and product-water injection, net, at the cathode
    pub cathode_reaction: MassSourceCommand,
    /// Transported water injection into the cathode channel
    pub cathode_moisture: MassSourceCommand,
}

impl ChannelCommands {
    /// Convert molar rates to per-element mass and enthalpy flows at the
    /// stack temperature.
    pub fn from_rates(
        rates: &SpeciesRates,
        stack_temperature_K: f64,
        constants: &DerivedConstants,
        properties: &StackProperties,
    ) -> Self {
        let h_H2 = properties.hydrogen.enthalpy_J_per_kg.evaluate(stack_temperature_K);
        let h_O2 = properties.oxygen.enthalpy_J_per_kg.evaluate(stack_temperature_K);
        let h_H2O = properties
            .water
            .vapor_enthalpy_J_per_kg
            .evaluate(stack_temperature_K);

        let hydrogen_kg_per_s =
            rates.hydrogen_consumed_mol_per_s * constants.molar_mass_H2_kg_per_mol;
        let oxygen_kg_per_s = rates.oxygen_consumed_mol_per_s * constants.molar_mass_O2_kg_per_mol;
        let generated_kg_per_s =
            rates.water_generated_mol_per_s * constants.molar_mass_H2O_kg_per_mol;
        let transported_kg_per_s =
            rates.water_transported_mol_per_s * constants.molar_mass_H2O_kg_per_mol;

        Self {
            anode_reaction: MassSourceCommand {
                mass_flow_kg_per_s: -hydrogen_kg_per_s,
                enthalpy_flow_W: -hydrogen_kg_per_s * h_H2,
            },
            anode_moisture: MassSourceCommand {
                mass_flow_kg_per_s: -transported_kg_per_s,
                enthalpy_flow_W: -transported_kg_per_s * h_H2O,
            },
            cathode_reaction: MassSourceCommand {
                mass_flow_kg_per_s: generated_kg_per_s - oxygen_kg_per_s,
                enthalpy_flow_W: generated_kg_per_s * h_H2O - oxygen_kg_per_s * h_O2,
            },
            cathode_moisture: MassSourceCommand {
                mass_flow_kg_per_s: transported_kg_per_s,
                enthalpy_flow_W: transported_kg_per_s * h_H2O,
            },
        }
    }
}

/// Power split at one operating point.
#[derive(Debug, Clone, Copy)]
pub struct EnergyBalance {
    /// Chemical power released by the reaction, corrected to stack
    /// temperature (W)
    pub net_power_W: f64,
    /// Electrical power exported at the terminals (W)
    pub electrical_power_W: f64,
    /// Waste heat, net minus electrical (W)
    pub dissipated_power_W: f64,
    /// Heat flow at the thermal port: positive into the component, so the
    /// negative of the dissipated power
    pub heat_flow_W: f64,
}

impl EnergyBalance {
    pub fn compute(
        rates: &SpeciesRates,
        cell_voltage_V: f64,
        current_density_A_per_m2: f64,
        stack_temperature_K: f64,
        parameters: &CellStackParameters,
        constants: &DerivedConstants,
        properties: &StackProperties,
    ) -> Self {
        let h_H2 = properties.hydrogen.enthalpy_J_per_kg.evaluate(stack_temperature_K);
        let h_O2 = properties.oxygen.enthalpy_J_per_kg.evaluate(stack_temperature_K);
        let h_H2O = properties
            .water
            .vapor_enthalpy_J_per_kg
            .evaluate(stack_temperature_K);

        let hydrogen_kg_per_s =
            rates.hydrogen_consumed_mol_per_s * constants.molar_mass_H2_kg_per_mol;
        let oxygen_kg_per_s = rates.oxygen_consumed_mol_per_s * constants.molar_mass_O2_kg_per_mol;
        let generated_kg_per_s =
            rates.water_generated_mol_per_s * constants.molar_mass_H2O_kg_per_mol;
        let transported_kg_per_s =
            rates.water_transported_mol_per_s * constants.molar_mass_H2O_kg_per_mol;

        // Reaction enthalpy at standard conditions, product water as vapor
        let reaction_power_W = hydrogen_kg_per_s * constants.hydrogen_lhv_J_per_kg;

        // Bring every source and sink from standard to stack temperature:
        // consumed species arrive warm, produced water leaves warm
        let sensible_power_W = hydrogen_kg_per_s
            * (h_H2 - constants.standard_enthalpy_H2_J_per_kg)
            + oxygen_kg_per_s * (h_O2 - constants.standard_enthalpy_O2_J_per_kg)
            - generated_kg_per_s * (h_H2O - constants.standard_enthalpy_H2O_J_per_kg);

        // Water crossing the membrane leaves one channel and enters the
        // other at the same stack temperature, so the pair cancels here; the
        // per-side flows still appear in the mass-source commands
        let anode_transport_W = -transported_kg_per_s * h_H2O;
        let cathode_transport_W = transported_kg_per_s * h_H2O;

        let net_power_W =
            reaction_power_W + sensible_power_W + anode_transport_W + cathode_transport_W;

        let total_area_m2 =
            parameters.geometry.cell_count as f64 * parameters.geometry.cell_area_m2;
        let electrical_power_W = cell_voltage_V * current_density_A_per_m2 * total_area_m2;

        let dissipated_power_W = net_power_W - electrical_power_W;

        Self {
            net_power_W,
            electrical_power_W,
            dissipated_power_W,
            heat_flow_W: -dissipated_power_W,
        }
    }

    /// Conversion efficiency at this point, electrical over net chemical
    /// power. Zero at open circuit.
    pub fn efficiency(&self) -> f64 {
        if self.net_power_W > 0.0 {
            self.electrical_power_W / self.net_power_W
        } else {
            0.0
        }
    }
}
