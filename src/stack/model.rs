//! The assembled stack model: a pure residual function over two unknowns.
//!
//! One evaluation maps the port inputs plus candidate catalyst-layer water
//! activities to the flux-continuity residuals, the full set of derived
//! quantities, and the port outputs. The external solver owns the two
//! unknowns between calls; the model holds only the immutable parameter set
//! and the constants derived from it, so identical inputs always produce
//! bit-for-bit identical outputs.

use crate::config::{CellStackParameters, ConfigurationError, DerivedConstants};
use crate::electrochemistry::{discharge_current_density, VoltageBreakdown};
use crate::energy::{ChannelCommands, EnergyBalance, SpeciesRates};
use crate::membrane::{
    gdl_water_flux, generated_water_flux, membrane_conductivity_S_per_m, water_content,
    MembraneFluxes,
};
use crate::properties::StackProperties;
use crate::state::{ElectrodeState, StackInputs};

/// The two implicit unknowns: water activity at each catalyst layer.
/// Owned and advanced by the external solver, never by the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnknownActivities {
    /// Water activity at the anode catalyst layer
    pub anode_catalyst_layer: f64,
    /// Water activity at the cathode catalyst layer
    pub cathode_catalyst_layer: f64,
}

impl UnknownActivities {
    pub fn as_array(&self) -> [f64; 2] {
        [self.anode_catalyst_layer, self.cathode_catalyst_layer]
    }

    pub fn from_array(values: [f64; 2]) -> Self {
        Self {
            anode_catalyst_layer: values[0],
            cathode_catalyst_layer: values[1],
        }
    }
}

/// Everything recomputed inside one evaluation, kept for inspection.
#[derive(Debug, Clone, Copy)]
pub struct DerivedQuantities {
    /// Discharge current density (A/m²)
    pub current_density_A_per_m2: f64,
    /// Averaged anode channel state
    pub anode: ElectrodeState,
    /// Averaged cathode channel state
    pub cathode: ElectrodeState,
    /// Membrane water content at the anode catalyst layer
    pub water_content_anode: f64,
    /// Membrane water content at the cathode catalyst layer
    pub water_content_cathode: f64,
    /// Protonic conductivity at the mean water content (S/m)
    pub membrane_conductivity_S_per_m: f64,
    /// Voltage decomposition
    pub voltage: VoltageBreakdown,
    /// Membrane crossing fluxes
    pub fluxes: MembraneFluxes,
    /// Water flux through the anode GDL, channel to catalyst layer
    /// (mol/(m²·s))
    pub gdl_flux_anode_mol_per_m2_s: f64,
    /// Water flux through the cathode GDL, catalyst layer to channel
    /// (mol/(m²·s))
    pub gdl_flux_cathode_mol_per_m2_s: f64,
    /// Stack-level consumption and production rates
    pub rates: SpeciesRates,
    /// Power split
    pub energy: EnergyBalance,
}

/// Port outputs consumed by the surrounding flow/thermal/electrical network.
#[derive(Debug, Clone, Copy)]
pub struct StackOutputs {
    /// Terminal voltage, cell count times cell voltage (V)
    pub terminal_voltage_V: f64,
    /// Heat flow at the thermal port, positive into the component (W)
    pub heat_flow_W: f64,
    /// Commands for the four internal mass-source elements
    pub commands: ChannelCommands,
}

/// One complete residual evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation {
    /// Flux-continuity residuals: anode catalyst layer, cathode catalyst
    /// layer. Both vanish at the solved operating point.
    pub residuals: [f64; 2],
    pub derived: DerivedQuantities,
    pub outputs: StackOutputs,
}

/// Steady-state PEM fuel-cell stack model.
pub struct StackModel {
    parameters: CellStackParameters,
    properties: StackProperties,
    constants: DerivedConstants,
}

impl StackModel {
    /// Validate the parameter set and property tables, then derive the
    /// evaluation constants once.
    pub fn new(
        parameters: CellStackParameters,
        properties: StackProperties,
    ) -> Result<Self, ConfigurationError> {
        parameters.validate()?;
        properties.validate()?;
        let constants = DerivedConstants::derive(&parameters, &properties);
        Ok(Self {
            parameters,
            properties,
            constants,
        })
    }

    pub fn parameters(&self) -> &CellStackParameters {
        &self.parameters
    }

    pub fn properties(&self) -> &StackProperties {
        &self.properties
    }

    pub fn constants(&self) -> &DerivedConstants {
        &self.constants
    }

    /// Warm start for the external solver: the channel water activities are
    /// close to the catalyst-layer values at moderate current.
    pub fn initial_activities(&self, inputs: &StackInputs) -> UnknownActivities {
        let anode = ElectrodeState::average(
            &inputs.anode_inflow,
            &inputs.anode_outflow,
            inputs.stack_temperature_K,
            &self.properties.water,
        );
        let cathode = ElectrodeState::average(
            &inputs.cathode_inflow,
            &inputs.cathode_outflow,
            inputs.stack_temperature_K,
            &self.properties.water,
        );
        UnknownActivities {
            anode_catalyst_layer: anode.water_activity,
            cathode_catalyst_layer: cathode.water_activity,
        }
    }

    /// Flux-continuity residuals only, in the shape the solver consumes.
    pub fn residual(&self, inputs: &StackInputs, activities: &[f64; 2]) -> [f64; 2] {
        self.evaluate(inputs, &UnknownActivities::from_array(*activities))
            .residuals
    }

    /// One full evaluation of the algebraic system.
    pub fn evaluate(&self, inputs: &StackInputs, activities: &UnknownActivities) -> Evaluation {
        let temperature_K = inputs.stack_temperature_K;

        // === Channel averaging ===
        let anode = ElectrodeState::average(
            &inputs.anode_inflow,
            &inputs.anode_outflow,
            temperature_K,
            &self.properties.water,
        );
        let cathode = ElectrodeState::average(
            &inputs.cathode_inflow,
            &inputs.cathode_outflow,
            temperature_K,
            &self.properties.water,
        );

        let current_density_A_per_m2 =
            discharge_current_density(inputs.branch_current_A, self.parameters.geometry.cell_area_m2);

        // === Membrane hydration ===
        let water_content_anode = water_content(activities.anode_catalyst_layer);
        let water_content_cathode = water_content(activities.cathode_catalyst_layer);
        let mean_water_content = 0.5 * (water_content_anode + water_content_cathode);
        let conductivity_S_per_m =
            membrane_conductivity_S_per_m(mean_water_content, temperature_K);

        // === Voltage ===
        let voltage = VoltageBreakdown::compute(
            current_density_A_per_m2,
            conductivity_S_per_m,
            &anode,
            &cathode,
            temperature_K,
            &self.parameters,
            &self.constants,
        );

        // === Water transport ===
        let fluxes = MembraneFluxes::compute(
            water_content_anode,
            water_content_cathode,
            current_density_A_per_m2,
            &anode,
            &cathode,
            temperature_K,
            &self.parameters,
            &self.constants,
            &self.properties.water,
        );
        let membrane_flux = fluxes.total_mol_per_m2_s();

        let saturation_concentration =
            MembraneFluxes::gdl_scale(&self.properties.water, temperature_K);
        let gdl_flux_anode = gdl_water_flux(
            self.parameters.transport.gdl_water_diffusivity_m2_per_s,
            self.parameters.geometry.gdl_thickness_m,
            saturation_concentration,
            anode.water_activity,
            activities.anode_catalyst_layer,
        );
        let gdl_flux_cathode = gdl_water_flux(
            self.parameters.transport.gdl_water_diffusivity_m2_per_s,
            self.parameters.geometry.gdl_thickness_m,
            saturation_concentration,
            activities.cathode_catalyst_layer,
            cathode.water_activity,
        );

        // === Flux continuity ===
        // Anode catalyst layer: GDL supply balances membrane removal.
        // Cathode catalyst layer: GDL removal balances membrane supply plus
        // reaction water.
        let residuals = [
            gdl_flux_anode - membrane_flux,
            gdl_flux_cathode - (membrane_flux + generated_water_flux(current_density_A_per_m2)),
        ];

        // === Energy and port outputs ===
        let rates =
            SpeciesRates::from_current(current_density_A_per_m2, membrane_flux, &self.parameters);
        let energy = EnergyBalance::compute(
            &rates,
            voltage.cell_voltage_V(),
            current_density_A_per_m2,
            temperature_K,
            &self.parameters,
            &self.constants,
            &self.properties,
        );
        let commands =
            ChannelCommands::from_rates(&rates, temperature_K, &self.constants, &self.properties);

        let outputs = StackOutputs {
            terminal_voltage_V: self.parameters.geometry.cell_count as f64
                * voltage.cell_voltage_V(),
            heat_flow_W: energy.heat_flow_W,
            commands,
        };

        Evaluation {
            residuals,
            derived: DerivedQuantities {
                current_density_A_per_m2,
                anode,
                cathode,
                water_content_anode,
                water_content_cathode,
                membrane_conductivity_S_per_m: conductivity_S_per_m,
                voltage,
                fluxes,
                gdl_flux_anode_mol_per_m2_s: gdl_flux_anode,
                gdl_flux_cathode_mol_per_m2_s: gdl_flux_cathode,
                rates,
                energy,
            },
            outputs,
        }
    }
}
