//! Water fluxes through the gas diffusion layers and the membrane.
//!
//! All fluxes are molar (mol/(m²·s)) and signed positive in the
//! anode-to-cathode direction. Three mechanisms cross the membrane:
//! concentration-driven diffusion, electro-osmotic drag by the proton
//! current, and hydraulic permeation down the channel pressure difference.
//!
//! References:
//! - Flux balance structure: Springer et al., J Electrochem Soc 1991
//! - Hydraulic permeation: Bernardi & Verbrugge, AIChE J 1991

use crate::config::{CellStackParameters, DerivedConstants, ELECTRONS_PER_H2, FARADAY_C_PER_MOL};
use crate::properties::WaterPropertyPack;
use crate::state::ElectrodeState;

use super::hydration::{drag_coefficient, saturation_concentration_mol_per_m3, water_diffusivity_m2_per_s};

/// Water-vapor flux across one gas diffusion layer, from the channel side
/// activity toward the catalyst-layer activity (mol/(m²·s)).
///
/// Fickian with the activity difference scaled by the saturation
/// concentration at the stack temperature.
pub fn gdl_water_flux(
    gdl_diffusivity_m2_per_s: f64,
    gdl_thickness_m: f64,
    saturation_concentration: f64,
    from_activity: f64,
    to_activity: f64,
) -> f64 {
    gdl_diffusivity_m2_per_s / gdl_thickness_m
        * saturation_concentration
        * (from_activity - to_activity)
}

/// Concentration-driven water diffusion through the membrane (mol/(m²·s)).
/// Positive when the anode side is wetter.
pub fn diffusion_flux(
    membrane_molar_density_mol_per_m3: f64,
    diffusivity_m2_per_s: f64,
    membrane_thickness_m: f64,
    water_content_anode: f64,
    water_content_cathode: f64,
) -> f64 {
    membrane_molar_density_mol_per_m3 * diffusivity_m2_per_s
        * (water_content_anode - water_content_cathode)
        / membrane_thickness_m
}

/// Water dragged through the membrane by the proton current (mol/(m²·s)).
/// The drag coefficient is evaluated at the anode catalyst layer, where the
/// protons enter the membrane.
pub fn electro_osmotic_flux(drag: f64, current_density_A_per_m2: f64) -> f64 {
    drag * current_density_A_per_m2 / FARADAY_C_PER_MOL
}

/// Hydraulic (Darcy) permeation down the anode-to-cathode pressure
/// difference (mol/(m²·s)).
///
/// The permeating water is weighted by the water mole fraction of the
/// upstream channel: the anode fraction when the anode runs at higher
/// pressure, the cathode fraction otherwise. At equal pressures the flux is
/// zero from either branch, so the switch is continuous.
pub fn hydraulic_flux(
    membrane_molar_density_mol_per_m3: f64,
    permeability_m2: f64,
    liquid_viscosity_Pa_s: f64,
    membrane_thickness_m: f64,
    anode_pressure_Pa: f64,
    cathode_pressure_Pa: f64,
    anode_water_fraction: f64,
    cathode_water_fraction: f64,
) -> f64 {
    let pressure_difference_Pa = anode_pressure_Pa - cathode_pressure_Pa;
    let upstream_water_fraction = if pressure_difference_Pa > 0.0 {
        anode_water_fraction
    } else {
        cathode_water_fraction
    };
    upstream_water_fraction * membrane_molar_density_mol_per_m3 * permeability_m2
        / liquid_viscosity_Pa_s
        * pressure_difference_Pa
        / membrane_thickness_m
}

/// Water produced at the cathode catalyst layer by the oxygen reduction
/// reaction (mol/(m²·s)), one molecule per two electrons.
pub fn generated_water_flux(current_density_A_per_m2: f64) -> f64 {
    current_density_A_per_m2 / (ELECTRONS_PER_H2 * FARADAY_C_PER_MOL)
}

/// The three membrane crossing mechanisms, evaluated together at one
/// operating point. Positive anode-to-cathode.
#[derive(Debug, Clone, Copy)]
pub struct MembraneFluxes {
    /// Concentration-driven diffusion (mol/(m²·s))
    pub diffusion_mol_per_m2_s: f64,
    /// Electro-osmotic drag (mol/(m²·s))
    pub electro_osmotic_mol_per_m2_s: f64,
    /// Hydraulic permeation (mol/(m²·s))
    pub hydraulic_mol_per_m2_s: f64,
}

impl MembraneFluxes {
    /// Evaluate all three mechanisms from the catalyst-layer water contents
    /// and the averaged channel states.
    #[allow(clippy::too_many_arguments)]
    pub fn compute(
        water_content_anode: f64,
        water_content_cathode: f64,
        current_density_A_per_m2: f64,
        anode: &ElectrodeState,
        cathode: &ElectrodeState,
        stack_temperature_K: f64,
        parameters: &CellStackParameters,
        constants: &DerivedConstants,
        water: &WaterPropertyPack,
    ) -> Self {
        let diffusivity = water_diffusivity_m2_per_s(
            parameters.transport.membrane_water_diffusivity_m2_per_s,
            stack_temperature_K,
        );
        let viscosity = water.liquid_viscosity_Pa_s.evaluate(stack_temperature_K);

        Self {
            diffusion_mol_per_m2_s: diffusion_flux(
                constants.membrane_molar_density_mol_per_m3,
                diffusivity,
                parameters.geometry.membrane_thickness_m,
                water_content_anode,
                water_content_cathode,
            ),
            electro_osmotic_mol_per_m2_s: electro_osmotic_flux(
                drag_coefficient(water_content_anode),
                current_density_A_per_m2,
            ),
            hydraulic_mol_per_m2_s: hydraulic_flux(
                constants.membrane_molar_density_mol_per_m3,
                constants.darcy_permeability_m2,
                viscosity,
                parameters.geometry.membrane_thickness_m,
                anode.pressure_Pa,
                cathode.pressure_Pa,
                anode.water_mole_fraction,
                cathode.water_mole_fraction,
            ),
        }
    }

    /// Net membrane water flux, anode to cathode (mol/(m²·s))
    pub fn total_mol_per_m2_s(&self) -> f64 {
        self.diffusion_mol_per_m2_s + self.electro_osmotic_mol_per_m2_s
            + self.hydraulic_mol_per_m2_s
    }

    /// Saturation concentration used to scale GDL fluxes at this operating
    /// point (mol/m³)
    pub fn gdl_scale(water: &WaterPropertyPack, stack_temperature_K: f64) -> f64 {
        saturation_concentration_mol_per_m3(
            water.saturation_pressure_Pa(stack_temperature_K),
            stack_temperature_K,
        )
    }
}
