//! Physical constants and the per-parameter-set derived constant block.
//!
//! Everything in `DerivedConstants` is computed once when the model is
//! constructed and borrowed read-only by every residual evaluation, matching
//! the configuration-time constant section of the original component.

use crate::properties::StackProperties;

use super::parameters::CellStackParameters;

/// Universal gas constant (J/(mol·K)), CODATA 2018
pub const GAS_CONSTANT_J_PER_MOL_K: f64 = 8.314462618;

/// Faraday constant (C/mol), CODATA 2018
pub const FARADAY_C_PER_MOL: f64 = 96485.33212;

/// Standard temperature (K)
pub const STANDARD_TEMPERATURE_K: f64 = 298.15;

/// Standard pressure (Pa)
pub const STANDARD_PRESSURE_PA: f64 = 101_325.0;

/// Gibbs free energy of liquid-water formation at standard conditions (J/mol)
/// Source: CRC Handbook of Chemistry and Physics, 97th ed.
pub const GIBBS_WATER_FORMATION_J_PER_MOL: f64 = -237.14e3;

/// Higher heating value of hydrogen (J/kg)
/// Source: NIST Chemistry WebBook
pub const HYDROGEN_HHV_J_PER_KG: f64 = 141.88e6;

/// Hydraulic (Darcy) permeability of the membrane family (m²)
/// Source: Bernardi & Verbrugge, AIChE J 1991
pub const MEMBRANE_DARCY_PERMEABILITY_M2: f64 = 1.8e-18;

/// Electrons transferred per mole of hydrogen
pub const ELECTRONS_PER_H2: f64 = 2.0;

/// Constants derived once from the parameter set and property packs.
#[derive(Debug, Clone)]
pub struct DerivedConstants {
    /// Standard (zero-overpotential) cell potential, −ΔG/(2F) (V)
    pub standard_potential_V: f64,
    /// Molar mass of hydrogen (kg/mol), from R / R_specific
    pub molar_mass_H2_kg_per_mol: f64,
    /// Molar mass of oxygen (kg/mol)
    pub molar_mass_O2_kg_per_mol: f64,
    /// Molar mass of water (kg/mol)
    pub molar_mass_H2O_kg_per_mol: f64,
    /// Higher heating value of hydrogen (J/kg)
    pub hydrogen_hhv_J_per_kg: f64,
    /// Lower heating value: HHV minus the latent heat of the product water
    /// at standard temperature (J/kg)
    pub hydrogen_lhv_J_per_kg: f64,
    /// Species enthalpies at standard temperature (J/kg)
    pub standard_enthalpy_H2_J_per_kg: f64,
    pub standard_enthalpy_O2_J_per_kg: f64,
    pub standard_enthalpy_H2O_J_per_kg: f64,
    /// Molar density of sulfonic acid sites, ρ_dry/EW (mol/m³)
    pub membrane_molar_density_mol_per_m3: f64,
    /// Hydraulic permeability of the membrane (m²)
    pub darcy_permeability_m2: f64,
}

impl DerivedConstants {
    /// Derive the constant block. Pure; assumes `parameters` and
    /// `properties` have already been validated.
    pub fn derive(parameters: &CellStackParameters, properties: &StackProperties) -> Self {
        let molar_mass_H2_kg_per_mol =
            GAS_CONSTANT_J_PER_MOL_K / properties.hydrogen.specific_gas_constant_J_per_kgK;
        let molar_mass_O2_kg_per_mol =
            GAS_CONSTANT_J_PER_MOL_K / properties.oxygen.specific_gas_constant_J_per_kgK;
        let molar_mass_H2O_kg_per_mol =
            GAS_CONSTANT_J_PER_MOL_K / properties.water.specific_gas_constant_J_per_kgK;

        // Product water leaves as vapor, so the usable reaction enthalpy is
        // the HHV less the vaporization enthalpy of the stoichiometric water
        let latent_heat_std_J_per_kg = properties
            .water
            .latent_heat_J_per_kg
            .evaluate(STANDARD_TEMPERATURE_K);
        let water_per_hydrogen_mass = molar_mass_H2O_kg_per_mol / molar_mass_H2_kg_per_mol;
        let hydrogen_lhv_J_per_kg =
            HYDROGEN_HHV_J_PER_KG - water_per_hydrogen_mass * latent_heat_std_J_per_kg;

        Self {
            standard_potential_V: -GIBBS_WATER_FORMATION_J_PER_MOL
                / (ELECTRONS_PER_H2 * FARADAY_C_PER_MOL),
            molar_mass_H2_kg_per_mol,
            molar_mass_O2_kg_per_mol,
            molar_mass_H2O_kg_per_mol,
            hydrogen_hhv_J_per_kg: HYDROGEN_HHV_J_PER_KG,
            hydrogen_lhv_J_per_kg,
            standard_enthalpy_H2_J_per_kg: properties
                .hydrogen
                .enthalpy_J_per_kg
                .evaluate(STANDARD_TEMPERATURE_K),
            standard_enthalpy_O2_J_per_kg: properties
                .oxygen
                .enthalpy_J_per_kg
                .evaluate(STANDARD_TEMPERATURE_K),
            standard_enthalpy_H2O_J_per_kg: properties
                .water
                .vapor_enthalpy_J_per_kg
                .evaluate(STANDARD_TEMPERATURE_K),
            membrane_molar_density_mol_per_m3: parameters.membrane.dry_density_kg_per_m3
                / parameters.membrane.equivalent_weight_kg_per_mol,
            darcy_permeability_m2: MEMBRANE_DARCY_PERMEABILITY_M2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn derive_defaults() -> DerivedConstants {
        DerivedConstants::derive(
            &CellStackParameters::default(),
            &StackProperties::default(),
        )
    }

    #[test]
    fn test_standard_potential_near_1_229_V() {
        let constants = derive_defaults();
        assert_relative_eq!(constants.standard_potential_V, 1.229, max_relative = 1e-3);
    }

    #[test]
    fn test_molar_masses_match_literature() {
        let constants = derive_defaults();
        assert_relative_eq!(
            constants.molar_mass_H2_kg_per_mol,
            2.016e-3,
            max_relative = 1e-3
        );
        assert_relative_eq!(
            constants.molar_mass_O2_kg_per_mol,
            32.0e-3,
            max_relative = 1e-3
        );
        assert_relative_eq!(
            constants.molar_mass_H2O_kg_per_mol,
            18.015e-3,
            max_relative = 1e-3
        );
    }

    #[test]
    fn test_lhv_below_hhv_and_near_120_MJ_per_kg() {
        let constants = derive_defaults();
        assert!(constants.hydrogen_lhv_J_per_kg < constants.hydrogen_hhv_J_per_kg);
        assert!(
            (119.0e6..121.0e6).contains(&constants.hydrogen_lhv_J_per_kg),
            "LHV = {:.3e} J/kg",
            constants.hydrogen_lhv_J_per_kg
        );
    }

    #[test]
    fn test_membrane_molar_density() {
        let constants = derive_defaults();
        // 1980 kg/m³ / 1.1 kg/mol = 1800 mol/m³
        assert_relative_eq!(
            constants.membrane_molar_density_mol_per_m3,
            1800.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let a = derive_defaults();
        let b = derive_defaults();
        assert_eq!(a.standard_potential_V, b.standard_potential_V);
        assert_eq!(a.hydrogen_lhv_J_per_kg, b.hydrogen_lhv_J_per_kg);
        assert_eq!(a.standard_enthalpy_H2O_J_per_kg, b.standard_enthalpy_H2O_J_per_kg);
        assert_eq!(
            a.membrane_molar_density_mol_per_m3,
            b.membrane_molar_density_mol_per_m3
        );
    }
}
