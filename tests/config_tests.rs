//! Integration tests for parameter validation and constant derivation.
//!
//! Tests verify:
//! - Default parameter sets validate and derive literature-value constants
//! - Violations are enumerated, not reported one at a time
//! - Property tables interpolate and extrapolate per their policies

use approx::assert_relative_eq;
use pemfc_stack::config::ConfigurationError;
use pemfc_stack::properties::{Extrapolation, PropertyTable};
use pemfc_stack::{
    CellStackParameters, DerivedConstants, StackProperties, STANDARD_TEMPERATURE_K,
};

// ============================================================================
// Parameter Validation Tests
// ============================================================================

#[test]
fn test_default_parameters_validate() {
    assert!(CellStackParameters::default().validate().is_ok());
    assert!(StackProperties::default().validate().is_ok());
}

#[test]
fn test_all_violations_reported_together() {
    let mut parameters = CellStackParameters::default();
    parameters.geometry.membrane_thickness_m = 0.0;
    parameters.kinetics.charge_transfer_coefficient = -0.5;
    parameters.transport.gdl_water_diffusivity_m2_per_s = f64::NAN;

    match parameters.validate().unwrap_err() {
        ConfigurationError::InvalidParameters { violations } => {
            assert_eq!(violations.len(), 3, "violations: {:?}", violations);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_error_message_names_the_field() {
    let mut parameters = CellStackParameters::default();
    parameters.membrane.equivalent_weight_kg_per_mol = -1.1;
    let message = parameters.validate().unwrap_err().to_string();
    assert!(
        message.contains("equivalent_weight_kg_per_mol"),
        "message: {}",
        message
    );
}

#[test]
fn test_parameters_roundtrip_through_json() {
    let parameters = CellStackParameters::default();
    let json = serde_json::to_string(&parameters).unwrap();
    let parsed: CellStackParameters = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.geometry.cell_count, parameters.geometry.cell_count);
    assert_eq!(
        parsed.kinetics.limiting_current_density_A_per_m2,
        parameters.kinetics.limiting_current_density_A_per_m2
    );
}

#[test]
fn test_missing_parameter_file_falls_back_to_defaults() {
    let loaded = CellStackParameters::load_or_default("/nonexistent/stack_parameters.json");
    assert_eq!(loaded.geometry.cell_count, 370);
}

// ============================================================================
// Derived Constant Tests
// ============================================================================

#[test]
fn test_derived_constants_match_literature() {
    let constants = DerivedConstants::derive(
        &CellStackParameters::default(),
        &StackProperties::default(),
    );

    // −ΔG/(2F) for liquid water at 25 °C
    assert_relative_eq!(constants.standard_potential_V, 1.229, max_relative = 1e-3);
    // Molar masses recovered from the specific gas constants
    assert_relative_eq!(constants.molar_mass_H2_kg_per_mol, 2.016e-3, max_relative = 1e-3);
    assert_relative_eq!(constants.molar_mass_O2_kg_per_mol, 32.0e-3, max_relative = 1e-3);
    assert_relative_eq!(constants.molar_mass_H2O_kg_per_mol, 18.015e-3, max_relative = 1e-3);
    // LHV sits about 21 MJ/kg under the HHV
    assert!(constants.hydrogen_lhv_J_per_kg < constants.hydrogen_hhv_J_per_kg);
    assert_relative_eq!(constants.hydrogen_lhv_J_per_kg, 120.0e6, max_relative = 1e-2);
}

#[test]
fn test_derivation_is_reproducible() {
    let parameters = CellStackParameters::default();
    let properties = StackProperties::default();
    let first = DerivedConstants::derive(&parameters, &properties);
    let second = DerivedConstants::derive(&parameters, &properties);
    assert_eq!(first.standard_potential_V, second.standard_potential_V);
    assert_eq!(first.hydrogen_lhv_J_per_kg, second.hydrogen_lhv_J_per_kg);
    assert_eq!(
        first.membrane_molar_density_mol_per_m3,
        second.membrane_molar_density_mol_per_m3
    );
}

// ============================================================================
// Property Table Tests
// ============================================================================

#[test]
fn test_table_interpolates_between_breakpoints() {
    let table = PropertyTable::new(
        vec![273.15, 293.15, 313.15],
        vec![0.0, 20.0, 40.0],
        Extrapolation::Linear,
    )
    .unwrap();
    assert_relative_eq!(table.evaluate(283.15), 10.0, max_relative = 1e-12);
    assert_relative_eq!(table.evaluate(303.15), 30.0, max_relative = 1e-12);
}

#[test]
fn test_table_extrapolation_policies_differ() {
    let breakpoints = vec![273.15, 293.15, 313.15];
    let values = vec![0.0, 20.0, 40.0];
    let linear = PropertyTable::new(breakpoints.clone(), values.clone(), Extrapolation::Linear)
        .unwrap();
    let nearest = PropertyTable::new(breakpoints, values, Extrapolation::Nearest).unwrap();

    assert_relative_eq!(linear.evaluate(333.15), 60.0, max_relative = 1e-12);
    assert_eq!(nearest.evaluate(333.15), 40.0);
    assert_relative_eq!(linear.evaluate(253.15), -20.0, max_relative = 1e-12);
    assert_eq!(nearest.evaluate(253.15), 0.0);
}

#[test]
fn test_standard_enthalpies_evaluated_at_standard_temperature() {
    let properties = StackProperties::default();
    let constants =
        DerivedConstants::derive(&CellStackParameters::default(), &properties);
    assert_eq!(
        constants.standard_enthalpy_H2_J_per_kg,
        properties
            .hydrogen
            .enthalpy_J_per_kg
            .evaluate(STANDARD_TEMPERATURE_K)
    );
}

#[test]
fn test_saturation_pressure_at_boiling_point() {
    let properties = StackProperties::default();
    let at_boiling = properties.water.saturation_pressure_Pa(373.15);
    // Within a percent of one atmosphere
    assert_relative_eq!(at_boiling, 101_325.0, max_relative = 1e-2);
}
