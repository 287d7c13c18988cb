//! Membrane hydration and water transport.
//!
//! The membrane couples the two electrodes: its water content sets the
//! protonic conductivity (and thus the ohmic loss), while three transport
//! mechanisms move water across it. The steady-state water contents are the
//! unknowns the flux-continuity solve determines.

pub mod hydration;
pub mod transport;

pub use hydration::{
    drag_coefficient, membrane_conductivity_S_per_m, saturation_concentration_mol_per_m3,
    water_content, water_diffusivity_m2_per_s, WATER_CONTENT_AT_SATURATION,
};
pub use transport::{gdl_water_flux, generated_water_flux, MembraneFluxes};
