//! Stack parameter structures with citation metadata.
//!
//! All physical parameters must include their source citation. The parameter
//! set is immutable after model construction; `validate` enforces the
//! positivity and ordering invariants before any physics runs.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::properties::TableError;

/// Configuration-time failure: the parameter set or property data cannot
/// support a well-defined model.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// One or more parameter invariants are violated; every violation is
    /// listed, not just the first.
    #[error("invalid stack parameters: {}", .violations.join("; "))]
    InvalidParameters { violations: Vec<String> },
    /// A property table is malformed
    #[error("invalid property data: {0}")]
    InvalidProperties(#[from] TableError),
}

/// Top-level parameter container for one fuel-cell stack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellStackParameters {
    /// Stack and MEA geometry
    pub geometry: StackGeometry,
    /// Electrode kinetics
    pub kinetics: KineticParameters,
    /// Water-transport coefficients
    pub transport: TransportParameters,
    /// Membrane material properties
    pub membrane: MembraneMaterial,
}

impl CellStackParameters {
    /// Load parameters from a JSON file, or fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(params) => {
                    log::info!("Loaded stack parameters from {:?}", path.as_ref());
                    params
                }
                Err(e) => {
                    log::warn!("Failed to parse stack parameters: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Stack parameters file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Check every invariant; collect all violations rather than stopping at
    /// the first.
    ///
    /// Invariants: every numeric parameter is strictly positive, and the
    /// limiting current density exceeds the exchange current density.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let mut violations = Vec::new();

        if self.geometry.cell_count == 0 {
            violations.push("geometry.cell_count must be at least 1".to_string());
        }

        let positive = [
            ("geometry.cell_area_m2", self.geometry.cell_area_m2),
            (
                "geometry.membrane_thickness_m",
                self.geometry.membrane_thickness_m,
            ),
            ("geometry.gdl_thickness_m", self.geometry.gdl_thickness_m),
            (
                "kinetics.exchange_current_density_A_per_m2",
                self.kinetics.exchange_current_density_A_per_m2,
            ),
            (
                "kinetics.limiting_current_density_A_per_m2",
                self.kinetics.limiting_current_density_A_per_m2,
            ),
            (
                "kinetics.charge_transfer_coefficient",
                self.kinetics.charge_transfer_coefficient,
            ),
            (
                "transport.membrane_water_diffusivity_m2_per_s",
                self.transport.membrane_water_diffusivity_m2_per_s,
            ),
            (
                "transport.gdl_water_diffusivity_m2_per_s",
                self.transport.gdl_water_diffusivity_m2_per_s,
            ),
            (
                "membrane.dry_density_kg_per_m3",
                self.membrane.dry_density_kg_per_m3,
            ),
            (
                "membrane.equivalent_weight_kg_per_mol",
                self.membrane.equivalent_weight_kg_per_mol,
            ),
        ];
        for (name, value) in positive {
            // NaN also fails this comparison and is reported
            if !(value > 0.0) {
                violations.push(format!("{} must be strictly positive (got {})", name, value));
            }
        }

        if self.kinetics.limiting_current_density_A_per_m2
            <= self.kinetics.exchange_current_density_A_per_m2
        {
            violations.push(format!(
                "kinetics.limiting_current_density_A_per_m2 ({}) must exceed exchange_current_density_A_per_m2 ({})",
                self.kinetics.limiting_current_density_A_per_m2,
                self.kinetics.exchange_current_density_A_per_m2,
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ConfigurationError::InvalidParameters { violations })
        }
    }
}

impl Default for CellStackParameters {
    fn default() -> Self {
        Self {
            geometry: StackGeometry::default(),
            kinetics: KineticParameters::default(),
            transport: TransportParameters::default(),
            membrane: MembraneMaterial::default(),
        }
    }
}

/// Stack and membrane-electrode-assembly geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackGeometry {
    /// Number of cells in electrical series
    /// Reference: automotive-scale stack (370 cells)
    /// Source: Lohse-Busch et al., ANL/ESD-18/12, 2018 (Toyota Mirai)
    pub cell_count: usize,

    /// Active cell area (m²)
    /// Reference: 237 cm² per cell
    /// Source: Lohse-Busch et al., ANL/ESD-18/12, 2018
    pub cell_area_m2: f64,

    /// Membrane dry thickness (m)
    /// Reference: Nafion 115, 127 μm nominal
    /// Source: DuPont product information
    pub membrane_thickness_m: f64,

    /// Gas diffusion layer thickness (m)
    /// Reference: Toray TGP-H carbon paper class
    /// Source: O'Hayre et al., Fuel Cell Fundamentals, 3rd ed.
    pub gdl_thickness_m: f64,
}

impl Default for StackGeometry {
    fn default() -> Self {
        Self {
            // Lohse-Busch et al. 2018
            cell_count: 370,
            cell_area_m2: 0.0237,

            // DuPont Nafion 115
            membrane_thickness_m: 127e-6,

            // Toray TGP-H class
            gdl_thickness_m: 250e-6,
        }
    }
}

/// Electrode kinetics for the lumped MEA
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KineticParameters {
    /// Exchange current density (A/m²)
    /// Reference: lumped MEA value 1e-4 A/cm²
    /// Source: O'Hayre et al., Fuel Cell Fundamentals, 3rd ed.
    pub exchange_current_density_A_per_m2: f64,

    /// Limiting current density (A/m²)
    /// Reference: 1.4 A/cm² for an air cathode
    /// Source: Barbir, PEM Fuel Cells, 2nd ed.
    pub limiting_current_density_A_per_m2: f64,

    /// Charge-transfer coefficient (dimensionless)
    /// Reference: symmetric barrier, α = 0.5
    /// Source: Barbir, PEM Fuel Cells, 2nd ed.
    pub charge_transfer_coefficient: f64,
}

impl Default for KineticParameters {
    fn default() -> Self {
        Self {
            // O'Hayre et al.
            exchange_current_density_A_per_m2: 1.0,

            // Barbir
            limiting_current_density_A_per_m2: 1.4e4,
            charge_transfer_coefficient: 0.5,
        }
    }
}

/// Water-transport coefficients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportParameters {
    /// Membrane water diffusivity at the 30 °C reference (m²/s)
    /// Reference: 1.28e-10 m²/s in Nafion 115
    /// Source: Motupally et al., J Electrochem Soc 2000
    pub membrane_water_diffusivity_m2_per_s: f64,

    /// Effective water-vapor diffusivity through the GDL (m²/s)
    /// Reference: bulk binary diffusivity corrected for porosity/tortuosity
    /// Source: Bruggeman-type estimate, O'Hayre et al., 3rd ed.
    pub gdl_water_diffusivity_m2_per_s: f64,
}

impl Default for TransportParameters {
    fn default() -> Self {
        Self {
            // Motupally et al. 2000
            membrane_water_diffusivity_m2_per_s: 1.28e-10,

            // Bruggeman-corrected vapor diffusivity
            gdl_water_diffusivity_m2_per_s: 5.0e-6,
        }
    }
}

/// Membrane (perfluorosulfonic acid) material properties
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembraneMaterial {
    /// Dry membrane density (kg/m³)
    /// Reference: 1980 kg/m³ for dry Nafion
    /// Source: Springer et al., J Electrochem Soc 1991
    pub dry_density_kg_per_m3: f64,

    /// Equivalent weight: dry mass per mole of sulfonic acid sites (kg/mol)
    /// Reference: Nafion EW 1100
    /// Source: Springer et al., J Electrochem Soc 1991
    pub equivalent_weight_kg_per_mol: f64,
}

impl Default for MembraneMaterial {
    fn default() -> Self {
        Self {
            // Springer et al. 1991
            dry_density_kg_per_m3: 1980.0,
            equivalent_weight_kg_per_mol: 1.1,
        }
    }
}
