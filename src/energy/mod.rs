//! Stack-level energy balance and mass-source commands.

pub mod balance;

pub use balance::{ChannelCommands, EnergyBalance, MassSourceCommand, SpeciesRates};
