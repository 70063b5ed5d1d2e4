//! Configuración declarativa del ICM20948, aplicada en una sola llamada

use crate::device::{Icm20948, Icm20948Error};
use crate::interface::Interface;
use crate::types::{AccelRange, Dlpf, GyroRange};
use embedded_hal::blocking::delay::DelayMs;

/// Configuración de medida del acelerómetro y giroscopio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Icm20948Config {
    pub acc_range: AccelRange,
    pub gyr_range: GyroRange,
    pub acc_dlpf: Dlpf,
    pub gyr_dlpf: Dlpf,
    /// ODR acelerómetro = 1125 / (1 + div)
    pub acc_sample_rate_divider: u16,
    /// ODR giroscopio = 1100 / (1 + div)
    pub gyr_sample_rate_divider: u8,
}

impl Default for Icm20948Config {
    fn default() -> Self {
        Self {
            acc_range: AccelRange::G2,
            gyr_range: GyroRange::Dps250,
            acc_dlpf: Dlpf::Dlpf6,
            gyr_dlpf: Dlpf::Dlpf6,
            acc_sample_rate_divider: 10,
            gyr_sample_rate_divider: 10,
        }
    }
}

impl<I, D, E> Icm20948<I, D>
where
    I: Interface<Error = E>,
    D: DelayMs<u32>,
{
    /// Aplica todos los campos de `config`
    pub fn apply_config(&mut self, config: &Icm20948Config) -> Result<(), Icm20948Error> {
        self.set_acc_range(config.acc_range)?;
        self.set_acc_dlpf(config.acc_dlpf)?;
        self.set_acc_sample_rate_divider(config.acc_sample_rate_divider)?;

        self.set_gyr_range(config.gyr_range)?;
        self.set_gyr_dlpf(config.gyr_dlpf)?;
        self.set_gyr_sample_rate_divider(config.gyr_sample_rate_divider)?;

        log::debug!("Configuración aplicada: {:?}", config);
        Ok(())
    }
}
