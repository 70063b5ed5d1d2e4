//! Controles de configuración: escalas, filtros y tasas de muestreo

use crate::device::{Icm20948, Icm20948Error};
use crate::interface::Interface;
use crate::register::registers::{bank0, bank2, bank3};
use crate::types::{bits, AccelAvgLowPower, AccelRange, Cycle, Dlpf, GyroAvgLowPower, GyroRange};
use embedded_hal::blocking::delay::DelayMs;

/// Aplica un ajuste de DLPF sobre el valor actual de ACCEL_CONFIG / GYRO_CONFIG_1.
///
/// `Off` solo borra FCHOICE; el resto pone FCHOICE y escribe DLPFCFG en bits [5:3].
pub(crate) fn apply_dlpf(val: u8, dlpf: Dlpf) -> u8 {
    match dlpf {
        Dlpf::Off => val & !bits::FCHOICE,
        _ => ((val | bits::FCHOICE) & !bits::DLPFCFG) | ((dlpf as u8) << 3),
    }
}

/// Escribe la escala completa en bits [2:1]
pub(crate) fn apply_full_scale(val: u8, fs: u8) -> u8 {
    (val & !bits::FS_SEL) | ((fs & 0x03) << 1)
}

impl<I, D, E> Icm20948<I, D>
where
    I: Interface<Error = E>,
    D: DelayMs<u32>,
{
    /// Configura la escala completa del acelerómetro
    pub fn set_acc_range(&mut self, range: AccelRange) -> Result<(), Icm20948Error> {
        self.modify_reg::<bank2::Bank, _>(bank2::ACCEL_CONFIG, |val| {
            apply_full_scale(val, range as u8)
        })?;
        self.base_state.calibration.acc_range_factor = range.range_factor();
        Ok(())
    }

    /// Configura la escala completa del giroscopio
    pub fn set_gyr_range(&mut self, range: GyroRange) -> Result<(), Icm20948Error> {
        self.modify_reg::<bank2::Bank, _>(bank2::GYRO_CONFIG_1, |val| {
            apply_full_scale(val, range as u8)
        })?;
        self.base_state.calibration.gyr_range_factor = range.range_factor();
        Ok(())
    }

    /// Set LPF for accelerometer
    pub fn set_acc_dlpf(&mut self, dlpf: Dlpf) -> Result<(), Icm20948Error> {
        self.modify_reg::<bank2::Bank, _>(bank2::ACCEL_CONFIG, |val| apply_dlpf(val, dlpf))
    }

    /// Set LPF for gyroscope
    pub fn set_gyr_dlpf(&mut self, dlpf: Dlpf) -> Result<(), Icm20948Error> {
        self.modify_reg::<bank2::Bank, _>(bank2::GYRO_CONFIG_1, |val| apply_dlpf(val, dlpf))
    }

    /// Filtro del sensor de temperatura. `Off` no existe para este registro.
    pub fn set_temp_dlpf(&mut self, dlpf: Dlpf) -> Result<(), Icm20948Error> {
        if dlpf == Dlpf::Off {
            return Err(Icm20948Error::InvalidParameter);
        }
        self.write_reg::<bank2::Bank>(bank2::TEMP_CONFIG, dlpf as u8)
    }

    /// Divisor de 12 bits del acelerómetro: ODR = 1125 / (1 + div)
    pub fn set_acc_sample_rate_divider(&mut self, divider: u16) -> Result<(), Icm20948Error> {
        self.write_reg16::<bank2::Bank>(bank2::ACCEL_SMPLRT_DIV_1, divider)
    }

    /// Divisor del giroscopio: ODR = 1100 / (1 + div)
    pub fn set_gyr_sample_rate_divider(&mut self, divider: u8) -> Result<(), Icm20948Error> {
        self.write_reg::<bank2::Bank>(bank2::GYRO_SMPLRT_DIV, divider)
    }

    /// Tasa del maestro I2C: 1.1 kHz / 2^rate_exp
    pub fn set_i2c_mst_sample_rate(&mut self, rate_exp: u8) -> Result<(), Icm20948Error> {
        if rate_exp >= 16 {
            return Err(Icm20948Error::InvalidParameter);
        }
        self.write_reg::<bank3::Bank>(bank3::I2C_MST_ODR_CONFIG, rate_exp)
    }

    /// Modo ciclo (LP_CONFIG bits [6:4]); los bits bajos se preservan
    pub fn enable_cycle(&mut self, cycle: Cycle) -> Result<(), Icm20948Error> {
        self.modify_reg::<bank0::Bank, _>(bank0::LP_CONFIG, |val| (val & 0x0F) | cycle as u8)
    }

    pub fn set_gyr_average_in_cycle_mode(
        &mut self,
        avg: GyroAvgLowPower,
    ) -> Result<(), Icm20948Error> {
        self.write_reg::<bank2::Bank>(bank2::GYRO_CONFIG_2, avg as u8)
    }

    pub fn set_acc_average_in_cycle_mode(
        &mut self,
        avg: AccelAvgLowPower,
    ) -> Result<(), Icm20948Error> {
        self.write_reg::<bank2::Bank>(bank2::ACCEL_CONFIG_2, avg as u8)
    }

    /// Factor de rango actual del acelerómetro
    pub fn acc_range_factor(&self) -> f32 {
        self.base_state.calibration.acc_range_factor
    }

    /// Factor de rango actual del giroscopio
    pub fn gyr_range_factor(&self) -> f32 {
        self.base_state.calibration.gyr_range_factor
    }
}
