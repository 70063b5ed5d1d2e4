//! Lectura del bloque de datos y valores en unidades físicas

use crate::conversion::{
    acc_to_g, be_i16_triple, correct_acc, correct_gyr, gyr_to_dps, mag_le_i16_triple,
    mag_raw_to_ut, resultant, temp_raw_to_celsius,
};
use crate::device::{Icm20948, Icm20948Error};
use crate::interface::Interface;
use crate::register::registers::bank0;
use crate::types::XyzFloat;
use embedded_hal::blocking::delay::DelayMs;

// Posiciones dentro del bloque de 20 bytes
const ACC_OFFSET: usize = 0;
const GYR_OFFSET: usize = 6;
const TEMP_OFFSET: usize = 12;
const MAG_OFFSET: usize = 14;

impl<I, D, E> Icm20948<I, D>
where
    I: Interface<Error = E>,
    D: DelayMs<u32>,
{
    /// Lee accel, gyro, temperatura y los datos externos del magnetómetro en una
    /// sola transacción. Debe llamarse antes de los getters.
    pub fn read_sensor(&mut self) -> Result<(), Icm20948Error> {
        let mut buffer = self.base_state.buffer;
        self.read_regs::<bank0::Bank>(bank0::ACCEL_XOUT_H, &mut buffer)?;
        self.base_state.buffer = buffer;
        Ok(())
    }

    /// Bloque de 20 bytes leído en el último `read_sensor`
    pub fn snapshot(&self) -> &[u8] {
        &self.base_state.buffer
    }

    fn triple_at(&self, offset: usize) -> [u8; 6] {
        let mut bytes = [0u8; 6];
        bytes.copy_from_slice(&self.base_state.buffer[offset..offset + 6]);
        bytes
    }

    pub fn get_acc_raw_values(&self) -> XyzFloat {
        be_i16_triple(&self.triple_at(ACC_OFFSET))
    }

    pub fn get_corrected_acc_raw_values(&self) -> XyzFloat {
        correct_acc(self.get_acc_raw_values(), &self.base_state.calibration)
    }

    /// Aceleración en g
    pub fn get_g_values(&self) -> XyzFloat {
        acc_to_g(
            self.get_corrected_acc_raw_values(),
            self.base_state.calibration.acc_range_factor,
        )
    }

    pub fn get_gyr_raw_values(&self) -> XyzFloat {
        be_i16_triple(&self.triple_at(GYR_OFFSET))
    }

    pub fn get_corrected_gyr_raw_values(&self) -> XyzFloat {
        correct_gyr(self.get_gyr_raw_values(), &self.base_state.calibration)
    }

    /// Velocidad angular en grados/segundo
    pub fn get_gyr_values(&self) -> XyzFloat {
        gyr_to_dps(
            self.get_corrected_gyr_raw_values(),
            self.base_state.calibration.gyr_range_factor,
        )
    }

    pub fn get_temp_raw(&self) -> i16 {
        let b = &self.base_state.buffer;
        i16::from_be_bytes([b[TEMP_OFFSET], b[TEMP_OFFSET + 1]])
    }

    /// Temperatura en °C
    pub fn get_temperature(&self) -> f32 {
        temp_raw_to_celsius(self.get_temp_raw())
    }

    /// Valores brutos del magnetómetro (little-endian en el bloque)
    pub fn get_mag_raw_values(&self) -> XyzFloat {
        mag_le_i16_triple(&self.triple_at(MAG_OFFSET))
    }

    /// Campo magnético en µT
    pub fn get_mag_values(&self) -> XyzFloat {
        mag_raw_to_ut(self.get_mag_raw_values())
    }

    /// Módulo de un vector de aceleración, independiente de la orientación
    pub fn get_resultant_g(&self, g: XyzFloat) -> f32 {
        resultant(g)
    }
}
