//! Implementación para manejar el FIFO del ICM20948
//!
//! El FIFO almacena triples de 6 bytes (big-endian) de acelerómetro, giroscopio
//! o ambos alternados. Antes de leer hay que descartar los bytes sueltos del
//! principio con [`Icm20948::find_fifo_begin`] para quedar alineados.

use crate::conversion::{acc_to_g, be_i16_triple, correct_acc, correct_gyr, gyr_to_dps};
use crate::device::{Icm20948, Icm20948Error};
use crate::interface::Interface;
use crate::register::registers::bank0;
use crate::types::{bits, FifoMode, FifoType, XyzFloat};
use embedded_hal::blocking::delay::DelayMs;

/// FIFO_COUNTH solo usa los bits [4:0]
const FIFO_COUNT_MASK: u16 = 0x1FFF;

/// Bytes a descartar para que el FIFO empiece en un conjunto completo
pub fn fifo_misalignment(count: u16, fifo_type: FifoType) -> u16 {
    count % fifo_type.sample_size()
}

impl<I, D, E> Icm20948<I, D>
where
    I: Interface<Error = E>,
    D: DelayMs<u32>,
{
    /// Activa el FIFO (USER_CTRL.FIFO_EN)
    pub fn enable_fifo(&mut self, enable: bool) -> Result<(), Icm20948Error> {
        self.update_bits::<bank0::Bank>(bank0::USER_CTRL, bits::FIFO_EN, enable)
    }

    pub fn set_fifo_mode(&mut self, mode: FifoMode) -> Result<(), Icm20948Error> {
        let val = match mode {
            FifoMode::Continuous => 0x00,
            FifoMode::StopWhenFull => 0x01,
        };
        self.write_reg::<bank0::Bank>(bank0::FIFO_MODE, val)
    }

    /// Empieza a escribir en el FIFO los datos de `fifo_type`
    pub fn start_fifo(&mut self, fifo_type: FifoType) -> Result<(), Icm20948Error> {
        self.base_state.fifo_type = fifo_type;
        self.write_reg::<bank0::Bank>(bank0::FIFO_EN_2, fifo_type as u8)
    }

    pub fn stop_fifo(&mut self) -> Result<(), Icm20948Error> {
        self.write_reg::<bank0::Bank>(bank0::FIFO_EN_2, 0x00)
    }

    /// Vacía el FIFO
    pub fn reset_fifo(&mut self) -> Result<(), Icm20948Error> {
        self.write_reg::<bank0::Bank>(bank0::FIFO_RST, 0x01)?;
        self.write_reg::<bank0::Bank>(bank0::FIFO_RST, 0x00)
    }

    /// Lee la cuenta actual del FIFO en bytes
    pub fn get_fifo_count(&mut self) -> Result<u16, Icm20948Error> {
        let count = self.read_reg16::<bank0::Bank>(bank0::FIFO_COUNTH)? as u16;
        Ok(count & FIFO_COUNT_MASK)
    }

    /// Conjuntos completos disponibles según el tipo de FIFO actual
    pub fn get_number_of_fifo_data_sets(&mut self) -> Result<u16, Icm20948Error> {
        let count = self.get_fifo_count()?;
        Ok(count / self.base_state.fifo_type.sample_size())
    }

    /// Descarta `count % tamaño` bytes del principio del FIFO
    pub fn find_fifo_begin(&mut self) -> Result<(), Icm20948Error> {
        let count = self.get_fifo_count()?;
        let start = fifo_misalignment(count, self.base_state.fifo_type);
        log::debug!("FIFO: {} bytes, descartando {}", count, start);
        for _ in 0..start {
            self.read_reg::<bank0::Bank>(bank0::FIFO_R_W)?;
        }
        Ok(())
    }

    /// Tipo de datos configurado en el último `start_fifo`
    pub fn fifo_type(&self) -> FifoType {
        self.base_state.fifo_type
    }

    fn read_fifo_triple(&mut self) -> Result<XyzFloat, Icm20948Error> {
        let mut bytes = [0u8; 6];
        self.read_regs::<bank0::Bank>(bank0::FIFO_R_W, &mut bytes)?;
        Ok(be_i16_triple(&bytes))
    }

    pub fn get_acc_raw_values_from_fifo(&mut self) -> Result<XyzFloat, Icm20948Error> {
        self.read_fifo_triple()
    }

    pub fn get_corrected_acc_raw_values_from_fifo(&mut self) -> Result<XyzFloat, Icm20948Error> {
        let raw = self.read_fifo_triple()?;
        Ok(correct_acc(raw, &self.base_state.calibration))
    }

    /// Aceleración en g a partir del siguiente triple del FIFO
    pub fn get_g_values_from_fifo(&mut self) -> Result<XyzFloat, Icm20948Error> {
        let corrected = self.get_corrected_acc_raw_values_from_fifo()?;
        Ok(acc_to_g(corrected, self.base_state.calibration.acc_range_factor))
    }

    /// Velocidad angular en grados/segundo a partir del siguiente triple del FIFO
    pub fn get_gyr_values_from_fifo(&mut self) -> Result<XyzFloat, Icm20948Error> {
        let raw = self.read_fifo_triple()?;
        let corrected = correct_gyr(raw, &self.base_state.calibration);
        Ok(gyr_to_dps(corrected, self.base_state.calibration.gyr_range_factor))
    }
}
