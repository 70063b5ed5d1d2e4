//! Configuración de interrupciones y del pin INT1

use crate::device::{Icm20948, Icm20948Error};
use crate::interface::Interface;
use crate::register::registers::{bank0, bank2};
use crate::types::{bits, IntPinPolarity, InterruptType, WomCompare};
use embedded_hal::blocking::delay::DelayMs;

/// Empaqueta los registros de estado en el resumen de 6 bits.
///
/// Orden de entrada: I2C_MST_STATUS, INT_STATUS, INT_STATUS_1, INT_STATUS_2, INT_STATUS_3.
pub fn pack_interrupt_status(status: [u8; 5]) -> u8 {
    let [mst, int0, int1, int2, int3] = status;
    let mut source = 0u8;
    if mst & bits::PASS_THROUGH != 0 {
        source |= InterruptType::FSync.mask();
    }
    if int0 & bits::DMP_INT1 != 0 {
        source |= InterruptType::Dmp.mask();
    }
    if int0 & bits::WOM_INT != 0 {
        source |= InterruptType::Wom.mask();
    }
    if int1 & 0x01 != 0 {
        source |= InterruptType::DataReady.mask();
    }
    if int2 & 0x01 != 0 {
        source |= InterruptType::FifoOverflow.mask();
    }
    if int3 & 0x01 != 0 {
        source |= InterruptType::FifoWatermark.mask();
    }
    source
}

/// Comprueba si `int_type` está presente en un resumen leído
pub fn check_interrupt(source: u8, int_type: InterruptType) -> bool {
    source & int_type.mask() != 0
}

impl<I, D, E> Icm20948<I, D>
where
    I: Interface<Error = E>,
    D: DelayMs<u32>,
{
    pub fn set_int_pin_polarity(&mut self, polarity: IntPinPolarity) -> Result<(), Icm20948Error> {
        let active_low = polarity == IntPinPolarity::ActiveLow;
        self.update_bits::<bank0::Bank>(bank0::INT_PIN_CFG, bits::INT1_ACTL, active_low)
    }

    /// INT1 se mantiene activo hasta que se borre la interrupción
    pub fn enable_int_latch(&mut self, latch: bool) -> Result<(), Icm20948Error> {
        self.update_bits::<bank0::Bank>(bank0::INT_PIN_CFG, bits::INT1_LATCH_EN, latch)
    }

    /// Cualquier lectura borra el estado de interrupción, no solo la de INT_STATUS
    pub fn enable_clear_int_by_any_read(&mut self, clear_by_any_read: bool) -> Result<(), Icm20948Error> {
        self.update_bits::<bank0::Bank>(bank0::INT_PIN_CFG, bits::INT_ANYRD_2CLEAR, clear_by_any_read)
    }

    pub fn set_fsync_int_polarity(&mut self, polarity: IntPinPolarity) -> Result<(), Icm20948Error> {
        let active_low = polarity == IntPinPolarity::ActiveLow;
        self.update_bits::<bank0::Bank>(bank0::INT_PIN_CFG, bits::ACTL_FSYNC, active_low)
    }

    pub fn enable_interrupt(&mut self, int_type: InterruptType) -> Result<(), Icm20948Error> {
        self.set_interrupt(int_type, true)
    }

    pub fn disable_interrupt(&mut self, int_type: InterruptType) -> Result<(), Icm20948Error> {
        self.set_interrupt(int_type, false)
    }

    fn set_interrupt(&mut self, int_type: InterruptType, enable: bool) -> Result<(), Icm20948Error> {
        match int_type {
            InterruptType::FSync => {
                self.update_bits::<bank0::Bank>(bank0::INT_PIN_CFG, bits::FSYNC_INT_MODE_EN, enable)?;
                self.update_bits::<bank0::Bank>(bank0::INT_ENABLE, bits::REG_WOF_EN, enable)
            }
            InterruptType::Wom => {
                self.update_bits::<bank0::Bank>(bank0::INT_ENABLE, bits::WOM_INT_EN, enable)?;
                self.update_bits::<bank2::Bank>(bank2::ACCEL_INTEL_CTRL, bits::ACCEL_INTEL_EN, enable)
            }
            InterruptType::Dmp => {
                self.update_bits::<bank0::Bank>(bank0::INT_ENABLE, bits::DMP_INT1_EN, enable)
            }
            InterruptType::DataReady => {
                self.write_reg::<bank0::Bank>(bank0::INT_ENABLE_1, enable as u8)
            }
            InterruptType::FifoOverflow => {
                self.write_reg::<bank0::Bank>(bank0::INT_ENABLE_2, enable as u8)
            }
            InterruptType::FifoWatermark => {
                self.write_reg::<bank0::Bank>(bank0::INT_ENABLE_3, enable as u8)
            }
        }
    }

    /// Lee todos los registros de estado (lo que borra las interrupciones) y
    /// devuelve el resumen; se consulta con [`check_interrupt`].
    pub fn read_and_clear_interrupts(&mut self) -> Result<u8, Icm20948Error> {
        let status = [
            self.read_reg::<bank0::Bank>(bank0::I2C_MST_STATUS)?,
            self.read_reg::<bank0::Bank>(bank0::INT_STATUS)?,
            self.read_reg::<bank0::Bank>(bank0::INT_STATUS_1)?,
            self.read_reg::<bank0::Bank>(bank0::INT_STATUS_2)?,
            self.read_reg::<bank0::Bank>(bank0::INT_STATUS_3)?,
        ];
        Ok(pack_interrupt_status(status))
    }

    /// Umbral de wake-on-motion (4 mg/LSB) y modo de comparación
    pub fn set_wake_on_motion_threshold(
        &mut self,
        threshold: u8,
        compare: WomCompare,
    ) -> Result<(), Icm20948Error> {
        let previous = compare == WomCompare::Previous;
        self.update_bits::<bank2::Bank>(bank2::ACCEL_INTEL_CTRL, bits::ACCEL_INTEL_MODE_INT, previous)?;
        self.write_reg::<bank2::Bank>(bank2::ACCEL_WOM_THR, threshold)
    }
}
