//! Biblioteca Rust para el sensor de movimiento InvenSense ICM20948
//!
//! Driver a nivel de registros para el ICM20948: acelerómetro, giroscopio,
//! sensor de temperatura y el magnetómetro AK09916 accesible a través del
//! maestro I2C auxiliar. Incluye FIFO, interrupciones y calibración en memoria.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c;

// Importaciones internas
pub mod calibration;
pub mod compass;
pub mod config;
pub mod controls;
pub mod conversion;
pub mod device;
pub mod fifo;
pub mod interface;
pub mod interrupt;
pub mod readings;
pub mod register;
pub mod types;

// Re-exports públicos
pub use calibration::Calibration;
pub use compass::{is_valid_mag_id, AuxPhase};
pub use config::Icm20948Config;
pub use conversion::temp_raw_to_celsius;
pub use device::{Icm20948, Icm20948Error};
pub use interrupt::check_interrupt;
pub use types::{
    AccelAvgLowPower, AccelRange, Cycle, Dlpf, FifoMode, FifoType, GyroAvgLowPower, GyroRange,
    IntPinPolarity, InterruptType, MagOpMode, WomCompare, XyzFloat, I2C_ADDRESS_ALT,
    I2C_ADDRESS_DEFAULT,
};

use crate::interface::I2cInterface;

/// Crea un nuevo dispositivo ICM20948 usando el bus I2C
pub fn new_i2c_device<I, D, E>(i2c: I, address: u8, delay: D) -> Icm20948<I2cInterface<I>, D>
where
    I: i2c::Write<Error = E> + i2c::WriteRead<Error = E>,
    D: DelayMs<u32>,
{
    let interface = I2cInterface::new(i2c, address);
    Icm20948::new(interface, delay)
}
