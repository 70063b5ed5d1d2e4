//! Transporte de registros hacia el ICM20948.
//!
//! El driver solo necesita dos primitivas: escribir una ráfaga a partir de un
//! registro y leer una ráfaga a partir de otro. El auto-incremento lo hace el chip.

use embedded_hal::blocking::i2c;

/// Bytes de datos que caben en una escritura (el registro va aparte)
const MAX_BURST: usize = 16;

/// Fallo del transporte I2C
#[derive(Debug, Clone)]
pub enum InterfaceError<E> {
    /// El bus devolvió un error
    I2cError(E),
    /// Escritura de más de 16 bytes
    InvalidParameter,
}

/// Acceso a registros del ICM20948.
///
/// `write_reg` envía `[reg, data...]` y termina con STOP. `read_reg` envía `reg`
/// con START repetido y lee `data.len()` bytes consecutivos.
pub trait Interface {
    type Error;

    fn write_reg(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error>;

    fn read_reg(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error>;
}

/// Bus I2C más la dirección del chip (0x68 o 0x69 según AD0)
pub struct I2cInterface<I2C> {
    i2c: I2C,
    addr: u8,
}

impl<I2C, E> I2cInterface<I2C>
where
    I2C: i2c::Write<Error = E> + i2c::WriteRead<Error = E>,
{
    pub fn new(i2c: I2C, addr: u8) -> Self {
        Self { i2c, addr }
    }

    pub fn address(&self) -> u8 {
        self.addr
    }

    /// Devuelve el bus para reutilizarlo con otros dispositivos
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> Interface for I2cInterface<I2C>
where
    I2C: i2c::Write<Error = E> + i2c::WriteRead<Error = E>,
{
    type Error = InterfaceError<E>;

    fn write_reg(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        if data.len() > MAX_BURST {
            return Err(InterfaceError::InvalidParameter);
        }

        let mut frame = [0u8; MAX_BURST + 1];
        let len = data.len() + 1;
        frame[0] = reg;
        frame[1..len].copy_from_slice(data);

        self.i2c
            .write(self.addr, &frame[..len])
            .map_err(InterfaceError::I2cError)
    }

    fn read_reg(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c
            .write_read(self.addr, &[reg], data)
            .map_err(InterfaceError::I2cError)
    }
}
