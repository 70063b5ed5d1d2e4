use crate::calibration::Calibration;
use crate::compass::AuxTransfer;
use crate::interface::Interface;
use crate::register::registers::{bank0, bank2, RegisterBank};
use crate::types::{bits, timing, FifoType, WHO_AM_I_CONTENT};
use embedded_hal::blocking::delay::DelayMs;

/// Tamaño del bloque de datos leído por `read_sensor`:
/// accel (6) + gyro (6) + temp (2) + magnetómetro (6)
pub const SNAPSHOT_LEN: usize = 20;

/// Valor centinela: banco desconocido, fuerza la primera selección
const BANK_UNKNOWN: u8 = 0xFF;

// Define the device structure and enums
pub struct Icm20948<I, D> {
    pub(crate) interface: I,
    pub(crate) base_state: BaseState,
    pub(crate) delay: D,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Icm20948Error {
    /// Fallo del transporte subyacente
    InterfaceError,
    InvalidParameter,
    /// WHO_AM_I no coincide (valor leído)
    WhoAmIError(u8),
    /// Identificador del AK09916 no reconocido (valor leído)
    CompassWhoAmIError(u16),
    /// Operación fuera de secuencia (p. ej. leer el bus auxiliar sin asentar)
    InvalidOperation,
}

impl Icm20948Error {
    pub fn from_error<E>(_error: E) -> Self {
        Icm20948Error::InterfaceError
    }
}

// Implementación para manejar errores de linux_embedded_hal
#[cfg(feature = "linux")]
impl From<linux_embedded_hal::i2cdev::linux::LinuxI2CError> for Icm20948Error {
    fn from(_error: linux_embedded_hal::i2cdev::linux::LinuxI2CError) -> Self {
        Icm20948Error::InterfaceError
    }
}

/// Estado base del dispositivo ICM20948
#[derive(Debug, Clone)]
pub struct BaseState {
    /// Banco de registros seleccionado por última vez (0xFF = desconocido)
    pub last_bank_selected: u8,
    pub calibration: Calibration,
    /// Última instantánea leída por `read_sensor`
    pub buffer: [u8; SNAPSHOT_LEN],
    /// Datos que se están enviando al FIFO
    pub fifo_type: FifoType,
    /// Estado del canal auxiliar hacia el magnetómetro
    pub aux: AuxTransfer,
}

impl Default for BaseState {
    fn default() -> Self {
        Self {
            last_bank_selected: BANK_UNKNOWN,
            calibration: Calibration::default(),
            buffer: [0; SNAPSHOT_LEN],
            fifo_type: FifoType::default(),
            aux: AuxTransfer::default(),
        }
    }
}

impl<I, D, E> Icm20948<I, D>
where
    I: Interface<Error = E>,
    D: DelayMs<u32>,
{
    /// Create a new instance of Icm20948
    pub fn new(interface: I, delay: D) -> Self {
        Self {
            interface,
            base_state: BaseState::default(),
            delay,
        }
    }

    /// Consume el driver y devuelve la interfaz y el proveedor de retardos
    pub fn release(self) -> (I, D) {
        (self.interface, self.delay)
    }

    pub fn read_reg<B: RegisterBank>(&mut self, reg: u8) -> Result<u8, Icm20948Error> {
        let mut data = [0u8];
        self.read_regs::<B>(reg, &mut data)?;
        Ok(data[0])
    }

    /// Método genérico para leer múltiples registros de un banco específico
    pub fn read_regs<B: RegisterBank>(
        &mut self,
        reg: u8,
        data: &mut [u8],
    ) -> Result<(), Icm20948Error> {
        // Seleccionar el banco correcto
        self.set_bank(B::BANK)?;

        self.interface
            .read_reg(reg, data)
            .map_err(Icm20948Error::from_error)
    }

    /// Lee un valor de 16 bits big-endian (registro alto primero)
    pub fn read_reg16<B: RegisterBank>(&mut self, reg: u8) -> Result<i16, Icm20948Error> {
        let mut data = [0u8; 2];
        self.read_regs::<B>(reg, &mut data)?;
        Ok(i16::from_be_bytes(data))
    }

    /// Método genérico para escribir en un registro de un banco específico
    pub fn write_reg<B: RegisterBank>(&mut self, reg: u8, value: u8) -> Result<(), Icm20948Error> {
        self.write_regs::<B>(reg, &[value])
    }

    /// Método genérico para escribir en múltiples registros de un banco específico
    pub fn write_regs<B: RegisterBank>(
        &mut self,
        reg: u8,
        values: &[u8],
    ) -> Result<(), Icm20948Error> {
        // Seleccionar el banco correcto
        self.set_bank(B::BANK)?;

        self.interface
            .write_reg(reg, values)
            .map_err(Icm20948Error::from_error)
    }

    /// Escribe un valor de 16 bits big-endian en dos registros consecutivos
    pub fn write_reg16<B: RegisterBank>(&mut self, reg: u8, value: u16) -> Result<(), Icm20948Error> {
        self.write_regs::<B>(reg, &value.to_be_bytes())
    }

    /// Método genérico para modificar bits específicos de un registro en un banco específico
    pub fn modify_reg<B: RegisterBank, F>(&mut self, reg: u8, f: F) -> Result<(), Icm20948Error>
    where
        F: FnOnce(u8) -> u8,
    {
        // Leer el valor actual
        let value = self.read_reg::<B>(reg)?;

        // Aplicar la modificación
        let new_value = f(value);

        // Escribir el nuevo valor
        self.write_reg::<B>(reg, new_value)
    }

    /// Pone o borra los bits de `mask` preservando el resto del registro
    pub fn update_bits<B: RegisterBank>(
        &mut self,
        reg: u8,
        mask: u8,
        set: bool,
    ) -> Result<(), Icm20948Error> {
        self.modify_reg::<B, _>(reg, |val| if set { val | mask } else { val & !mask })
    }

    /// Escribe en el banco actual, sin seleccionar banco
    pub(crate) fn write_reg_raw(&mut self, reg: u8, value: u8) -> Result<(), Icm20948Error> {
        self.interface
            .write_reg(reg, &[value])
            .map_err(Icm20948Error::from_error)
    }

    /// Selecciona el banco de registros. Solo escribe REG_BANK_SEL si el banco cambia.
    pub fn set_bank(&mut self, bank: u8) -> Result<(), Icm20948Error> {
        if bank > 3 {
            return Err(Icm20948Error::InvalidParameter);
        }
        if bank == self.base_state.last_bank_selected {
            return Ok(());
        }

        // Bits 3:0 y 7:6 son reservados, escribir 0 es seguro
        let val = (bank & 0x03) << 4;
        self.interface
            .write_reg(bank0::REG_BANK_SEL, &[val])
            .map_err(Icm20948Error::from_error)?;
        log::debug!(
            "REG_BANK_SEL: {} -> {}",
            self.base_state.last_bank_selected,
            bank
        );
        self.base_state.last_bank_selected = bank;

        Ok(())
    }

    /// Banco seleccionado actualmente, si se conoce
    pub fn current_bank(&self) -> Option<u8> {
        match self.base_state.last_bank_selected {
            BANK_UNKNOWN => None,
            bank => Some(bank),
        }
    }

    /// Initialize the device with basic configuration
    ///
    /// Resetea el chip, comprueba WHO_AM_I, restablece la calibración y el tipo de
    /// FIFO, lo despierta y alinea los ODR.
    pub fn init(&mut self) -> Result<(), Icm20948Error> {
        self.reset()?;

        let whoami = self.whoami()?;
        if whoami != WHO_AM_I_CONTENT {
            log::warn!(
                "WHO_AM_I inesperado: 0x{:02X} (esperado 0x{:02X})",
                whoami,
                WHO_AM_I_CONTENT
            );
            return Err(Icm20948Error::WhoAmIError(whoami));
        }

        self.base_state.calibration = Calibration::default();
        self.base_state.fifo_type = FifoType::Acc;

        self.wakeup()?;
        self.write_reg::<bank2::Bank>(bank2::ODR_ALIGN_EN, 0x01)?;

        log::info!("ICM20948 inicializado");
        Ok(())
    }

    /// Lee el registro WHO_AM_I
    pub fn whoami(&mut self) -> Result<u8, Icm20948Error> {
        self.read_reg::<bank0::Bank>(bank0::WHO_AM_I)
    }

    /// Reset por software; el chip vuelve al banco 0
    pub fn reset(&mut self) -> Result<(), Icm20948Error> {
        self.write_reg::<bank0::Bank>(bank0::PWR_MGMT_1, bits::H_RESET)?;
        self.delay.delay_ms(timing::RESET_MS);
        // El reset también detiene el maestro I2C auxiliar
        self.base_state.last_bank_selected = 0;
        self.base_state.aux = AuxTransfer::default();
        // Las escalas vuelven a ±2g / ±250 dps
        self.base_state.calibration.acc_range_factor = 1.0;
        self.base_state.calibration.gyr_range_factor = 1.0;
        Ok(())
    }

    /// Enable or disable the Sleep mode
    pub fn sleep(&mut self, sleep: bool) -> Result<(), Icm20948Error> {
        self.update_bits::<bank0::Bank>(bank0::PWR_MGMT_1, bits::SLEEP, sleep)
    }

    /// Despierta el chip (borra SLEEP)
    pub fn wakeup(&mut self) -> Result<(), Icm20948Error> {
        self.sleep(false)
    }

    /// Activa o desactiva el modo de bajo consumo (LP_EN)
    pub fn enable_low_power(&mut self, enable: bool) -> Result<(), Icm20948Error> {
        self.update_bits::<bank0::Bank>(bank0::PWR_MGMT_1, bits::LP_EN, enable)
    }

    /// Activa o desactiva el acelerómetro. Los bits de PWR_MGMT_2 son de desactivación.
    pub fn enable_acc(&mut self, enable: bool) -> Result<(), Icm20948Error> {
        self.update_bits::<bank0::Bank>(bank0::PWR_MGMT_2, bits::PWR_ACCEL_STBY, !enable)
    }

    /// Activa o desactiva el giroscopio
    pub fn enable_gyr(&mut self, enable: bool) -> Result<(), Icm20948Error> {
        self.update_bits::<bank0::Bank>(bank0::PWR_MGMT_2, bits::PWR_GYRO_STBY, !enable)
    }

    /// Selección automática de reloj (PLL si está disponible)
    pub fn set_clock_to_auto_select(&mut self) -> Result<(), Icm20948Error> {
        self.update_bits::<bank0::Bank>(bank0::PWR_MGMT_1, bits::CLK_AUTO, true)?;
        self.delay.delay_ms(timing::CLOCK_SELECT_MS);
        Ok(())
    }
}
