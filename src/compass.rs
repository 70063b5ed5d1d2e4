//! Magnetómetro AK09916 a través del maestro I2C auxiliar del ICM20948
//!
//! El AK09916 no está en el bus principal: cada acceso se prepara en los
//! registros del esclavo 0 (banco 3), el ICM20948 lo retransmite y el
//! resultado de una lectura aparece en EXT_SLV_SENS_DATA_00 tras un tiempo
//! de asentamiento. El canal sigue la máquina de estados [`AuxPhase`]:
//!
//! ```text
//! Idle --preparar--> Staged --esperar--> Settled --armar HXL x8--> Readable
//! ```
//!
//! Solo se pueden recoger bytes retransmitidos en `Settled`.

use crate::device::{Icm20948, Icm20948Error};
use crate::interface::Interface;
use crate::register::ak09916;
use crate::register::registers::{bank0, bank2, bank3, RegisterBank};
use crate::types::{bits, timing, MagOpMode, AK09916_WHO_AM_I_1, AK09916_WHO_AM_I_2};
use embedded_hal::blocking::delay::DelayMs;

/// Bytes leídos en segundo plano desde HXL: ejes (6) + TMPS + ST2
const MAG_DATA_LEN: u8 = 8;

/// Fase del canal auxiliar (esclavo 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuxPhase {
    /// Nada preparado
    #[default]
    Idle,
    /// Lectura preparada, todavía sin tiempo de asentamiento
    Staged,
    /// El resultado de la lectura preparada está en EXT_SLV_SENS_DATA
    Settled,
    /// Lectura continua de HXL armada; los datos llegan con `read_sensor`
    Readable,
}

/// Petición actual en el canal auxiliar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuxTransfer {
    pub phase: AuxPhase,
    /// Registro del AK09916 solicitado
    pub reg: u8,
    /// Bytes solicitados
    pub len: u8,
}

/// Comprueba el identificador de 16 bits (WIA1 alto, WIA2 bajo)
pub fn is_valid_mag_id(id: u16) -> bool {
    id == AK09916_WHO_AM_I_1 || id == AK09916_WHO_AM_I_2
}

impl<I, D, E> Icm20948<I, D>
where
    I: Interface<Error = E>,
    D: DelayMs<u32>,
{
    /// Inicializa el magnetómetro y deja armada la lectura continua a 100 Hz.
    ///
    /// Resetea también el ICM20948, así que la configuración previa se pierde.
    pub fn init_magnetometer(&mut self) -> Result<(), Icm20948Error> {
        self.enable_i2c_master()?;
        self.reset_mag()?;
        self.reset()?;
        self.wakeup()?;
        self.write_reg::<bank2::Bank>(bank2::ODR_ALIGN_EN, 0x01)?;
        self.delay.delay_ms(timing::I2C_MST_ENABLE_MS);
        self.enable_i2c_master()?;
        self.delay.delay_ms(timing::I2C_MST_ENABLE_MS);

        let id = self.whoami_mag()?;
        if !is_valid_mag_id(id) {
            log::warn!("AK09916 no encontrado, WIA = 0x{:04X}", id);
            return Err(Icm20948Error::CompassWhoAmIError(id));
        }

        self.set_mag_op_mode(MagOpMode::Continuous100Hz)?;
        log::info!("AK09916 inicializado (WIA = 0x{:04X})", id);
        Ok(())
    }

    /// Identificador del AK09916: WIA1 como byte alto y WIA2 como byte bajo
    pub fn whoami_mag(&mut self) -> Result<u16, Icm20948Error> {
        self.read_ak09916_register16(ak09916::WIA_1)
    }

    /// Cambia el modo de operación; salvo en PowerDown rearma la lectura de datos
    pub fn set_mag_op_mode(&mut self, mode: MagOpMode) -> Result<(), Icm20948Error> {
        self.write_ak09916_register8(ak09916::CNTL_2, mode as u8)?;
        self.delay.delay_ms(timing::MAG_MODE_MS);
        if mode != MagOpMode::PowerDown {
            self.arm_mag_data_read()?;
        }
        Ok(())
    }

    /// Reset por software del AK09916
    pub fn reset_mag(&mut self) -> Result<(), Icm20948Error> {
        self.write_ak09916_register8(ak09916::CNTL_3, bits::AK_SRST)?;
        self.delay.delay_ms(timing::MAG_RESET_MS);
        Ok(())
    }

    /// Activa el maestro I2C auxiliar con reloj de 345.6 kHz
    pub fn enable_i2c_master(&mut self) -> Result<(), Icm20948Error> {
        self.write_reg::<bank0::Bank>(bank0::USER_CTRL, bits::I2C_MST_EN)?;
        self.write_reg::<bank3::Bank>(bank3::I2C_MST_CTRL, bits::I2C_MST_CLK)?;
        self.delay.delay_ms(timing::I2C_MST_ENABLE_MS);
        Ok(())
    }

    /// Fase actual del canal auxiliar
    pub fn aux_phase(&self) -> AuxPhase {
        self.base_state.aux.phase
    }

    /// Prepara una lectura de `len` bytes desde `reg` y espera a que se asiente
    pub fn enable_mag_data_read(&mut self, reg: u8, len: u8) -> Result<(), Icm20948Error> {
        self.stage_mag_read(reg, len)?;
        self.settle_aux();
        Ok(())
    }

    /// Escribe un registro del AK09916 y deshabilita el esclavo 0 al terminar.
    ///
    /// La lectura continua queda desarmada: `set_mag_op_mode` la vuelve a armar.
    pub fn write_ak09916_register8(&mut self, reg: u8, value: u8) -> Result<(), Icm20948Error> {
        self.set_bank(bank3::Bank::BANK)?;
        self.write_reg_raw(bank3::I2C_SLV0_ADDR, ak09916::I2C_ADDR)?;
        self.write_reg_raw(bank3::I2C_SLV0_REG, reg)?;
        self.write_reg_raw(bank3::I2C_SLV0_DO, value)?;
        self.write_reg_raw(bank3::I2C_SLV0_CTRL, bits::I2C_SLV_EN | 1)?;
        log::debug!("AK09916 0x{:02X} <- 0x{:02X}", reg, value);

        // Un ciclo del maestro basta; con el esclavo habilitado la escritura se repetiría
        self.delay.delay_ms(timing::AUX_SETTLE_MS);
        self.write_reg_raw(bank3::I2C_SLV0_CTRL, 0x00)?;

        self.base_state.aux.phase = AuxPhase::Idle;
        Ok(())
    }

    pub fn read_ak09916_register8(&mut self, reg: u8) -> Result<u8, Icm20948Error> {
        let mut data = [0u8; 1];
        self.read_ak09916_registers(reg, &mut data)?;
        Ok(data[0])
    }

    /// Lee dos registros consecutivos como un valor big-endian
    pub fn read_ak09916_register16(&mut self, reg: u8) -> Result<u16, Icm20948Error> {
        let mut data = [0u8; 2];
        self.read_ak09916_registers(reg, &mut data)?;
        Ok(u16::from_be_bytes(data))
    }

    /// Recoge los bytes de la lectura ya asentada. Falla con `InvalidOperation`
    /// fuera de la fase `Settled` o si se piden más bytes de los preparados.
    pub fn fetch_aux_data(&mut self, data: &mut [u8]) -> Result<(), Icm20948Error> {
        let aux = self.base_state.aux;
        if aux.phase != AuxPhase::Settled || data.len() > aux.len as usize {
            return Err(Icm20948Error::InvalidOperation);
        }
        self.read_regs::<bank0::Bank>(bank0::EXT_SLV_SENS_DATA_00, data)
    }

    fn read_ak09916_registers(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Icm20948Error> {
        let result = self
            .enable_mag_data_read(reg, data.len() as u8)
            .and_then(|()| self.fetch_aux_data(data));
        // La preparación anterior ha sustituido la lectura continua; se rearma
        // aunque la lectura haya fallado
        let rearm = self.arm_mag_data_read();
        result.and(rearm)
    }

    fn stage_mag_read(&mut self, reg: u8, len: u8) -> Result<(), Icm20948Error> {
        if len == 0 || len > 15 {
            return Err(Icm20948Error::InvalidParameter);
        }
        self.set_bank(bank3::Bank::BANK)?;
        self.write_reg_raw(bank3::I2C_SLV0_ADDR, ak09916::I2C_ADDR | bits::I2C_SLV_READ)?;
        self.write_reg_raw(bank3::I2C_SLV0_REG, reg)?;
        self.write_reg_raw(bank3::I2C_SLV0_CTRL, bits::I2C_SLV_EN | len)?;
        log::debug!("AK09916 lectura preparada: 0x{:02X} x{}", reg, len);

        self.base_state.aux.reg = reg;
        self.base_state.aux.len = len;
        self.base_state.aux.phase = AuxPhase::Staged;
        Ok(())
    }

    fn settle_aux(&mut self) {
        self.delay.delay_ms(timing::AUX_SETTLE_MS);
        if self.base_state.aux.phase == AuxPhase::Staged {
            self.base_state.aux.phase = AuxPhase::Settled;
        }
    }

    /// Arma la lectura continua de 8 bytes desde HXL
    fn arm_mag_data_read(&mut self) -> Result<(), Icm20948Error> {
        self.enable_mag_data_read(ak09916::HXL, MAG_DATA_LEN)?;
        self.base_state.aux.phase = AuxPhase::Readable;
        Ok(())
    }
}
