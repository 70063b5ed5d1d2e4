//! Definiciones de registros para el ICM20948
//!
//! Cada banco expone un tipo marcador `Bank` que implementa [`registers::RegisterBank`],
//! de modo que el acceso a registros lleva el banco en el tipo:
//! `device.read_reg::<bank2::Bank>(bank2::ACCEL_CONFIG)`.

/// Definición de registros para cada Banco
pub mod registers {
    /// Trait para los bancos de registros
    pub trait RegisterBank {
        const BANK: u8;
    }

    /// Registros del Banco 0
    pub mod bank0 {
        use super::RegisterBank;

        /// Registros del Banco 0
        pub struct Bank;
        impl RegisterBank for Bank {
            const BANK: u8 = 0;
        }

        // Registros de identificación
        pub const WHO_AM_I: u8 = 0x00;
        pub const USER_CTRL: u8 = 0x03;

        // Registros de estado y control
        pub const LP_CONFIG: u8 = 0x05;
        pub const PWR_MGMT_1: u8 = 0x06;
        pub const PWR_MGMT_2: u8 = 0x07;
        pub const INT_PIN_CFG: u8 = 0x0F;
        pub const INT_ENABLE: u8 = 0x10;
        pub const INT_ENABLE_1: u8 = 0x11;
        pub const INT_ENABLE_2: u8 = 0x12;
        pub const INT_ENABLE_3: u8 = 0x13;
        pub const I2C_MST_STATUS: u8 = 0x17;
        pub const INT_STATUS: u8 = 0x19;
        pub const INT_STATUS_1: u8 = 0x1A;
        pub const INT_STATUS_2: u8 = 0x1B;
        pub const INT_STATUS_3: u8 = 0x1C;

        // Bloque de datos: accel (6) + gyro (6) + temp (2) + EXT_SLV_SENS_DATA
        pub const ACCEL_XOUT_H: u8 = 0x2D;
        pub const GYRO_XOUT_H: u8 = 0x33;
        pub const TEMP_OUT_H: u8 = 0x39;
        pub const EXT_SLV_SENS_DATA_00: u8 = 0x3B;

        // Registros de FIFO
        pub const FIFO_EN_1: u8 = 0x66;
        pub const FIFO_EN_2: u8 = 0x67;
        pub const FIFO_RST: u8 = 0x68;
        pub const FIFO_MODE: u8 = 0x69;
        pub const FIFO_COUNTH: u8 = 0x70;
        pub const FIFO_COUNTL: u8 = 0x71;
        pub const FIFO_R_W: u8 = 0x72;
        pub const DATA_RDY_STATUS: u8 = 0x74;
        pub const FIFO_CFG: u8 = 0x76;

        // Selección de banco de registros
        pub const REG_BANK_SEL: u8 = 0x7F;
    }

    /// Registros del Banco 2
    pub mod bank2 {
        use super::RegisterBank;

        /// Registros del Banco 2
        pub struct Bank;
        impl RegisterBank for Bank {
            const BANK: u8 = 2;
        }

        // Registros de configuración del giroscopio
        pub const GYRO_SMPLRT_DIV: u8 = 0x00;
        pub const GYRO_CONFIG_1: u8 = 0x01;
        pub const GYRO_CONFIG_2: u8 = 0x02;
        pub const XG_OFFS_USRH: u8 = 0x03;
        pub const ODR_ALIGN_EN: u8 = 0x09;

        // Registros de configuración del acelerómetro
        pub const ACCEL_SMPLRT_DIV_1: u8 = 0x10;
        pub const ACCEL_SMPLRT_DIV_2: u8 = 0x11;
        pub const ACCEL_INTEL_CTRL: u8 = 0x12;
        pub const ACCEL_WOM_THR: u8 = 0x13;
        pub const ACCEL_CONFIG: u8 = 0x14;
        pub const ACCEL_CONFIG_2: u8 = 0x15;

        pub const FSYNC_CONFIG: u8 = 0x52;
        pub const TEMP_CONFIG: u8 = 0x53;
        pub const MOD_CTRL_USR: u8 = 0x54;
    }

    /// Registros del Banco 3
    pub mod bank3 {
        use super::RegisterBank;

        /// Registros del Banco 3
        pub struct Bank;
        impl RegisterBank for Bank {
            const BANK: u8 = 3;
        }

        // Registros de configuración del maestro I2C
        pub const I2C_MST_ODR_CONFIG: u8 = 0x00;
        pub const I2C_MST_CTRL: u8 = 0x01;
        pub const I2C_MST_DELAY_CTRL: u8 = 0x02;

        // Esclavo 0: canal usado para el magnetómetro
        pub const I2C_SLV0_ADDR: u8 = 0x03;
        pub const I2C_SLV0_REG: u8 = 0x04;
        pub const I2C_SLV0_CTRL: u8 = 0x05;
        pub const I2C_SLV0_DO: u8 = 0x06;
    }
}

/// Registros del magnetómetro AK09916
pub mod ak09916 {
    /// Dirección I2C fija del AK09916 en el bus auxiliar
    pub const I2C_ADDR: u8 = 0x0C;

    pub const WIA_1: u8 = 0x00;
    pub const WIA_2: u8 = 0x01;
    pub const ST_1: u8 = 0x10;
    pub const HXL: u8 = 0x11;
    pub const HXH: u8 = 0x12;
    pub const HYL: u8 = 0x13;
    pub const HYH: u8 = 0x14;
    pub const HZL: u8 = 0x15;
    pub const HZH: u8 = 0x16;
    pub const ST_2: u8 = 0x18;
    pub const CNTL_2: u8 = 0x31;
    pub const CNTL_3: u8 = 0x32;
    pub const TS_1: u8 = 0x33;
    pub const TS_2: u8 = 0x34;
}
