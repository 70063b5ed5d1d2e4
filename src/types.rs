//! Definiciones de tipos y constantes comunes para el ICM20948

use core::ops::{Add, Div, Sub};

/// Valor esperado en el registro WHO_AM_I del ICM20948
pub const WHO_AM_I_CONTENT: u8 = 0xEA;

/// Identificadores válidos del AK09916 (WIA1 como byte alto, WIA2 como byte bajo).
/// El segundo valor corresponde a la variante con los bytes intercambiados.
pub const AK09916_WHO_AM_I_1: u16 = 0x4809;
pub const AK09916_WHO_AM_I_2: u16 = 0x0948;

/// Dirección I2C por defecto (AD0 a nivel alto)
pub const I2C_ADDRESS_DEFAULT: u8 = 0x69;
/// Dirección I2C alternativa (AD0 a nivel bajo)
pub const I2C_ADDRESS_ALT: u8 = 0x68;

/// Triple de valores en coma flotante (x, y, z)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct XyzFloat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl XyzFloat {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Aplica `f` a cada eje
    pub fn map<F: Fn(f32) -> f32>(self, f: F) -> Self {
        Self::new(f(self.x), f(self.y), f(self.z))
    }
}

impl Add for XyzFloat {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for XyzFloat {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Div for XyzFloat {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}

/// Escalas completas disponibles para el acelerómetro
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AccelRange {
    /// ±2g
    #[default]
    G2 = 0,
    /// ±4g
    G4 = 1,
    /// ±8g
    G8 = 2,
    /// ±16g
    G16 = 3,
}

impl AccelRange {
    /// Factor de rango: 2^(valor del enum)
    pub fn range_factor(self) -> f32 {
        (1u8 << self as u8) as f32
    }
}

/// Escalas completas disponibles para el giroscopio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum GyroRange {
    /// ±250 dps
    #[default]
    Dps250 = 0,
    /// ±500 dps
    Dps500 = 1,
    /// ±1000 dps
    Dps1000 = 2,
    /// ±2000 dps
    Dps2000 = 3,
}

impl GyroRange {
    /// Factor de rango: 2^(valor del enum)
    pub fn range_factor(self) -> f32 {
        (1u8 << self as u8) as f32
    }
}

/// Configuración del filtro paso bajo digital (DLPF).
///
/// Los valores 0..=7 se escriben en DLPFCFG (bits [5:3]); `Off` solo borra FCHOICE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Dlpf {
    Dlpf0 = 0,
    Dlpf1 = 1,
    Dlpf2 = 2,
    Dlpf3 = 3,
    Dlpf4 = 4,
    Dlpf5 = 5,
    Dlpf6 = 6,
    Dlpf7 = 7,
    Off = 8,
}

/// Modos de ciclo (LP_CONFIG bits [6:4])
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Cycle {
    NoCycle = 0x00,
    GyrCycle = 0x10,
    AccCycle = 0x20,
    AccGyrCycle = 0x30,
    AccGyrI2cMstCycle = 0x70,
}

/// Promediado del giroscopio en modo ciclo (GYRO_CONFIG_2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GyroAvgLowPower {
    Avg1 = 0,
    Avg2 = 1,
    Avg4 = 2,
    Avg8 = 3,
    Avg16 = 4,
    Avg32 = 5,
    Avg64 = 6,
    Avg128 = 7,
}

/// Promediado del acelerómetro en modo ciclo (ACCEL_CONFIG_2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AccelAvgLowPower {
    Avg4 = 0,
    Avg8 = 1,
    Avg16 = 2,
    Avg32 = 3,
}

/// Polaridad de los pines de interrupción
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntPinPolarity {
    ActiveHigh,
    ActiveLow,
}

/// Tipos de interrupción gestionados por el driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptType {
    /// FSYNC como fuente de interrupción
    FSync,
    /// Wake on motion
    Wom,
    /// Procesador interno (DMP)
    Dmp,
    /// Datos listos
    DataReady,
    /// Desbordamiento del FIFO
    FifoOverflow,
    /// Umbral (watermark) del FIFO
    FifoWatermark,
}

impl InterruptType {
    /// Posición de bit en el resumen devuelto por `read_and_clear_interrupts`
    pub fn mask(self) -> u8 {
        match self {
            InterruptType::FSync => 0x01,
            InterruptType::Dmp => 0x02,
            InterruptType::Wom => 0x04,
            InterruptType::DataReady => 0x08,
            InterruptType::FifoOverflow => 0x10,
            InterruptType::FifoWatermark => 0x20,
        }
    }
}

/// Comparación usada por wake-on-motion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WomCompare {
    /// Compara con la muestra inicial
    Initial,
    /// Compara con la muestra anterior
    Previous,
}

/// Comportamiento del FIFO al llenarse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FifoMode {
    /// Sobrescribe los datos más antiguos
    Continuous,
    /// Deja de escribir cuando está lleno
    StopWhenFull,
}

/// Datos que se envían al FIFO (valor escrito en FIFO_EN_2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum FifoType {
    #[default]
    Acc = 0x10,
    Gyr = 0x0E,
    AccGyr = 0x1E,
}

impl FifoType {
    /// Bytes que forman un conjunto de muestras en el FIFO
    pub fn sample_size(self) -> u16 {
        match self {
            FifoType::Acc | FifoType::Gyr => 6,
            FifoType::AccGyr => 12,
        }
    }
}

/// Modos de operación del AK09916 (CNTL2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MagOpMode {
    PowerDown = 0x00,
    Trigger = 0x01,
    Continuous10Hz = 0x02,
    Continuous20Hz = 0x04,
    Continuous50Hz = 0x06,
    Continuous100Hz = 0x08,
}

/// Bits útiles para configuración y control
pub mod bits {
    // USER_CTRL
    pub const FIFO_EN: u8 = 0x40;
    pub const I2C_MST_EN: u8 = 0x20;

    // PWR_MGMT_1
    pub const H_RESET: u8 = 0x80;
    pub const SLEEP: u8 = 0x40;
    pub const LP_EN: u8 = 0x20;
    pub const CLK_AUTO: u8 = 0x01;

    // PWR_MGMT_2: bits de desactivación
    pub const PWR_ACCEL_STBY: u8 = 0x38;
    pub const PWR_GYRO_STBY: u8 = 0x07;

    // INT_PIN_CFG
    pub const INT1_ACTL: u8 = 0x80;
    pub const INT1_LATCH_EN: u8 = 0x20;
    pub const INT_ANYRD_2CLEAR: u8 = 0x10;
    pub const ACTL_FSYNC: u8 = 0x08;
    pub const FSYNC_INT_MODE_EN: u8 = 0x04;

    // INT_ENABLE
    pub const REG_WOF_EN: u8 = 0x80;
    pub const WOM_INT_EN: u8 = 0x08;
    pub const DMP_INT1_EN: u8 = 0x02;

    // ACCEL_INTEL_CTRL
    pub const ACCEL_INTEL_EN: u8 = 0x02;
    pub const ACCEL_INTEL_MODE_INT: u8 = 0x01;

    // Máscaras de configuración de ACCEL_CONFIG / GYRO_CONFIG_1
    pub const FS_SEL: u8 = 0x06;
    pub const FCHOICE: u8 = 0x01;
    pub const DLPFCFG: u8 = 0x38;

    // I2C_MST_STATUS
    pub const PASS_THROUGH: u8 = 0x80;

    // INT_STATUS
    pub const WOM_INT: u8 = 0x08;
    pub const DMP_INT1: u8 = 0x02;

    // Reloj del maestro I2C: 345.60 kHz
    pub const I2C_MST_CLK: u8 = 0x07;

    // Esclavos I2C
    pub const I2C_SLV_READ: u8 = 0x80;
    pub const I2C_SLV_EN: u8 = 0x80;

    // AK09916 CNTL3
    pub const AK_SRST: u8 = 0x01;
}

/// Constantes de conversión a unidades físicas
pub mod sensitivity {
    /// LSB por g a ±2g
    pub const ACCEL_LSB_PER_G: f32 = 16384.0;
    /// Escala del giroscopio a ±250 dps
    pub const GYRO_BASE_DPS: f32 = 250.0;
    pub const FULL_SCALE_LSB: f32 = 32768.0;
    /// Temp °C = ((TEMP_OUT - RoomTemp_Offset) / Temp_Sensitivity) + 21°C
    pub const ROOM_TEMP_OFFSET: f32 = 0.0;
    pub const T_SENSITIVITY: f32 = 333.87;
    pub const T_BASELINE: f32 = 21.0;
    /// µT por LSB del AK09916
    pub const AK09916_MAG_LSB: f32 = 0.1495;
}

/// Tiempos de asentamiento (ms)
pub mod timing {
    pub const RESET_MS: u32 = 10;
    pub const CLOCK_SELECT_MS: u32 = 10;
    pub const I2C_MST_ENABLE_MS: u32 = 10;
    pub const AUX_SETTLE_MS: u32 = 10;
    pub const MAG_MODE_MS: u32 = 10;
    pub const MAG_RESET_MS: u32 = 100;
    pub const CALIBRATION_SETTLE_MS: u32 = 100;
    pub const CALIBRATION_SAMPLE_MS: u32 = 10;
}
