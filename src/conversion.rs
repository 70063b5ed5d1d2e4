//! Funciones de conversión para datos del sensor ICM20948
//!
//! Este módulo proporciona funciones puras para decodificar los bytes del
//! sensor, aplicar la corrección de calibración y convertir a unidades
//! físicas: aceleración en g, velocidad angular en grados por segundo,
//! campo magnético en µT y temperatura en grados Celsius.

use crate::calibration::Calibration;
use crate::types::sensitivity::{
    ACCEL_LSB_PER_G, AK09916_MAG_LSB, FULL_SCALE_LSB, GYRO_BASE_DPS, ROOM_TEMP_OFFSET,
    T_BASELINE, T_SENSITIVITY,
};
use crate::types::XyzFloat;

/// Decodifica tres enteros de 16 bits con signo big-endian (alto, bajo)
///
/// # Arguments
/// * `bytes` - Seis bytes consecutivos: X_H, X_L, Y_H, Y_L, Z_H, Z_L
///
/// # Returns
/// Los tres valores como flotantes
pub fn be_i16_triple(bytes: &[u8; 6]) -> XyzFloat {
    XyzFloat::new(
        i16::from_be_bytes([bytes[0], bytes[1]]) as f32,
        i16::from_be_bytes([bytes[2], bytes[3]]) as f32,
        i16::from_be_bytes([bytes[4], bytes[5]]) as f32,
    )
}

/// Decodifica los tres ejes del AK09916, que llegan en little-endian (HXL, HXH, ...)
pub fn mag_le_i16_triple(bytes: &[u8; 6]) -> XyzFloat {
    XyzFloat::new(
        i16::from_le_bytes([bytes[0], bytes[1]]) as f32,
        i16::from_le_bytes([bytes[2], bytes[3]]) as f32,
        i16::from_le_bytes([bytes[4], bytes[5]]) as f32,
    )
}

/// Corrige un valor bruto del acelerómetro: `(raw - offset / rango) / factor`
pub fn correct_acc(raw: XyzFloat, cal: &Calibration) -> XyzFloat {
    let range = cal.acc_range_factor;
    (raw - cal.acc_offset.map(|o| o / range)) / cal.acc_corr_factor
}

/// Corrige un valor bruto del giroscopio: `raw - offset / rango`
pub fn correct_gyr(raw: XyzFloat, cal: &Calibration) -> XyzFloat {
    let range = cal.gyr_range_factor;
    raw - cal.gyr_offset.map(|o| o / range)
}

/// Convierte un valor corregido del acelerómetro a g
///
/// # Arguments
/// * `corrected` - Valor ya corregido por la calibración
/// * `range_factor` - 2^(escala seleccionada)
pub fn acc_to_g(corrected: XyzFloat, range_factor: f32) -> XyzFloat {
    corrected.map(|v| v * range_factor / ACCEL_LSB_PER_G)
}

/// Convierte un valor corregido del giroscopio a grados/segundo
pub fn gyr_to_dps(corrected: XyzFloat, range_factor: f32) -> XyzFloat {
    corrected.map(|v| v * range_factor * GYRO_BASE_DPS / FULL_SCALE_LSB)
}

/// Convierte datos brutos de temperatura a grados Celsius
///
/// # Arguments
/// * `raw` - Valor bruto del sensor de temperatura
///
/// # Returns
/// Temperatura en grados Celsius
pub fn temp_raw_to_celsius(raw: i16) -> f32 {
    // Temp °C = ((TEMP_OUT - RoomTemp_Offset) / Temp_Sensitivity) + 21°C
    (raw as f32 - ROOM_TEMP_OFFSET) / T_SENSITIVITY + T_BASELINE
}

/// Convierte valores brutos del magnetómetro a µT. Sin corrección de offset ni rango.
pub fn mag_raw_to_ut(raw: XyzFloat) -> XyzFloat {
    raw.map(|v| v * AK09916_MAG_LSB)
}

/// Norma euclídea de un triple
pub fn resultant(v: XyzFloat) -> f32 {
    (v.x * v.x + v.y * v.y + v.z * v.z).sqrt()
}
