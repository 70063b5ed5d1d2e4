//! Calibración en memoria del acelerómetro y giroscopio
//!
//! Los offsets se guardan en LSB a la escala mínima (±2g / ±250 dps) y se
//! dividen por el factor de rango al corregir, de modo que siguen siendo
//! válidos tras cambiar de escala.

use crate::device::{Icm20948, Icm20948Error};
use crate::interface::Interface;
use crate::types::sensitivity::{ACCEL_LSB_PER_G, FULL_SCALE_LSB};
use crate::types::{timing, AccelRange, Dlpf, GyroRange, XyzFloat};
use embedded_hal::blocking::delay::DelayMs;

/// Estado de calibración. Por defecto no aplica ninguna corrección.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pub acc_offset: XyzFloat,
    pub acc_corr_factor: XyzFloat,
    pub gyr_offset: XyzFloat,
    /// 2^(escala del acelerómetro)
    pub acc_range_factor: f32,
    /// 2^(escala del giroscopio)
    pub gyr_range_factor: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            acc_offset: XyzFloat::default(),
            acc_corr_factor: XyzFloat::new(1.0, 1.0, 1.0),
            gyr_offset: XyzFloat::default(),
            acc_range_factor: 1.0,
            gyr_range_factor: 1.0,
        }
    }
}

/// Offset y factor de corrección a partir de los extremos observados en un eje
fn axis_offset_and_factor(min: f32, max: f32) -> (f32, f32) {
    ((max + min) * 0.5, (max + min.abs()) / FULL_SCALE_LSB)
}

impl<I, D, E> Icm20948<I, D>
where
    I: Interface<Error = E>,
    D: DelayMs<u32>,
{
    /// Calcula los offsets con el dispositivo en reposo y el eje Z hacia arriba.
    ///
    /// Fuerza DLPF 6, ±250 dps y ±2g, espera a que se asiente y promedia `runs`
    /// lecturas. Al eje Z del acelerómetro se le resta 1g (16384 LSB).
    pub fn auto_offsets(&mut self, runs: u16) -> Result<(), Icm20948Error> {
        if runs == 0 {
            return Err(Icm20948Error::InvalidParameter);
        }

        self.set_gyr_dlpf(Dlpf::Dlpf6)?;
        self.set_gyr_range(GyroRange::Dps250)?;
        self.set_acc_range(AccelRange::G2)?;
        self.set_acc_dlpf(Dlpf::Dlpf6)?;
        self.delay.delay_ms(timing::CALIBRATION_SETTLE_MS);

        self.base_state.calibration.acc_offset = XyzFloat::default();
        self.base_state.calibration.gyr_offset = XyzFloat::default();

        let mut acc_sum = XyzFloat::default();
        let mut gyr_sum = XyzFloat::default();
        for _ in 0..runs {
            self.read_sensor()?;
            acc_sum = acc_sum + self.get_acc_raw_values();
            gyr_sum = gyr_sum + self.get_gyr_raw_values();
            self.delay.delay_ms(timing::CALIBRATION_SAMPLE_MS);
        }

        let n = runs as f32;
        let mut acc_offset = acc_sum.map(|v| v / n);
        acc_offset.z -= ACCEL_LSB_PER_G;
        let gyr_offset = gyr_sum.map(|v| v / n);

        self.base_state.calibration.acc_offset = acc_offset;
        self.base_state.calibration.gyr_offset = gyr_offset;

        log::info!(
            "Offsets calculados ({} muestras): acc {:?}, gyr {:?}",
            runs,
            acc_offset,
            gyr_offset
        );
        Ok(())
    }

    /// Offsets del acelerómetro a partir de los extremos medidos girando el
    /// dispositivo por las seis orientaciones (a ±2g).
    pub fn set_acc_offsets(
        &mut self,
        x_min: f32,
        x_max: f32,
        y_min: f32,
        y_max: f32,
        z_min: f32,
        z_max: f32,
    ) {
        let (ox, fx) = axis_offset_and_factor(x_min, x_max);
        let (oy, fy) = axis_offset_and_factor(y_min, y_max);
        let (oz, fz) = axis_offset_and_factor(z_min, z_max);

        let cal = &mut self.base_state.calibration;
        cal.acc_offset = XyzFloat::new(ox, oy, oz);
        cal.acc_corr_factor = XyzFloat::new(fx, fy, fz);
    }

    pub fn set_gyr_offsets(&mut self, x: f32, y: f32, z: f32) {
        self.base_state.calibration.gyr_offset = XyzFloat::new(x, y, z);
    }

    /// Calibración actual, para que la aplicación pueda guardarla
    pub fn calibration(&self) -> Calibration {
        self.base_state.calibration
    }

    /// Restaura una calibración guardada.
    ///
    /// Los factores de rango reflejan la escala configurada en el chip y no se
    /// sobrescriben.
    pub fn set_calibration(&mut self, calibration: Calibration) {
        let cal = &mut self.base_state.calibration;
        cal.acc_offset = calibration.acc_offset;
        cal.acc_corr_factor = calibration.acc_corr_factor;
        cal.gyr_offset = calibration.gyr_offset;
    }
}
