use icm20948_basic::{self, AccelRange, Dlpf, GyroRange, Icm20948Config, I2C_ADDRESS_DEFAULT};
use linux_embedded_hal::{Delay, I2cdev};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread;
use std::time::Duration;

fn main() {
    println!("ICM20948 - Ejemplo básico");

    // Flag para controlar la ejecución del programa
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    // Configurar el manejador para Ctrl+C
    ctrlc::set_handler(move || {
        println!("\nDeteniendo el programa...");
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error al configurar el manejador de Ctrl+C");

    // Crear instancia de I2C para Linux
    let i2c = match I2cdev::new("/dev/i2c-1") {
        Ok(i2c) => i2c,
        Err(e) => {
            eprintln!("Error al abrir dispositivo I2C: {:?}", e);
            return;
        }
    };
    let delay = Delay {};

    let mut device = icm20948_basic::new_i2c_device(i2c, I2C_ADDRESS_DEFAULT, delay);

    if let Err(e) = device.init() {
        eprintln!("Error al inicializar el dispositivo: {:?}", e);
        return;
    }
    println!("Dispositivo inicializado correctamente");

    // Resetea el chip de nuevo, así que va antes de la configuración
    match device.init_magnetometer() {
        Ok(()) => println!("Magnetómetro conectado correctamente"),
        Err(e) => eprintln!("Error al activar el magnetómetro: {:?}", e),
    }

    println!("Calibrando, no mover el sensor...");
    if let Err(e) = device.auto_offsets(50) {
        eprintln!("Error al calibrar sensores: {:?}", e);
        return;
    }
    println!("Sensores calibrados: {:?}", device.calibration());

    let config = Icm20948Config {
        acc_range: AccelRange::G4,
        gyr_range: GyroRange::Dps500,
        acc_dlpf: Dlpf::Dlpf5,
        gyr_dlpf: Dlpf::Dlpf5,
        ..Icm20948Config::default()
    };
    if let Err(e) = device.apply_config(&config) {
        eprintln!("Error al configurar el dispositivo: {:?}", e);
        return;
    }

    while running.load(Ordering::SeqCst) {
        if let Err(e) = device.read_sensor() {
            eprintln!("Error al leer los sensores: {:?}", e);
            thread::sleep(Duration::from_millis(100));
            continue;
        }

        let g = device.get_g_values();
        let gyr = device.get_gyr_values();
        let mag = device.get_mag_values();
        println!(
            "Acel [g]: x={:6.3} y={:6.3} z={:6.3} |g|={:5.3}  Gyro [°/s]: x={:7.2} y={:7.2} z={:7.2}  Mag [µT]: x={:6.1} y={:6.1} z={:6.1}  T={:5.1}°C",
            g.x,
            g.y,
            g.z,
            device.get_resultant_g(g),
            gyr.x,
            gyr.y,
            gyr.z,
            mag.x,
            mag.y,
            mag.z,
            device.get_temperature()
        );

        thread::sleep(Duration::from_millis(100));
    }

    println!("Programa terminado");
}
