//! Unit tests for FIFO control and FIFO-sourced readings

use crate::common::create_initialized_driver;
use icm20948_basic::register::registers::bank0;
use icm20948_basic::{FifoMode, FifoType, XyzFloat};

fn be_triple(x: i16, y: i16, z: i16) -> Vec<u8> {
    [x, y, z].iter().flat_map(|v| v.to_be_bytes()).collect()
}

#[test]
fn test_start_fifo_writes_type() {
    let (mut driver, interface, _) = create_initialized_driver();

    for (fifo_type, value) in [
        (FifoType::Acc, 0x10),
        (FifoType::Gyr, 0x0E),
        (FifoType::AccGyr, 0x1E),
    ] {
        driver.start_fifo(fifo_type).unwrap();
        assert_eq!(interface.get_register(0, bank0::FIFO_EN_2), value);
        assert_eq!(driver.fifo_type(), fifo_type);
    }

    driver.stop_fifo().unwrap();
    assert_eq!(interface.get_register(0, bank0::FIFO_EN_2), 0x00);
}

#[test]
fn test_enable_fifo_preserves_user_ctrl() {
    let (mut driver, interface, _) = create_initialized_driver();
    interface.set_register(0, bank0::USER_CTRL, 0x20);

    driver.enable_fifo(true).unwrap();
    assert_eq!(interface.get_register(0, bank0::USER_CTRL), 0x60);

    driver.enable_fifo(false).unwrap();
    assert_eq!(interface.get_register(0, bank0::USER_CTRL), 0x20);
}

#[test]
fn test_fifo_mode_and_reset() {
    let (mut driver, interface, _) = create_initialized_driver();

    driver.set_fifo_mode(FifoMode::StopWhenFull).unwrap();
    assert_eq!(interface.get_register(0, bank0::FIFO_MODE), 0x01);
    driver.set_fifo_mode(FifoMode::Continuous).unwrap();
    assert_eq!(interface.get_register(0, bank0::FIFO_MODE), 0x00);

    driver.reset_fifo().unwrap();
    assert_eq!(interface.writes_to(0, bank0::FIFO_RST), vec![0x01, 0x00]);
}

#[test]
fn test_fifo_count() {
    let (mut driver, interface, _) = create_initialized_driver();
    interface.push_fifo(&[0u8; 300]);

    assert_eq!(driver.get_fifo_count().unwrap(), 300);
}

#[test]
fn test_number_of_data_sets() {
    let (mut driver, interface, _) = create_initialized_driver();
    driver.start_fifo(FifoType::AccGyr).unwrap();
    interface.push_fifo(&[0u8; 24]);

    assert_eq!(driver.get_number_of_fifo_data_sets().unwrap(), 2);

    driver.start_fifo(FifoType::Acc).unwrap();
    assert_eq!(driver.get_number_of_fifo_data_sets().unwrap(), 4);
}

#[test]
fn test_find_fifo_begin_discards_partial_set() {
    let (mut driver, interface, _) = create_initialized_driver();
    driver.start_fifo(FifoType::AccGyr).unwrap();
    interface.push_fifo(&[0xAA; 5]);
    interface.push_fifo(&be_triple(16384, 0, 0));
    interface.push_fifo(&be_triple(0, 0, 0));

    driver.find_fifo_begin().unwrap();

    assert_eq!(interface.fifo_len(), 12);
    assert_eq!(
        driver.get_acc_raw_values_from_fifo().unwrap(),
        XyzFloat::new(16384.0, 0.0, 0.0)
    );
}

#[test]
fn test_find_fifo_begin_aligned() {
    let (mut driver, interface, _) = create_initialized_driver();
    driver.start_fifo(FifoType::AccGyr).unwrap();
    interface.push_fifo(&[0u8; 24]);

    driver.find_fifo_begin().unwrap();

    assert_eq!(interface.fifo_len(), 24);
}

#[test]
fn test_fifo_values() {
    let (mut driver, interface, _) = create_initialized_driver();
    driver.set_gyr_offsets(0.0, 0.0, 64.0);
    interface.push_fifo(&be_triple(8192, -16384, 16384));
    interface.push_fifo(&be_triple(8192, -16384, 16384));
    interface.push_fifo(&be_triple(16384, -32768, 64));

    assert_eq!(
        driver.get_corrected_acc_raw_values_from_fifo().unwrap(),
        XyzFloat::new(8192.0, -16384.0, 16384.0)
    );
    assert_eq!(
        driver.get_g_values_from_fifo().unwrap(),
        XyzFloat::new(0.5, -1.0, 1.0)
    );
    assert_eq!(
        driver.get_gyr_values_from_fifo().unwrap(),
        XyzFloat::new(125.0, -250.0, 0.0)
    );
    assert_eq!(interface.fifo_len(), 0);
}
