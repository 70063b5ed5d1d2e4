//! Mock interface implementation for testing the ICM-20948 driver
//!
//! Simulates the register file of the four banks, the FIFO data port and an
//! AK09916 behind the auxiliary I2C master (slave 0).

use embedded_hal::blocking::delay::DelayMs;
use icm20948_basic::interface::Interface;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

const REG_BANK_SEL: u8 = 0x7F;
const PWR_MGMT_1: u8 = 0x06;
const ACCEL_XOUT_H: u8 = 0x2D;
const EXT_SLV_SENS_DATA_00: u8 = 0x3B;
const FIFO_COUNTH: u8 = 0x70;
const FIFO_COUNTL: u8 = 0x71;
const FIFO_R_W: u8 = 0x72;

const I2C_SLV0_ADDR: u8 = 0x03;
const I2C_SLV0_REG: u8 = 0x04;
const I2C_SLV0_CTRL: u8 = 0x05;
const I2C_SLV0_DO: u8 = 0x06;
const AK09916_ADDR: u8 = 0x0C;

/// Records operations performed on the mock interface
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Read register operation
    ReadRegister { bank: u8, address: u8, value: u8 },
    /// Write register operation
    WriteRegister { bank: u8, address: u8, value: u8 },
    /// Bank switch operation
    BankSwitch { from: u8, to: u8 },
    /// Write relayed to the magnetometer through slave 0
    MagWrite { address: u8, value: u8 },
}

/// Shared state for mock interface (uses interior mutability)
#[derive(Debug)]
struct MockState {
    /// Simulated register values (bank, address) -> value
    registers: HashMap<(u8, u8), u8>,
    current_bank: u8,
    operations: Vec<Operation>,
    fail_next_read: bool,
    fail_next_write: bool,
    /// Bytes pending in the hardware FIFO
    fifo: VecDeque<u8>,
    /// Accelerometer readings served one per snapshot read
    accel_sequence: Vec<[i16; 3]>,
    accel_sequence_idx: usize,
    /// Simulated magnetometer (AK09916) registers
    mag_registers: HashMap<u8, u8>,
    resets: usize,
}

impl MockState {
    fn new() -> Self {
        let mut state = Self {
            registers: HashMap::new(),
            current_bank: 0,
            operations: Vec::new(),
            fail_next_read: false,
            fail_next_write: false,
            fifo: VecDeque::new(),
            accel_sequence: Vec::new(),
            accel_sequence_idx: 0,
            mag_registers: HashMap::new(),
            resets: 0,
        };

        // WHO_AM_I = 0xEA, PWR_MGMT_1 reset value (sleep + auto clock)
        state.registers.insert((0, 0x00), 0xEA);
        state.registers.insert((0, PWR_MGMT_1), 0x41);

        // AK09916 WIA1 / WIA2
        state.mag_registers.insert(0x00, 0x48);
        state.mag_registers.insert(0x01, 0x09);

        state
    }

    fn reg(&self, bank: u8, address: u8) -> u8 {
        self.registers.get(&(bank, address)).copied().unwrap_or(0)
    }

    fn set_triple(&mut self, start: u8, values: [i16; 3]) {
        for (i, v) in values.iter().enumerate() {
            let [h, l] = v.to_be_bytes();
            self.registers.insert((0, start + 2 * i as u8), h);
            self.registers.insert((0, start + 2 * i as u8 + 1), l);
        }
    }

    fn advance_accel_sequence(&mut self) {
        if !self.accel_sequence.is_empty() {
            let values = self.accel_sequence[self.accel_sequence_idx];
            self.set_triple(ACCEL_XOUT_H, values);
            self.accel_sequence_idx = (self.accel_sequence_idx + 1) % self.accel_sequence.len();
        }
    }

    /// Copies the bytes requested through slave 0 into EXT_SLV_SENS_DATA
    fn refresh_ext_data(&mut self) {
        let addr = self.reg(3, I2C_SLV0_ADDR);
        let ctrl = self.reg(3, I2C_SLV0_CTRL);
        if ctrl & 0x80 == 0 || addr != (AK09916_ADDR | 0x80) {
            return;
        }
        let start = self.reg(3, I2C_SLV0_REG);
        let len = ctrl & 0x0F;
        for i in 0..len {
            let value = self
                .mag_registers
                .get(&start.wrapping_add(i))
                .copied()
                .unwrap_or(0);
            self.registers.insert((0, EXT_SLV_SENS_DATA_00 + i), value);
        }
    }

    /// Simulate the slave 0 transaction triggered by a write to I2C_SLV0_CTRL
    fn simulate_i2c_slv0_transaction(&mut self) {
        let addr = self.reg(3, I2C_SLV0_ADDR);
        let ctrl = self.reg(3, I2C_SLV0_CTRL);
        if ctrl & 0x80 == 0 || addr & 0x7F != AK09916_ADDR {
            return;
        }
        if addr & 0x80 != 0 {
            self.refresh_ext_data();
        } else {
            let reg = self.reg(3, I2C_SLV0_REG);
            let value = self.reg(3, I2C_SLV0_DO);
            self.mag_registers.insert(reg, value);
            self.operations.push(Operation::MagWrite { address: reg, value });
        }
    }

    fn soft_reset(&mut self) {
        self.resets += 1;
        self.current_bank = 0;
        self.registers.insert((0, PWR_MGMT_1), 0x41);
        self.registers.insert((0, 0x03), 0x00);
        self.registers.insert((3, I2C_SLV0_CTRL), 0x00);
    }

    fn read_byte(&mut self, address: u8) -> u8 {
        let bank = self.current_bank;
        if bank == 0 {
            match address {
                FIFO_R_W => return self.fifo.pop_front().unwrap_or(0),
                FIFO_COUNTH => return ((self.fifo.len() >> 8) & 0x1F) as u8,
                FIFO_COUNTL => return (self.fifo.len() & 0xFF) as u8,
                _ => {}
            }
        }
        self.reg(bank, address)
    }
}

/// Mock interface for testing
#[derive(Clone)]
pub struct MockInterface {
    state: Rc<RefCell<MockState>>,
}

#[allow(dead_code)]
impl MockInterface {
    /// Create a new mock interface with default register values
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState::new())),
        }
    }

    pub fn set_register(&self, bank: u8, address: u8, value: u8) {
        self.state.borrow_mut().registers.insert((bank, address), value);
    }

    pub fn get_register(&self, bank: u8, address: u8) -> u8 {
        self.state.borrow().reg(bank, address)
    }

    pub fn set_who_am_i(&self, value: u8) {
        self.set_register(0, 0x00, value);
    }

    /// Set accelerometer data (will be returned on next read)
    pub fn set_accel_data(&self, x: i16, y: i16, z: i16) {
        self.state.borrow_mut().set_triple(ACCEL_XOUT_H, [x, y, z]);
    }

    /// Set a sequence of accelerometer readings, one per snapshot read
    pub fn set_accel_sequence(&self, sequence: Vec<[i16; 3]>) {
        let mut state = self.state.borrow_mut();
        state.accel_sequence = sequence;
        state.accel_sequence_idx = 0;
    }

    pub fn set_gyro_data(&self, x: i16, y: i16, z: i16) {
        self.state.borrow_mut().set_triple(0x33, [x, y, z]);
    }

    pub fn set_temperature_data(&self, temp_raw: i16) {
        let [h, l] = temp_raw.to_be_bytes();
        self.set_register(0, 0x39, h);
        self.set_register(0, 0x3A, l);
    }

    /// Set AK09916 measurement registers (HXL..HZH, little-endian)
    pub fn set_mag_data(&self, x: i16, y: i16, z: i16) {
        let mut state = self.state.borrow_mut();
        for (i, v) in [x, y, z].iter().enumerate() {
            let [l, h] = v.to_le_bytes();
            state.mag_registers.insert(0x11 + 2 * i as u8, l);
            state.mag_registers.insert(0x12 + 2 * i as u8, h);
        }
    }

    /// Set WIA1 / WIA2 of the simulated magnetometer
    pub fn set_mag_id(&self, wia1: u8, wia2: u8) {
        let mut state = self.state.borrow_mut();
        state.mag_registers.insert(0x00, wia1);
        state.mag_registers.insert(0x01, wia2);
    }

    pub fn get_mag_register(&self, address: u8) -> u8 {
        self.state
            .borrow()
            .mag_registers
            .get(&address)
            .copied()
            .unwrap_or(0)
    }

    /// Append bytes to the simulated hardware FIFO
    pub fn push_fifo(&self, bytes: &[u8]) {
        self.state.borrow_mut().fifo.extend(bytes.iter().copied());
    }

    pub fn fifo_len(&self) -> usize {
        self.state.borrow().fifo.len()
    }

    pub fn current_bank(&self) -> u8 {
        self.state.borrow().current_bank
    }

    pub fn reset_count(&self) -> usize {
        self.state.borrow().resets
    }

    /// Inject a read failure on the next read operation
    pub fn fail_next_read(&self) {
        self.state.borrow_mut().fail_next_read = true;
    }

    /// Inject a write failure on the next write operation
    pub fn fail_next_write(&self) {
        self.state.borrow_mut().fail_next_write = true;
    }

    /// Get the operations log
    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }

    pub fn bank_switch_count(&self) -> usize {
        self.state
            .borrow()
            .operations
            .iter()
            .filter(|op| matches!(op, Operation::BankSwitch { .. }))
            .count()
    }

    /// Values written to a register, in order
    pub fn writes_to(&self, bank: u8, address: u8) -> Vec<u8> {
        self.state
            .borrow()
            .operations
            .iter()
            .filter_map(|op| match op {
                Operation::WriteRegister {
                    bank: b,
                    address: a,
                    value,
                } if *b == bank && *a == address => Some(*value),
                _ => None,
            })
            .collect()
    }

    /// Values relayed to a magnetometer register, in order
    pub fn mag_writes_to(&self, address: u8) -> Vec<u8> {
        self.state
            .borrow()
            .operations
            .iter()
            .filter_map(|op| match op {
                Operation::MagWrite { address: a, value } if *a == address => Some(*value),
                _ => None,
            })
            .collect()
    }
}

/// Mock error type
#[derive(Debug, Clone, PartialEq)]
pub enum MockError {
    /// Simulated communication error
    Communication,
}

impl Interface for MockInterface {
    type Error = MockError;

    fn write_reg(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        if state.fail_next_write {
            state.fail_next_write = false;
            return Err(MockError::Communication);
        }

        // REG_BANK_SEL exists in every bank
        if address == REG_BANK_SEL {
            let new_bank = (data[0] >> 4) & 0x03;
            let old_bank = state.current_bank;
            state.current_bank = new_bank;
            state.operations.push(Operation::BankSwitch {
                from: old_bank,
                to: new_bank,
            });
            return Ok(());
        }

        for (i, &byte) in data.iter().enumerate() {
            let reg_addr = address.wrapping_add(i as u8);
            let bank = state.current_bank;
            state.operations.push(Operation::WriteRegister {
                bank,
                address: reg_addr,
                value: byte,
            });

            if bank == 0 && reg_addr == PWR_MGMT_1 && byte & 0x80 != 0 {
                state.soft_reset();
                continue;
            }

            state.registers.insert((bank, reg_addr), byte);

            if bank == 3 && reg_addr == I2C_SLV0_CTRL {
                state.simulate_i2c_slv0_transaction();
            }
        }

        Ok(())
    }

    fn read_reg(&mut self, address: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        if state.fail_next_read {
            state.fail_next_read = false;
            return Err(MockError::Communication);
        }

        let bank = state.current_bank;
        if bank == 0 && address == ACCEL_XOUT_H {
            state.advance_accel_sequence();
        }
        if bank == 0 {
            state.refresh_ext_data();
        }

        // FIFO_R_W does not auto-increment
        let streaming = bank == 0 && address == FIFO_R_W;

        for (i, byte) in data.iter_mut().enumerate() {
            let reg_addr = if streaming {
                address
            } else {
                address.wrapping_add(i as u8)
            };
            *byte = state.read_byte(reg_addr);
            state.operations.push(Operation::ReadRegister {
                bank,
                address: reg_addr,
                value: *byte,
            });
        }

        Ok(())
    }
}

impl Default for MockInterface {
    fn default() -> Self {
        Self::new()
    }
}

/// Delay provider that returns immediately and records every request
#[derive(Clone, Default)]
pub struct RecordingDelay {
    delays: Rc<RefCell<Vec<u32>>>,
}

#[allow(dead_code)]
impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delays(&self) -> Vec<u32> {
        self.delays.borrow().clone()
    }

    pub fn total_ms(&self) -> u32 {
        self.delays.borrow().iter().sum()
    }

    pub fn clear(&self) {
        self.delays.borrow_mut().clear();
    }
}

impl DelayMs<u32> for RecordingDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.delays.borrow_mut().push(ms);
    }
}
