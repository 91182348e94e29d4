//! Mock port for host-side tests
//!
//! [`MockPort`] emulates the three AVR-style banks in memory: a direction
//! register, a level register (output level, or pull-up enable for inputs),
//! and the external levels a joystick would put on the input pins. The
//! external level of a line can depend on the select line, which is how a
//! real Genesis pad multiplexes its buttons.
//!
//! Every pin operation and every delay is appended to a shared event log so
//! tests can check ordering, e.g. that each select write is followed by a
//! settle wait. Clones share state; [`MockPort::delay`] returns a
//! [`MockDelay`] that logs into the same place.

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use embedded_hal::delay::DelayNs;

use crate::gpio::{Direction, Gpio, Level};
use crate::pin_map::{Bank, Button, JoystickLine, Pin, STROBE};

/// Something that happened on the mock port
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    BankDirection { bank: Bank, outputs: u8 },
    BankWrite { bank: Bank, levels: u8 },
    Direction { pin: Pin, direction: Direction },
    Write { pin: Pin, level: Level },
    Read { pin: Pin, level: Level },
    DelayNs(u32),
    DelayUs(u32),
    DelayMs(u32),
}

/// Injected pin failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockError;

/// External level of an input line, per select level
#[derive(Clone, Copy, Debug)]
struct Drive {
    select_high: Level,
    select_low: Level,
}

#[derive(Debug, Default)]
struct State {
    direction: [u8; 3],
    level: [u8; 3],
    drives: [[Option<Drive>; 8]; 3],
    scripts: [[VecDeque<Level>; 8]; 3],
    events: Vec<Event>,
    fail_after: Option<usize>,
}

impl State {
    fn bit(value: u8, pin: Pin) -> Level {
        Level::from(value & pin.mask() != 0)
    }

    fn set_bit(value: &mut u8, pin: Pin, level: Level) {
        match level {
            Level::High => *value |= pin.mask(),
            Level::Low => *value &= !pin.mask(),
        }
    }

    fn check_failure(&mut self) -> Result<(), MockError> {
        match self.fail_after {
            Some(0) => Err(MockError),
            Some(n) => {
                self.fail_after = Some(n - 1);
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn strobe_level(&self) -> Level {
        Self::bit(self.level[STROBE.bank.index()], STROBE)
    }

    /// Level seen on a pin, following AVR semantics
    fn sample(&mut self, pin: Pin) -> Level {
        let bank = pin.bank.index();
        let bit = pin.bit as usize;
        if self.direction[bank] & pin.mask() != 0 {
            return Self::bit(self.level[bank], pin);
        }
        if let Some(level) = self.scripts[bank][bit].pop_front() {
            return level;
        }
        if let Some(drive) = self.drives[bank][bit] {
            return match self.strobe_level() {
                Level::High => drive.select_high,
                Level::Low => drive.select_low,
            };
        }
        // pull-up, or floating
        Self::bit(self.level[bank], pin)
    }
}

/// In-memory three-bank port
#[derive(Clone, Debug, Default)]
pub struct MockPort {
    state: Rc<RefCell<State>>,
}

impl MockPort {
    /// All registers zero: every pin an input, no pull-ups, nothing driven
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay that logs into this port's event log
    pub fn delay(&self) -> MockDelay {
        MockDelay {
            state: Rc::clone(&self.state),
        }
    }

    /// Hold a line low regardless of select
    pub fn press(&self, line: JoystickLine) {
        self.drive_by_select(line, Level::Low, Level::Low);
    }

    /// Stop driving a line; it falls back to its pull-up
    pub fn release(&self, line: JoystickLine) {
        let pin = line.pin();
        self.state.borrow_mut().drives[pin.bank.index()][pin.bit as usize] = None;
    }

    /// Drive a line to one level while select is high and another while low
    pub fn drive_by_select(&self, line: JoystickLine, select_high: Level, select_low: Level) {
        let pin = line.pin();
        self.state.borrow_mut().drives[pin.bank.index()][pin.bit as usize] = Some(Drive {
            select_high,
            select_low,
        });
    }

    /// Queue levels returned by the next reads of a line, ahead of its drive
    pub fn script(&self, line: JoystickLine, levels: &[Level]) {
        let pin = line.pin();
        self.state.borrow_mut().scripts[pin.bank.index()][pin.bit as usize].extend(levels);
    }

    /// Let `ops` more pin operations succeed, then fail every one after
    pub fn fail_after(&self, ops: usize) {
        self.state.borrow_mut().fail_after = Some(ops);
    }

    pub fn clear_failure(&self) {
        self.state.borrow_mut().fail_after = None;
    }

    /// Current level register bit of a pin
    pub fn level(&self, pin: Pin) -> Level {
        State::bit(self.state.borrow().level[pin.bank.index()], pin)
    }

    pub fn output_level(&self, button: Button) -> Level {
        self.level(button.pin())
    }

    pub fn strobe_level(&self) -> Level {
        self.state.borrow().strobe_level()
    }

    pub fn bank_direction(&self, bank: Bank) -> u8 {
        self.state.borrow().direction[bank.index()]
    }

    pub fn bank_level(&self, bank: Bank) -> u8 {
        self.state.borrow().level[bank.index()]
    }

    /// Snapshot of the event log
    pub fn events(&self) -> Vec<Event> {
        self.state.borrow().events.clone()
    }

    pub fn clear_events(&self) {
        self.state.borrow_mut().events.clear();
    }

    /// Levels written to the select line, in order
    pub fn strobe_writes(&self) -> Vec<Level> {
        self.state
            .borrow()
            .events
            .iter()
            .filter_map(|event| match event {
                Event::Write { pin, level } if *pin == STROBE => Some(*level),
                _ => None,
            })
            .collect()
    }

    /// Number of single-pin writes to `pin`
    pub fn writes_to(&self, pin: Pin) -> usize {
        self.state
            .borrow()
            .events
            .iter()
            .filter(|event| matches!(event, Event::Write { pin: p, .. } if *p == pin))
            .count()
    }
}

impl Gpio for MockPort {
    type Error = MockError;

    fn set_direction(&mut self, pin: Pin, direction: Direction) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        state.check_failure()?;
        let level = match direction {
            Direction::Output => Level::High,
            Direction::Input => Level::Low,
        };
        State::set_bit(&mut state.direction[pin.bank.index()], pin, level);
        state.events.push(Event::Direction { pin, direction });
        Ok(())
    }

    fn write(&mut self, pin: Pin, level: Level) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        state.check_failure()?;
        State::set_bit(&mut state.level[pin.bank.index()], pin, level);
        state.events.push(Event::Write { pin, level });
        Ok(())
    }

    fn read(&mut self, pin: Pin) -> Result<Level, Self::Error> {
        let mut state = self.state.borrow_mut();
        state.check_failure()?;
        let level = state.sample(pin);
        state.events.push(Event::Read { pin, level });
        Ok(level)
    }

    fn set_bank_direction(&mut self, bank: Bank, outputs: u8) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        state.check_failure()?;
        state.direction[bank.index()] = outputs;
        state.events.push(Event::BankDirection { bank, outputs });
        Ok(())
    }

    fn write_bank(&mut self, bank: Bank, levels: u8) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        state.check_failure()?;
        state.level[bank.index()] = levels;
        state.events.push(Event::BankWrite { bank, levels });
        Ok(())
    }
}

/// Delay that records instead of waiting
#[derive(Clone, Debug)]
pub struct MockDelay {
    state: Rc<RefCell<State>>,
}

impl MockDelay {
    /// Total time requested so far, in nanoseconds
    pub fn total_ns(&self) -> u64 {
        self.state
            .borrow()
            .events
            .iter()
            .map(|event| match event {
                Event::DelayNs(ns) => u64::from(*ns),
                Event::DelayUs(us) => u64::from(*us) * 1_000,
                Event::DelayMs(ms) => u64::from(*ms) * 1_000_000,
                _ => 0,
            })
            .sum()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.state.borrow_mut().events.push(Event::DelayNs(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.state.borrow_mut().events.push(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.state.borrow_mut().events.push(Event::DelayMs(ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floating_input_reads_low() {
        let mut port = MockPort::new();
        assert_eq!(port.read(JoystickLine::Up.pin()), Ok(Level::Low));
    }

    #[test]
    fn test_pull_up_reads_high() {
        let mut port = MockPort::new();
        port.write(JoystickLine::Up.pin(), Level::High).unwrap();
        assert_eq!(port.read(JoystickLine::Up.pin()), Ok(Level::High));
    }

    #[test]
    fn test_drive_follows_select() {
        let mut port = MockPort::new();
        port.set_direction(STROBE, Direction::Output).unwrap();
        port.drive_by_select(JoystickLine::AB, Level::High, Level::Low);

        port.write(STROBE, Level::High).unwrap();
        assert_eq!(port.read(JoystickLine::AB.pin()), Ok(Level::High));
        port.write(STROBE, Level::Low).unwrap();
        assert_eq!(port.read(JoystickLine::AB.pin()), Ok(Level::Low));
    }

    #[test]
    fn test_script_takes_precedence_then_drains() {
        let mut port = MockPort::new();
        port.press(JoystickLine::Down);
        port.script(JoystickLine::Down, &[Level::High]);
        assert_eq!(port.read(JoystickLine::Down.pin()), Ok(Level::High));
        assert_eq!(port.read(JoystickLine::Down.pin()), Ok(Level::Low));
    }

    #[test]
    fn test_output_reads_back_level_register() {
        let mut port = MockPort::new();
        let pin = Button::C.pin();
        port.set_direction(pin, Direction::Output).unwrap();
        port.write(pin, Level::Low).unwrap();
        assert_eq!(port.read(pin), Ok(Level::Low));
        assert_eq!(port.output_level(Button::C), Level::Low);
    }

    #[test]
    fn test_fail_after() {
        let mut port = MockPort::new();
        port.fail_after(1);
        assert!(port.write_bank(Bank::A, 0xFF).is_ok());
        assert_eq!(port.write_bank(Bank::A, 0xFF), Err(MockError));
        assert_eq!(port.bank_level(Bank::A), 0xFF);
    }

    #[test]
    fn test_delay_logs_into_port() {
        let port = MockPort::new();
        let mut delay = port.delay();
        delay.delay_us(10);
        delay.delay_ms(8);
        assert_eq!(port.events(), vec![Event::DelayUs(10), Event::DelayMs(8)]);
        assert_eq!(delay.total_ns(), 8_010_000);
    }
}
