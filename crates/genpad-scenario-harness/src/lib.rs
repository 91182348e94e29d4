//! Host-side scenario test harness for scripted boot and poll flows.

use genpad::mock_port::{Event, MockDelay, MockPort};
use genpad::{Breakout, Button, Config, ControllerVariant, Level, Poller};

/// Couples a mock port with the boot and poll flow for scenario tests.
pub struct ScenarioHarness {
    port: MockPort,
    config: Config,
    poller: Option<Poller<MockPort, MockDelay>>,
}

impl ScenarioHarness {
    /// Harness with default timing and a released controller.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            port: MockPort::new(),
            config,
            poller: None,
        }
    }

    /// The mock port, for driving joystick lines and inspecting pins.
    pub fn port(&self) -> &MockPort {
        &self.port
    }

    /// Power on: pin setup and controller detection.
    pub fn boot(&mut self) -> ControllerVariant {
        assert!(self.poller.is_none(), "scenario booted twice");
        let breakout = Breakout::new(self.port.clone(), self.port.delay(), self.config);
        let poller = breakout.start().expect("mock boot should succeed");
        let variant = poller.variant();
        log::debug!("Scenario booted as {}", variant);
        self.poller = Some(poller);
        variant
    }

    fn poller(&mut self) -> &mut Poller<MockPort, MockDelay> {
        self.poller.as_mut().expect("scenario must boot before polling")
    }

    /// Run one poll cycle, without the period sleep.
    pub fn poll(&mut self) {
        self.poller().poll().expect("mock poll should succeed");
    }

    /// Run `cycles` cycles of the main loop (poll + period sleep).
    pub fn run_cycles(&mut self, cycles: usize) {
        for _ in 0..cycles {
            self.poller().tick().expect("mock poll should succeed");
        }
    }

    /// Buttons whose output line is currently low (pressed, active-low).
    pub fn pressed(&self) -> Vec<Button> {
        Button::ALL
            .into_iter()
            .filter(|&button| self.port.output_level(button) == Level::Low)
            .collect()
    }

    /// Output level of every button, in [`Button::ALL`] order.
    pub fn output_levels(&self) -> Vec<Level> {
        Button::ALL
            .iter()
            .map(|&button| self.port.output_level(button))
            .collect()
    }

    /// Assert every output line sits at its released level.
    pub fn assert_all_released(&self, label: &str) {
        let pressed = self.pressed();
        assert!(
            pressed.is_empty(),
            "{}: expected all outputs released, got {:?} pressed",
            label,
            pressed
        );
    }

    /// Time the firmware spent waiting so far, in microseconds.
    pub fn waited_us(&self) -> u64 {
        self.port
            .events()
            .iter()
            .map(|event| match event {
                Event::DelayNs(ns) => u64::from(*ns) / 1_000,
                Event::DelayUs(us) => u64::from(*us),
                Event::DelayMs(ms) => u64::from(*ms) * 1_000,
                _ => 0,
            })
            .sum()
    }

    /// Number of select writes since boot began.
    pub fn strobe_write_count(&self) -> usize {
        self.port.strobe_writes().len()
    }
}

impl Default for ScenarioHarness {
    fn default() -> Self {
        Self::new()
    }
}
