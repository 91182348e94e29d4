mod esp_ports;
mod wiring;

use esp_idf_svc::hal::delay::Delay;
use esp_idf_svc::hal::peripherals::Peripherals;
use genpad::{Breakout, Builder, Config};

use esp_ports::EspPorts;
use wiring::esp32s3_wiring;

fn timing() -> Config {
    match Builder::new().build() {
        Ok(config) => config,
        Err(err) => {
            log::warn!("Invalid timing ({}), using defaults", err);
            Config::default()
        }
    }
}

fn main() {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    log::info!("Genesis breakout starting");

    let config = timing();
    log::info!(
        "Timing: settle={}us period={}ms reset_pulses={}",
        config.settle_time_us,
        config.poll_period_ms,
        config.reset_pulses
    );

    let peripherals = match Peripherals::take() {
        Ok(peripherals) => peripherals,
        Err(err) => {
            log::error!("Peripherals unavailable: {}", err);
            return;
        }
    };

    let ports = match EspPorts::new(esp32s3_wiring(peripherals.pins)) {
        Ok(ports) => ports,
        Err(err) => {
            log::error!("GPIO setup failed: {}", err);
            return;
        }
    };

    // Ets busy-wait for the settle time, FreeRTOS sleep for the poll period
    let delay = Delay::new_default();

    let mut poller = Breakout::new(ports, delay, config).start_or_default();
    poller.run()
}
