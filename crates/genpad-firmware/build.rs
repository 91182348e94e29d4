use std::env;

fn main() {
    // Tell cargo to rerun if sdkconfig.defaults changes
    println!("cargo:rerun-if-changed=sdkconfig.defaults");

    if env::var("ESP_IDF_SDKCONFIG_DEFAULTS").is_err() {
        eprintln!("WARNING: ESP_IDF_SDKCONFIG_DEFAULTS not set! FreeRTOS tick rate may be wrong.");
        eprintln!("Build from crates/genpad-firmware so .cargo/config.toml is picked up.");
    }

    embuild::espidf::sysenv::output();
}
