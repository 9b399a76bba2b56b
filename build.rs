fn main() {
    println!("cargo:rerun-if-changed=assets/index.html");
    println!("cargo:rerun-if-env-changed=FIELDNODE_CONFIG_JSON");
    println!("cargo:rerun-if-env-changed=FIELDNODE_WIFI_SSID");
    println!("cargo:rerun-if-env-changed=FIELDNODE_WIFI_PASSWORD");
    println!("cargo:rerun-if-env-changed=FIELDNODE_ALARM_ENDPOINT");

    // Host builds (tests) run without the ESP-IDF toolchain.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
