fn main() {
    // ESP-IDF link arguments are only meaningful for device builds; host
    // builds (tests, simulation console) must not require the ESP toolchain.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
