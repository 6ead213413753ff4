//! Forwards deployment credentials into the crate as compile-time env values.
//!
//! Values come from the process environment or, failing that, from the first
//! `.env` file found walking up from the crate directory. Nothing is written
//! when a key is absent; the crate reports it as a missing credential at load.

use std::path::PathBuf;

const CREDENTIAL_KEYS: [&str; 3] = [
    "AIRNODE_WIFI_SSID",
    "AIRNODE_WIFI_PASSWORD",
    "AIRNODE_UBIDOTS_TOKEN",
];

/// `.env` locations watched even before they exist, relative to the crate.
const DOTENV_CANDIDATES: [&str; 2] = [".env", "../../.env"];

fn main() {
    let manifest_dir = PathBuf::from(std::env::var_os("CARGO_MANIFEST_DIR").unwrap_or_default());
    for candidate in DOTENV_CANDIDATES {
        println!(
            "cargo:rerun-if-changed={}",
            manifest_dir.join(candidate).display()
        );
    }

    // Process env wins over the file; dotenvy never overrides existing vars.
    if let Ok(path) = dotenvy::dotenv() {
        println!("cargo:rerun-if-changed={}", path.display());
    }

    for key in CREDENTIAL_KEYS {
        println!("cargo:rerun-if-env-changed={key}");
        match std::env::var(key) {
            Ok(value) if !value.contains('\n') => {
                println!("cargo:rustc-env={key}={value}");
            }
            Ok(_) => println!("cargo:warning={key} contains a newline and was ignored"),
            Err(_) => {}
        }
    }
}
