//! Build script for ledmatrix-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates matrix.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Keys accepted in each section, mirroring the firmware's runtime parser
const SECTIONS: &[(&str, &[&str])] = &[
    ("spi", &["frequency_hz", "mode", "bit_order"]),
    ("chip_select", &["pin"]),
    ("display", &["intensity", "scan_limit"]),
    (
        "registers",
        &[
            "noop",
            "digit0",
            "decode_mode",
            "intensity",
            "scan_limit",
            "shutdown",
            "display_test",
        ],
    ),
    ("demo", &["pattern", "step_ms", "hold_ms", "blank_ms"]),
];

/// Validate matrix.toml configuration at compile time
fn validate_config() {
    // Re-run if matrix.toml changes
    println!("cargo:rerun-if-changed=matrix.toml");

    let config_path = Path::new("matrix.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: matrix.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds matrix.toml at compile time.                ║\n\
            ║  Please create one in the ledmatrix-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    // Read the config file
    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read matrix.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in matrix.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    validate_layout(&config);
    validate_spi(&config);
    validate_display(&config);
    validate_registers(&config);
    validate_demo(&config);

    println!("cargo:warning=matrix.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Abort the build with a list of problems
fn fail(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Only known sections and keys, every section a table
fn validate_layout(config: &toml::Value) {
    let mut errors = Vec::new();

    let root = match config.as_table() {
        Some(t) => t,
        None => return,
    };

    for (name, section) in root {
        let keys = match SECTIONS.iter().find(|(s, _)| s == name) {
            Some((_, keys)) => keys,
            None => {
                errors.push(format!("unknown section [{}]", name));
                continue;
            }
        };

        let table = match section.as_table() {
            Some(t) => t,
            None => {
                errors.push(format!("[{}] must be a table", name));
                continue;
            }
        };

        for key in table.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", name, key));
            }
        }
    }

    fail("Unknown entries in matrix.toml", &errors);
}

/// Integer in `min..=max`, or an error message; absent keys are fine
fn check_int(
    table: &toml::value::Table,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

fn section<'a>(config: &'a toml::Value, name: &str) -> Option<&'a toml::value::Table> {
    config.get(name).and_then(|s| s.as_table())
}

/// Validate the SPI bus and chip-select settings
fn validate_spi(config: &toml::Value) {
    let mut errors = Vec::new();

    if let Some(spi) = section(config, "spi") {
        check_int(spi, "spi", "frequency_hz", 1, u32::MAX as i64, &mut errors);
        check_int(spi, "spi", "mode", 0, 3, &mut errors);

        if let Some(order) = spi.get("bit_order") {
            if !matches!(order.as_str(), Some("msb") | Some("lsb")) {
                errors.push("[spi] bit_order must be 'msb' or 'lsb'".to_string());
            }
        }
    }

    if let Some(cs) = section(config, "chip_select") {
        if let Some(pin) = cs.get("pin") {
            if !pin.as_str().map(is_pin_name).unwrap_or(false) {
                errors.push("[chip_select] pin must look like \"PA4\"".to_string());
            }
        }
    }

    fail("Invalid SPI configuration", &errors);
}

/// Port letter A-K followed by a pin number 0-15
fn is_pin_name(s: &str) -> bool {
    let s = s.trim().to_ascii_uppercase();
    let mut chars = s.chars();
    if chars.next() != Some('P') {
        return false;
    }
    match chars.next() {
        Some('A'..='K') => {}
        _ => return false,
    }
    matches!(chars.as_str().parse::<u8>(), Ok(n) if n <= 15)
}

/// Validate the display settings
fn validate_display(config: &toml::Value) {
    let mut errors = Vec::new();

    if let Some(display) = section(config, "display") {
        check_int(display, "display", "intensity", 0, 15, &mut errors);
        check_int(display, "display", "scan_limit", 1, 8, &mut errors);
    }

    fail("Invalid display configuration", &errors);
}

/// Validate register addresses
fn validate_registers(config: &toml::Value) {
    let mut errors = Vec::new();

    if let Some(registers) = section(config, "registers") {
        for key in registers.keys() {
            check_int(registers, "registers", key, 0, 255, &mut errors);
        }

        // Row registers run digit0 + 1 ..= digit0 + 8
        if let Some(toml::Value::Integer(digit0)) = registers.get("digit0") {
            if *digit0 > 255 - 7 {
                errors.push("[registers] digit0 + 7 must fit in one byte".to_string());
            }
        }
    }

    fail("Invalid register map", &errors);
}

/// Validate the demo animation settings
fn validate_demo(config: &toml::Value) {
    let mut errors = Vec::new();

    if let Some(demo) = section(config, "demo") {
        if let Some(pattern) = demo.get("pattern") {
            if !matches!(pattern.as_str(), Some("rows") | Some("columns")) {
                errors.push("[demo] pattern must be 'rows' or 'columns'".to_string());
            }
        }

        for key in ["step_ms", "hold_ms", "blank_ms"] {
            check_int(demo, "demo", key, 0, u32::MAX as i64, &mut errors);
        }
    }

    fail("Invalid demo configuration", &errors);
}
