//! Minimal TOML parser for `matrix.toml`
//!
//! Handles only the subset the device configuration needs, without alloc.
//!
//! Supported features:
//! - `[section]` headers
//! - `key = value` pairs (integer, hex integer, string)
//! - `_` digit separators in integers
//! - Comments (`# ...`), including trailing comments
//!
//! Keys that are not set keep their [`DeviceConfig::default`] value.
//! Unknown sections or keys are errors, so typos do not silently fall back
//! to defaults.

use ledmatrix_hal::spi::{BitOrder, Mode};

use super::types::{DeviceConfig, PinId, MAX_INTENSITY};
use crate::bitmap::ROWS;
use crate::demo::DemoPattern;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in the current section
    UnknownKey,
    /// Line is neither a header nor `key = value`
    MalformedLine,
    /// Value has the wrong type or spelling
    InvalidValue,
    /// Numeric value outside the accepted range
    OutOfRange,
    /// Invalid pin string
    InvalidPin,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Spi,
    ChipSelect,
    Display,
    Registers,
    Demo,
}

/// Parse TOML text into a [`DeviceConfig`]
pub fn parse_config(input: &str) -> Result<DeviceConfig, ParseError> {
    let mut config = DeviceConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(name.trim())?;
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::MalformedLine)?;
        apply(&mut config, section, key.trim(), value.trim())?;
    }

    Ok(config)
}

fn parse_section_header(name: &str) -> Result<Section, ParseError> {
    match name {
        "spi" => Ok(Section::Spi),
        "chip_select" => Ok(Section::ChipSelect),
        "display" => Ok(Section::Display),
        "registers" => Ok(Section::Registers),
        "demo" => Ok(Section::Demo),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply(
    config: &mut DeviceConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Spi, "frequency_hz") => {
            let hz = parse_int(value)?;
            if hz == 0 {
                return Err(ParseError::OutOfRange);
            }
            config.spi.frequency = hz;
        }
        (Section::Spi, "mode") => {
            config.spi.mode = Mode::from_number(parse_u8(value)?).ok_or(ParseError::OutOfRange)?;
        }
        (Section::Spi, "bit_order") => {
            config.spi.bit_order = match parse_str(value)? {
                "msb" => BitOrder::MsbFirst,
                "lsb" => BitOrder::LsbFirst,
                _ => return Err(ParseError::InvalidValue),
            };
        }

        (Section::ChipSelect, "pin") => {
            config.chip_select = PinId::parse(parse_str(value)?).ok_or(ParseError::InvalidPin)?;
        }

        (Section::Display, "intensity") => {
            let level = parse_u8(value)?;
            if level > MAX_INTENSITY {
                return Err(ParseError::OutOfRange);
            }
            config.display.intensity = level;
        }
        (Section::Display, "scan_limit") => {
            let rows = parse_u8(value)?;
            if !(1..=ROWS).contains(&rows) {
                return Err(ParseError::OutOfRange);
            }
            config.display.scan_limit = rows;
        }

        (Section::Registers, key) => {
            let addr = parse_u8(value)?;
            let regs = &mut config.registers;
            match key {
                "noop" => regs.noop = addr,
                "digit0" => {
                    regs.digit0 = addr;
                    // Row 8 must still land on a register
                    if !regs.rows_fit() {
                        return Err(ParseError::OutOfRange);
                    }
                }
                "decode_mode" => regs.decode_mode = addr,
                "intensity" => regs.intensity = addr,
                "scan_limit" => regs.scan_limit = addr,
                "shutdown" => regs.shutdown = addr,
                "display_test" => regs.display_test = addr,
                _ => return Err(ParseError::UnknownKey),
            }
        }

        (Section::Demo, "pattern") => {
            config.demo.pattern = match parse_str(value)? {
                "rows" => DemoPattern::Rows,
                "columns" => DemoPattern::Columns,
                _ => return Err(ParseError::InvalidValue),
            };
        }
        (Section::Demo, "step_ms") => config.demo.step_ms = parse_int(value)?,
        (Section::Demo, "hold_ms") => config.demo.hold_ms = parse_int(value)?,
        (Section::Demo, "blank_ms") => config.demo.blank_ms = parse_int(value)?,

        _ => return Err(ParseError::UnknownKey),
    }

    Ok(())
}

/// Drop a trailing `# comment` that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_int(value: &str) -> Result<u32, ParseError> {
    let (digits, radix) = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        // Only decimal integers take a sign
        None => (value.strip_prefix('+').unwrap_or(value), 10),
    };

    // Underscores go between digits
    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
    {
        return Err(ParseError::InvalidValue);
    }

    let mut acc: u32 = 0;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(radix).ok_or(ParseError::InvalidValue)?;
        acc = acc
            .checked_mul(radix)
            .and_then(|a| a.checked_add(digit))
            .ok_or(ParseError::OutOfRange)?;
    }

    Ok(acc)
}

fn parse_u8(value: &str) -> Result<u8, ParseError> {
    u8::try_from(parse_int(value)?).map_err(|_| ParseError::OutOfRange)
}

fn parse_str(value: &str) -> Result<&str, ParseError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)
}
