use ad5611_hal::Command;

/// Parse an integer given either in decimal or as `0x`-prefixed hexadecimal.
pub(crate) fn u16_from_dec_or_hex(value: &str) -> Result<u16, std::num::ParseIntError> {
    match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => value.parse(),
    }
}

/// Parse a DAC output code, rejecting values that do not fit in 10 bits.
pub(crate) fn dac_value(value: &str) -> Result<u16, String> {
    let value = u16_from_dec_or_hex(value).map_err(|e| e.to_string())?;
    Command::normal(value)
        .map(|command| command.value())
        .map_err(|e| e.to_string())
}
