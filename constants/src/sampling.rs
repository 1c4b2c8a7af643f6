/// Image file extensions picked up from an input directory (compared lowercase)
pub const SUPPORTED_FILE_EXTENSIONS: &[&str] = &["png", "jpg"];

/// Pixels with an alpha below this value are dropped when alpha filtering is on
pub const ALPHA_THRESHOLD: u8 = 25;

/// Decimal places kept for world positions in the output records
pub const POSITION_DECIMALS: usize = 3;
