//! Measurement conversions for WordprocessingML
//!
//! Lengths are stored in twips (1/1440 inch), font sizes in half-points and
//! paragraph spacing in twentieths of a point.

/// Twips per inch
pub const TWIPS_PER_INCH: f64 = 1440.0;

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Convert inches to twips
pub fn inches_to_twips(inches: f64) -> u32 {
    (inches * TWIPS_PER_INCH).round().max(0.0) as u32
}

/// Convert centimeters to twips
pub fn cm_to_twips(cm: f64) -> u32 {
    inches_to_twips(cm / CM_PER_INCH)
}

/// Convert a font size in points to half-points (`w:sz`)
pub fn points_to_half_points(points: f64) -> u32 {
    (points * 2.0).round().max(0.0) as u32
}

/// Convert points to twentieths of a point (`w:spacing`)
pub fn points_to_twentieths(points: f64) -> u32 {
    (points * 20.0).round().max(0.0) as u32
}
