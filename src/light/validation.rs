use validator::ValidationError;

/// Validate the range of a hue value
pub fn validate_hue(hue: f64) -> Result<(), ValidationError> {
    if !(0.0..=360.0).contains(&hue) {
        Err(ValidationError::new(
            "Hue value has to be in range 0 to 360",
        ))
    } else {
        Ok(())
    }
}

/// Validate the range of a saturation value
pub fn validate_saturation(saturation: f64) -> Result<(), ValidationError> {
    if !(0.0..=100.0).contains(&saturation) {
        Err(ValidationError::new(
            "Saturation value has to be in range 0 to 100",
        ))
    } else {
        Ok(())
    }
}

/// Validate the range of a brightness value
pub fn validate_brightness(brightness: u8) -> Result<(), ValidationError> {
    if brightness > 100 {
        Err(ValidationError::new(
            "Brightness value has to be in range 0 to 100",
        ))
    } else {
        Ok(())
    }
}
