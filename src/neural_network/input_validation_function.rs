use crate::error::ModelError;

/// Validates that the learning rate is positive and finite.
///
/// # Parameters
///
/// * `learning_rate` - The learning rate value to validate
///
/// # Returns
///
/// - `Ok(())` if the learning rate is positive and finite
/// - `Err(ModelError::InputValidationError)` if the learning rate is not positive or not finite
pub(crate) fn validate_learning_rate(learning_rate: f64) -> Result<(), ModelError> {
    if !(learning_rate > 0.0 && learning_rate.is_finite()) {
        return Err(ModelError::InputValidationError(format!(
            "learning_rate must be positive and finite, got {}",
            learning_rate
        )));
    }
    Ok(())
}

/// Validates that a decay factor (momentum) is in the range [0, 1) and finite.
///
/// # Parameters
///
/// - `value` - The decay factor to validate
/// - `param_name` - The name of the parameter (for error messages)
///
/// # Returns
///
/// - `Ok(())` if the value is in the valid range and finite
/// - `Err(ModelError::InputValidationError)` if the value is out of range or not finite
pub(crate) fn validate_decay_rate(value: f64, param_name: &str) -> Result<(), ModelError> {
    if !((0.0..1.0).contains(&value) && value.is_finite()) {
        return Err(ModelError::InputValidationError(format!(
            "{} must be in range [0, 1) and finite, got {}",
            param_name, value
        )));
    }
    Ok(())
}

/// Validates that a value is non-negative and finite.
///
/// # Parameters
///
/// - `value` - The value to validate
/// - `param_name` - The name of the parameter (for error messages)
///
/// # Returns
///
/// - `Ok(())` if the value is non-negative and finite
/// - `Err(ModelError::InputValidationError)` if the value is negative or not finite
pub(crate) fn validate_non_negative_finite(value: f64, param_name: &str) -> Result<(), ModelError> {
    if !(value >= 0.0 && value.is_finite()) {
        return Err(ModelError::InputValidationError(format!(
            "{} must be non-negative and finite, got {}",
            param_name, value
        )));
    }
    Ok(())
}

/// Validates that a probability is in the range [0, 1].
///
/// # Parameters
///
/// - `value` - The probability to validate
/// - `param_name` - The name of the parameter (for error messages)
///
/// # Returns
///
/// - `Ok(())` if the value is in [0, 1]
/// - `Err(ModelError::InputValidationError)` otherwise
pub(crate) fn validate_probability(value: f64, param_name: &str) -> Result<(), ModelError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ModelError::InputValidationError(format!(
            "{} must be in range [0, 1], got {}",
            param_name, value
        )));
    }
    Ok(())
}
