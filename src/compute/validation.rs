//! Validation for index bounds, capacity and coordinates.

use crate::error::{IndexError, Result};
use quadex_types::Bounds;

/// Validates that both coordinates are finite.
///
/// # Examples
///
/// ```
/// use quadex::compute::validation::validate_coordinates;
///
/// assert!(validate_coordinates(12.5, -3.0).is_ok());
/// assert!(validate_coordinates(f64::NAN, 0.0).is_err());
/// ```
pub fn validate_coordinates(x: f64, y: f64) -> Result<()> {
    if !x.is_finite() {
        return Err(IndexError::InvalidInput(format!(
            "x coordinate must be finite, got: {}",
            x
        )));
    }

    if !y.is_finite() {
        return Err(IndexError::InvalidInput(format!(
            "y coordinate must be finite, got: {}",
            y
        )));
    }

    Ok(())
}

/// Validates the outer bounds of an index: finite origin, finite and
/// non-negative size.
///
/// # Examples
///
/// ```
/// use quadex::compute::validation::validate_bounds;
/// use quadex::Bounds;
///
/// assert!(validate_bounds(&Bounds::new(0.0, 0.0, 100.0, 100.0)).is_ok());
/// assert!(validate_bounds(&Bounds::new(0.0, 0.0, -1.0, 100.0)).is_err());
/// ```
pub fn validate_bounds(bounds: &Bounds) -> Result<()> {
    validate_coordinates(bounds.x, bounds.y)
        .map_err(|e| IndexError::InvalidInput(format!("Bounds origin: {}", e)))?;

    if !bounds.width.is_finite() || bounds.width < 0.0 {
        return Err(IndexError::InvalidInput(format!(
            "Bounds width must be finite and >= 0, got: {}",
            bounds.width
        )));
    }

    if !bounds.height.is_finite() || bounds.height < 0.0 {
        return Err(IndexError::InvalidInput(format!(
            "Bounds height must be finite and >= 0, got: {}",
            bounds.height
        )));
    }

    if !bounds.max_x().is_finite() || !bounds.max_y().is_finite() {
        return Err(IndexError::InvalidInput(format!(
            "Bounds extent overflows: {:?}",
            bounds
        )));
    }

    Ok(())
}

/// Validates the points-per-leaf capacity.
pub fn validate_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        return Err(IndexError::InvalidInput(
            "Capacity must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
