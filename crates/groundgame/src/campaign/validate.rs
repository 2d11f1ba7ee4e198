//! Boundary checks shared by the intake DTOs. The pure `geo` functions accept
//! any numeric input, so range enforcement lives here with the callers.

use crate::geo::Point;

pub(crate) const MAX_NAME_LEN: usize = 255;

#[derive(Debug, thiserror::Error)]
pub enum CoordinateError {
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

pub(crate) fn check_point(point: Point) -> Result<(), CoordinateError> {
    if !(-90.0..=90.0).contains(&point.lat) {
        return Err(CoordinateError::LatitudeOutOfRange(point.lat));
    }
    if !(-180.0..=180.0).contains(&point.lng) {
        return Err(CoordinateError::LongitudeOutOfRange(point.lng));
    }
    Ok(())
}

/// Display-label check used by every named record: non-blank, at most 255
/// characters.
pub(crate) fn check_label(value: &str) -> Result<(), LabelError> {
    if value.trim().is_empty() {
        return Err(LabelError::Empty);
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(LabelError::TooLong);
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("must not be blank")]
    Empty,
    #[error("must be at most 255 characters")]
    TooLong,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_extreme_but_valid_coordinates() {
        assert!(check_point(Point::new(-180.0, -90.0)).is_ok());
        assert!(check_point(Point::new(180.0, 90.0)).is_ok());
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(matches!(
            check_point(Point::new(0.0, 90.5)),
            Err(CoordinateError::LatitudeOutOfRange(_))
        ));
        assert!(matches!(
            check_point(Point::new(-181.0, 0.0)),
            Err(CoordinateError::LongitudeOutOfRange(_))
        ));
    }

    #[test]
    fn rejects_blank_and_oversized_labels() {
        assert!(matches!(check_label("   "), Err(LabelError::Empty)));
        let oversized = "x".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(check_label(&oversized), Err(LabelError::TooLong)));
        assert!(check_label("Zona Sul").is_ok());
    }
}
