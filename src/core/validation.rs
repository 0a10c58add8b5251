use super::error::ValidationError;

/// Check that `[min, max]` is ordered.
pub fn check_range<T: PartialOrd + std::fmt::Display>(
    field: &str,
    range: &[T; 2],
    errors: &mut Vec<ValidationError>,
) {
    if range[0] > range[1] {
        errors.push(ValidationError::new(
            field,
            format!("min {} must not exceed max {}", range[0], range[1]),
        ));
    }
}

/// Check that `[min, max]` is ordered and strictly positive.
pub fn check_positive_range(field: &str, range: &[f64; 2], errors: &mut Vec<ValidationError>) {
    if range[0] <= 0.0 {
        errors.push(ValidationError::new(field, "values must be positive"));
    }
    check_range(field, range, errors);
}

/// Check that a value is a probability in `[0, 1]`.
pub fn check_probability(field: &str, value: f64, errors: &mut Vec<ValidationError>) {
    if !(0.0..=1.0).contains(&value) {
        errors.push(ValidationError::new(
            field,
            format!("probability {value} must be within [0, 1]"),
        ));
    }
}

/// Check a weight table: no negative weights and a positive total.
///
/// An empty table is accepted; callers fall back to built-in defaults.
pub fn check_weights(
    field: &str,
    weights: impl IntoIterator<Item = f64>,
    errors: &mut Vec<ValidationError>,
) {
    let mut total = 0.0;
    let mut count = 0usize;
    for (i, weight) in weights.into_iter().enumerate() {
        count += 1;
        if !weight.is_finite() || weight < 0.0 {
            errors.push(ValidationError::new(
                format!("{field}[{i}].weight"),
                format!("weight {weight} must be a non-negative number"),
            ));
        } else {
            total += weight;
        }
    }
    if count > 0 && total <= 0.0 {
        errors.push(ValidationError::new(field, "weights must sum to a positive value"));
    }
}

/// Check that a list has at least one entry.
pub fn check_not_empty<T>(field: &str, items: &[T], errors: &mut Vec<ValidationError>) {
    if items.is_empty() {
        errors.push(ValidationError::new(field, "must not be empty"));
    }
}
