//! Region masking of point-data values.

use crate::SizeMismatchError;

/// Mask value marking a point as part of the region.
///
/// Compared with exact equality: `0.999` or `2.0` exclude the point.
pub const INCLUDED: f64 = 1.0;

/// Selects the values that belong to a region.
///
/// Without a mask every value is returned, in original order. With a mask,
/// `values[i]` is kept for every `i` where `mask[i] == 1.0`, again in original
/// order.
///
/// The result may be empty; callers that need at least one value must check.
///
/// # Errors
///
/// Returns [`SizeMismatchError`] when the mask and the values differ in length.
///
/// # Examples
///
/// ```
/// use meshstats_engine::mask_values;
///
/// let values = [10.0, 20.0, 30.0, 40.0];
/// assert_eq!(mask_values(&values, None).unwrap(), values);
///
/// let mask = [1.0, 0.0, 1.0, 0.5];
/// assert_eq!(mask_values(&values, Some(&mask)).unwrap(), [10.0, 30.0]);
///
/// assert!(mask_values(&values, Some(&[1.0])).is_err());
/// ```
pub fn mask_values(values: &[f64], mask: Option<&[f64]>) -> Result<Vec<f64>, SizeMismatchError> {
    let Some(mask) = mask else {
        return Ok(values.to_vec());
    };
    if mask.len() != values.len() {
        return Err(SizeMismatchError {
            values_len: values.len(),
            mask_len: mask.len(),
        });
    }
    Ok(values
        .iter()
        .zip(mask)
        .filter(|&(_, &m)| m == INCLUDED)
        .map(|(&v, _)| v)
        .collect())
}
