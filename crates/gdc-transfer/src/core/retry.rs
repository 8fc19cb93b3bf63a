use std::time::Duration;

/// Calculate the delay before a retry attempt using exponential backoff.
///
/// The delay formula is: `base * 2^retry_count`
///
/// The executor never calls this; it is offered to orchestrators that wrap
/// `plan` + `execute` in their own retry loop.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use gdc_transfer::retry_delay;
///
/// assert_eq!(retry_delay(0, Duration::from_millis(100)), Duration::from_millis(100));
/// assert_eq!(retry_delay(2, Duration::from_millis(100)), Duration::from_millis(400));
/// ```
pub fn retry_delay(retry_count: u32, base: Duration) -> Duration {
    let multiplier = 2_u32.saturating_pow(retry_count);
    base.saturating_mul(multiplier)
}
