#[macro_use]
mod macros;

pub mod capacity;
pub mod currency;
pub mod energy;
pub mod rate;

/// Round half-way values towards positive infinity.
///
/// Unlike [`f64::round`], `-2.5` becomes `-2.0` rather than `-3.0`.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.4), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(0.0), 0.0);
    }
}
