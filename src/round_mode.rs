/// Rounding behavior at a caller-chosen decimal position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundMode {
    /// Round half away from zero (`0.5 -> 1`, `-0.5 -> -1`).
    HalfUp,
    /// Round half toward zero (`0.5 -> 0`, `-0.5 -> 0`).
    HalfDown,
    /// Round half to the nearest even digit (banker's rounding).
    HalfEven,
    /// Round half to the nearest odd digit.
    HalfOdd,
    /// Round toward positive infinity.
    Ceiling,
    /// Round toward negative infinity.
    Floor,
    /// Truncate toward zero.
    TowardZero,
    /// Round away from zero.
    AwayFromZero,
}
