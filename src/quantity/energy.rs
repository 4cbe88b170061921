quantity!(
    /// Electricity usage over a billing month.
    KilowattHours, via: f64, suffix: "kWh", precision: 0
);

impl KilowattHours {
    pub const INFINITY: Self = Self(f64::INFINITY);
}
