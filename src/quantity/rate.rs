use crate::quantity::{currency::Yen, energy::KilowattHours};

quantity!(
    /// Per-unit energy price or surcharge.
    YenPerKilowattHour, via: f64, suffix: "¥/kWh", precision: 2
);

implement_mul!(KilowattHours, YenPerKilowattHour, Yen);
