quantity!(
    /// Supply capacity of the household connection, also known as the contract amperage.
    Amperes, via: u16, suffix: "A", precision: 0
);
