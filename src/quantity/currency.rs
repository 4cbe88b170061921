quantity!(
    /// The single currency unit everything is billed in.
    Yen, via: f64, suffix: "¥", precision: 0
);
