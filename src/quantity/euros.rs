use crate::quantity::cents::Cents;

quantity!(
    /// Major currency units, as published upstream and shown to consumers.
    Euros, suffix: "€", precision: 4
);

impl Euros {
    /// Round to the four decimal places the readings are presented with.
    #[must_use]
    pub fn round_to_display(self) -> Self {
        Self((self.0 * 10_000.0).round() / 10_000.0)
    }
}

impl From<Cents> for Euros {
    fn from(cents: Cents) -> Self {
        Self(cents.0 / 100.0)
    }
}
