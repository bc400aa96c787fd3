use crate::quantity::euros::Euros;

quantity!(
    /// Minor currency units: all derived prices and the provider markup are kept in cents.
    Cents, suffix: "¢", precision: 3
);

impl From<Euros> for Cents {
    fn from(euros: Euros) -> Self {
        Self(euros.0 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_from_euros() {
        assert_abs_diff_eq!(Cents::from(Euros(0.05)).0, 5.0);
    }

    #[test]
    fn test_sum() {
        let total: Cents = [Cents(1.0), Cents(2.5), Cents(0.5)].into_iter().sum();
        assert_abs_diff_eq!(total.0, 4.0);
    }

    #[test]
    fn test_ordering() {
        assert!(Cents(1.0) < Cents(1.5));
        assert_eq!(Cents(2.0).max(Cents(-1.0)), Cents(2.0));
    }
}
