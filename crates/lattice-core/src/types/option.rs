//! Option contract description.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::daycounts::DayCountConvention;
use crate::error::{require_positive, LatticeError, LatticeResult};

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionType {
    /// Intrinsic value of the option at underlying price `spot`.
    #[inline]
    pub fn payoff(self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(LatticeError::invalid_input(
                "option_type",
                format!("unknown option type '{other}'"),
            )),
        }
    }
}

/// When the option may be exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseStyle {
    /// Exercisable at any time up to and including expiry.
    American,
    /// Exercisable at expiry only.
    European,
}

impl ExerciseStyle {
    /// Returns true if the holder may exercise before expiry.
    pub fn allows_early_exercise(self) -> bool {
        matches!(self, ExerciseStyle::American)
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseStyle::American => write!(f, "american"),
            ExerciseStyle::European => write!(f, "european"),
        }
    }
}

impl FromStr for ExerciseStyle {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "american" | "us" => Ok(ExerciseStyle::American),
            "european" | "eu" => Ok(ExerciseStyle::European),
            other => Err(LatticeError::invalid_input(
                "exercise_style",
                format!("unknown exercise style '{other}'"),
            )),
        }
    }
}

/// A vanilla option contract.
///
/// Immutable once built; the constructor enforces `strike > 0` and
/// `time_to_expiry > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptionSpec {
    option_type: OptionType,
    strike: f64,
    time_to_expiry: f64,
    exercise_style: ExerciseStyle,
}

impl OptionSpec {
    /// Creates a validated option specification.
    ///
    /// # Arguments
    ///
    /// * `option_type` - Call or put
    /// * `strike` - Strike price, strictly positive
    /// * `time_to_expiry` - Time to expiry in years, strictly positive
    /// * `exercise_style` - American or European
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the strike or the time to expiry is not
    /// strictly positive and finite.
    pub fn new(
        option_type: OptionType,
        strike: f64,
        time_to_expiry: f64,
        exercise_style: ExerciseStyle,
    ) -> LatticeResult<Self> {
        Ok(Self {
            option_type,
            strike: require_positive("strike", strike)?,
            time_to_expiry: require_positive("time_to_expiry", time_to_expiry)?,
            exercise_style,
        })
    }

    /// Creates an American option.
    pub fn american(
        option_type: OptionType,
        strike: f64,
        time_to_expiry: f64,
    ) -> LatticeResult<Self> {
        Self::new(option_type, strike, time_to_expiry, ExerciseStyle::American)
    }

    /// Creates a European option.
    pub fn european(
        option_type: OptionType,
        strike: f64,
        time_to_expiry: f64,
    ) -> LatticeResult<Self> {
        Self::new(option_type, strike, time_to_expiry, ExerciseStyle::European)
    }

    /// Creates an option whose expiry is given as a number of calendar days,
    /// converted to years with `day_count`.
    pub fn from_days(
        option_type: OptionType,
        strike: f64,
        days_to_expiry: i64,
        day_count: DayCountConvention,
        exercise_style: ExerciseStyle,
    ) -> LatticeResult<Self> {
        Self::new(
            option_type,
            strike,
            day_count.year_fraction_from_days(days_to_expiry),
            exercise_style,
        )
    }

    /// Returns the same contract with a different exercise style.
    #[must_use]
    pub fn with_exercise_style(self, exercise_style: ExerciseStyle) -> Self {
        Self {
            exercise_style,
            ..self
        }
    }

    /// Call or put.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Strike price.
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to expiry in years.
    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    /// American or European.
    pub fn exercise_style(&self) -> ExerciseStyle {
        self.exercise_style
    }

    /// Intrinsic value at underlying price `spot`.
    #[inline]
    pub fn payoff(&self, spot: f64) -> f64 {
        self.option_type.payoff(spot, self.strike)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_payoff() {
        let call = OptionSpec::american(OptionType::Call, 100.0, 1.0).unwrap();
        let put = OptionSpec::american(OptionType::Put, 100.0, 1.0).unwrap();

        assert_relative_eq!(call.payoff(110.0), 10.0);
        assert_relative_eq!(call.payoff(90.0), 0.0);
        assert_relative_eq!(put.payoff(90.0), 10.0);
        assert_relative_eq!(put.payoff(110.0), 0.0);
    }

    #[test]
    fn test_invalid_strike() {
        let err = OptionSpec::american(OptionType::Call, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, LatticeError::InvalidInput { field: "strike", .. }));
    }

    #[test]
    fn test_invalid_expiry() {
        for t in [0.0, -0.5, f64::NAN] {
            let err = OptionSpec::european(OptionType::Put, 100.0, t).unwrap_err();
            assert!(matches!(
                err,
                LatticeError::InvalidInput {
                    field: "time_to_expiry",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_from_days_act360() {
        let spec = OptionSpec::from_days(
            OptionType::Call,
            190.0,
            148,
            DayCountConvention::Act360,
            ExerciseStyle::American,
        )
        .unwrap();

        assert_relative_eq!(spec.time_to_expiry(), 148.0 / 360.0, epsilon = 1e-15);
    }

    #[test]
    fn test_from_days_zero_rejected() {
        let result = OptionSpec::from_days(
            OptionType::Call,
            190.0,
            0,
            DayCountConvention::Act360,
            ExerciseStyle::American,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_with_exercise_style() {
        let american = OptionSpec::american(OptionType::Call, 100.0, 0.5).unwrap();
        let european = american.with_exercise_style(ExerciseStyle::European);

        assert_eq!(european.exercise_style(), ExerciseStyle::European);
        assert_relative_eq!(european.strike(), american.strike());
        assert!(!european.exercise_style().allows_early_exercise());
    }

    #[test]
    fn test_parse_option_type() {
        assert_eq!("Call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!(" p ".parse::<OptionType>().unwrap(), OptionType::Put);
        assert!("straddle".parse::<OptionType>().is_err());
    }

    #[test]
    fn test_parse_exercise_style() {
        assert_eq!(
            "AMERICAN".parse::<ExerciseStyle>().unwrap(),
            ExerciseStyle::American
        );
        assert_eq!(
            "european".parse::<ExerciseStyle>().unwrap(),
            ExerciseStyle::European
        );
        assert!("bermudan".parse::<ExerciseStyle>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&OptionType::Put).unwrap();
        assert_eq!(json, "\"put\"");
        let style: ExerciseStyle = serde_json::from_str("\"american\"").unwrap();
        assert_eq!(style, ExerciseStyle::American);
    }
}
