use std::fmt;

use crate::ValidationError;

/// Names the physical parameter a [`ValidationError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    RodLength1,
    RodLength2,
    BobMass1,
    BobMass2,
    Gravity,
    OriginX,
    OriginY,
    TimeStep,
}

impl fmt::Display for Parameter {
    /// Uses the camelCase names clients send.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RodLength1 => "rodLength1",
            Self::RodLength2 => "rodLength2",
            Self::BobMass1 => "bobMass1",
            Self::BobMass2 => "bobMass2",
            Self::Gravity => "gravity",
            Self::OriginX => "originX",
            Self::OriginY => "originY",
            Self::TimeStep => "dt",
        };
        f.write_str(name)
    }
}

/// Physical constants of one simulation run.
///
/// Lengths, masses and gravity are strictly positive and finite; the pivot
/// origin is finite. Everything derived from them (inertias, energy scale,
/// the extent of the swept disc) is finite too. All of this is enforced at
/// construction, so a value of this type is always safe to integrate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PhysicalParameters {
    rod_length_1: f64,
    rod_length_2: f64,
    bob_mass_1: f64,
    bob_mass_2: f64,
    gravity: f64,
    origin_x: f64,
    origin_y: f64,
}

impl PhysicalParameters {
    pub const DEFAULT_ROD_LENGTH: f64 = 150.0;
    pub const DEFAULT_BOB_MASS: f64 = 10.0;
    pub const DEFAULT_GRAVITY: f64 = 9.81;
    pub const DEFAULT_ORIGIN: (f64, f64) = (300.0, 300.0);

    /// Creates parameters pivoting at the default origin.
    ///
    /// # Errors
    ///
    /// Returns an error if any length, mass or gravity is non-finite or not
    /// strictly positive, or if together they overflow a derived quantity.
    pub fn new(
        rod_lengths: [f64; 2],
        bob_masses: [f64; 2],
        gravity: f64,
    ) -> Result<Self, ValidationError> {
        let (origin_x, origin_y) = Self::DEFAULT_ORIGIN;
        Self {
            rod_length_1: positive(Parameter::RodLength1, rod_lengths[0])?,
            rod_length_2: positive(Parameter::RodLength2, rod_lengths[1])?,
            bob_mass_1: positive(Parameter::BobMass1, bob_masses[0])?,
            bob_mass_2: positive(Parameter::BobMass2, bob_masses[1])?,
            gravity: positive(Parameter::Gravity, gravity)?,
            origin_x,
            origin_y,
        }
        .in_range()
    }

    /// Returns these parameters pivoting at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error if either coordinate is non-finite, or if the
    /// pendulum could reach a non-finite position from there.
    pub fn with_origin(self, x: f64, y: f64) -> Result<Self, ValidationError> {
        Self {
            origin_x: finite(Parameter::OriginX, x)?,
            origin_y: finite(Parameter::OriginY, y)?,
            ..self
        }
        .in_range()
    }

    /// Checks the quantities the equations, coordinates and energy are built
    /// from, so none of them can start out infinite.
    fn in_range(self) -> Result<Self, ValidationError> {
        let (l1, l2) = (self.rod_length_1, self.rod_length_2);
        let (m2, g) = (self.bob_mass_2, self.gravity);
        let total_mass = self.bob_mass_1 + m2;
        let reach = l1 + l2;

        let derived = [
            ("total mass", total_mass),
            ("inner rod inertia", total_mass * l1),
            ("outer rod inertia", (l2 / l1) * total_mass * l1),
            ("moment of inertia", total_mass * l1 * l1 + m2 * l2 * l2),
            ("potential energy", total_mass * g * l1 + m2 * g * l2),
            ("pendulum reach", reach),
            ("horizontal extent", self.origin_x.abs() + reach),
            ("vertical extent", self.origin_y.abs() + reach),
        ];

        match derived.into_iter().find(|(_, value)| !value.is_finite()) {
            Some((quantity, _)) => Err(ValidationError::OutOfRange { quantity }),
            None => Ok(self),
        }
    }

    #[must_use]
    pub fn rod_length_1(&self) -> f64 {
        self.rod_length_1
    }

    #[must_use]
    pub fn rod_length_2(&self) -> f64 {
        self.rod_length_2
    }

    #[must_use]
    pub fn bob_mass_1(&self) -> f64 {
        self.bob_mass_1
    }

    #[must_use]
    pub fn bob_mass_2(&self) -> f64 {
        self.bob_mass_2
    }

    #[must_use]
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Returns the pivot as `(x, y)`.
    #[must_use]
    pub fn origin(&self) -> (f64, f64) {
        (self.origin_x, self.origin_y)
    }
}

impl Default for PhysicalParameters {
    fn default() -> Self {
        let (origin_x, origin_y) = Self::DEFAULT_ORIGIN;
        Self {
            rod_length_1: Self::DEFAULT_ROD_LENGTH,
            rod_length_2: Self::DEFAULT_ROD_LENGTH,
            bob_mass_1: Self::DEFAULT_BOB_MASS,
            bob_mass_2: Self::DEFAULT_BOB_MASS,
            gravity: Self::DEFAULT_GRAVITY,
            origin_x,
            origin_y,
        }
    }
}

/// A partial set of parameters requested by a client.
///
/// Fields left as `None` take their default value, not the value of the run
/// being replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", deny_unknown_fields))]
pub struct ParameterOverrides {
    pub rod_length_1: Option<f64>,
    pub rod_length_2: Option<f64>,
    pub bob_mass_1: Option<f64>,
    pub bob_mass_2: Option<f64>,
    pub gravity: Option<f64>,
}

impl ParameterOverrides {
    /// Fills unspecified fields from the defaults and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if any resulting parameter is invalid.
    pub fn resolve(&self) -> Result<PhysicalParameters, ValidationError> {
        let defaults = PhysicalParameters::default();
        let (origin_x, origin_y) = defaults.origin();

        PhysicalParameters::new(
            [
                self.rod_length_1.unwrap_or(defaults.rod_length_1),
                self.rod_length_2.unwrap_or(defaults.rod_length_2),
            ],
            [
                self.bob_mass_1.unwrap_or(defaults.bob_mass_1),
                self.bob_mass_2.unwrap_or(defaults.bob_mass_2),
            ],
            self.gravity.unwrap_or(defaults.gravity),
        )?
        .with_origin(origin_x, origin_y)
    }
}

/// Checks that `value` is finite.
pub(crate) fn finite(parameter: Parameter, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { parameter, value })
    }
}

/// Checks that `value` is finite and strictly positive.
pub(crate) fn positive(parameter: Parameter, value: f64) -> Result<f64, ValidationError> {
    let value = finite(parameter, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive { parameter, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let defaults = PhysicalParameters::default();
        let rebuilt = PhysicalParameters::new(
            [defaults.rod_length_1(), defaults.rod_length_2()],
            [defaults.bob_mass_1(), defaults.bob_mass_2()],
            defaults.gravity(),
        );

        assert_eq!(rebuilt, Ok(defaults));
        assert_eq!(defaults.origin(), (300.0, 300.0));
    }

    #[test]
    fn rejects_non_positive_values() {
        assert_eq!(
            PhysicalParameters::new([0.0, 1.0], [1.0, 1.0], 9.81),
            Err(ValidationError::NotPositive {
                parameter: Parameter::RodLength1,
                value: 0.0
            })
        );
        assert_eq!(
            PhysicalParameters::new([1.0, 1.0], [1.0, -5.0], 9.81),
            Err(ValidationError::NotPositive {
                parameter: Parameter::BobMass2,
                value: -5.0
            })
        );
        assert!(PhysicalParameters::new([1.0, 1.0], [1.0, 1.0], -9.81).is_err());
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(matches!(
            PhysicalParameters::new([1.0, f64::INFINITY], [1.0, 1.0], 9.81),
            Err(ValidationError::NotFinite {
                parameter: Parameter::RodLength2,
                ..
            })
        ));
        assert!(matches!(
            PhysicalParameters::new([1.0, 1.0], [1.0, 1.0], f64::NAN),
            Err(ValidationError::NotFinite {
                parameter: Parameter::Gravity,
                ..
            })
        ));
        assert!(
            PhysicalParameters::default()
                .with_origin(f64::NAN, 0.0)
                .is_err()
        );
    }

    #[test]
    fn rejects_values_that_overflow_together() {
        assert_eq!(
            PhysicalParameters::new([1e308, 1e308], [1.0, 1.0], 9.81),
            Err(ValidationError::OutOfRange {
                quantity: "inner rod inertia"
            })
        );
        assert!(matches!(
            PhysicalParameters::new([1e200, 1.0], [1.0, 1.0], 9.81),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            PhysicalParameters::new([1.0, 1.0], [1e308, 1e308], 9.81),
            Err(ValidationError::OutOfRange {
                quantity: "total mass"
            })
        ));

        // Fine around the default pivot, but not from the edge of the range.
        let wide = PhysicalParameters::new([1e300, 1e300], [1e-300, 1e-300], 9.81)
            .expect("valid parameters");
        assert!(matches!(
            wide.with_origin(f64::MAX, 0.0),
            Err(ValidationError::OutOfRange {
                quantity: "horizontal extent"
            })
        ));
    }

    #[test]
    fn large_but_representable_values_are_accepted() {
        let params = PhysicalParameters::new([1e100, 1e100], [1e50, 1e50], 1e3)
            .expect("valid parameters");
        assert_eq!(params.rod_length_1(), 1e100);
    }

    #[test]
    fn empty_overrides_resolve_to_defaults() {
        let resolved = ParameterOverrides::default().resolve();
        assert_eq!(resolved, Ok(PhysicalParameters::default()));
    }

    #[test]
    fn overrides_fill_from_defaults() {
        let overrides = ParameterOverrides {
            rod_length_2: Some(80.0),
            bob_mass_1: Some(25.0),
            ..ParameterOverrides::default()
        };

        let params = overrides.resolve().expect("should resolve");

        assert_eq!(params.rod_length_1(), PhysicalParameters::DEFAULT_ROD_LENGTH);
        assert_eq!(params.rod_length_2(), 80.0);
        assert_eq!(params.bob_mass_1(), 25.0);
        assert_eq!(params.bob_mass_2(), PhysicalParameters::DEFAULT_BOB_MASS);
        assert_eq!(params.gravity(), PhysicalParameters::DEFAULT_GRAVITY);
    }

    #[test]
    fn error_names_the_client_field() {
        let overrides = ParameterOverrides {
            bob_mass_1: Some(-5.0),
            ..ParameterOverrides::default()
        };

        let error = overrides.resolve().expect_err("negative mass");

        assert_eq!(
            error.to_string(),
            "bobMass1 must be strictly positive, got -5"
        );
    }
}
