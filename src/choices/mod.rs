//! Closed coded vocabularies.
//!
//! Every technical attribute of a series is stored as a small integer code
//! and rendered through a static label table. `coded_choice!` generates the
//! enum, the lookup table and the serde mapping (the code travels on the
//! wire, never the label).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CatalogError;

macro_rules! coded_choice {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident = $code:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(try_from = "u16", into = "u16")]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Code → label table used for display and validation.
            pub const VOCABULARY: &'static [(u16, &'static str)] = &[$( ($code, $label) ),+];

            pub fn code(self) -> u16 {
                match self {
                    $( $name::$variant => $code ),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }

            pub fn from_code(code: u16) -> Option<Self> {
                match code {
                    $( $code => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl From<$name> for u16 {
            fn from(value: $name) -> u16 {
                value.code()
            }
        }

        impl TryFrom<u16> for $name {
            type Error = $crate::error::CatalogError;

            fn try_from(code: u16) -> Result<Self, Self::Error> {
                $name::from_code(code).ok_or_else(|| $crate::error::CatalogError::InvalidChoice {
                    field: stringify!($name).to_string(),
                    value: code.to_string(),
                })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

pub mod series;

pub use series::*;

/// Trading currency of a supplier. Prices are stored in it as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "BYN")]
    Byn,
    #[serde(rename = "RUB")]
    Rub,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "CNY")]
    Cny,
}

impl Currency {
    pub const ALL: &'static [Currency] = &[
        Currency::Byn,
        Currency::Rub,
        Currency::Eur,
        Currency::Usd,
        Currency::Cny,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Byn => "BYN",
            Currency::Rub => "RUB",
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Cny => "CNY",
        }
    }

    /// Parse a three-letter code. Only the exact upper-case codes are accepted.
    pub fn parse(code: &str) -> Result<Self, CatalogError> {
        Currency::ALL
            .iter()
            .copied()
            .find(|c| c.code() == code)
            .ok_or_else(|| CatalogError::InvalidChoice {
                field: "currency".to_string(),
                value: code.to_string(),
            })
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Supply voltage of a drive model, in volts.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub enum Voltage {
    V230,
    #[default]
    V400,
}

impl Voltage {
    pub const ALL: &'static [Voltage] = &[Voltage::V230, Voltage::V400];

    pub fn volts(self) -> u16 {
        match self {
            Voltage::V230 => 230,
            Voltage::V400 => 400,
        }
    }
}

impl From<Voltage> for u16 {
    fn from(value: Voltage) -> u16 {
        value.volts()
    }
}

impl TryFrom<u16> for Voltage {
    type Error = CatalogError;

    fn try_from(volts: u16) -> Result<Self, Self::Error> {
        match volts {
            230 => Ok(Voltage::V230),
            400 => Ok(Voltage::V400),
            other => Err(CatalogError::InvalidChoice {
                field: "voltage".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Voltage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.volts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_parse() {
        assert_eq!(Currency::parse("EUR").unwrap(), Currency::Eur);
        assert!(matches!(
            Currency::parse("GBP"),
            Err(CatalogError::InvalidChoice { .. })
        ));
        assert!(Currency::parse("eur").is_err());
    }

    #[test]
    fn test_currency_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Currency::Cny).unwrap(), "\"CNY\"");
        let back: Currency = serde_json::from_str("\"BYN\"").unwrap();
        assert_eq!(back, Currency::Byn);
    }

    #[test]
    fn test_voltage_codes() {
        assert_eq!(Voltage::default(), Voltage::V400);
        assert_eq!(serde_json::to_string(&Voltage::V230).unwrap(), "230");
        assert!(serde_json::from_str::<Voltage>("380").is_err());
        assert!(matches!(
            Voltage::try_from(380),
            Err(CatalogError::InvalidChoice { .. })
        ));
    }

    #[test]
    fn test_coded_choice_lookup() {
        assert_eq!(ProtectionDegree::from_code(3), Some(ProtectionDegree::Ip55));
        assert_eq!(ProtectionDegree::Ip55.label(), "IP55");
        assert_eq!(ProtectionDegree::from_code(4), None);
        assert_eq!(PowerRange::R31.code(), 31);
        assert_eq!(PowerRange::R31.to_string(), "3x400В: 0.4...11кВт");
    }

    #[test]
    fn test_coded_choice_serde_uses_code() {
        assert_eq!(serde_json::to_string(&Motors::ImPm).unwrap(), "2");
        let back: Motors = serde_json::from_str("3").unwrap();
        assert_eq!(back, Motors::ImPmSynRm);
        assert!(serde_json::from_str::<Motors>("4").is_err());
    }

    #[test]
    fn test_vocabularies_have_unique_codes() {
        for vocabulary in [
            PowerRange::VOCABULARY,
            Overload::VOCABULARY,
            InputsOutputs::VOCABULARY,
            MinimumSize::VOCABULARY,
            PackageSet::VOCABULARY,
        ] {
            let mut codes: Vec<u16> = vocabulary.iter().map(|(code, _)| *code).collect();
            let before = codes.len();
            codes.sort();
            codes.dedup();
            assert_eq!(codes.len(), before);
        }
    }
}
