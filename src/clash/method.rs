use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What counts as a clash between two solids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// The solids share more than a negligible volume.
    Intersection,
    /// The solids meet along a boundary but share negligible or no volume.
    Touching,
}

impl Method {
    /// Both methods.
    pub const ALL: [Self; 2] = [Self::Intersection, Self::Touching];

    /// The tag used to name the method in configuration and logs.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Intersection => "intersection",
            Self::Touching => "touching",
        }
    }

    /// Classifies a measured intersection volume.
    ///
    /// The two methods partition the volume axis at `epsilon`: a volume of
    /// exactly `epsilon` is touching, never intersecting.
    #[must_use]
    pub fn classifies_as_clash(self, intersection_volume: f64, epsilon: f64) -> bool {
        match self {
            Self::Intersection => intersection_volume > epsilon,
            Self::Touching => intersection_volume <= epsilon,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when parsing an unknown method tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown clash method `{0}`")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMethod(s.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn tags_round_trip_through_from_str() {
        for method in Method::ALL {
            assert_eq!(method.tag().parse::<Method>().unwrap(), method);
        }
        assert_eq!(" Touching ".parse::<Method>().unwrap(), Method::Touching);
        assert!("overlap".parse::<Method>().is_err());
    }

    #[test]
    fn methods_partition_volumes() {
        for volume in [0.0, EPS / 2.0, EPS, EPS * 2.0, 0.5] {
            let hits = Method::ALL
                .into_iter()
                .filter(|m| m.classifies_as_clash(volume, EPS))
                .count();
            assert_eq!(hits, 1, "volume {volume} claimed by {hits} methods");
        }
    }

    #[test]
    fn epsilon_itself_is_not_an_intersection() {
        assert!(!Method::Intersection.classifies_as_clash(EPS, EPS));
        assert!(Method::Touching.classifies_as_clash(EPS, EPS));
    }
}
