//! Roast profile models

use serde::{Deserialize, Serialize};

use crate::error::{RoastError, RoastResult};

/// Target degree of roast, ordered from lightest to darkest
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RoastLevel {
    Light,
    Medium,
    Dark,
    French,
    Italian,
}

impl RoastLevel {
    pub const ALL: [RoastLevel; 5] = [
        RoastLevel::Light,
        RoastLevel::Medium,
        RoastLevel::Dark,
        RoastLevel::French,
        RoastLevel::Italian,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoastLevel::Light => "light",
            RoastLevel::Medium => "medium",
            RoastLevel::Dark => "dark",
            RoastLevel::French => "french",
            RoastLevel::Italian => "italian",
        }
    }

    /// Darkness rank, 0 for Light
    pub fn darkness(&self) -> u8 {
        *self as u8
    }
}

impl std::fmt::Display for RoastLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoastLevel::Light => write!(f, "Light"),
            RoastLevel::Medium => write!(f, "Medium"),
            RoastLevel::Dark => write!(f, "Dark"),
            RoastLevel::French => write!(f, "French"),
            RoastLevel::Italian => write!(f, "Italian"),
        }
    }
}

impl std::str::FromStr for RoastLevel {
    type Err = RoastError;

    fn from_str(s: &str) -> RoastResult<Self> {
        RoastLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                RoastError::invalid_parameter(
                    "roast_level",
                    format!("`{}` is not one of Light, Medium, Dark, French, Italian", s),
                )
            })
    }
}

/// Green bean species or blend. Provenance only, never changes the curve.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BeanType {
    Arabica,
    Robusta,
    Liberica,
    Excelsa,
    Blend,
}

impl BeanType {
    pub const ALL: [BeanType; 5] = [
        BeanType::Arabica,
        BeanType::Robusta,
        BeanType::Liberica,
        BeanType::Excelsa,
        BeanType::Blend,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BeanType::Arabica => "arabica",
            BeanType::Robusta => "robusta",
            BeanType::Liberica => "liberica",
            BeanType::Excelsa => "excelsa",
            BeanType::Blend => "blend",
        }
    }
}

impl std::fmt::Display for BeanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BeanType::Arabica => write!(f, "Arabica"),
            BeanType::Robusta => write!(f, "Robusta"),
            BeanType::Liberica => write!(f, "Liberica"),
            BeanType::Excelsa => write!(f, "Excelsa"),
            BeanType::Blend => write!(f, "Blend"),
        }
    }
}

impl std::str::FromStr for BeanType {
    type Err = RoastError;

    fn from_str(s: &str) -> RoastResult<Self> {
        BeanType::ALL
            .into_iter()
            .find(|bean| bean.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                RoastError::invalid_parameter("bean_type", format!("`{}` is not a recognized bean type", s))
            })
    }
}

/// Growing origin of the green beans
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Colombia,
    Ethiopia,
    Brazil,
    Vietnam,
    Indonesia,
    Kenya,
    Guatemala,
}

impl Origin {
    pub const ALL: [Origin; 7] = [
        Origin::Colombia,
        Origin::Ethiopia,
        Origin::Brazil,
        Origin::Vietnam,
        Origin::Indonesia,
        Origin::Kenya,
        Origin::Guatemala,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Colombia => "colombia",
            Origin::Ethiopia => "ethiopia",
            Origin::Brazil => "brazil",
            Origin::Vietnam => "vietnam",
            Origin::Indonesia => "indonesia",
            Origin::Kenya => "kenya",
            Origin::Guatemala => "guatemala",
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Colombia => write!(f, "Colombia"),
            Origin::Ethiopia => write!(f, "Ethiopia"),
            Origin::Brazil => write!(f, "Brazil"),
            Origin::Vietnam => write!(f, "Vietnam"),
            Origin::Indonesia => write!(f, "Indonesia"),
            Origin::Kenya => write!(f, "Kenya"),
            Origin::Guatemala => write!(f, "Guatemala"),
        }
    }
}

impl std::str::FromStr for Origin {
    type Err = RoastError;

    fn from_str(s: &str) -> RoastResult<Self> {
        Origin::ALL
            .into_iter()
            .find(|origin| origin.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                RoastError::invalid_parameter("origin", format!("`{}` is not a recognized origin", s))
            })
    }
}

/// The batch being loaded into the roaster
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchInfo {
    pub bean_type: BeanType,
    pub origin: Origin,
    pub batch_size_g: u32,
}

impl BatchInfo {
    pub fn new(bean_type: BeanType, origin: Origin, batch_size_g: u32) -> RoastResult<Self> {
        crate::validation::validate_batch_size(batch_size_g)?;
        Ok(Self {
            bean_type,
            origin,
            batch_size_g,
        })
    }

    /// Event text recorded when the roast starts
    pub fn describe(&self) -> String {
        format!(
            "Batch: {}g {} from {}",
            self.batch_size_g, self.bean_type, self.origin
        )
    }
}

/// One point of a roast curve
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProfileSample {
    pub elapsed_minutes: f64,
    pub temperature_celsius: f64,
}

/// A synthesized roast curve plus the parameters that produced it.
///
/// Samples are non-empty and strictly increasing in `elapsed_minutes`.
/// Construction goes through [`crate::generator::generate`]; the profile is
/// immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawRoastProfile")]
pub struct RoastProfile {
    pub(crate) samples: Vec<ProfileSample>,
    pub bean_type: BeanType,
    pub target_roast_level: RoastLevel,
    pub charge_temperature: f64,
    pub development_time_pct: f64,
    /// Target drop temperature at the end of the curve
    pub drop_temperature: f64,
    pub total_duration_minutes: f64,
    /// Start of the development phase
    pub first_crack_minute: f64,
}

/// Wire form of [`RoastProfile`], checked before it becomes a profile
#[derive(Deserialize)]
struct RawRoastProfile {
    samples: Vec<ProfileSample>,
    bean_type: BeanType,
    target_roast_level: RoastLevel,
    charge_temperature: f64,
    development_time_pct: f64,
    drop_temperature: f64,
    total_duration_minutes: f64,
    first_crack_minute: f64,
}

impl TryFrom<RawRoastProfile> for RoastProfile {
    type Error = RoastError;

    fn try_from(raw: RawRoastProfile) -> RoastResult<Self> {
        if raw.samples.is_empty() {
            return Err(RoastError::invalid_parameter("samples", "profile has no samples"));
        }
        if raw
            .samples
            .iter()
            .any(|s| !s.elapsed_minutes.is_finite() || !s.temperature_celsius.is_finite())
        {
            return Err(RoastError::invalid_parameter("samples", "samples must be finite"));
        }
        if raw
            .samples
            .windows(2)
            .any(|w| w[1].elapsed_minutes <= w[0].elapsed_minutes)
        {
            return Err(RoastError::invalid_parameter(
                "samples",
                "elapsed minutes must be strictly increasing",
            ));
        }

        Ok(Self {
            samples: raw.samples,
            bean_type: raw.bean_type,
            target_roast_level: raw.target_roast_level,
            charge_temperature: raw.charge_temperature,
            development_time_pct: raw.development_time_pct,
            drop_temperature: raw.drop_temperature,
            total_duration_minutes: raw.total_duration_minutes,
            first_crack_minute: raw.first_crack_minute,
        })
    }
}

impl RoastProfile {
    pub fn samples(&self) -> &[ProfileSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last_sample(&self) -> Option<&ProfileSample> {
        self.samples.last()
    }

    pub fn peak_temperature(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.temperature_celsius)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Temperature of the last sample at or before `elapsed_minutes`.
    ///
    /// Requests past the end of the curve clamp to the final sample; the
    /// curve is never extrapolated.
    pub fn temperature_at(&self, elapsed_minutes: f64) -> RoastResult<f64> {
        crate::validation::validate_elapsed(elapsed_minutes)?;

        let idx = self
            .samples
            .partition_point(|s| s.elapsed_minutes <= elapsed_minutes);
        let sample = match idx {
            0 => self.samples.first(),
            n => self.samples.get(n - 1),
        };
        sample
            .map(|s| s.temperature_celsius)
            .ok_or(RoastError::NoData("profile has no samples"))
    }
}
