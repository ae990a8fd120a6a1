//! Generation option bag
//!
//! Each creative option is one of a known set of labels or free text. Values
//! serialize as their display label so the same struct doubles as the
//! aggregator's `options` wire object.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Declare an option type with known labels plus a free-text fallback.
///
/// Matching against known labels is case-insensitive and ignores surrounding
/// whitespace; anything else is kept verbatim as `Custom`.
macro_rules! option_value {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
        default = $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            /// Free-text value outside the known list
            Custom(String),
        }

        impl $name {
            /// Known labels in form order.
            pub const KNOWN: &'static [&'static str] = &[$($label),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $label,)+
                    Self::Custom(s) => s.as_str(),
                }
            }

            pub fn parse(value: &str) -> Self {
                let trimmed = value.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($label) {
                        return Self::$variant;
                    }
                )+
                Self::Custom(trimmed.to_string())
            }

            /// "Default": leave the choice to the model.
            pub fn is_auto(&self) -> bool {
                self.as_str().eq_ignore_ascii_case("Default")
            }

            /// "None": explicitly exclude this aspect.
            pub fn is_off(&self) -> bool {
                self.as_str().eq_ignore_ascii_case("None")
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::parse(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::parse(&value)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                String::deserialize(deserializer).map(|s| Self::parse(&s))
            }
        }
    };
}

option_value! {
    /// Overall visual style
    VisualStyle {
        Auto => "Default",
        Minimalist => "Minimalist",
        Simple => "Simple",
        Detailed => "Detailed",
        Descriptive => "Descriptive",
        Dynamic => "Dynamic",
        Cinematic => "Cinematic",
        Documentary => "Documentary",
        Experimental => "Experimental",
        Animation => "Animation",
        Action => "Action",
    }
    default = Cinematic
}

option_value! {
    /// Camera rig / shooting style
    CameraStyle {
        Auto => "Default",
        Off => "None",
        SteadicamFlow => "Steadicam flow",
        DroneAerials => "Drone aerials",
        HandheldUrgency => "Handheld urgency",
        CraneElegance => "Crane elegance",
        DollyPrecision => "Dolly precision",
        Vr360 => "VR 360",
        MultiAngleRig => "Multi-angle rig",
        StaticTripod => "Static tripod",
        GimbalSmoothness => "Gimbal smoothness",
    }
    default = DroneAerials
}

option_value! {
    /// Camera movement
    CameraDirection {
        Auto => "Default",
        Off => "None",
        ZoomIn => "Zoom in",
        ZoomOut => "Zoom out",
        PanLeft => "Pan left",
        PanRight => "Pan right",
        TiltUp => "Tilt up",
        TiltDown => "Tilt down",
        OrbitalRotation => "Orbital rotation",
        PushIn => "Push in",
        PullOut => "Pull out",
    }
    default = OrbitalRotation
}

option_value! {
    /// Edit rhythm
    Pacing {
        Auto => "Default",
        Off => "None",
        SlowBurn => "Slow burn",
        RhythmicPulse => "Rhythmic pulse",
        FranticEnergy => "Frantic energy",
        EbbAndFlow => "Ebb and flow",
        HypnoticDrift => "Hypnotic drift",
        TimeLapseRush => "Time-lapse rush",
        StopMotionStaccato => "Stop-motion staccato",
        GradualBuild => "Gradual build",
        QuickCutRhythm => "Quick cut rhythm",
    }
    default = GradualBuild
}

option_value! {
    /// Special effects treatment
    SpecialEffects {
        Auto => "Default",
        Off => "None",
        PracticalEffects => "Practical effects",
        CgiEnhancement => "CGI enhancement",
        AnalogGlitches => "Analog glitches",
        LightPainting => "Light painting",
        ProjectionMapping => "Projection mapping",
        NanosecondExposures => "Nanosecond exposures",
        DoubleExposure => "Double exposure",
        SmokeDiffusion => "Smoke diffusion",
        LensFlareArtistry => "Lens flare artistry",
    }
    default = PracticalEffects
}

/// Desired prompt length.
///
/// The form offers word targets from 50 to 500 in steps of 50 plus "500+";
/// the legacy labels Short/Medium/Long are still accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PromptLength {
    Words(u16),
    /// "500+"
    Unbounded,
    Short,
    Medium,
    Long,
    Custom(String),
}

impl PromptLength {
    pub const WORD_STEPS: [u16; 10] = [50, 100, 150, 200, 250, 300, 350, 400, 450, 500];

    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        let without_unit = trimmed
            .strip_suffix("words")
            .map(str::trim_end)
            .unwrap_or(trimmed);

        if without_unit == "500+" {
            return Self::Unbounded;
        }
        if let Ok(n) = without_unit.parse::<u16>() {
            return Self::Words(n);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "short" => Self::Short,
            "medium" => Self::Medium,
            "long" => Self::Long,
            _ => Self::Custom(trimmed.to_string()),
        }
    }

    /// Approximate word target, `None` for "500+" and free text.
    pub fn target_words(&self) -> Option<u16> {
        match self {
            Self::Words(n) => Some(*n),
            Self::Short => Some(100),
            Self::Medium => Some(200),
            Self::Long => Some(350),
            Self::Unbounded | Self::Custom(_) => None,
        }
    }
}

impl Default for PromptLength {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for PromptLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Words(n) => write!(f, "{n}"),
            Self::Unbounded => f.write_str("500+"),
            Self::Short => f.write_str("Short"),
            Self::Medium => f.write_str("Medium"),
            Self::Long => f.write_str("Long"),
            Self::Custom(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PromptLength {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<u16> for PromptLength {
    fn from(words: u16) -> Self {
        Self::Words(words)
    }
}

impl Serialize for PromptLength {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PromptLength {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // The form submits strings, older clients sent bare numbers.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u16),
            Text(String),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self::Words(n),
            Raw::Text(s) => Self::parse(&s),
        })
    }
}

/// Creative parameters accompanying one generation request.
///
/// Built fresh from the current form state at submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    pub style: VisualStyle,
    pub camera_style: CameraStyle,
    pub camera_direction: CameraDirection,
    pub pacing: Pacing,
    pub special_effects: SpecialEffects,
    pub prompt_length: PromptLength,
    /// Comma-separated extra elements, e.g. "neon signs, flying cars"
    pub custom_elements: String,
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: impl Into<VisualStyle>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_camera_style(mut self, camera_style: impl Into<CameraStyle>) -> Self {
        self.camera_style = camera_style.into();
        self
    }

    pub fn with_camera_direction(mut self, direction: impl Into<CameraDirection>) -> Self {
        self.camera_direction = direction.into();
        self
    }

    pub fn with_pacing(mut self, pacing: impl Into<Pacing>) -> Self {
        self.pacing = pacing.into();
        self
    }

    pub fn with_special_effects(mut self, effects: impl Into<SpecialEffects>) -> Self {
        self.special_effects = effects.into();
        self
    }

    pub fn with_prompt_length(mut self, length: impl Into<PromptLength>) -> Self {
        self.prompt_length = length.into();
        self
    }

    pub fn with_custom_elements(mut self, elements: impl Into<String>) -> Self {
        self.custom_elements = elements.into();
        self
    }

    /// Custom elements split on commas, trimmed, empties dropped.
    pub fn custom_element_list(&self) -> Vec<&str> {
        self.custom_elements
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}
