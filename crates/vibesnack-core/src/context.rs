//! Nutzerkontext einer einzelnen Empfehlungsanfrage.
//!
//! Der [`UserContext`] wird pro Interaktion erzeugt und nicht persistiert.
//! Die Aufzählungstypen serialisieren in Kleinschreibung, so wie sie auch in
//! JSON-Anfragen und auf der Kommandozeile erscheinen.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ContextError;

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( #[serde(rename = $text)] $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ContextError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $( $text => Ok($name::$variant), )+
                    other => Err(ContextError::UnknownVariant {
                        field: $field,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

vocabulary! {
    /// Stimmung des Nutzers.
    Mood, "mood" {
        Happy => "happy",
        Sad => "sad",
        Bored => "bored",
        Stressed => "stressed",
        Energetic => "energetic",
        Lazy => "lazy",
    }
}

vocabulary! {
    /// Ernährungspräferenz; wirkt als harter Filter im Ranking.
    Diet, "diet" {
        Veg => "veg",
        NonVeg => "non-veg",
    }
}

vocabulary! {
    /// Aktueller Aktivitätskontext.
    Activity, "context" {
        Studying => "studying",
        Gaming => "gaming",
        Chilling => "chilling",
        Gym => "gym",
        None => "none",
    }
}

vocabulary! {
    /// Tageszeit-Kategorie, abgeleitet aus der Stunde.
    TimeOfDay, "time of day" {
        Morning => "morning",
        Afternoon => "afternoon",
        Evening => "evening",
        Night => "night",
    }
}

impl Default for Activity {
    fn default() -> Self {
        Activity::None
    }
}

impl TimeOfDay {
    /// Morgens 7–11, nachmittags 12–16, abends 17–20, sonst Nacht.
    #[must_use]
    pub fn from_hour(hour: u8) -> Self {
        match hour {
            7..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }
}

/// Kontextsignale einer Anfrage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    /// Stunde des Tages, 0–23.
    pub hour: u8,
    pub mood: Mood,
    /// Hunger auf einer Skala von 1 (kaum) bis 5 (sehr).
    pub hunger: u8,
    pub diet: Diet,
    #[serde(rename = "context", default)]
    pub activity: Activity,
}

impl UserContext {
    pub const HOUR_MAX: u8 = 23;
    pub const HUNGER_MIN: u8 = 1;
    pub const HUNGER_MAX: u8 = 5;

    /// Erzeugt einen validierten Kontext.
    pub fn new(
        hour: u8,
        mood: Mood,
        hunger: u8,
        diet: Diet,
        activity: Activity,
    ) -> Result<Self, ContextError> {
        let ctx = Self {
            hour,
            mood,
            hunger,
            diet,
            activity,
        };
        ctx.validate()?;
        Ok(ctx)
    }

    /// Prüft die numerischen Felder; die Enums sind per Konstruktion gültig.
    pub fn validate(&self) -> Result<(), ContextError> {
        if self.hour > Self::HOUR_MAX {
            return Err(ContextError::HourOutOfRange(self.hour));
        }
        if !(Self::HUNGER_MIN..=Self::HUNGER_MAX).contains(&self.hunger) {
            return Err(ContextError::HungerOutOfRange(self.hunger));
        }
        Ok(())
    }

    #[must_use]
    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from_hour(self.hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn time_of_day_brackets() {
        assert_eq!(TimeOfDay::from_hour(7), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(16), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(20), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(21), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::Night);
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert_eq!(
            UserContext::new(24, Mood::Happy, 3, Diet::Veg, Activity::None),
            Err(ContextError::HourOutOfRange(24))
        );
        assert_eq!(
            UserContext::new(10, Mood::Happy, 0, Diet::Veg, Activity::None),
            Err(ContextError::HungerOutOfRange(0))
        );
        assert_eq!(
            UserContext::new(10, Mood::Happy, 6, Diet::Veg, Activity::None),
            Err(ContextError::HungerOutOfRange(6))
        );
        assert!(UserContext::new(23, Mood::Lazy, 5, Diet::NonVeg, Activity::Gym).is_ok());
    }

    #[test]
    fn parses_vocabulary_case_insensitively() {
        assert_eq!("Non-Veg".parse::<Diet>(), Ok(Diet::NonVeg));
        assert_eq!(" gaming ".parse::<Activity>(), Ok(Activity::Gaming));
        let err = "hangry".parse::<Mood>().unwrap_err();
        assert_eq!(err.to_string(), "unknown mood: 'hangry'");
    }

    #[test]
    fn deserializes_request_json() {
        let ctx: UserContext = serde_json::from_value(json!({
            "hour": 15,
            "mood": "stressed",
            "hunger": 4,
            "diet": "non-veg",
            "context": "studying"
        }))
        .expect("context should deserialize");
        assert_eq!(ctx.activity, Activity::Studying);
        assert_eq!(ctx.diet, Diet::NonVeg);
        assert_eq!(ctx.time_of_day(), TimeOfDay::Afternoon);

        let ctx: UserContext = serde_json::from_value(json!({
            "hour": 9, "mood": "happy", "hunger": 2, "diet": "veg"
        }))
        .expect("context without activity should deserialize");
        assert_eq!(ctx.activity, Activity::None);
    }
}
