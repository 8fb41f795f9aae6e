//! Begründungstexte für eine Empfehlung.
//!
//! [`explain`] wertet bis zu sechs Regelgruppen in fester Reihenfolge aus.
//! Jede Gruppe steuert höchstens einen Satz bei; greift keine, liefert ein
//! tag-basierter Rückfall genau einen Satz. Die Ausgabe ist daher nie leer
//! und hängt nur von den Eingaben ab.

use vibesnack_core::{Activity, Mood, PriceTier, Snack, Tag, UserContext};

/// Erzeugt die Begründung für `snack` im Kontext `ctx`.
#[must_use]
pub fn explain(ctx: &UserContext, snack: &Snack) -> String {
    let mut reasons: Vec<&'static str> = Vec::with_capacity(6);

    reasons.extend(name_hint(&snack.name));
    reasons.extend(hunger_match(ctx.hunger, snack));
    reasons.extend(activity_match(ctx.activity, snack));
    reasons.extend(time_match(ctx.hour, snack));

    if snack.price == PriceTier::Low && reasons.is_empty() {
        reasons.push("Great value for a quick bite.");
    } else if snack.price == PriceTier::High && ctx.mood == Mood::Sad {
        reasons.push("Treat yourself, you deserve it.");
    }

    if reasons.is_empty() {
        reasons.push(tag_fallback(snack));
    }

    reasons.join(" ")
}

fn name_hint(name: &str) -> Option<&'static str> {
    if name.contains("Yogurt") {
        Some("Creamy and protein-packed.")
    } else if ["Banana", "Fruit", "Apple"].iter().any(|k| name.contains(k)) {
        Some("Nature's own fast food.")
    } else if name.contains("Chocolate") {
        Some("A classic mood booster.")
    } else if name.contains("Coffee") {
        Some("For that caffeine kick.")
    } else {
        None
    }
}

fn hunger_match(hunger: u8, snack: &Snack) -> Option<&'static str> {
    if hunger >= 4 {
        Some(if snack.heavy {
            "Since you're very hungry, this substantial snack will fill you up."
        } else if snack.has_tag(Tag::Healthy) {
            "A high-volume, healthy option to satisfy your hunger."
        } else {
            "A nice portion to help curb that major hunger."
        })
    } else if hunger <= 2 {
        Some(if !snack.heavy {
            "It's light and won't ruin your appetite."
        } else if snack.has_tag(Tag::Sweet) {
            "A small sweet treat just for the taste."
        } else {
            "A bit indulgent, but perfect if you want just one satisfying bite."
        })
    } else {
        None
    }
}

fn activity_match(activity: Activity, snack: &Snack) -> Option<&'static str> {
    let tag = |t| snack.has_tag(t);
    match activity {
        Activity::Gaming => Some(if tag(Tag::Healthy) {
            "Fresh and clean - keeps your hands grease-free for gaming."
        } else if tag(Tag::Quick) && !snack.heavy {
            "Easy to pop in your mouth between rounds."
        } else if snack.heavy {
            "Hearty fuel for a long gaming session."
        } else {
            "Good for a break between matches."
        }),
        Activity::Studying => {
            if tag(Tag::Healthy) {
                Some("Brain food to keep you focused without the crash.")
            } else if tag(Tag::Sweet) {
                Some("A little sugar rush to keep you going.")
            } else if tag(Tag::Savory) {
                Some("A savory distraction to reward your hard work.")
            } else {
                None
            }
        }
        Activity::Gym => Some(if tag(Tag::Healthy) {
            "Great for fueling up or recovering."
        } else if snack.heavy {
            "Good for bulking up!"
        } else {
            "You earned a treat!"
        }),
        Activity::Chilling => {
            if tag(Tag::Savory) {
                Some("Perfect savory companion for relaxing.")
            } else if tag(Tag::Sweet) {
                Some("Sweet comfort food for downtime.")
            } else if tag(Tag::Healthy) {
                Some("A refreshing snack to chill with.")
            } else {
                None
            }
        }
        Activity::None => None,
    }
}

// The explanation windows are narrower than the classifier's time-of-day
// categories: 7-10, 14-16 and 20-23.
fn time_match(hour: u8, snack: &Snack) -> Option<&'static str> {
    let tag = |t| snack.has_tag(t);
    match hour {
        7..=10 => Some(if tag(Tag::Healthy) {
            "A healthy start to your morning."
        } else if tag(Tag::Sweet) {
            "A sweet breakfast treat."
        } else {
            "A tasty morning bite."
        }),
        14..=16 => Some(if tag(Tag::Healthy) {
            "A refreshing afternoon pick-me-up."
        } else if tag(Tag::Sweet) {
            "Perfect for that afternoon sugar craving."
        } else if tag(Tag::Savory) {
            "A savory kick to wake you up."
        } else {
            "Beats the afternoon slump."
        }),
        20..=23 => Some(if snack.heavy {
            "A hearty late-night meal."
        } else if tag(Tag::Healthy) {
            "Light enough to not disrupt your sleep."
        } else {
            "A light late-night munch."
        }),
        _ => None,
    }
}

fn tag_fallback(snack: &Snack) -> &'static str {
    if snack.has_tag(Tag::Spicy) {
        "Spices things up a bit!"
    } else if snack.has_tag(Tag::Sweet) {
        "Satisfies your sweet tooth."
    } else if snack.has_tag(Tag::Healthy) {
        "A guilt-free choice."
    } else {
        "Matches your current vibe perfectly."
    }
}

/// Kurze persönliche Nachricht für den Top-Vorschlag.
#[must_use]
pub fn personalized_message(ctx: &UserContext, snack_name: &str) -> String {
    let mut msg = format!(
        "It's around {}:00 and you're feeling {}. ",
        ctx.hour, ctx.mood
    );
    if ctx.hunger >= 4 {
        msg.push_str("You're pretty hungry! ");
    } else if ctx.hunger <= 2 {
        msg.push_str("Just looking for a light nibble? ");
    }
    if ctx.activity != Activity::None {
        msg.push_str(&format!("Since you're {}, ", ctx.activity));
    }
    msg.push_str(&format!("I recommend **{snack_name}**."));
    msg
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use vibesnack_core::{Catalog, Diet};

    fn ctx(hour: u8, mood: Mood, hunger: u8, activity: Activity) -> UserContext {
        UserContext::new(hour, mood, hunger, Diet::Veg, activity).expect("valid context")
    }

    fn builtin(id: u32) -> Snack {
        Catalog::builtin().get(id).cloned().expect("builtin snack")
    }

    #[test]
    fn rules_fire_in_priority_order() {
        // Fruit Salad: healthy, not heavy, medium price
        let text = explain(&ctx(8, Mood::Happy, 5, Activity::Gym), &builtin(5));
        assert_eq!(
            text,
            "Nature's own fast food. \
             A high-volume, healthy option to satisfy your hunger. \
             Great for fueling up or recovering. \
             A healthy start to your morning."
        );
    }

    #[test]
    fn low_price_only_when_nothing_else_fired() {
        // Masala Popcorn, hunger 3, no activity, hour outside all brackets
        let quiet = ctx(12, Mood::Bored, 3, Activity::None);
        assert_eq!(explain(&quiet, &builtin(1)), "Great value for a quick bite.");

        let gaming = ctx(12, Mood::Bored, 3, Activity::Gaming);
        assert_eq!(
            explain(&gaming, &builtin(1)),
            "Easy to pop in your mouth between rounds."
        );
    }

    #[test]
    fn sad_mood_and_high_price() {
        // Grilled Fish: savory, heavy, high price
        let text = explain(&ctx(12, Mood::Sad, 3, Activity::None), &builtin(11));
        assert_eq!(text, "Treat yourself, you deserve it.");

        let text = explain(&ctx(21, Mood::Sad, 4, Activity::Chilling), &builtin(11));
        assert_eq!(
            text,
            "Since you're very hungry, this substantial snack will fill you up. \
             Perfect savory companion for relaxing. \
             A hearty late-night meal. \
             Treat yourself, you deserve it."
        );
    }

    #[test]
    fn terminal_fallback_by_tag() {
        // Medium price, no matching rule: Ice Cream Cup (sweet)
        let quiet = ctx(12, Mood::Happy, 3, Activity::None);
        assert_eq!(explain(&quiet, &builtin(12)), "Satisfies your sweet tooth.");
        // Paneer Sandwich: savory only
        assert_eq!(
            explain(&quiet, &builtin(3)),
            "Matches your current vibe perfectly."
        );
        // Protein Shake: healthy
        assert_eq!(explain(&quiet, &builtin(6)), "A guilt-free choice.");
    }

    #[test]
    fn studying_without_flavor_tag_adds_nothing() {
        let plain = Snack {
            id: 99,
            name: "Plain Crackers".into(),
            tags: vec![Tag::Veg, Tag::Spicy],
            price: PriceTier::Medium,
            heavy: false,
        };
        let text = explain(&ctx(12, Mood::Happy, 3, Activity::Studying), &plain);
        assert_eq!(text, "Spices things up a bit!");
    }

    #[test]
    fn never_empty_for_any_builtin_combination() {
        let catalog = Catalog::builtin();
        for snack in catalog.iter() {
            for hour in 0..=23 {
                for &mood in Mood::ALL {
                    for hunger in 1..=5 {
                        for &activity in Activity::ALL {
                            let text = explain(&ctx(hour, mood, hunger, activity), snack);
                            assert!(!text.is_empty());
                            assert!(!text.contains("  "));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn personalized_message_mentions_context() {
        let msg = personalized_message(&ctx(9, Mood::Stressed, 5, Activity::Studying), "Samosa");
        assert_eq!(
            msg,
            "It's around 9:00 and you're feeling stressed. You're pretty hungry! \
             Since you're studying, I recommend **Samosa**."
        );

        let msg = personalized_message(&ctx(18, Mood::Lazy, 3, Activity::None), "Samosa");
        assert_eq!(
            msg,
            "It's around 18:00 and you're feeling lazy. I recommend **Samosa**."
        );
    }
}
